use chi_core::{logspace, ChiError, FrequencyGrid, GridSpec, PlasmaParams};
use chi_exp::{compare, run_sweep, EvaluatorPair, SweepOpts, SweepPlan, TableEvaluator};
use criterion::{criterion_group, criterion_main, Criterion};

fn chi_like(ratio: f64) -> f64 {
    -(1.0 + 0.1 * ratio.ln()) / (ratio * ratio)
}

fn table(name: &str, knots: usize) -> TableEvaluator {
    let rows: Vec<(f64, f64)> = logspace(0.0, 4.0, knots)
        .into_iter()
        .map(|ratio| (ratio, chi_like(ratio)))
        .collect();
    TableEvaluator::from_rows(name, &rows).expect("table")
}

fn bench_compare(c: &mut Criterion) {
    let params = PlasmaParams::default();
    let grid = FrequencyGrid::new(GridSpec {
        log_min: 1.0,
        log_max: 3.0,
        samples: 1000,
    })
    .expect("grid");
    let approx = table("coarse", 41);
    let reference = table("dense", 4001);
    c.bench_function("compare_throughput", |b| {
        b.iter(|| {
            let _ = compare(&approx, &reference, &params, &grid).expect("compare");
        });
    });
}

fn bench_sweep(c: &mut Criterion) {
    let plan = SweepPlan {
        params: PlasmaParams::default(),
        grid: GridSpec::default(),
        angles: (0..9).map(|i| 5.0 + 10.0 * f64::from(i)).collect(),
        workers: 3,
    };
    let source = |_: &PlasmaParams, _: f64| -> Result<EvaluatorPair, ChiError> {
        Ok(EvaluatorPair {
            approx: Box::new(table("coarse", 41)),
            reference: Box::new(table("dense", 401)),
        })
    };
    let out = tempfile::tempdir().expect("tmp dir");
    c.bench_function("sweep_throughput", |b| {
        b.iter(|| {
            let _ = run_sweep(&plan, &source, out.path(), &SweepOpts::default()).expect("sweep");
        });
    });
}

criterion_group!(benches, bench_compare, bench_sweep);
criterion_main!(benches);
