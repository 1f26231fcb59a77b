//! Full run with the reference parameter set and tabulated evaluators.

use chi_core::{cyclotron_frequency, FrequencyGrid, GridSpec, PlasmaParams, TensorComponent};
use chi_exp::{
    compare, error_file_name, load_error_array, save_error_array, TableEvaluator,
};

fn reference_params() -> PlasmaParams {
    PlasmaParams {
        magnetic_field: 1.0,
        density: 1.0,
        theta_e: 10.0,
        power_law_p: 3.0,
        gamma_min: 1.0,
        gamma_max: 1000.0,
        gamma_cutoff: 1e10,
        kappa: 3.5,
        kappa_width: 10.0,
        component: TensorComponent::try_from(22).expect("component"),
        ..PlasmaParams::default()
    }
    .with_angle_deg(60.0)
}

fn chi_like(ratio: f64) -> f64 {
    -1.0 / (ratio * ratio) * (1.0 + 0.1 * ratio.ln())
}

#[test]
fn ten_ratio_run_writes_ten_lines() {
    let params = reference_params();
    let grid = FrequencyGrid::new(GridSpec {
        log_min: 1.0,
        log_max: 3.0,
        samples: 10,
    })
    .expect("grid");

    // Coarse interpolation table versus a dense direct table.
    let coarse: Vec<(f64, f64)> = chi_core::logspace(0.5, 3.5, 31)
        .into_iter()
        .map(|r| (r, chi_like(r)))
        .collect();
    let dense: Vec<(f64, f64)> = grid.ratios().iter().map(|r| (*r, chi_like(*r))).collect();
    let approx = TableEvaluator::from_rows("spline", &coarse).expect("coarse");
    let reference = TableEvaluator::from_rows("integrated", &dense).expect("dense");

    let comparison = compare(&approx, &reference, &params, &grid).expect("compare");
    assert_eq!(comparison.error.len(), 10);
    for (i, ratio) in grid.ratios().iter().enumerate() {
        assert!((comparison.integrated[i] - chi_like(*ratio)).abs() < 1e-9 * chi_like(*ratio).abs());
        assert!(comparison.error[i] < 5e-2, "ratio {ratio}: {}", comparison.error[i]);
    }

    let temp = tempfile::tempdir().expect("tmp dir");
    let path = temp.path().join(error_file_name(&params, 60.0));
    assert!(path.ends_with("chi_22_real_60deg_PL_error.txt"));
    save_error_array(&path, &comparison.error).expect("save");

    let text = std::fs::read_to_string(&path).expect("read");
    assert_eq!(text.lines().count(), 10);
    assert_eq!(load_error_array(&path).expect("load"), comparison.error);
}

#[test]
fn frequencies_follow_the_cyclotron_scale() {
    let params = reference_params();
    let grid = FrequencyGrid::new(GridSpec::default()).expect("grid");
    let nu = grid.frequencies(params.magnetic_field);
    assert!((nu[0] - 10.0 * cyclotron_frequency(1.0)).abs() < 1e-3);
    assert!((nu[9] - 1000.0 * cyclotron_frequency(1.0)).abs() < 1e-1);
}
