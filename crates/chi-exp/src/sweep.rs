use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chi_core::errors::{ChiError, ErrorInfo};
use chi_core::{FrequencyGrid, GridSpec, PlasmaParams, SusceptibilityEvaluator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compare::{compare, Comparison};
use crate::codec::{stable_hash_string, write_canonical_json};
use crate::persist::{error_file_name, format_angle, save_error_array};
use crate::plot::{plot_error_curve, PlotStyle};
use crate::stat::ErrorStats;

/// Angles, grid and parameters for a (possibly partitioned) sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Base parameters; the angle is overridden per job.
    pub params: PlasmaParams,
    /// Frequency-ratio grid shared by every angle.
    pub grid: GridSpec,
    /// Observation angles in degrees.
    pub angles: Vec<f64>,
    /// Number of workers the angles are partitioned across.
    #[serde(default = "SweepPlan::default_workers")]
    pub workers: usize,
}

impl SweepPlan {
    const fn default_workers() -> usize {
        1
    }

    /// Single-angle plan with one worker.
    pub fn single(params: PlasmaParams, grid: GridSpec) -> Self {
        Self {
            angles: vec![params.angle_deg()],
            params,
            grid,
            workers: Self::default_workers(),
        }
    }
}

/// Disjoint subset of the angle list owned by one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerAssignment {
    /// Worker index.
    pub rank: usize,
    /// Angles in degrees, in plan order.
    pub angles: Vec<f64>,
}

/// Splits angles round-robin: angle `i` goes to rank `i % workers`.
///
/// Ranks beyond the number of angles receive empty assignments.
pub fn partition_angles(angles: &[f64], workers: usize) -> Vec<WorkerAssignment> {
    let workers = workers.max(1);
    let mut assignments: Vec<WorkerAssignment> = (0..workers)
        .map(|rank| WorkerAssignment {
            rank,
            angles: Vec::new(),
        })
        .collect();
    for (idx, angle) in angles.iter().enumerate() {
        assignments[idx % workers].angles.push(*angle);
    }
    assignments
}

/// The interpolated and direct evaluators for one angle.
pub struct EvaluatorPair {
    /// Interpolated approximation.
    pub approx: Box<dyn SusceptibilityEvaluator>,
    /// Direct-integration ground truth.
    pub reference: Box<dyn SusceptibilityEvaluator>,
}

impl std::fmt::Debug for EvaluatorPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorPair")
            .field("approx", &self.approx.name())
            .field("reference", &self.reference.name())
            .finish()
    }
}

/// Builds the evaluator pair each worker uses for an angle.
pub trait EvaluatorSource: Send + Sync {
    /// Returns fresh evaluators for `params` observed at `angle_deg`.
    fn evaluators(&self, params: &PlasmaParams, angle_deg: f64) -> Result<EvaluatorPair, ChiError>;
}

impl<F> EvaluatorSource for F
where
    F: Fn(&PlasmaParams, f64) -> Result<EvaluatorPair, ChiError> + Send + Sync,
{
    fn evaluators(&self, params: &PlasmaParams, angle_deg: f64) -> Result<EvaluatorPair, ChiError> {
        self(params, angle_deg)
    }
}

/// Options governing sweep execution.
#[derive(Debug, Clone, Default)]
pub struct SweepOpts {
    /// Render an SVG next to each error file when set.
    pub plot: Option<PlotStyle>,
}

/// Outcome for one angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleReport {
    /// Worker that produced the result.
    pub rank: usize,
    /// Observation angle in degrees.
    pub angle_deg: f64,
    /// Error file path relative to the output directory.
    pub error_file: String,
    /// Plot path relative to the output directory, when rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_file: Option<String>,
    /// Number of samples written.
    pub samples: usize,
    /// Summary over the finite errors.
    pub stats: ErrorStats,
}

/// Aggregate report persisted as `sweep_report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Hash of the canonical plan.
    pub plan_hash: String,
    /// Worker count actually used.
    pub workers: usize,
    /// Per-angle outcomes ordered by rank, then plan order.
    pub angles: Vec<AngleReport>,
}

/// Directory a rank writes into: the root for a single worker, else `rank_NN`.
pub fn rank_dir(out: &Path, rank: usize, workers: usize) -> PathBuf {
    if workers > 1 {
        out.join(format!("rank_{rank:02}"))
    } else {
        out.to_path_buf()
    }
}

/// Runs the sweep, writing one error file per angle and the JSON report.
pub fn run_sweep<S>(
    plan: &SweepPlan,
    source: &S,
    out: &Path,
    opts: &SweepOpts,
) -> Result<SweepReport, ChiError>
where
    S: EvaluatorSource + ?Sized,
{
    if plan.angles.is_empty() {
        return Err(ChiError::Params(
            ErrorInfo::new("no-angles", "sweep plan lists no angles")
                .with_hint("add at least one entry under `angles`"),
        ));
    }
    reject_duplicate_angles(&plan.angles)?;
    let grid = FrequencyGrid::new(plan.grid)?;
    let plan_hash = stable_hash_string(plan)?;
    fs::create_dir_all(out).map_err(|err| ChiError::io("sweep_out_dir", err))?;

    let workers = plan.workers.max(1);
    let assignments = partition_angles(&plan.angles, workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|err| ChiError::io("thread_pool", err))?;

    let results: Result<Vec<Vec<AngleReport>>, ChiError> = pool.install(|| {
        assignments
            .par_iter()
            .map(|assignment| run_worker(plan, &grid, source, out, workers, assignment, opts))
            .collect()
    });

    let mut angles: Vec<AngleReport> = results?.into_iter().flatten().collect();
    angles.sort_by_key(|report| report.rank);
    let report = SweepReport {
        plan_hash,
        workers,
        angles,
    };
    write_canonical_json(&out.join("sweep_report.json"), &report)?;
    Ok(report)
}

// Angles that share a file name would overwrite each other's output.
fn reject_duplicate_angles(angles: &[f64]) -> Result<(), ChiError> {
    let mut seen = BTreeSet::new();
    for (idx, angle) in angles.iter().enumerate() {
        let key = format_angle(*angle);
        if !seen.insert(key.clone()) {
            return Err(ChiError::Params(
                ErrorInfo::new("duplicate-angle", "sweep plan lists an angle twice")
                    .with_context("index", idx.to_string())
                    .with_context("angle", key)
                    .with_hint("angles are compared after rounding to 1e-6 degrees"),
            ));
        }
    }
    Ok(())
}

fn run_worker<S>(
    plan: &SweepPlan,
    grid: &FrequencyGrid,
    source: &S,
    out: &Path,
    workers: usize,
    assignment: &WorkerAssignment,
    opts: &SweepOpts,
) -> Result<Vec<AngleReport>, ChiError>
where
    S: EvaluatorSource + ?Sized,
{
    debug!(rank = assignment.rank, angles = ?assignment.angles, "worker assignment");
    let dir = rank_dir(out, assignment.rank, workers);
    let mut reports = Vec::with_capacity(assignment.angles.len());
    for &angle_deg in &assignment.angles {
        let params = plan.params.with_angle_deg(angle_deg);
        let pair = source.evaluators(&params, angle_deg)?;
        let comparison = compare(&pair.approx, &pair.reference, &params, grid)?;
        let report = persist_angle(&dir, out, assignment.rank, angle_deg, &params, &comparison, opts)?;
        info!(
            rank = assignment.rank,
            angle_deg,
            samples = report.samples,
            max_error = ?report.stats.max,
            file = %report.error_file,
            "angle complete"
        );
        reports.push(report);
    }
    Ok(reports)
}

fn persist_angle(
    dir: &Path,
    out: &Path,
    rank: usize,
    angle_deg: f64,
    params: &PlasmaParams,
    comparison: &Comparison,
    opts: &SweepOpts,
) -> Result<AngleReport, ChiError> {
    let file_name = error_file_name(params, angle_deg);
    let error_path = dir.join(&file_name);
    save_error_array(&error_path, &comparison.error)?;

    let plot_file = match &opts.plot {
        Some(style) => {
            let plot_path = error_path.with_extension("svg");
            plot_error_curve(&plot_path, &comparison.ratios, &comparison.error, style)?
                .then(|| relative_display(out, &plot_path))
        }
        None => None,
    };

    Ok(AngleReport {
        rank,
        angle_deg,
        error_file: relative_display(out, &error_path),
        plot_file,
        samples: comparison.len(),
        stats: ErrorStats::from_errors(&comparison.error),
    })
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
