use chi_core::errors::{ChiError, ErrorInfo};
use chi_core::{cyclotron_frequency, EvalPoint, FrequencyGrid, PlasmaParams, SusceptibilityEvaluator};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Index-aligned result of one spline-versus-integration comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Frequency ratios `nu / nu_c`.
    pub ratios: Vec<f64>,
    /// Interpolated evaluator output.
    pub spline: Vec<f64>,
    /// Direct integration output.
    pub integrated: Vec<f64>,
    /// Absolute relative error per sample.
    pub error: Vec<f64>,
}

impl Comparison {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// True when the comparison holds no samples.
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Count of NaN or infinite errors (zero ground truth or evaluator blow-up).
    pub fn non_finite(&self) -> usize {
        self.error.iter().filter(|value| !value.is_finite()).count()
    }
}

/// `|(approx - truth) / truth|`.
///
/// Unguarded: a zero `truth` gives infinity, or NaN when `approx` is also zero.
pub fn relative_error(approx: f64, truth: f64) -> f64 {
    ((approx - truth) / truth).abs()
}

/// Elementwise [`relative_error`]; the slices must be the same length.
pub fn relative_errors(approx: &[f64], truth: &[f64]) -> Result<Vec<f64>, ChiError> {
    if approx.len() != truth.len() {
        return Err(ChiError::Evaluator(
            ErrorInfo::new("length-mismatch", "approximation and truth differ in length")
                .with_context("approx", approx.len().to_string())
                .with_context("truth", truth.len().to_string()),
        ));
    }
    Ok(approx
        .iter()
        .zip(truth)
        .map(|(a, t)| relative_error(*a, *t))
        .collect())
}

/// Evaluates `evaluator` at every grid frequency for the given parameters.
pub fn evaluate_grid<E>(
    evaluator: &E,
    params: &PlasmaParams,
    grid: &FrequencyGrid,
) -> Result<Vec<f64>, ChiError>
where
    E: SusceptibilityEvaluator + ?Sized,
{
    let nu_c = cyclotron_frequency(params.magnetic_field);
    grid.ratios()
        .iter()
        .enumerate()
        .map(|(idx, ratio)| {
            let point = EvalPoint::new(ratio * nu_c, *params);
            evaluator.evaluate(&point).map_err(|err| {
                err.with_context("evaluator", evaluator.name())
                    .with_context("sample", idx.to_string())
                    .with_context("nu_ratio", ratio.to_string())
            })
        })
        .collect()
}

/// Runs both evaluators over the grid and computes the relative error.
pub fn compare<A, R>(
    approx: &A,
    reference: &R,
    params: &PlasmaParams,
    grid: &FrequencyGrid,
) -> Result<Comparison, ChiError>
where
    A: SusceptibilityEvaluator + ?Sized,
    R: SusceptibilityEvaluator + ?Sized,
{
    let spline = evaluate_grid(approx, params, grid)?;
    let integrated = evaluate_grid(reference, params, grid)?;
    let error = relative_errors(&spline, &integrated)?;
    let comparison = Comparison {
        ratios: grid.ratios().to_vec(),
        spline,
        integrated,
        error,
    };
    let non_finite = comparison.non_finite();
    if non_finite > 0 {
        warn!(
            non_finite,
            samples = comparison.len(),
            angle_deg = params.angle_deg(),
            "relative error is not finite where the integrated value vanishes"
        );
    }
    Ok(comparison)
}
