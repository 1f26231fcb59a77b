//! The single seam behind which both susceptibility evaluators sit.

use crate::constants::cyclotron_frequency;
use crate::errors::ChiError;
use crate::params::PlasmaParams;

/// A single evaluation request: frequency plus the full parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalPoint {
    /// Frequency in Hz.
    pub nu: f64,
    /// Physical parameters of the plasma.
    pub params: PlasmaParams,
}

impl EvalPoint {
    /// Creates an evaluation point.
    pub fn new(nu: f64, params: PlasmaParams) -> Self {
        Self { nu, params }
    }

    /// Frequency ratio `nu / nu_c(B)`.
    pub fn ratio(&self) -> f64 {
        self.nu / cyclotron_frequency(self.params.magnetic_field)
    }
}

/// Evaluates one susceptibility tensor component at a point.
///
/// Implemented by the fast interpolated evaluator and the slow direct
/// integrator alike, so the comparison driver is written once.
pub trait SusceptibilityEvaluator: Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Returns the scalar value of the selected component and part.
    fn evaluate(&self, point: &EvalPoint) -> Result<f64, ChiError>;
}

impl<E: SusceptibilityEvaluator + ?Sized> SusceptibilityEvaluator for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, point: &EvalPoint) -> Result<f64, ChiError> {
        (**self).evaluate(point)
    }
}

/// Evaluator returning the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantEvaluator {
    value: f64,
}

impl ConstantEvaluator {
    /// Creates a constant evaluator.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl SusceptibilityEvaluator for ConstantEvaluator {
    fn name(&self) -> &str {
        "constant"
    }

    fn evaluate(&self, _point: &EvalPoint) -> Result<f64, ChiError> {
        Ok(self.value)
    }
}

/// Adapts an infallible closure into an evaluator.
pub struct FnEvaluator<F> {
    name: String,
    func: F,
}

impl<F> FnEvaluator<F>
where
    F: Fn(&EvalPoint) -> f64 + Send + Sync,
{
    /// Wraps `func` under the given name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> std::fmt::Debug for FnEvaluator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEvaluator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> SusceptibilityEvaluator for FnEvaluator<F>
where
    F: Fn(&EvalPoint) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, point: &EvalPoint) -> Result<f64, ChiError> {
        Ok((self.func)(point))
    }
}
