use chi_core::errors::{ChiError, ErrorInfo};

/// Natural cubic spline through a set of knots.
///
/// Second derivatives are solved once at construction; evaluation uses the
/// standard two-knot bracket form.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    second: Vec<f64>,
}

impl CubicSpline {
    /// Builds a natural spline. Knots must be finite and strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, ChiError> {
        if xs.len() != ys.len() {
            return Err(ChiError::Evaluator(
                ErrorInfo::new("spline-shape", "knot columns differ in length")
                    .with_context("xs", xs.len().to_string())
                    .with_context("ys", ys.len().to_string()),
            ));
        }
        if xs.len() < 2 {
            return Err(ChiError::Evaluator(
                ErrorInfo::new("spline-too-short", "a spline needs at least two knots")
                    .with_context("knots", xs.len().to_string()),
            ));
        }
        if let Some(idx) = xs
            .iter()
            .zip(&ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChiError::Evaluator(
                ErrorInfo::new("spline-non-finite", "knots and values must be finite")
                    .with_context("index", idx.to_string())
                    .with_context("x", xs[idx].to_string())
                    .with_context("y", ys[idx].to_string()),
            ));
        }
        if let Some(idx) = xs.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ChiError::Evaluator(
                ErrorInfo::new("spline-order", "knots must be strictly increasing")
                    .with_context("index", (idx + 1).to_string()),
            ));
        }
        let second = natural_second_derivatives(&xs, &ys);
        Ok(Self { xs, ys, second })
    }

    /// Lower and upper knot abscissae.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Number of knots, at least two.
    pub fn knot_count(&self) -> usize {
        self.xs.len()
    }

    /// Evaluates the spline. Points outside the domain use the end cubic.
    pub fn eval(&self, x: f64) -> f64 {
        let xs = &self.xs;
        let hi = match xs.partition_point(|&v| v < x) {
            i if i >= xs.len() => xs.len() - 1,
            0 => 1,
            i => i,
        };
        let lo = hi - 1;

        let h = xs[hi] - xs[lo];
        let a = (xs[hi] - x) / h;
        let b = (x - xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + (h * h / 6.0)
                * ((a * a - 1.0) * a * self.second[lo] + (b * b - 1.0) * b * self.second[hi])
    }
}

// Tridiagonal solve with zero curvature at both ends.
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut second = vec![0.0; n];
    if n < 3 {
        return second;
    }
    let mut scratch = vec![0.0; n];
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * second[i - 1] + 2.0;
        second[i] = (sig - 1.0) / p;
        let slope_diff = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
            - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        scratch[i] =
            (6.0 * slope_diff / (xs[i + 1] - xs[i - 1]) - sig * scratch[i - 1]) / p;
    }
    second[n - 1] = 0.0;
    for k in (0..n - 1).rev() {
        second[k] = second[k] * second[k + 1] + scratch[k];
    }
    second
}
