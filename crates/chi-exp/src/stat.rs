use serde::{Deserialize, Serialize};

/// Summary of one error array. Statistics cover the finite entries only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    /// Number of finite entries summarised.
    pub finite: usize,
    /// Number of NaN or infinite entries excluded.
    pub non_finite: usize,
    /// Largest finite error, `None` when nothing is finite.
    pub max: Option<f64>,
    /// Mean finite error.
    pub mean: Option<f64>,
    /// 5th percentile estimate.
    pub q05: Option<f64>,
    /// Median estimate.
    pub q50: Option<f64>,
    /// 95th percentile estimate.
    pub q95: Option<f64>,
}

impl ErrorStats {
    /// Builds the summary for the provided error values.
    pub fn from_errors(errors: &[f64]) -> Self {
        let mut values: Vec<f64> = errors.iter().copied().filter(|v| v.is_finite()).collect();
        let non_finite = errors.len() - values.len();
        values.sort_by(f64::total_cmp);
        let finite = values.len();
        if values.is_empty() {
            return Self {
                finite,
                non_finite,
                max: None,
                mean: None,
                q05: None,
                q50: None,
                q95: None,
            };
        }
        Self {
            finite,
            non_finite,
            max: values.last().copied(),
            mean: Some(values.iter().sum::<f64>() / finite as f64),
            q05: Some(percentile(&values, 0.05)),
            q50: Some(percentile(&values, 0.5)),
            q95: Some(percentile(&values, 0.95)),
        }
    }
}

// Linear interpolation between closest ranks of a sorted slice.
fn percentile(values: &[f64], quantile: f64) -> f64 {
    let position = quantile * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        values[lower]
    } else {
        let weight = position - lower as f64;
        values[lower] * (1.0 - weight) + values[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_non_finite_values() {
        let stats = ErrorStats::from_errors(&[0.1, f64::NAN, 0.3, f64::INFINITY, 0.2]);
        assert_eq!(stats.finite, 3);
        assert_eq!(stats.non_finite, 2);
        assert_eq!(stats.max, Some(0.3));
        assert_eq!(stats.q50, Some(0.2));
    }

    #[test]
    fn all_nan_yields_empty_summary() {
        let stats = ErrorStats::from_errors(&[f64::NAN, f64::NAN]);
        assert_eq!(stats.finite, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.max, None);
    }

    #[test]
    fn percentiles_interpolate() {
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let stats = ErrorStats::from_errors(&values);
        assert_eq!(stats.q05, Some(0.5));
        assert_eq!(stats.q95, Some(9.5));
        assert_eq!(stats.mean, Some(5.0));
    }
}
