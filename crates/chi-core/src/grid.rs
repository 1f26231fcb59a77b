//! Log-spaced frequency-ratio grids.

use serde::{Deserialize, Serialize};

use crate::constants::cyclotron_frequency;
use crate::errors::{ChiError, ErrorInfo};

/// Bounds and sample count describing a log-spaced frequency-ratio grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Base-10 exponent of the first ratio.
    #[serde(default = "GridSpec::default_log_min")]
    pub log_min: f64,
    /// Base-10 exponent of the last ratio.
    #[serde(default = "GridSpec::default_log_max")]
    pub log_max: f64,
    /// Number of ratios, endpoints included.
    #[serde(default = "GridSpec::default_samples")]
    pub samples: usize,
}

impl GridSpec {
    const fn default_log_min() -> f64 {
        1.0
    }

    const fn default_log_max() -> f64 {
        3.0
    }

    const fn default_samples() -> usize {
        10
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            log_min: Self::default_log_min(),
            log_max: Self::default_log_max(),
            samples: Self::default_samples(),
        }
    }
}

/// Ordered frequency ratios `nu / nu_c`, fixed once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyGrid {
    spec: GridSpec,
    ratios: Vec<f64>,
}

impl FrequencyGrid {
    /// Builds the grid, rejecting empty or non-increasing specifications.
    pub fn new(spec: GridSpec) -> Result<Self, ChiError> {
        if spec.samples == 0 {
            return Err(ChiError::Grid(
                ErrorInfo::new("empty-grid", "frequency grid needs at least one sample")
                    .with_hint("set grid.samples >= 1"),
            ));
        }
        if !spec.log_min.is_finite() || !spec.log_max.is_finite() {
            return Err(ChiError::Grid(
                ErrorInfo::new("non-finite-bounds", "grid bounds must be finite")
                    .with_context("log_min", spec.log_min.to_string())
                    .with_context("log_max", spec.log_max.to_string()),
            ));
        }
        if spec.samples > 1 && spec.log_max <= spec.log_min {
            return Err(ChiError::Grid(
                ErrorInfo::new("non-increasing", "log_max must exceed log_min")
                    .with_context("log_min", spec.log_min.to_string())
                    .with_context("log_max", spec.log_max.to_string()),
            ));
        }
        Ok(Self {
            spec,
            ratios: logspace(spec.log_min, spec.log_max, spec.samples),
        })
    }

    /// Specification the grid was built from.
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Frequency ratios in increasing order.
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Absolute frequencies `ratio * nu_c(B)` in Hz.
    pub fn frequencies(&self, magnetic_field: f64) -> Vec<f64> {
        let nu_c = cyclotron_frequency(magnetic_field);
        self.ratios.iter().map(|ratio| ratio * nu_c).collect()
    }
}

/// `samples` values spaced evenly in log10 between `10^start` and `10^stop`.
///
/// The exponents follow a linear spacing whose final entry is pinned to
/// `stop`, so both endpoints are exact powers of ten.
pub fn logspace(start: f64, stop: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (stop - start) / (samples - 1) as f64;
            (0..samples)
                .map(|idx| {
                    let exponent = if idx == samples - 1 {
                        stop
                    } else {
                        start + idx as f64 * step
                    };
                    10f64.powf(exponent)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_is_lower_bound() {
        assert_eq!(logspace(2.0, 5.0, 1), vec![100.0]);
    }

    #[test]
    fn frequencies_scale_with_cyclotron_frequency() {
        let grid = FrequencyGrid::new(GridSpec::default()).expect("grid");
        let nu = grid.frequencies(2.0);
        let nu_c = cyclotron_frequency(2.0);
        for (value, ratio) in nu.iter().zip(grid.ratios()) {
            assert!((value / nu_c - ratio).abs() <= 1e-12 * ratio);
        }
    }
}
