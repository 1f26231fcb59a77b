use std::fs;
use std::path::{Path, PathBuf};

use chi_core::{
    ChiError, ConstantEvaluator, ErrorInfo, GridSpec, PlasmaParams, SusceptibilityEvaluator,
};
use chi_exp::{
    from_yaml_slice, resolve_template, EvaluatorPair, EvaluatorSource, PlotStyle, SweepPlan,
    TableEvaluator,
};
use serde::{Deserialize, Serialize};

/// YAML run configuration consumed by `chi-cli run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Physical parameters. The angle is taken from `angles`.
    #[serde(default)]
    pub params: PlasmaParams,
    /// Frequency-ratio grid.
    #[serde(default)]
    pub grid: GridSpec,
    /// Observation angles in degrees.
    #[serde(default = "default_angles")]
    pub angles: Vec<f64>,
    /// Interpolated evaluator.
    pub approx: EvaluatorSpec,
    /// Direct-integration evaluator.
    pub reference: EvaluatorSpec,
    /// Number of workers the angles are split across.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Output location and artefacts.
    #[serde(default)]
    pub output: OutputConfig,
    /// Style used when `output.plot` is set.
    #[serde(default)]
    pub plot_style: PlotStyle,
}

fn default_angles() -> Vec<f64> {
    vec![60.0]
}

fn default_workers() -> usize {
    1
}

/// Where one evaluator's values come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluatorSpec {
    /// Two-column table; the path may hold `{angle}`, `{component}`,
    /// `{part}` and `{dist}` placeholders.
    Table {
        /// Path template, relative to the configuration file.
        path: String,
    },
    /// Same value at every frequency.
    Constant {
        /// Returned value.
        value: f64,
    },
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving error files and the sweep report.
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    /// Render an SVG per angle.
    #[serde(default)]
    pub plot: bool,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            plot: false,
        }
    }
}

impl RunConfig {
    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, ChiError> {
        let bytes = fs::read(path).map_err(|err| {
            ChiError::Io(
                ErrorInfo::new("config_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_yaml_slice(&bytes)
    }

    /// Sweep plan described by this configuration.
    pub fn plan(&self) -> SweepPlan {
        SweepPlan {
            params: self.params,
            grid: self.grid,
            angles: self.angles.clone(),
            workers: self.workers,
        }
    }

    /// Evaluator source resolving table paths against `base`.
    pub fn source(&self, base: &Path) -> ConfiguredSource {
        ConfiguredSource {
            approx: self.approx.clone(),
            reference: self.reference.clone(),
            base: base.to_path_buf(),
        }
    }
}

/// Builds evaluators from the configured specs for each angle.
#[derive(Debug, Clone)]
pub struct ConfiguredSource {
    approx: EvaluatorSpec,
    reference: EvaluatorSpec,
    base: PathBuf,
}

impl ConfiguredSource {
    fn build(
        &self,
        name: &str,
        spec: &EvaluatorSpec,
        params: &PlasmaParams,
        angle_deg: f64,
    ) -> Result<Box<dyn SusceptibilityEvaluator>, ChiError> {
        match spec {
            EvaluatorSpec::Table { path } => {
                let resolved = self.base.join(resolve_template(path, params, angle_deg));
                Ok(Box::new(TableEvaluator::load(name, &resolved)?))
            }
            EvaluatorSpec::Constant { value } => Ok(Box::new(ConstantEvaluator::new(*value))),
        }
    }
}

impl EvaluatorSource for ConfiguredSource {
    fn evaluators(&self, params: &PlasmaParams, angle_deg: f64) -> Result<EvaluatorPair, ChiError> {
        Ok(EvaluatorPair {
            approx: self.build("approx", &self.approx, params, angle_deg)?,
            reference: self.build("reference", &self.reference, params, angle_deg)?,
        })
    }
}
