//! Physical parameter set and selector enums.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ChiError, ErrorInfo};

/// Electron distribution function selected for an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    /// Relativistic Maxwell-Juttner distribution (selector 0).
    Thermal,
    /// Power-law distribution with exponential cutoff (selector 1).
    PowerLaw,
    /// Kappa distribution (selector 2).
    Kappa,
}

impl Distribution {
    /// Numeric selector understood by the external evaluators.
    pub fn selector(self) -> u8 {
        match self {
            Distribution::Thermal => 0,
            Distribution::PowerLaw => 1,
            Distribution::Kappa => 2,
        }
    }

    /// Short label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            Distribution::Thermal => "MJ",
            Distribution::PowerLaw => "PL",
            Distribution::Kappa => "kappa",
        }
    }
}

impl TryFrom<u8> for Distribution {
    type Error = ChiError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Distribution::Thermal),
            1 => Ok(Distribution::PowerLaw),
            2 => Ok(Distribution::Kappa),
            other => Err(ChiError::Params(
                ErrorInfo::new("unknown-distribution", "distribution selector out of range")
                    .with_context("selector", other.to_string())
                    .with_hint("use 0 (thermal), 1 (power-law) or 2 (kappa)"),
            )),
        }
    }
}

/// Real or imaginary part of the susceptibility component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Part {
    /// Real part (selector 1).
    Real,
    /// Imaginary part (selector 0).
    Imaginary,
}

impl Part {
    /// Numeric selector understood by the external evaluators.
    pub fn selector(self) -> u8 {
        match self {
            Part::Real => 1,
            Part::Imaginary => 0,
        }
    }

    /// Short label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            Part::Real => "real",
            Part::Imaginary => "imag",
        }
    }
}

impl TryFrom<u8> for Part {
    type Error = ChiError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(Part::Real),
            0 => Ok(Part::Imaginary),
            other => Err(ChiError::Params(
                ErrorInfo::new("unknown-part", "real/imaginary selector out of range")
                    .with_context("selector", other.to_string()),
            )),
        }
    }
}

/// Two-index tensor component written as a two digit integer (e.g. `22`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TensorComponent {
    row: u8,
    col: u8,
}

impl TensorComponent {
    /// Builds a component from its row and column indices (both in `1..=3`).
    pub fn new(row: u8, col: u8) -> Result<Self, ChiError> {
        if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
            return Err(ChiError::Params(
                ErrorInfo::new("bad-component", "tensor indices must lie in 1..=3")
                    .with_context("row", row.to_string())
                    .with_context("col", col.to_string()),
            ));
        }
        Ok(Self { row, col })
    }

    /// Row index.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Column index.
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Two digit integer form, e.g. `22`.
    pub fn index(&self) -> u8 {
        self.row * 10 + self.col
    }
}

impl TryFrom<u8> for TensorComponent {
    type Error = ChiError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index / 10, index % 10)
    }
}

impl From<TensorComponent> for u8 {
    fn from(component: TensorComponent) -> Self {
        component.index()
    }
}

impl fmt::Display for TensorComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

/// Physical parameter set shared by both evaluators for a run.
///
/// Units are CGS: gauss for the field, cm^-3 for the density. The
/// observation angle is stored in radians. Missing fields deserialize to
/// the [`Default`] values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasmaParams {
    /// Magnetic field strength B.
    pub magnetic_field: f64,
    /// Electron number density n_e.
    pub density: f64,
    /// Observation angle relative to the field, radians.
    pub theta: f64,
    /// Dimensionless electron temperature kT/mc^2.
    pub theta_e: f64,
    /// Power-law index p.
    pub power_law_p: f64,
    /// Lower Lorentz factor bound.
    pub gamma_min: f64,
    /// Upper Lorentz factor bound.
    pub gamma_max: f64,
    /// Exponential cutoff Lorentz factor.
    pub gamma_cutoff: f64,
    /// Kappa distribution index.
    pub kappa: f64,
    /// Kappa distribution width w.
    pub kappa_width: f64,
    /// Tensor component being compared.
    pub component: TensorComponent,
    /// Electron distribution selector.
    pub distribution: Distribution,
    /// Real or imaginary part.
    pub part: Part,
}

impl Default for PlasmaParams {
    fn default() -> Self {
        Self {
            magnetic_field: 1.0,
            density: 1.0,
            theta: 60.0_f64.to_radians(),
            theta_e: 10.0,
            power_law_p: 3.0,
            gamma_min: 1.0,
            gamma_max: 1000.0,
            gamma_cutoff: 1e10,
            kappa: 3.5,
            kappa_width: 10.0,
            component: TensorComponent { row: 2, col: 2 },
            distribution: Distribution::PowerLaw,
            part: Part::Real,
        }
    }
}

impl PlasmaParams {
    /// Returns a copy observing at the given angle in degrees.
    pub fn with_angle_deg(self, degrees: f64) -> Self {
        Self {
            theta: degrees.to_radians(),
            ..self
        }
    }

    /// Observation angle in degrees.
    pub fn angle_deg(&self) -> f64 {
        self.theta.to_degrees()
    }
}
