//! `# key = value` headers recording the parameters a table was computed for.
//!
//! A table dumped by the physics library is only valid for the parameter set
//! it was computed with. Recording that set in the header lets the evaluator
//! refuse points whose parameters disagree instead of silently returning
//! values for a different plasma.

use chi_core::errors::{ChiError, ErrorInfo};
use chi_core::{Distribution, Part, PlasmaParams, TensorComponent};

// Relative tolerance for recorded scalar parameters.
const PARAM_RTOL: f64 = 1e-9;

/// Scalar plasma parameter addressable by a short key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarParam {
    /// `B`, gauss.
    MagneticField,
    /// `n_e`, cm^-3.
    Density,
    /// `angle`, degrees.
    Angle,
    /// `theta_e`.
    ThetaE,
    /// `p`.
    PowerLawP,
    /// `gamma_min`.
    GammaMin,
    /// `gamma_max`.
    GammaMax,
    /// `gamma_cutoff`.
    GammaCutoff,
    /// `kappa`.
    Kappa,
    /// `w`.
    KappaWidth,
}

impl ScalarParam {
    /// Every scalar key, in parameter-set order.
    pub const ALL: [ScalarParam; 10] = [
        ScalarParam::MagneticField,
        ScalarParam::Density,
        ScalarParam::Angle,
        ScalarParam::ThetaE,
        ScalarParam::PowerLawP,
        ScalarParam::GammaMin,
        ScalarParam::GammaMax,
        ScalarParam::GammaCutoff,
        ScalarParam::Kappa,
        ScalarParam::KappaWidth,
    ];

    /// Header and template key.
    pub fn key(self) -> &'static str {
        match self {
            ScalarParam::MagneticField => "B",
            ScalarParam::Density => "n_e",
            ScalarParam::Angle => "angle",
            ScalarParam::ThetaE => "theta_e",
            ScalarParam::PowerLawP => "p",
            ScalarParam::GammaMin => "gamma_min",
            ScalarParam::GammaMax => "gamma_max",
            ScalarParam::GammaCutoff => "gamma_cutoff",
            ScalarParam::Kappa => "kappa",
            ScalarParam::KappaWidth => "w",
        }
    }

    /// Looks a key up.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.key() == key)
    }

    /// Value in `params`; the angle is reported in degrees.
    pub fn value(self, params: &PlasmaParams) -> f64 {
        match self {
            ScalarParam::MagneticField => params.magnetic_field,
            ScalarParam::Density => params.density,
            ScalarParam::Angle => params.angle_deg(),
            ScalarParam::ThetaE => params.theta_e,
            ScalarParam::PowerLawP => params.power_law_p,
            ScalarParam::GammaMin => params.gamma_min,
            ScalarParam::GammaMax => params.gamma_max,
            ScalarParam::GammaCutoff => params.gamma_cutoff,
            ScalarParam::Kappa => params.kappa,
            ScalarParam::KappaWidth => params.kappa_width,
        }
    }
}

/// One recorded parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderEntry {
    /// A scalar and its recorded value.
    Scalar(ScalarParam, f64),
    /// `component = 22`.
    Component(TensorComponent),
    /// `dist = PL` or `dist = 1`.
    Distribution(Distribution),
    /// `part = real` or `part = 1`.
    Part(Part),
}

impl HeaderEntry {
    fn key(&self) -> &'static str {
        match self {
            HeaderEntry::Scalar(param, _) => param.key(),
            HeaderEntry::Component(_) => "component",
            HeaderEntry::Distribution(_) => "dist",
            HeaderEntry::Part(_) => "part",
        }
    }

    // (recorded, requested) when they disagree.
    fn mismatch(&self, params: &PlasmaParams) -> Option<(String, String)> {
        match *self {
            HeaderEntry::Scalar(param, recorded) => {
                let requested = param.value(params);
                let tolerance = PARAM_RTOL * recorded.abs().max(requested.abs());
                ((recorded - requested).abs() > tolerance)
                    .then(|| (recorded.to_string(), requested.to_string()))
            }
            HeaderEntry::Component(recorded) => (recorded != params.component)
                .then(|| (recorded.to_string(), params.component.to_string())),
            HeaderEntry::Distribution(recorded) => (recorded != params.distribution).then(|| {
                (
                    recorded.label().to_string(),
                    params.distribution.label().to_string(),
                )
            }),
            HeaderEntry::Part(recorded) => (recorded != params.part)
                .then(|| (recorded.label().to_string(), params.part.label().to_string())),
        }
    }
}

/// Parameters recorded in a table header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableHeader {
    entries: Vec<HeaderEntry>,
}

impl TableHeader {
    /// Header from explicit entries.
    pub fn new(entries: Vec<HeaderEntry>) -> Self {
        Self { entries }
    }

    /// Recorded entries in file order.
    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    /// True when nothing was recorded, so no point can be checked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses the text after `#`. Comments without `=` are ignored.
    pub(crate) fn absorb_comment(&mut self, comment: &str, line: usize) -> Result<(), ChiError> {
        let Some((key, value)) = comment.split_once('=') else {
            return Ok(());
        };
        let key = key.trim();
        let value = value.trim();
        let malformed = |message: String| {
            ChiError::Serde(
                ErrorInfo::new("table_header", message)
                    .with_context("line", line.to_string())
                    .with_context("key", key.to_string())
                    .with_context("value", value.to_string()),
            )
        };
        let entry = match key {
            "component" => {
                let index: u8 = value.parse().map_err(|err| malformed(format!("{err}")))?;
                HeaderEntry::Component(TensorComponent::try_from(index)?)
            }
            "dist" => HeaderEntry::Distribution(match value.parse::<u8>() {
                Ok(selector) => Distribution::try_from(selector)?,
                Err(_) => [Distribution::Thermal, Distribution::PowerLaw, Distribution::Kappa]
                    .into_iter()
                    .find(|dist| dist.label() == value)
                    .ok_or_else(|| malformed("unknown distribution label".to_string()))?,
            }),
            "part" => HeaderEntry::Part(match value.parse::<u8>() {
                Ok(selector) => Part::try_from(selector)?,
                Err(_) => [Part::Real, Part::Imaginary]
                    .into_iter()
                    .find(|part| part.label() == value)
                    .ok_or_else(|| malformed("unknown part label".to_string()))?,
            }),
            other => {
                let param = ScalarParam::from_key(other).ok_or_else(|| {
                    ChiError::Serde(
                        ErrorInfo::new("table_header_key", "unknown header key")
                            .with_context("line", line.to_string())
                            .with_context("key", other.to_string())
                            .with_hint(
                                "use B, n_e, angle, theta_e, p, gamma_min, gamma_max, \
                                 gamma_cutoff, kappa, w, component, dist or part",
                            ),
                    )
                })?;
                let recorded: f64 = value.parse().map_err(|err| malformed(format!("{err}")))?;
                HeaderEntry::Scalar(param, recorded)
            }
        };
        self.entries.push(entry);
        Ok(())
    }

    /// Fails on the first recorded parameter that disagrees with `params`.
    pub fn check(&self, params: &PlasmaParams) -> Result<(), ChiError> {
        for entry in &self.entries {
            if let Some((recorded, requested)) = entry.mismatch(params) {
                return Err(ChiError::Evaluator(
                    ErrorInfo::new("param-mismatch", "table was computed for other parameters")
                        .with_context("key", entry.key())
                        .with_context("table", recorded)
                        .with_context("requested", requested)
                        .with_hint("regenerate the table or align the run parameters"),
                ));
            }
        }
        Ok(())
    }
}
