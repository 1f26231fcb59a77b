use std::fs;
use std::path::{Path, PathBuf};

use chi_core::errors::{ChiError, ErrorInfo};
use chi_core::{EvalPoint, PlasmaParams, SusceptibilityEvaluator};
use tracing::{debug, warn};

use crate::header::{ScalarParam, TableHeader};
use crate::persist::format_angle;
use crate::spline::CubicSpline;

// Slack on the log10 domain so ratios that round-trip through nu_c still hit
// the end knots.
const DOMAIN_SLACK: f64 = 1e-9;

/// Evaluator backed by a tabulated dump of an external evaluator.
///
/// The table holds `nu/nu_c value` pairs; values are interpolated with a
/// natural cubic spline in `log10(nu/nu_c)`. Parameters recorded in the
/// header are checked against every evaluation point.
#[derive(Debug, Clone)]
pub struct TableEvaluator {
    name: String,
    source: PathBuf,
    header: TableHeader,
    spline: CubicSpline,
}

impl TableEvaluator {
    /// Builds an evaluator from in-memory `(ratio, value)` rows.
    pub fn from_rows(name: impl Into<String>, rows: &[(f64, f64)]) -> Result<Self, ChiError> {
        if let Some((idx, (ratio, _))) = rows
            .iter()
            .enumerate()
            .find(|(_, (ratio, _))| !(*ratio > 0.0))
        {
            return Err(ChiError::Evaluator(
                ErrorInfo::new("table-ratio", "frequency ratios must be positive")
                    .with_context("row", idx.to_string())
                    .with_context("ratio", ratio.to_string()),
            ));
        }
        let xs = rows.iter().map(|(ratio, _)| ratio.log10()).collect();
        let ys = rows.iter().map(|(_, value)| *value).collect();
        Ok(Self {
            name: name.into(),
            source: PathBuf::new(),
            header: TableHeader::default(),
            spline: CubicSpline::new(xs, ys)?,
        })
    }

    /// Restricts the evaluator to points matching `header`.
    pub fn with_header(mut self, header: TableHeader) -> Self {
        self.header = header;
        self
    }

    /// Loads a whitespace-delimited two column table from disk.
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, ChiError> {
        let text = fs::read_to_string(path).map_err(|err| {
            ChiError::Io(
                ErrorInfo::new("table_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let with_path = |err: ChiError| err.with_context("path", path.display().to_string());
        let (header, rows) = parse_table(&text).map_err(with_path)?;
        if header.is_empty() {
            warn!(path = %path.display(), "table records no parameters; points are not checked");
        }
        let mut evaluator = Self::from_rows(name, &rows).map_err(with_path)?.with_header(header);
        evaluator.source = path.to_path_buf();
        debug!(
            path = %path.display(),
            knots = evaluator.spline.knot_count(),
            recorded = evaluator.header.entries().len(),
            "table loaded"
        );
        Ok(evaluator)
    }

    /// Tabulated ratio range `(min, max)`.
    pub fn ratio_range(&self) -> (f64, f64) {
        let (lo, hi) = self.spline.domain();
        (10f64.powf(lo), 10f64.powf(hi))
    }

    /// File the table was read from; empty for in-memory tables.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Parameters the table was recorded for.
    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    fn with_source(&self, err: ChiError) -> ChiError {
        let err = err.with_context("evaluator", self.name.clone());
        let source = self.source();
        if source.as_os_str().is_empty() {
            err
        } else {
            err.with_context("table_path", source.display().to_string())
        }
    }
}

impl SusceptibilityEvaluator for TableEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, point: &EvalPoint) -> Result<f64, ChiError> {
        self.header
            .check(&point.params)
            .map_err(|err| self.with_source(err))?;
        let ratio = point.ratio();
        let x = ratio.log10();
        let (lo, hi) = self.spline.domain();
        if !(x >= lo - DOMAIN_SLACK && x <= hi + DOMAIN_SLACK) {
            let (min, max) = self.ratio_range();
            return Err(self.with_source(ChiError::Evaluator(
                ErrorInfo::new("out-of-range", "frequency ratio outside tabulated range")
                    .with_context("ratio", ratio.to_string())
                    .with_context("min", min.to_string())
                    .with_context("max", max.to_string())
                    .with_hint("extend the table or narrow the grid bounds"),
            )));
        }
        Ok(self.spline.eval(x.clamp(lo, hi)))
    }
}

/// Parses `ratio value` rows and the `# key = value` header.
///
/// Blank lines and `#` comments without `=` are skipped.
pub fn parse_table(text: &str) -> Result<(TableHeader, Vec<(f64, f64)>), ChiError> {
    let mut header = TableHeader::default();
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            header.absorb_comment(comment, line_no)?;
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(ratio), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(ChiError::Serde(
                ErrorInfo::new("table_columns", "expected two columns")
                    .with_context("line", line_no.to_string()),
            ));
        };
        let parse = |token: &str| {
            token.parse::<f64>().map_err(|err| {
                ChiError::Serde(
                    ErrorInfo::new("table_parse", err.to_string())
                        .with_context("line", line_no.to_string())
                        .with_context("token", token.to_string()),
                )
            })
        };
        rows.push((parse(ratio)?, parse(value)?));
    }
    Ok((header, rows))
}

/// Expands placeholders in a table path template.
///
/// `{angle}` uses the sweep angle; every other scalar key (`{B}`, `{n_e}`,
/// `{theta_e}`, `{p}`, `{gamma_min}`, `{gamma_max}`, `{gamma_cutoff}`,
/// `{kappa}`, `{w}`) comes from `params`. `{component}`, `{part}` and
/// `{dist}` expand to labels, `{part_sel}` and `{dist_sel}` to the numeric
/// selectors.
pub fn resolve_template(template: &str, params: &PlasmaParams, angle_deg: f64) -> PathBuf {
    let mut resolved = template
        .replace("{angle}", &format_angle(angle_deg))
        .replace("{component}", &params.component.to_string())
        .replace("{part_sel}", &params.part.selector().to_string())
        .replace("{dist_sel}", &params.distribution.selector().to_string())
        .replace("{part}", params.part.label())
        .replace("{dist}", params.distribution.label());
    for param in ScalarParam::ALL {
        if param == ScalarParam::Angle {
            continue;
        }
        let placeholder = format!("{{{}}}", param.key());
        if resolved.contains(&placeholder) {
            resolved = resolved.replace(&placeholder, &param.value(params).to_string());
        }
    }
    PathBuf::from(resolved)
}
