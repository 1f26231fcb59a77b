use std::fs;
use std::path::Path;

use chi_core::errors::{ChiError, ErrorInfo};
use chi_core::PlasmaParams;

/// File name for an error array, e.g. `chi_22_real_60deg_PL_error.txt`.
pub fn error_file_name(params: &PlasmaParams, angle_deg: f64) -> String {
    format!(
        "chi_{}_{}_{}deg_{}_error.txt",
        params.component,
        params.part.label(),
        format_angle(angle_deg),
        params.distribution.label()
    )
}

/// Angle in degrees without a trailing `.0` for whole values.
pub fn format_angle(angle_deg: f64) -> String {
    let rounded = (angle_deg * 1e6).round() / 1e6;
    format!("{rounded}")
}

/// Formats a value as `%.18e`: `1.500000000000000000e+00`, `nan`, `inf`.
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let raw = format!("{value:.18e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => raw,
    }
}

/// Writes one value per line, replacing any existing file.
pub fn save_error_array(path: &Path, values: &[f64]) -> Result<(), ChiError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            ChiError::Io(
                ErrorInfo::new("error_dir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    let mut text = String::with_capacity(values.len() * 26);
    for value in values {
        text.push_str(&format_sci(*value));
        text.push('\n');
    }
    fs::write(path, text).map_err(|err| {
        ChiError::Io(
            ErrorInfo::new("error_write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Reads a whitespace-delimited array written by [`save_error_array`].
pub fn load_error_array(path: &Path) -> Result<Vec<f64>, ChiError> {
    let text = fs::read_to_string(path).map_err(|err| {
        ChiError::Io(
            ErrorInfo::new("error_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    text.split_whitespace()
        .enumerate()
        .map(|(idx, token)| {
            token.parse::<f64>().map_err(|err| {
                ChiError::Serde(
                    ErrorInfo::new("error_parse", err.to_string())
                        .with_context("index", idx.to_string())
                        .with_context("token", token.to_string()),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chi_core::{Distribution, Part, TensorComponent};

    #[test]
    fn scientific_layout_matches_savetxt() {
        assert_eq!(format_sci(1.5), "1.500000000000000000e+00");
        assert_eq!(format_sci(-1024.0), "-1.024000000000000000e+03");
        assert_eq!(format_sci(2f64.powi(-40)), "9.094947017729282379e-13");
        assert_eq!(format_sci(0.0), "0.000000000000000000e+00");
        assert_eq!(format_sci(f64::MAX), "1.797693134862315708e+308");
        assert_eq!(format_sci(f64::NAN), "nan");
        assert_eq!(format_sci(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn file_name_follows_convention() {
        let params = PlasmaParams::default();
        assert_eq!(error_file_name(&params, 60.0), "chi_22_real_60deg_PL_error.txt");

        let params = PlasmaParams {
            component: TensorComponent::new(1, 1).expect("component"),
            part: Part::Imaginary,
            distribution: Distribution::Kappa,
            ..params
        };
        assert_eq!(error_file_name(&params, 12.5), "chi_11_imag_12.5deg_kappa_error.txt");
    }

    #[test]
    fn angle_formatting_absorbs_radian_roundtrip() {
        let angle = 35.0_f64.to_radians().to_degrees();
        assert_eq!(format_angle(angle), "35");
    }
}
