//! Log-log rendering of error curves.
//!
//! Visual settings travel in an explicit [`PlotStyle`] instead of a global
//! rendering configuration.

use std::fs;
use std::path::Path;

use chi_core::errors::{ChiError, ErrorInfo};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Direction tick marks point relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TickDirection {
    /// Ticks point into the plot area.
    #[default]
    In,
    /// Ticks point away from the plot area.
    Out,
}

/// Static visual configuration handed to [`plot_error_curve`].
///
/// Lengths are in points and converted with `dpi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Figure width and height in inches.
    pub figure_size: [f64; 2],
    /// Pixels per inch.
    pub dpi: u32,
    /// Curve line width.
    pub line_width: f64,
    /// Font family name.
    pub font_family: String,
    /// Whether text is bold.
    pub bold: bool,
    /// Base font size.
    pub font_size: f64,
    /// Axis description and tick label size relative to `font_size`.
    pub label_scale: f64,
    /// Axis spine width.
    pub axes_line_width: f64,
    /// Major tick length.
    pub tick_size: f64,
    /// Tick direction.
    pub tick_direction: TickDirection,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            figure_size: [12.0, 7.5],
            dpi: 100,
            line_width: 1.5,
            font_family: "serif".to_string(),
            bold: true,
            font_size: 20.0,
            label_scale: 1.2,
            axes_line_width: 1.5,
            tick_size: 8.0,
            tick_direction: TickDirection::In,
        }
    }
}

impl PlotStyle {
    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.figure_size[0] * dpi).round().max(1.0) as u32,
            (self.figure_size[1] * dpi).round().max(1.0) as u32,
        )
    }

    fn points_to_pixels(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    fn stroke(&self, points: f64) -> u32 {
        self.points_to_pixels(points).round().max(1.0) as u32
    }

    fn font(&self, scale: f64) -> FontDesc<'_> {
        let size = self.points_to_pixels(self.font_size * scale);
        let style = if self.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        FontDesc::new(FontFamily::Name(&self.font_family), size, style)
    }

    fn tick_mark(&self) -> i32 {
        let size = self.points_to_pixels(self.tick_size).round() as i32;
        match self.tick_direction {
            TickDirection::In => -size,
            TickDirection::Out => size,
        }
    }
}

fn plot_error(code: &str, err: impl ToString) -> ChiError {
    ChiError::Plot(ErrorInfo::new(code, err.to_string()))
}

/// Renders error against frequency ratio on log-log axes as SVG.
///
/// Non-finite and non-positive points cannot sit on a log axis and are
/// skipped. Returns `false` without writing when nothing is plottable.
pub fn plot_error_curve(
    path: &Path,
    ratios: &[f64],
    errors: &[f64],
    style: &PlotStyle,
) -> Result<bool, ChiError> {
    if ratios.len() != errors.len() {
        return Err(ChiError::Plot(
            ErrorInfo::new("length-mismatch", "ratios and errors differ in length")
                .with_context("ratios", ratios.len().to_string())
                .with_context("errors", errors.len().to_string()),
        ));
    }
    let points: Vec<(f64, f64)> = ratios
        .iter()
        .zip(errors)
        .map(|(x, y)| (*x, *y))
        .filter(|(x, y)| x.is_finite() && *x > 0.0 && y.is_finite() && *y > 0.0)
        .collect();
    if points.is_empty() {
        warn!(path = %path.display(), "no positive finite errors to plot");
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ChiError::io("plot_dir", err))?;
    }

    let (x_min, x_max) = log_bounds(points.iter().map(|(x, _)| *x));
    let (y_min, y_max) = log_bounds(points.iter().map(|(_, y)| *y));

    let root = SVGBackend::new(path, style.pixel_size()).into_drawing_area();
    root.fill(&WHITE).map_err(|err| plot_error("plot_fill", err))?;

    let label_area = style.points_to_pixels(style.font_size * 4.0).round() as u32;
    let mut chart = ChartBuilder::on(&root)
        .margin(style.points_to_pixels(style.font_size).round() as u32)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())
        .map_err(|err| plot_error("plot_axes", err))?;

    let axis = BLACK.stroke_width(style.stroke(style.axes_line_width));
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .axis_style(axis)
        .set_tick_mark_size(LabelAreaPosition::Left, style.tick_mark())
        .set_tick_mark_size(LabelAreaPosition::Bottom, style.tick_mark())
        .label_style(style.font(style.label_scale).color(&BLACK))
        .axis_desc_style(style.font(style.label_scale).color(&BLACK))
        .x_desc("nu / nu_c")
        .y_desc("relative error")
        .x_label_formatter(&|x| format!("{x:.0e}"))
        .y_label_formatter(&|y| format!("{y:.0e}"))
        .draw()
        .map_err(|err| plot_error("plot_mesh", err))?;

    chart
        .draw_series(LineSeries::new(
            points,
            BLACK.stroke_width(style.stroke(style.line_width)),
        ))
        .map_err(|err| plot_error("plot_series", err))?;

    root.present().map_err(|err| plot_error("plot_write", err))?;
    Ok(true)
}

// Range covering the values, widened by a decade when degenerate.
fn log_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo < hi {
        (lo, hi)
    } else {
        (lo / 10.0, hi * 10.0)
    }
}
