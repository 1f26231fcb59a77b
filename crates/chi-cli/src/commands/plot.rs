use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chi_core::{FrequencyGrid, GridSpec};
use chi_exp::{from_yaml_slice, load_error_array, plot_error_curve, PlotStyle};
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Base-10 exponent of the first ratio.
    #[arg(long, default_value_t = 1.0)]
    pub grid_min: f64,
    /// Base-10 exponent of the last ratio.
    #[arg(long, default_value_t = 3.0)]
    pub grid_max: f64,
    /// Number of ratios the error file was written for.
    #[arg(long, default_value_t = 10)]
    pub samples: usize,
    /// Saved error array.
    #[arg(long)]
    pub input: PathBuf,
    /// SVG destination.
    #[arg(long)]
    pub out: PathBuf,
    /// Optional YAML plot style.
    #[arg(long)]
    pub style: Option<PathBuf>,
}

pub fn run(args: &PlotArgs) -> Result<(), Box<dyn Error>> {
    let grid = FrequencyGrid::new(GridSpec {
        log_min: args.grid_min,
        log_max: args.grid_max,
        samples: args.samples,
    })?;
    let errors = load_error_array(&args.input)?;
    let style: PlotStyle = match &args.style {
        Some(path) => from_yaml_slice(&fs::read(path)?)?,
        None => PlotStyle::default(),
    };
    if plot_error_curve(&args.out, grid.ratios(), &errors, &style)? {
        info!(out = %args.out.display(), "plot written");
    }
    Ok(())
}
