use std::error::Error;
use std::io::Write;

use chi_core::{cyclotron_frequency, FrequencyGrid, GridSpec};
use clap::Args;

#[derive(Args, Debug)]
pub struct GridArgs {
    /// Base-10 exponent of the first ratio.
    #[arg(long, default_value_t = 1.0)]
    pub grid_min: f64,
    /// Base-10 exponent of the last ratio.
    #[arg(long, default_value_t = 3.0)]
    pub grid_max: f64,
    /// Number of ratios.
    #[arg(long, default_value_t = 10)]
    pub samples: usize,
    /// Magnetic field in gauss.
    #[arg(long, default_value_t = 1.0)]
    pub field: f64,
}

pub fn run(args: &GridArgs) -> Result<(), Box<dyn Error>> {
    let grid = FrequencyGrid::new(GridSpec {
        log_min: args.grid_min,
        log_max: args.grid_max,
        samples: args.samples,
    })?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let spec = grid.spec();
    writeln!(
        handle,
        "# {} ratios from 10^{} to 10^{}",
        spec.samples, spec.log_min, spec.log_max
    )?;
    writeln!(handle, "# nu_c = {:e} Hz", cyclotron_frequency(args.field))?;
    writeln!(handle, "# nu/nu_c nu")?;
    for (ratio, nu) in grid.ratios().iter().zip(grid.frequencies(args.field)) {
        writeln!(handle, "{ratio:e} {nu:e}")?;
    }
    Ok(())
}
