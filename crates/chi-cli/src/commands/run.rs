use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chi_exp::{run_sweep, to_yaml_string, SweepOpts};
use clap::Args;
use tracing::info;

use crate::config::RunConfig;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory overriding `output.dir`.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Worker count overriding `workers`.
    #[arg(long)]
    pub workers: Option<usize>,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::load(&args.config)?;
    if let Some(out) = &args.out {
        config.output.dir = out.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let base = args.config.parent().unwrap_or(Path::new(".")).to_path_buf();
    let source = config.source(&base);
    let opts = SweepOpts {
        plot: config.output.plot.then(|| config.plot_style.clone()),
    };

    let out = &config.output.dir;
    fs::create_dir_all(out)?;
    // Effective configuration after command-line overrides.
    fs::write(out.join("config.yaml"), to_yaml_string(&config)?)?;

    let report = run_sweep(&config.plan(), &source, out, &opts)?;
    info!(
        angles = report.angles.len(),
        workers = report.workers,
        plan_hash = %report.plan_hash,
        out = %out.display(),
        "sweep complete"
    );
    Ok(())
}
