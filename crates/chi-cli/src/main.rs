use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    grid::{self, GridArgs},
    plot::{self, PlotArgs},
    run::{self, RunArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "chi-cli", about = "Susceptibility spline-versus-integration error sweeps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a comparison sweep from a YAML configuration.
    Run(RunArgs),
    /// Render a saved error array as a log-log SVG.
    Plot(PlotArgs),
    /// Print the frequency-ratio grid and absolute frequencies.
    Grid(GridArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Plot(args) => plot::run(&args),
        Command::Grid(args) => grid::run(&args),
    }
}
