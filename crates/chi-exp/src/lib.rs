//! Spline-versus-integration comparison sweeps for susceptibility evaluators.

mod codec;
mod compare;
mod header;
mod persist;
pub mod plot;
mod spline;
mod stat;
mod sweep;
mod table;

pub use codec::{
    from_json_slice, from_yaml_slice, stable_hash_string, to_canonical_json_bytes, to_yaml_string,
    write_canonical_json,
};
pub use compare::{compare, evaluate_grid, relative_error, relative_errors, Comparison};
pub use header::{HeaderEntry, ScalarParam, TableHeader};
pub use persist::{error_file_name, format_angle, format_sci, load_error_array, save_error_array};
pub use plot::{plot_error_curve, PlotStyle, TickDirection};
pub use spline::CubicSpline;
pub use stat::ErrorStats;
pub use sweep::{
    partition_angles, rank_dir, run_sweep, AngleReport, EvaluatorPair, EvaluatorSource,
    SweepOpts, SweepPlan, SweepReport, WorkerAssignment,
};
pub use table::{parse_table, resolve_template, TableEvaluator};
