#![deny(missing_docs)]
#![doc = "Core constants, parameter types and the evaluator interface shared by the chi crates."]

pub mod constants;
pub mod errors;
pub mod evaluator;
pub mod grid;
pub mod params;

pub use constants::{cyclotron_frequency, ELECTRON_CHARGE, ELECTRON_MASS, SPEED_OF_LIGHT};
pub use errors::{ChiError, ErrorInfo};
pub use evaluator::{ConstantEvaluator, EvalPoint, FnEvaluator, SusceptibilityEvaluator};
pub use grid::{logspace, FrequencyGrid, GridSpec};
pub use params::{Distribution, Part, PlasmaParams, TensorComponent};
