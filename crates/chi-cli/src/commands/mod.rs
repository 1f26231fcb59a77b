pub mod grid;
pub mod plot;
pub mod run;
