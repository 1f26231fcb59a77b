//! CGS physical constants and derived plasma frequencies.

use std::f64::consts::PI;

/// Elementary charge in statcoulomb.
pub const ELECTRON_CHARGE: f64 = 4.803_206_80e-10;

/// Electron rest mass in grams.
pub const ELECTRON_MASS: f64 = 9.109_382_6e-28;

/// Speed of light in cm/s.
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e10;

/// Electron cyclotron frequency (Hz) for a field strength in gauss.
///
/// No validation is performed; a non-positive or non-finite field yields a
/// degenerate frequency.
pub fn cyclotron_frequency(magnetic_field: f64) -> f64 {
    ELECTRON_CHARGE * magnetic_field / (2.0 * PI * ELECTRON_MASS * SPEED_OF_LIGHT)
}
