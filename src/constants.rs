//! Baseline physical constants and conversion helpers.
//!
//! ## Accuracy
//!
//! The speed of light is exact by SI definition (2019 revision). The Planck
//! constant is carried at the CODATA 2010 value because it is part of the
//! shared-constants contract with the original optics toolbox; the 2019
//! exact value (6.62607015e-34) differs only in the eighth digit, well below
//! any tolerance in this crate.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty:
//!   <https://physics.nist.gov/cuu/Constants/>
//! - Mohr, P. J., Taylor, B. N., & Newell, D. B. (2012). CODATA Recommended
//!   Values of the Fundamental Physical Constants: 2010.

use std::f64::consts::PI;

/// Speed of light in vacuum _c_ in meters per second (m/s).
/// Exact value by SI definition (2019): 299,792,458 m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Planck constant _h_ in joule-seconds (J·s).
/// CODATA 2010 value: 6.62606957 × 10⁻³⁴ J·s.
pub const PLANCK_CONSTANT: f64 = 6.626_069_57e-34;
/// Reduced Planck constant ħ = h / 2π in joule-seconds (J·s).
pub const REDUCED_PLANCK_CONSTANT: f64 = PLANCK_CONSTANT / (2.0 * PI);

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

/// Returns the free-space wavelength in meters for a given frequency in hertz.
#[inline]
#[must_use]
pub fn wavelength_from_frequency(hz: f64) -> f64 {
    SPEED_OF_LIGHT / hz
}

/// Returns the free-space frequency in hertz for a given wavelength in meters.
#[inline]
#[must_use]
pub fn frequency_from_wavelength(wavelength: f64) -> f64 {
    SPEED_OF_LIGHT / wavelength
}

/// Returns the energy in joules of a single photon at frequency `hz`.
#[inline]
#[must_use]
pub fn photon_energy(hz: f64) -> f64 {
    PLANCK_CONSTANT * hz
}
