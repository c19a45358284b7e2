//! Spectral transmission and pulse-spectrum functions.
//!
//! Scalar-in, scalar-out: callers map these over whatever frequency grid
//! they need. Equation references are to Saleh & Teich, Fundamentals of
//! Photonics (2e; the chirped-spectrum expression follows the 3e erratum).

use std::f64::consts::PI;

use tracing::warn;

use crate::constants::SPEED_OF_LIGHT;
use crate::errors::SpectraError;
use crate::math::{CScalar, Scalar};

/// Spectral intensity transmission of a Fabry-Perot etalon from its mirror
/// amplitude reflectances `r1`, `r2` and spacing `d` in meters (eqn 2.5-18).
///
/// # Errors
///
/// The spacing must be positive and `|r1·r2|` must be below one, otherwise
/// the finesse diverges.
pub fn fabry_perot(
    frequency: Scalar,
    r1: Scalar,
    r2: Scalar,
    spacing: Scalar,
) -> Result<Scalar, SpectraError> {
    if !(spacing > 0.0) {
        return Err(SpectraError::InvalidParameter {
            name: "spacing",
            value: spacing,
        });
    }
    let product = (r1 * r2).abs();
    if product >= 1.0 {
        return Err(SpectraError::InvalidParameter {
            name: "mirror reflectance product",
            value: product,
        });
    }
    let finesse = PI * product.sqrt() / (1.0 - product);
    let peak = (1.0 - r1 * r1) * (1.0 - r2 * r2) / (1.0 - product).powi(2);
    let free_spectral_range = SPEED_OF_LIGHT / (2.0 * spacing);
    Ok(airy(frequency, peak, finesse, free_spectral_range))
}

/// Fabry-Perot transmission from measured extrema.
///
/// Parameterized by the quantities one actually reads off an oscilloscope:
/// the minimum and maximum intensity transmissions and the free spectral
/// range in Hz. Swapped extrema are corrected with a warning.
///
/// # Errors
///
/// Both transmissions must lie in (0, 1] and the free spectral range must
/// be positive.
pub fn fabry_perot_empirical(
    frequency: Scalar,
    t_min: Scalar,
    t_max: Scalar,
    free_spectral_range: Scalar,
) -> Result<Scalar, SpectraError> {
    let (t_min, t_max) = if t_min > t_max {
        warn!(t_min, t_max, "transmission extrema are swapped; reordering");
        (t_max, t_min)
    } else {
        (t_min, t_max)
    };
    if !(t_min > 0.0 && t_min <= 1.0) {
        return Err(SpectraError::InvalidParameter {
            name: "t_min",
            value: t_min,
        });
    }
    if !(t_max > 0.0 && t_max <= 1.0) {
        return Err(SpectraError::InvalidParameter {
            name: "t_max",
            value: t_max,
        });
    }
    if !(free_spectral_range > 0.0) {
        return Err(SpectraError::InvalidParameter {
            name: "free spectral range",
            value: free_spectral_range,
        });
    }
    // Invert the Airy function at its extrema for the finesse.
    let finesse = (t_max / t_min - 1.0).sqrt() * PI / 2.0;
    Ok(airy(frequency, t_max, finesse, free_spectral_range))
}

fn airy(frequency: Scalar, peak: Scalar, finesse: Scalar, fsr: Scalar) -> Scalar {
    let modulation = 2.0 * finesse / PI * (PI * frequency / fsr).sin();
    peak / (1.0 + modulation * modulation)
}

/// Spectral intensity shape of a chirped Gaussian pulse (eqn 22.1-19).
/// The shape carries no power; scale it by the pulse intensity yourself.
///
/// `duration` is the 1/e field half-width τ in seconds and `chirp` the
/// dimensionless chirp parameter a. Chirp broadens the spectrum without
/// changing the pulse duration.
#[must_use]
pub fn gaussian_spectrum(
    frequency: Scalar,
    center: Scalar,
    duration: Scalar,
    chirp: Scalar,
) -> Scalar {
    let broadening = 1.0 + chirp * chirp;
    let scale = PI * duration * duration / broadening.sqrt();
    let detuning = PI * duration * (frequency - center);
    scale * (-2.0 * detuning * detuning / broadening).exp()
}

/// Complex spectral field envelope of a chirped Gaussian pulse.
///
/// The squared magnitude reproduces [`gaussian_spectrum`] up to the
/// constant factor `4π²`; the phase carries the chirp.
#[must_use]
pub fn gaussian_spectral_field(
    frequency: Scalar,
    center: Scalar,
    duration: Scalar,
    chirp: Scalar,
) -> CScalar {
    let detuning = PI * duration * (frequency - center);
    let chirp_factor = CScalar::new(1.0, -chirp);
    let scale = CScalar::new(duration / 2.0, 0.0) / (PI * chirp_factor).sqrt();
    scale * (CScalar::new(-detuning * detuning, 0.0) / chirp_factor).exp()
}
