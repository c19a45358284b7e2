//! Ideal monochromatic Gaussian beam state.
//!
//! The beam owns its position along the optical axis implicitly through its
//! `(width, curvature)` pair; propagating it through optical elements mutates
//! that state in place. Every other property -- waist, Rayleigh range,
//! divergence, intensity, phase -- is recomputed from the minimal state on
//! each access so nothing can go stale.
//!
//! Equation numbers refer to *Fundamentals of Photonics*, 2e, Saleh & Teich.

use std::f64::consts::PI;
use std::fmt;

use tracing::warn;

use crate::constants::frequency_from_wavelength;
use crate::errors::BeamError;
use crate::math::{CScalar, Scalar};

/// A beam width measured at a known distance from the initialization plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthMeasurement {
    /// Measured 1/e² intensity radius in meters.
    pub width: Scalar,
    /// Distance from the initialization plane to the measurement plane (m).
    pub distance: Scalar,
}

/// A wavefront curvature radius measured at a known distance from the
/// initialization plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureMeasurement {
    /// Measured radius of curvature in meters.
    pub curvature: Scalar,
    /// Distance from the initialization plane to the measurement plane (m).
    pub distance: Scalar,
}

/// Beam state captured just before a propagation step.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamSnapshot {
    /// Optical power in watts.
    pub power: Scalar,
    /// 1/e² intensity radius in meters.
    pub width: Scalar,
    /// Wavefront radius of curvature in meters (±∞ for planar).
    pub curvature: Scalar,
    /// Axial offset from the beam waist in meters.
    pub waist_offset: Scalar,
    /// Rayleigh range in meters.
    pub rayleigh_range: Scalar,
}

impl BeamSnapshot {
    /// Recorded variables as an explicit `(name, accessor)` table.
    ///
    /// Drives [`fmt::Display`] and [`GaussianBeam::summary`], keeping the
    /// printed order declared in one place and fully type-checked.
    pub const FIELDS: [(&'static str, fn(&Self) -> Scalar); 5] = [
        ("power", |s| s.power),
        ("width", |s| s.width),
        ("curvature", |s| s.curvature),
        ("waist_offset", |s| s.waist_offset),
        ("rayleigh_range", |s| s.rayleigh_range),
    ];
}

impl fmt::Display for BeamSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, accessor) in Self::FIELDS {
            writeln!(f, "  {name} = {:.6e}", accessor(self))?;
        }
        Ok(())
    }
}

/// An ideal monochromatic Gaussian beam.
///
/// Construct it [directly](Self::new) from a known `(width, curvature)`
/// pair, or [from two width measurements](Self::from_two_widths) at known
/// distances (McCally 1984, *Measurement of Gaussian beam parameters*,
/// Applied Optics 23(14)). Propagation mutates the beam in place; clone the
/// beam first if the pre-propagation state must be kept.
#[derive(Debug, Clone)]
pub struct GaussianBeam {
    power: Scalar,
    wavelength: Scalar,
    width: Scalar,
    curvature: Scalar,
    repetition_rate: Option<Scalar>,
    max_record_step: Scalar,
    history: Vec<BeamSnapshot>,
}

impl GaussianBeam {
    /// Creates a beam directly from its minimal state.
    ///
    /// `curvature` may be `±∞` (planar wavefront, i.e. at the waist); zero
    /// and NaN are rejected, as are non-positive `wavelength`/`width` and
    /// negative `power`.
    pub fn new(
        power: Scalar,
        wavelength: Scalar,
        width: Scalar,
        curvature: Scalar,
    ) -> Result<Self, BeamError> {
        if !(power.is_finite() && power >= 0.0) {
            return Err(BeamError::InvalidParameter("power must be finite and >= 0"));
        }
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(BeamError::InvalidParameter("wavelength must be finite and > 0"));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(BeamError::InvalidParameter("width must be finite and > 0"));
        }
        if curvature.is_nan() || curvature == 0.0 {
            return Err(BeamError::InvalidParameter(
                "curvature must be nonzero (use ±infinity for a planar wavefront)",
            ));
        }
        Ok(Self {
            power,
            wavelength,
            width,
            curvature,
            repetition_rate: None,
            max_record_step: Scalar::INFINITY,
            history: Vec::new(),
        })
    }

    /// Creates a beam from two width measurements at known distances.
    ///
    /// Solves `w_i = W0·sqrt(1 + ((z + d_i)·λ/(π·W0²))²)` for the waist
    /// width `W0` and waist offset `z` in closed form. The system has two
    /// algebraic roots: a weakly focused mode with the larger waist, and a
    /// tightly focused mode whose waist lies between the measurement planes.
    /// `waist_between` selects the tight-waist root.
    ///
    /// Measurements given in descending distance order are swapped with a
    /// warning rather than rejected.
    pub fn from_two_widths(
        power: Scalar,
        wavelength: Scalar,
        first: WidthMeasurement,
        second: WidthMeasurement,
        waist_between: bool,
    ) -> Result<Self, BeamError> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(BeamError::InvalidParameter("wavelength must be finite and > 0"));
        }
        if first.width <= 0.0 || second.width <= 0.0 {
            return Err(BeamError::InvalidParameter("measured widths must be > 0"));
        }
        let (near, far) = if first.distance > second.distance {
            warn!(
                d1 = first.distance,
                d2 = second.distance,
                "width measurements supplied in descending distance order; swapping"
            );
            (second, first)
        } else {
            (first, second)
        };
        let (waist_width, waist_offset) =
            solve_two_width(wavelength, near, far, waist_between)?;

        let z0 = waist_width * waist_width * PI / wavelength;
        let z = waist_offset;
        let width = waist_width * (1.0 + (z / z0).powi(2)).sqrt();
        let curvature = if z == 0.0 {
            Scalar::INFINITY
        } else {
            z * (1.0 + (z0 / z).powi(2))
        };
        Self::new(power, wavelength, width, curvature)
    }

    /// Creates a beam from two curvature measurements at known distances.
    ///
    /// The closed-form inversion (FOP exercise 3.1-5) has never been
    /// implemented; this constructor exists to document the gap and always
    /// fails with [`BeamError::TwoCurvatureUnimplemented`].
    pub fn from_two_curvatures(
        _power: Scalar,
        _wavelength: Scalar,
        _first: CurvatureMeasurement,
        _second: CurvatureMeasurement,
    ) -> Result<Self, BeamError> {
        Err(BeamError::TwoCurvatureUnimplemented)
    }

    /// Marks the beam as pulsed with the given repetition rate (Hz).
    ///
    /// Pulsed beams expose [`pulse_energy`](Self::pulse_energy) and may pass
    /// through saturable absorbers.
    pub fn with_repetition_rate(mut self, rate: Scalar) -> Result<Self, BeamError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(BeamError::InvalidParameter(
                "repetition rate must be finite and > 0",
            ));
        }
        self.repetition_rate = Some(rate);
        Ok(self)
    }

    /// Enables history recording with the given maximum free-space step (m).
    ///
    /// Free-space propagations longer than `step` are split so that no
    /// recorded interval exceeds it.
    pub fn with_record_step(mut self, step: Scalar) -> Result<Self, BeamError> {
        if !(step > 0.0) {
            return Err(BeamError::InvalidParameter("record step must be > 0"));
        }
        self.max_record_step = step;
        Ok(self)
    }

    /// Optical power in watts.
    #[must_use]
    pub const fn power(&self) -> Scalar {
        self.power
    }

    /// Vacuum wavelength in meters; immutable after construction.
    #[must_use]
    pub const fn wavelength(&self) -> Scalar {
        self.wavelength
    }

    /// 1/e² intensity radius at the current axial position (m).
    #[must_use]
    pub const fn width(&self) -> Scalar {
        self.width
    }

    /// Wavefront radius of curvature at the current axial position (m).
    ///
    /// `±∞` encodes a planar wavefront (at the waist or in the far-field
    /// limit).
    #[must_use]
    pub const fn curvature(&self) -> Scalar {
        self.curvature
    }

    /// Repetition rate in Hz, if the beam is pulsed.
    #[must_use]
    pub const fn repetition_rate(&self) -> Option<Scalar> {
        self.repetition_rate
    }

    /// Energy per pulse in joules, if the beam is pulsed.
    #[must_use]
    pub fn pulse_energy(&self) -> Option<Scalar> {
        self.repetition_rate.map(|rate| self.power / rate)
    }

    /// Optical frequency ν = c/λ in hertz.
    #[must_use]
    pub fn frequency(&self) -> Scalar {
        frequency_from_wavelength(self.wavelength)
    }

    /// Axial offset from the beam waist in meters (eqn 3.1-25 rearranged).
    ///
    /// Positive values mean the waist lies behind the current position (the
    /// beam is diverging away from a waist already passed); zero at a planar
    /// wavefront.
    #[must_use]
    pub fn waist_offset(&self) -> Scalar {
        if self.curvature.is_infinite() {
            return 0.0;
        }
        let r = self.curvature;
        r / (1.0 + (self.wavelength * r / (PI * self.width * self.width)).powi(2))
    }

    /// Waist radius `W0` of the underlying mode in meters (eqn 3.1-26).
    #[must_use]
    pub fn waist_width(&self) -> Scalar {
        if self.curvature.is_infinite() {
            return self.width;
        }
        let w = self.width;
        w / (1.0 + ((PI * w * w) / (self.wavelength * self.curvature)).powi(2)).sqrt()
    }

    /// Rayleigh range `z0 = π·W0²/λ` in meters (eqn 3.1-11).
    #[must_use]
    pub fn rayleigh_range(&self) -> Scalar {
        let w0 = self.waist_width();
        w0 * w0 * PI / self.wavelength
    }

    /// Complex beam parameter `q = z + i·z0` at the current position.
    ///
    /// Equivalent encoding of `(width, curvature)`; exposed for diagnostics
    /// and ABCD cross-checks.
    #[must_use]
    pub fn complex_beam_parameter(&self) -> CScalar {
        CScalar::new(self.waist_offset(), self.rayleigh_range())
    }

    /// Divergence half-angle `θ0 = λ/(π·W0)` in radians (eqn 3.1-21).
    #[must_use]
    pub fn divergence_half_angle(&self) -> Scalar {
        self.wavelength / (PI * self.waist_width())
    }

    /// Full divergence angle `2·θ0` in radians.
    #[must_use]
    pub fn divergence(&self) -> Scalar {
        2.0 * self.divergence_half_angle()
    }

    /// On-axis intensity `2p/(π·w²)` in W/m² (eqn 3.1-16).
    #[must_use]
    pub fn on_axis_intensity(&self) -> Scalar {
        2.0 * self.power / (PI * self.width * self.width)
    }

    /// Intensity at radial offset `radial` from the axis, in W/m².
    #[must_use]
    pub fn intensity(&self, radial: Scalar) -> Scalar {
        let w = self.width;
        self.on_axis_intensity() * (-2.0 * radial * radial / (w * w)).exp()
    }

    /// Phase at radial offset `radial`, in radians (eqn 3.1-23).
    ///
    /// The wavefront term `k·r²/(2R)` vanishes for a planar wavefront.
    #[must_use]
    pub fn phase(&self, radial: Scalar) -> Scalar {
        let k = 2.0 * PI / self.wavelength;
        let z = self.waist_offset();
        let on_axis = k * z - (z / self.rayleigh_range()).atan();
        on_axis + k * radial * radial / (2.0 * self.curvature)
    }

    /// Beam cross-sectional area `π·w²` in m².
    #[must_use]
    pub fn area(&self) -> Scalar {
        PI * self.width * self.width
    }

    /// Maximum recorded free-space step; `+∞` when recording is disabled.
    #[must_use]
    pub const fn max_record_step(&self) -> Scalar {
        self.max_record_step
    }

    /// True when history recording is enabled.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.max_record_step.is_finite()
    }

    /// Recorded snapshots, oldest first. Empty unless recording is enabled.
    #[must_use]
    pub fn history(&self) -> &[BeamSnapshot] {
        &self.history
    }

    /// Captures the current state as a snapshot without recording it.
    #[must_use]
    pub fn snapshot(&self) -> BeamSnapshot {
        BeamSnapshot {
            power: self.power,
            width: self.width,
            curvature: self.curvature,
            waist_offset: self.waist_offset(),
            rayleigh_range: self.rayleigh_range(),
        }
    }

    /// Prints the snapshot variables for interactive inspection, optionally
    /// preceded by a comment line, and returns the beam for chaining.
    pub fn summary(&self, comment: Option<&str>) -> &Self {
        if let Some(comment) = comment {
            println!("{comment}");
        }
        print!("{}", self.snapshot());
        self
    }

    pub(crate) fn record(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    pub(crate) fn set_power(&mut self, power: Scalar) {
        self.power = power;
    }

    pub(crate) fn set_shape(&mut self, width: Scalar, curvature: Scalar) {
        self.width = width;
        self.curvature = curvature;
    }
}

impl fmt::Display for GaussianBeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}

/// Closed-form two-width solve for `(W0, z)` at the initialization plane.
///
/// The expressions are the two Mathematica roots of the paired hyperbolic
/// width equations; `tight_waist` picks the small-waist root. The branch and
/// sign conventions here are pinned by the reconstruction round-trip tests,
/// not by the derivation.
fn solve_two_width(
    wavelength: Scalar,
    near: WidthMeasurement,
    far: WidthMeasurement,
    tight_waist: bool,
) -> Result<(Scalar, Scalar), BeamError> {
    let wl = wavelength;
    let (w1, d1) = (near.width, near.distance);
    let (w2, d2) = (far.width, far.distance);
    let d = d2 - d1;
    if d == 0.0 {
        return Err(BeamError::InvalidParameter(
            "width measurements must be at distinct planes",
        ));
    }

    // The root is real only when π²·w1²·w2² ≥ d²·λ²; two widths measured
    // further apart than that cannot belong to one Gaussian mode.
    let discriminant = d.powi(4) * PI * PI * w1 * w1 * w2 * w2 * wl.powi(4)
        - d.powi(6) * wl.powi(6);
    if discriminant < 0.0 {
        return Err(BeamError::UnphysicalMeasurement(format!(
            "widths {w1:.3e} m and {w2:.3e} m cannot lie {d:.3e} m apart on one mode"
        )));
    }
    let sq = discriminant.sqrt();
    let sign = if tight_waist { -1.0 } else { 1.0 };

    let w1s = w1 * w1;
    let w2s = w2 * w2;
    let waist_sq_num = d * d * PI * (w1s + w2s) * wl * wl + sign * 2.0 * sq;
    let waist_sq_den = PI.powi(3) * (w1s - w2s) * (w1s - w2s) + 4.0 * d * d * PI * wl * wl;
    let waist_sq = waist_sq_num / waist_sq_den;
    if waist_sq <= 0.0 {
        return Err(BeamError::UnphysicalMeasurement(format!(
            "selected branch yields a non-positive waist for widths {w1:.3e} m / {w2:.3e} m"
        )));
    }

    let offset_num = d * d * PI * PI * w1s * (w2s - w1s) * wl * wl - 2.0 * d.powi(4) * wl.powi(4)
        + sign * PI * (w2s - w1s) * sq;
    let offset_den = d * wl * wl * (PI * PI * (w1s - w2s) * (w1s - w2s) + 4.0 * d * d * wl * wl);
    // Offset of the initialization plane past the waist (positive = waist
    // behind), hence the measurement-plane distance is subtracted.
    let offset = offset_num / offset_den - d1;

    Ok((waist_sq.sqrt(), offset))
}
