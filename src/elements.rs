//! Optical elements and their effect on a transmitted Gaussian beam.
//!
//! Elements are a closed set of variants so the propagation pipeline can
//! exhaustively match on the one case (free space) that participates in
//! history sub-stepping. Each variant owns only its configuration; no element
//! retains a reference to any beam between `transmit` calls.

use crate::absorber::{LinearAbsorber, SaturableAbsorber};
use crate::beam::GaussianBeam;
use crate::errors::BeamError;
use crate::math::{recip_or_zero, Scalar};
use crate::units::Length;

/// Standard tube-lens focal length for Olympus infinity-corrected
/// objectives (m).
pub const OLYMPUS_TUBE_LENGTH: Scalar = 180e-3;

/// Free-space propagation over a fixed distance.
///
/// Negative distances propagate backwards, so `Space(d)` followed by
/// `Space(-d)` restores the beam within roundoff.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Space {
    distance: Length,
}

impl Space {
    /// Creates a free-space segment of the given length in meters.
    #[must_use]
    pub const fn new(distance: Scalar) -> Self {
        Self {
            distance: Length::new(distance),
        }
    }

    /// Propagation distance in meters.
    #[must_use]
    pub const fn distance(&self) -> Scalar {
        self.distance.value()
    }

    /// Advances the beam by the configured distance (eqns 3.1-9, 3.1-18).
    ///
    /// The waist width and Rayleigh range are invariant under free-space
    /// propagation; only the offset from the waist changes. Landing exactly
    /// on the waist yields an exactly planar wavefront.
    pub fn transmit(&self, beam: &mut GaussianBeam) -> Result<(), BeamError> {
        let w0 = beam.waist_width();
        let z0 = beam.rayleigh_range();
        let z = beam.waist_offset() + self.distance.value();
        let width = w0 * (1.0 + (z / z0).powi(2)).sqrt();
        let curvature = if z == 0.0 {
            Scalar::INFINITY
        } else {
            z * (1.0 + (z0 / z).powi(2))
        };
        beam.set_shape(width, curvature);
        Ok(())
    }
}

/// An ideal thin lens.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    focal_length: Length,
}

impl Lens {
    /// Creates a thin lens with the given focal length in meters.
    ///
    /// An infinite focal length is a flat window: `transmit` is a no-op.
    #[must_use]
    pub const fn new(focal_length: Scalar) -> Self {
        Self {
            focal_length: Length::new(focal_length),
        }
    }

    /// Creates the thin-lens equivalent of an infinity-corrected objective,
    /// specified by magnification and manufacturer tube-lens focal length:
    /// `f = tube / |magnification|`.
    ///
    /// Objectives differ from plain lenses only in how the focal length is
    /// specified, so this is a factory rather than a distinct element.
    #[must_use]
    pub fn objective(magnification: Scalar, tube_length: Scalar) -> Self {
        Self::new(tube_length / magnification.abs())
    }

    /// Focal length in meters.
    #[must_use]
    pub const fn focal_length(&self) -> Scalar {
        self.focal_length.value()
    }

    /// Applies the thin-lens transform `1/r' = 1/r - 1/f` (eqn 3.2-2).
    ///
    /// Computed on inverse curvatures with `1/∞ = 0`, so planar wavefronts
    /// and infinite focal lengths never divide by infinity. Width is
    /// unchanged by an ideal thin lens.
    pub fn transmit(&self, beam: &mut GaussianBeam) -> Result<(), BeamError> {
        let inverse =
            recip_or_zero(beam.curvature()) - recip_or_zero(self.focal_length.value());
        let curvature = if inverse == 0.0 {
            Scalar::INFINITY
        } else {
            inverse.recip()
        };
        beam.set_shape(beam.width(), curvature);
        Ok(())
    }
}

/// A hard circular aperture.
///
/// Only power is affected: the transmitted fraction is the Gaussian power
/// enclosed within the aperture radius. No diffraction is modeled, which is
/// the appropriate treatment for photodiode-style power clipping.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aperture {
    radius: Length,
}

impl Aperture {
    /// Creates an aperture with the given radius in meters.
    #[must_use]
    pub const fn new(radius: Scalar) -> Self {
        Self {
            radius: Length::new(radius),
        }
    }

    /// Aperture radius in meters.
    #[must_use]
    pub const fn radius(&self) -> Scalar {
        self.radius.value()
    }

    /// Fraction of a Gaussian beam of width `width` passing the aperture.
    #[must_use]
    pub fn transmitted_fraction(&self, width: Scalar) -> Scalar {
        let a = self.radius.value();
        1.0 - (-2.0 * a * a / (width * width)).exp()
    }

    /// Clips the beam power to the enclosed fraction; shape is unchanged.
    pub fn transmit(&self, beam: &mut GaussianBeam) -> Result<(), BeamError> {
        let fraction = self.transmitted_fraction(beam.width());
        beam.set_power(beam.power() * fraction);
        Ok(())
    }
}

/// Closed set of optical element variants.
///
/// `From` conversions turn configured element structs (or a raw distance,
/// shorthand for [`Space`]) into pipeline steps.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub enum Element {
    /// Free-space segment.
    Space(Space),
    /// Ideal thin lens.
    Lens(Lens),
    /// Hard circular aperture.
    Aperture(Aperture),
    /// Beer-Lambert absorber.
    LinearAbsorber(LinearAbsorber),
    /// Saturable absorber with depleting population.
    SaturableAbsorber(SaturableAbsorber),
}

impl Element {
    /// Applies this element's transform to the beam.
    ///
    /// A fatal error leaves the beam exactly in its pre-call state.
    pub fn transmit(&mut self, beam: &mut GaussianBeam) -> Result<(), BeamError> {
        match self {
            Self::Space(space) => space.transmit(beam),
            Self::Lens(lens) => lens.transmit(beam),
            Self::Aperture(aperture) => aperture.transmit(beam),
            Self::LinearAbsorber(absorber) => absorber.transmit(beam),
            Self::SaturableAbsorber(absorber) => absorber.transmit(beam),
        }
    }
}

impl From<Space> for Element {
    fn from(space: Space) -> Self {
        Self::Space(space)
    }
}

impl From<Lens> for Element {
    fn from(lens: Lens) -> Self {
        Self::Lens(lens)
    }
}

impl From<Aperture> for Element {
    fn from(aperture: Aperture) -> Self {
        Self::Aperture(aperture)
    }
}

impl From<LinearAbsorber> for Element {
    fn from(absorber: LinearAbsorber) -> Self {
        Self::LinearAbsorber(absorber)
    }
}

impl From<SaturableAbsorber> for Element {
    fn from(absorber: SaturableAbsorber) -> Self {
        Self::SaturableAbsorber(absorber)
    }
}

impl From<Scalar> for Element {
    /// A raw distance in meters is shorthand for a free-space segment.
    fn from(distance: Scalar) -> Self {
        Self::Space(Space::new(distance))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    fn waist_beam() -> GaussianBeam {
        GaussianBeam::new(10e-3, 632e-9, 1e-3, f64::INFINITY).unwrap()
    }

    #[test]
    fn space_round_trips_within_roundoff() {
        let mut beam = GaussianBeam::new(1e-3, 800e-9, 2e-3, 1.0).unwrap();
        let (w, r) = (beam.width(), beam.curvature());
        Space::new(1e-3).transmit(&mut beam).unwrap();
        Space::new(-1e-3).transmit(&mut beam).unwrap();
        assert_relative_eq!(beam.width(), w, max_relative = 1e-10);
        assert_relative_eq!(beam.curvature(), r, max_relative = 1e-10);
    }

    #[test]
    fn returning_to_the_waist_is_exactly_planar() {
        let mut beam = waist_beam();
        Space::new(5e-2).transmit(&mut beam).unwrap();
        assert!(beam.curvature().is_finite());
        // Stepping back by the current waist offset lands on z = 0 exactly.
        Space::new(-beam.waist_offset()).transmit(&mut beam).unwrap();
        assert!(beam.curvature().is_infinite());
        assert_relative_eq!(beam.width(), 1e-3, max_relative = 1e-12);
    }

    #[test]
    fn width_grows_root_two_at_the_rayleigh_range() {
        let mut beam = waist_beam();
        let z0 = beam.rayleigh_range();
        Space::new(z0).transmit(&mut beam).unwrap();
        assert_relative_eq!(beam.width(), 1e-3 * 2.0_f64.sqrt(), max_relative = 1e-12);
        // At z0 the curvature reaches its minimum value 2·z0.
        assert_relative_eq!(beam.curvature(), 2.0 * z0, max_relative = 1e-12);
    }

    #[test]
    fn flat_lens_is_a_no_op() {
        let mut beam = GaussianBeam::new(1e-3, 800e-9, 2e-3, 0.7).unwrap();
        let (w, r) = (beam.width(), beam.curvature());
        Lens::new(f64::INFINITY).transmit(&mut beam).unwrap();
        assert_eq!(beam.width(), w);
        assert_eq!(beam.curvature(), r);
    }

    #[test]
    fn lens_transforms_a_planar_wavefront() {
        let mut beam = waist_beam();
        Lens::new(0.1).transmit(&mut beam).unwrap();
        // 1/r' = 0 - 1/f
        assert_relative_eq!(beam.curvature(), -0.1, max_relative = 1e-12);
        assert_relative_eq!(beam.width(), 1e-3, max_relative = 1e-12);
    }

    #[test]
    fn objective_focal_length_from_magnification() {
        let objective = Lens::objective(20.0, OLYMPUS_TUBE_LENGTH);
        assert_relative_eq!(objective.focal_length(), 9e-3, max_relative = 1e-12);
        // Sign of the magnification is irrelevant.
        let inverted = Lens::objective(-20.0, OLYMPUS_TUBE_LENGTH);
        assert_relative_eq!(inverted.focal_length(), 9e-3, max_relative = 1e-12);
    }

    #[test]
    fn aperture_transmission_is_monotonic_in_radius() {
        let beam = waist_beam();
        let mut previous = 0.0;
        for radius in [0.2e-3, 0.5e-3, 1e-3, 2e-3, 5e-3] {
            let mut clipped = beam.clone();
            Aperture::new(radius).transmit(&mut clipped).unwrap();
            assert!(
                clipped.power() > previous,
                "power must grow with aperture radius"
            );
            previous = clipped.power();
        }
        // A wide-open aperture passes essentially everything.
        let mut open = beam.clone();
        Aperture::new(1.0).transmit(&mut open).unwrap();
        assert_relative_eq!(open.power(), beam.power(), max_relative = 1e-12);
    }

    #[test]
    fn aperture_at_one_width_passes_the_textbook_fraction() {
        let mut beam = waist_beam();
        Aperture::new(1e-3).transmit(&mut beam).unwrap();
        assert_relative_eq!(
            beam.power(),
            10e-3 * (1.0 - (-2.0f64).exp()),
            max_relative = 1e-12
        );
    }

    #[test]
    fn distance_converts_to_a_space_step() {
        let element = Element::from(3e-2);
        match element {
            Element::Space(space) => assert_relative_eq!(space.distance(), 3e-2),
            other => panic!("expected a Space element, got {other:?}"),
        }
    }

    #[test]
    fn one_focal_length_relay_returns_to_a_magnified_waist() {
        // 10 mW, 632 nm beam at a 1 mm waist through f -- lens -- f.
        let mut beam = waist_beam();
        let f = 3e-2;
        Space::new(f).transmit(&mut beam).unwrap();
        Lens::new(f).transmit(&mut beam).unwrap();
        Space::new(f).transmit(&mut beam).unwrap();

        // The output plane is the rear focal plane: a waist again, with the
        // width given by the Gaussian lens-imaging formula W0' = f·λ/(π·W0).
        assert!(beam.curvature().is_infinite());
        let expected = f * 632e-9 / (PI * 1e-3);
        assert_relative_eq!(beam.width(), expected, max_relative = 1e-9);
        assert_relative_eq!(beam.power(), 10e-3);
    }
}
