//! Beer-Lambert and saturable absorption.
//!
//! Both absorbers use the thin-sample approximation: attenuation is applied
//! as a lumped transform, followed by ordinary free-space propagation over
//! the physical absorber length. Transverse beam shape is ignored.

use tracing::warn;

use crate::beam::GaussianBeam;
use crate::constants::photon_energy;
use crate::elements::Space;
use crate::errors::BeamError;
use crate::math::{newton_raphson, NewtonOptions, Scalar};
use crate::units::Length;

/// An absorber following the Beer-Lambert law.
///
/// Power decays as `exp(-σ·n·L)`; the beam shape still propagates through
/// the absorber length as free space.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAbsorber {
    cross_section: Scalar,
    number_density: Scalar,
    length: Length,
}

impl LinearAbsorber {
    /// Creates a linear absorber.
    ///
    /// `cross_section` in m², `number_density` in 1/m³, `length` in m.
    #[must_use]
    pub const fn new(cross_section: Scalar, number_density: Scalar, length: Scalar) -> Self {
        Self {
            cross_section,
            number_density,
            length: Length::new(length),
        }
    }

    /// Absorption coefficient `α = σ·n` in 1/m.
    #[must_use]
    pub const fn attenuation_coefficient(&self) -> Scalar {
        self.cross_section * self.number_density
    }

    /// Absorber length in meters.
    #[must_use]
    pub const fn length(&self) -> Scalar {
        self.length.value()
    }

    /// Attenuates the power by Beer-Lambert, then propagates the beam
    /// through the absorber length.
    pub fn transmit(&self, beam: &mut GaussianBeam) -> Result<(), BeamError> {
        let length = self.length.value();
        beam.set_power(beam.power() * (-length * self.attenuation_coefficient()).exp());
        Space::new(length).transmit(beam)
    }
}

/// A saturable absorber: `dE/dz = -σ·n·E / (1 + E/Es)`.
///
/// The saturation energy `Es` is the number of absorbers in the focal volume
/// times the photon energy of the transmitted beam. The absorber population
/// depletes as pulse energy passes through, so the element carries mutable
/// state across transmits; reusing one instance across several beams is
/// intentional physical modeling (later beams see earlier depletion), not
/// aliasing. Construct separate instances for independent absorbers.
///
/// Only pulsed beams have a defined pulse energy, so transmitting a
/// continuous-wave beam fails with [`BeamError::RequiresPulsedBeam`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SaturableAbsorber {
    cross_section: Scalar,
    number_density: Scalar,
    initial_number_density: Scalar,
    length: Length,
    last_observed_width: Option<Scalar>,
}

impl SaturableAbsorber {
    /// Relative step tolerance for the implicit energy solve, as a fraction
    /// of the linear-absorber seed energy.
    const SOLVE_TOLERANCE: Scalar = 1e-4;

    /// Creates a saturable absorber.
    ///
    /// `cross_section` in m², `number_density` in 1/m³, `length` in m.
    #[must_use]
    pub const fn new(cross_section: Scalar, number_density: Scalar, length: Scalar) -> Self {
        Self {
            cross_section,
            number_density,
            initial_number_density: number_density,
            length: Length::new(length),
            last_observed_width: None,
        }
    }

    /// Current absorber number density in 1/m³; depletes toward zero.
    #[must_use]
    pub const fn number_density(&self) -> Scalar {
        self.number_density
    }

    /// Number density the absorber was constructed with, for diagnostics.
    #[must_use]
    pub const fn initial_number_density(&self) -> Scalar {
        self.initial_number_density
    }

    /// Absorber length in meters.
    #[must_use]
    pub const fn length(&self) -> Scalar {
        self.length.value()
    }

    /// Width of the most recently transmitted beam, for diagnostics.
    #[must_use]
    pub const fn last_observed_width(&self) -> Option<Scalar> {
        self.last_observed_width
    }

    /// Pulse saturation energy `Es` in joules with respect to the given
    /// beam's current width and frequency. Does not mutate anything.
    #[must_use]
    pub fn saturation_energy(&self, beam: &GaussianBeam) -> Scalar {
        let focal_volume = self.length.value() * beam.area();
        photon_energy(beam.frequency()) * self.number_density * focal_volume
    }

    /// Transmits one pulse train step through the absorber.
    ///
    /// Solves the implicit relation `-σ·n0·L + ln(E0/E1) + (E0-E1)/Es = 0`
    /// for the output pulse energy `E1` by Newton iteration seeded at the
    /// linear-absorber energy (a lower bound on the true root, since
    /// saturation only ever reduces absorption), then depletes the
    /// population by the absorbed photon count. Non-convergence aborts the
    /// step with the beam and absorber untouched.
    pub fn transmit(&mut self, beam: &mut GaussianBeam) -> Result<(), BeamError> {
        let rate = beam
            .repetition_rate()
            .ok_or(BeamError::RequiresPulsedBeam {
                element: "saturable absorber",
            })?;
        let length = self.length.value();
        let input_energy = beam.power() / rate;
        let attenuation = self.cross_section * self.number_density * length;
        if input_energy == 0.0 || attenuation == 0.0 {
            // An empty pulse absorbs nothing; a bleached absorber (n = 0)
            // transmits everything. Either way only the shape propagates.
            self.last_observed_width = Some(beam.width());
            return Space::new(length).transmit(beam);
        }

        let focal_volume = length * beam.area();
        let energy_per_absorber = photon_energy(beam.frequency());
        let saturation_energy = energy_per_absorber * self.number_density * focal_volume;

        let seed = input_energy * (-attenuation).exp();
        let options = NewtonOptions {
            max_iterations: 64,
            step_tolerance: seed * Self::SOLVE_TOLERANCE,
        };
        let solution = newton_raphson(
            |energy| {
                -attenuation
                    + (input_energy / energy).ln()
                    + (input_energy - energy) / saturation_energy
            },
            |energy| -energy.recip() - saturation_energy.recip(),
            seed,
            options,
        )?;
        let output_energy = solution.root;

        self.number_density -=
            (input_energy - output_energy) / (energy_per_absorber * focal_volume);
        if self.number_density < 0.0 {
            warn!(
                initial = self.initial_number_density,
                "absorber population fully bleached; clamping number density to zero"
            );
            self.number_density = 0.0;
        }
        self.last_observed_width = Some(beam.width());

        beam.set_power(output_energy * rate);
        Space::new(length).transmit(beam)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pulsed_beam(power: Scalar) -> GaussianBeam {
        GaussianBeam::new(power, 800e-9, 1e-3, f64::INFINITY)
            .unwrap()
            .with_repetition_rate(1e3)
            .unwrap()
    }

    #[test]
    fn linear_absorber_follows_beer_lambert() {
        let mut beam = GaussianBeam::new(1.0, 800e-9, 1e-3, f64::INFINITY).unwrap();
        let absorber = LinearAbsorber::new(1e-20, 1e24, 1e-3);
        absorber.transmit(&mut beam).unwrap();
        // α·L = 10 optical depths.
        assert_relative_eq!(beam.power(), (-10.0f64).exp(), max_relative = 1e-10);
        // The shape still traversed the absorber length.
        assert!(beam.waist_offset() > 0.0);
    }

    #[test]
    fn saturable_rejects_continuous_wave_beams() {
        let mut beam = GaussianBeam::new(1.0, 800e-9, 1e-3, f64::INFINITY).unwrap();
        let (w, r, p) = (beam.width(), beam.curvature(), beam.power());
        let mut absorber = SaturableAbsorber::new(1e-20, 1e24, 1e-3);
        let err = absorber
            .transmit(&mut beam)
            .expect_err("cw beam has no pulse energy");
        assert!(matches!(err, BeamError::RequiresPulsedBeam { .. }));
        // The failed step must not have touched the beam.
        assert_eq!(beam.width(), w);
        assert_eq!(beam.curvature(), r);
        assert_eq!(beam.power(), p);
    }

    #[test]
    fn saturation_transmits_more_than_the_linear_law() {
        // E0 = 1 mJ against Es ≈ 0.78 mJ: strong saturation.
        let mut saturated = pulsed_beam(1.0);
        let mut absorber = SaturableAbsorber::new(1e-20, 1e24, 1e-3);
        let es = absorber.saturation_energy(&saturated);
        assert!(es > 0.0);
        absorber.transmit(&mut saturated).unwrap();

        let mut linear = pulsed_beam(1.0);
        LinearAbsorber::new(1e-20, 1e24, 1e-3)
            .transmit(&mut linear)
            .unwrap();

        assert!(
            saturated.power() > linear.power(),
            "saturable output {} must exceed linear output {}",
            saturated.power(),
            linear.power()
        );
    }

    #[test]
    fn weak_pulses_approach_the_linear_limit() {
        // E0 = 1 nJ, orders of magnitude below Es: saturation negligible.
        let mut beam = pulsed_beam(1e-6);
        let mut absorber = SaturableAbsorber::new(1e-20, 1e24, 1e-3);
        absorber.transmit(&mut beam).unwrap();

        let mut linear = pulsed_beam(1e-6);
        LinearAbsorber::new(1e-20, 1e24, 1e-3)
            .transmit(&mut linear)
            .unwrap();

        assert_relative_eq!(beam.power(), linear.power(), max_relative = 1e-3);
        assert!(beam.power() >= linear.power());
    }

    #[test]
    fn population_depletes_and_clamps_at_zero() {
        let mut absorber = SaturableAbsorber::new(1e-20, 1e24, 1e-3);
        let initial = absorber.number_density();

        let mut beam = pulsed_beam(1.0);
        absorber.transmit(&mut beam).unwrap();
        assert!(absorber.number_density() < initial);
        assert!(absorber.number_density() >= 0.0);
        assert_relative_eq!(absorber.initial_number_density(), initial);
        assert_relative_eq!(absorber.last_observed_width().unwrap(), 1e-3);

        // Keep hammering it with strong pulses until it bleaches.
        for _ in 0..64 {
            let mut pulse = pulsed_beam(1.0);
            absorber.transmit(&mut pulse).unwrap();
        }
        assert_eq!(absorber.number_density(), 0.0);

        // A bleached absorber passes pulses unattenuated.
        let mut pulse = pulsed_beam(1.0);
        absorber.transmit(&mut pulse).unwrap();
        assert_relative_eq!(pulse.power(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn saturation_energy_tracks_beam_area() {
        let absorber = SaturableAbsorber::new(1e-20, 1e24, 1e-3);
        let narrow = pulsed_beam(1.0);
        let wide = GaussianBeam::new(1.0, 800e-9, 2e-3, f64::INFINITY)
            .unwrap()
            .with_repetition_rate(1e3)
            .unwrap();
        // Es scales with the focal volume, hence with w².
        assert_relative_eq!(
            absorber.saturation_energy(&wide) / absorber.saturation_energy(&narrow),
            4.0,
            max_relative = 1e-12
        );
    }
}
