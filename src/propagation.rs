//! Driving a beam through a sequence of elements.
//!
//! The pipeline owns the ordering and history-recording policy; the physics
//! of each step lives with the element. When recording is enabled the beam
//! snapshots its state before every step, and free-space segments longer
//! than the beam's record step are split into bounded sub-steps so the
//! history samples the caustic at a controlled axial resolution.

use crate::beam::GaussianBeam;
use crate::elements::{Element, Space};
use crate::errors::BeamError;
use crate::math::Scalar;

/// Transmits the beam through each element in order.
///
/// Stops at the first failing element; everything transmitted before the
/// failure remains applied, and the failing step itself leaves the beam
/// untouched.
///
/// # Errors
///
/// Propagates the first [`BeamError`] returned by any element.
pub fn propagate<'a, I>(beam: &mut GaussianBeam, elements: I) -> Result<(), BeamError>
where
    I: IntoIterator<Item = &'a mut Element>,
{
    for element in elements {
        apply(beam, element)?;
    }
    Ok(())
}

/// Applies one element, handling the recording policy.
///
/// Forward free-space steps longer than the record bound are subdivided,
/// with a snapshot taken before each sub-step. Every other element gets a
/// single snapshot before it acts. Backward steps are never subdivided;
/// sampling resolution only matters along the forward caustic.
fn apply(beam: &mut GaussianBeam, element: &mut Element) -> Result<(), BeamError> {
    if beam.is_recording() {
        let bound = beam.max_record_step();
        if let Element::Space(space) = element {
            let mut remaining = space.distance();
            if remaining > bound {
                while remaining > bound {
                    beam.record();
                    Space::new(bound).transmit(beam)?;
                    remaining -= bound;
                }
                beam.record();
                return Space::new(remaining).transmit(beam);
            }
        }
        beam.record();
    }
    element.transmit(beam)
}

impl GaussianBeam {
    /// Transmits the beam through a single element, returning `&mut Self`
    /// so successive elements chain with `?`.
    ///
    /// # Errors
    ///
    /// Propagates the element's [`BeamError`].
    pub fn propagate(&mut self, element: &mut Element) -> Result<&mut Self, BeamError> {
        apply(self, element)?;
        Ok(self)
    }

    /// Shorthand for propagating through free space.
    ///
    /// # Errors
    ///
    /// Propagates the element's [`BeamError`].
    pub fn propagate_distance(&mut self, distance: Scalar) -> Result<&mut Self, BeamError> {
        self.propagate(&mut Element::from(distance))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::elements::Lens;

    fn waist_beam() -> GaussianBeam {
        GaussianBeam::new(10e-3, 632e-9, 1e-3, f64::INFINITY).unwrap()
    }

    #[test]
    fn pipeline_matches_manual_element_application() {
        let f = 3e-2;
        let mut relay = vec![
            Element::from(f),
            Element::from(Lens::new(f)),
            Element::from(f),
        ];
        let mut beam = waist_beam();
        propagate(&mut beam, relay.iter_mut()).unwrap();

        assert!(beam.curvature().is_infinite());
        let expected = f * 632e-9 / (PI * 1e-3);
        assert_relative_eq!(beam.width(), expected, max_relative = 1e-9);
    }

    #[test]
    fn chained_propagation_agrees_with_the_pipeline() {
        let f = 3e-2;
        let mut pipeline_beam = waist_beam();
        let mut relay = vec![
            Element::from(f),
            Element::from(Lens::new(f)),
            Element::from(f),
        ];
        propagate(&mut pipeline_beam, relay.iter_mut()).unwrap();

        let mut chained = waist_beam();
        chained
            .propagate_distance(f)
            .unwrap()
            .propagate(&mut Element::from(Lens::new(f)))
            .unwrap()
            .propagate_distance(f)
            .unwrap();

        assert_eq!(chained.width(), pipeline_beam.width());
        assert_eq!(chained.curvature(), pipeline_beam.curvature());
    }

    #[test]
    fn no_history_without_recording() {
        let mut beam = waist_beam();
        beam.propagate_distance(1.0).unwrap();
        assert!(beam.history().is_empty());
    }

    #[test]
    fn long_space_steps_are_subdivided() {
        let mut beam = waist_beam().with_record_step(1e-2).unwrap();
        // 3.5 cm at a 1 cm bound: three full sub-steps plus a 0.5 cm tail.
        beam.propagate_distance(3.5e-2).unwrap();

        let history = beam.history();
        assert_eq!(history.len(), 4);
        let mut previous = 0.0;
        for snapshot in history {
            assert!(snapshot.waist_offset - previous <= 1e-2 * (1.0 + 1e-12));
            previous = snapshot.waist_offset;
        }
        // The subdivision must not change the endpoint.
        assert_relative_eq!(beam.waist_offset(), 3.5e-2, max_relative = 1e-12);
    }

    #[test]
    fn short_and_backward_steps_record_exactly_once() {
        let mut beam = waist_beam().with_record_step(1e-2).unwrap();
        beam.propagate_distance(5e-3).unwrap();
        assert_eq!(beam.history().len(), 1);

        beam.propagate_distance(-5e-2).unwrap();
        // One more snapshot, taken before the backward step.
        assert_eq!(beam.history().len(), 2);
        assert_relative_eq!(beam.history()[1].waist_offset, 5e-3, max_relative = 1e-12);
    }

    #[test]
    fn non_space_elements_record_their_entry_state() {
        let mut beam = waist_beam().with_record_step(1e-2).unwrap();
        let f = 3e-2;
        let mut relay = vec![
            Element::from(f),
            Element::from(Lens::new(f)),
            Element::from(f),
        ];
        propagate(&mut beam, relay.iter_mut()).unwrap();

        // Each 3 cm segment contributes 3 snapshots, the lens one more.
        let history = beam.history();
        assert_eq!(history.len(), 7);
        // The lens entry snapshot still shows the pre-lens curvature.
        assert!(history[3].curvature > 0.0);
        assert!(history[3].curvature.is_finite());
    }

    #[test]
    fn failure_stops_the_pipeline_in_place() {
        // A continuous-wave beam cannot pass a saturable absorber.
        let mut beam = waist_beam();
        let mut line = vec![
            Element::from(1e-2),
            Element::from(crate::absorber::SaturableAbsorber::new(1e-20, 1e24, 1e-3)),
            Element::from(1e-2),
        ];
        let err = propagate(&mut beam, line.iter_mut()).expect_err("cw beam must fail");
        assert!(matches!(err, BeamError::RequiresPulsedBeam { .. }));
        // The leading space segment was applied, the rest was not.
        assert_relative_eq!(beam.waist_offset(), 1e-2, max_relative = 1e-12);
    }
}
