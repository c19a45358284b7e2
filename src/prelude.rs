//! Convenience re-exports for building beam-propagation experiments.

pub use crate::absorber::{LinearAbsorber, SaturableAbsorber};
pub use crate::beam::{BeamSnapshot, CurvatureMeasurement, GaussianBeam, WidthMeasurement};
pub use crate::constants::*;
pub use crate::elements::{Aperture, Element, Lens, Space, OLYMPUS_TUBE_LENGTH};
pub use crate::errors::{BeamError, MaterialError, OpticsError, SpectraError};
pub use crate::materials::{Material, SellmeierCoefficients, Symmetry, BBO, LITHIUM_NIOBATE, N_BAF10};
pub use crate::math::{CScalar, Scalar};
pub use crate::propagation::propagate;
pub use crate::ray::{Ray, RayElement, RaySample};
pub use crate::spectra::{
    fabry_perot, fabry_perot_empirical, gaussian_spectral_field, gaussian_spectrum,
};
pub use crate::units::{Energy, Frequency, Length, Power, Quantity, Unit};
