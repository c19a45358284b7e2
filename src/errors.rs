//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::{RootFindError, Scalar};

/// Errors raised while constructing or propagating a Gaussian beam.
#[derive(Debug, Error)]
pub enum BeamError {
    /// A constructor argument is outside its physical domain.
    #[error("invalid beam parameter: {0}")]
    InvalidParameter(&'static str),
    /// Two-measurement inputs do not describe a realizable Gaussian mode.
    #[error("unphysical measurement pair: {0}")]
    UnphysicalMeasurement(String),
    /// The two-curvature initialization path is a documented gap.
    #[error("initialization from two curvature measurements is not implemented")]
    TwoCurvatureUnimplemented,
    /// A pulsed-only element was applied to a continuous-wave beam.
    #[error("{element} requires a pulsed beam (no repetition rate set)")]
    RequiresPulsedBeam {
        /// The element that rejected the beam.
        element: &'static str,
    },
    /// The saturable-absorber energy solve did not converge; the step is
    /// aborted and the beam left untouched.
    #[error("absorber energy solve failed: {0}")]
    AbsorberSolve(#[from] RootFindError),
}

/// Errors raised by the material catalog.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// No Sellmeier record for the requested material name.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
}

/// Errors raised by the spectral helpers.
#[derive(Debug, Error)]
pub enum SpectraError {
    /// A spectral parameter left its physical domain.
    #[error("invalid spectral parameter: {name} = {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: Scalar,
    },
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum OpticsError {
    /// Wraps beam construction and propagation errors.
    #[error(transparent)]
    Beam(#[from] BeamError),
    /// Wraps material catalog errors.
    #[error(transparent)]
    Material(#[from] MaterialError),
    /// Wraps spectral helper errors.
    #[error(transparent)]
    Spectra(#[from] SpectraError),
}
