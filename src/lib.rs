#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants used throughout the library.
pub mod constants;
/// Strongly typed unit helpers and quantity abstractions.
pub mod units;
/// Shared mathematical utilities (scalar aliases, root finding).
pub mod math;
/// Error types shared between modules.
pub mod errors;
/// Gaussian beam state and derived properties.
pub mod beam;
/// Optical element variants and their transmission transforms.
pub mod elements;
/// Linear and saturable absorption models.
pub mod absorber;
/// Element sequencing with bounded-step history recording.
pub mod propagation;
/// Paraxial ray-transfer-matrix tracing.
pub mod ray;
/// Sellmeier refractive-index data for optical materials.
pub mod materials;
/// Fabry-Perot transmission and pulse spectrum helpers.
pub mod spectra;

/// Common exports for downstream crates.
pub mod prelude;
