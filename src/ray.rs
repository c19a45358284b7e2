//! Paraxial ray tracing with ABCD transfer matrices.
//!
//! A ray is the `(height, slope)` column vector of geometrical optics;
//! elements act on it by left-multiplication with their 2×2 transfer matrix
//! (Saleh & Teich ch. 1.4). This complements the Gaussian-beam engine:
//! rays answer imaging and alignment questions that do not need diffraction.

use crate::math::{recip_or_zero, R2, R2x2, Scalar};

/// An element's ABCD matrix plus the axial distance it occupies.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayElement {
    matrix: R2x2,
    advance: Scalar,
}

impl RayElement {
    /// Free space of length `distance` in a medium of index `index`.
    #[must_use]
    pub fn space(distance: Scalar, index: Scalar) -> Self {
        Self {
            matrix: R2x2::new(1.0, distance / index, 0.0, 1.0),
            advance: distance,
        }
    }

    /// An ideal thin lens of focal length `focal_length`.
    #[must_use]
    pub fn thin_lens(focal_length: Scalar) -> Self {
        Self {
            matrix: R2x2::new(1.0, 0.0, -recip_or_zero(focal_length), 1.0),
            advance: 0.0,
        }
    }

    /// A spherical refracting interface from index `n1` into `n2` with
    /// radius of curvature `radius` (positive when the center of curvature
    /// lies downstream). An infinite radius reduces to a flat interface.
    #[must_use]
    pub fn interface(n1: Scalar, n2: Scalar, radius: Scalar) -> Self {
        Self {
            matrix: R2x2::new(
                1.0,
                0.0,
                (n1 - n2) / n2 * recip_or_zero(radius),
                n1 / n2,
            ),
            advance: 0.0,
        }
    }

    /// A flat refracting interface from index `n1` into `n2`.
    #[must_use]
    pub fn flat_interface(n1: Scalar, n2: Scalar) -> Self {
        Self::interface(n1, n2, Scalar::INFINITY)
    }

    /// The ABCD transfer matrix.
    #[must_use]
    pub const fn matrix(&self) -> R2x2 {
        self.matrix
    }

    /// Axial extent of the element in meters.
    #[must_use]
    pub const fn advance(&self) -> Scalar {
        self.advance
    }

    /// Composes `self` followed by `after` into a single element.
    #[must_use]
    pub fn then(&self, after: &Self) -> Self {
        Self {
            matrix: after.matrix * self.matrix,
            advance: self.advance + after.advance,
        }
    }
}

/// A sampled point along a traced ray path.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    /// Axial position in meters.
    pub position: Scalar,
    /// Transverse height in meters.
    pub height: Scalar,
}

/// A paraxial ray with its traced path.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    height: Scalar,
    slope: Scalar,
    position: Scalar,
    path: Vec<RaySample>,
}

impl Ray {
    /// Creates a ray at axial position `position` with the given transverse
    /// height (m) and slope (rad, paraxial).
    #[must_use]
    pub fn new(height: Scalar, slope: Scalar, position: Scalar) -> Self {
        Self {
            height,
            slope,
            position,
            path: vec![RaySample { position, height }],
        }
    }

    /// Current transverse height in meters.
    #[must_use]
    pub const fn height(&self) -> Scalar {
        self.height
    }

    /// Current slope in radians.
    #[must_use]
    pub const fn slope(&self) -> Scalar {
        self.slope
    }

    /// Current axial position in meters.
    #[must_use]
    pub const fn position(&self) -> Scalar {
        self.position
    }

    /// The `(position, height)` samples accumulated so far, starting point
    /// included.
    #[must_use]
    pub fn path(&self) -> &[RaySample] {
        &self.path
    }

    /// Applies one element and appends the resulting sample.
    pub fn transmit(&mut self, element: &RayElement) -> &mut Self {
        let state = element.matrix() * R2::new(self.height, self.slope);
        self.height = state.x;
        self.slope = state.y;
        self.position += element.advance();
        self.path.push(RaySample {
            position: self.position,
            height: self.height,
        });
        self
    }

    /// Traces the ray through each element in order.
    pub fn trace(&mut self, elements: &[RayElement]) -> &mut Self {
        for element in elements {
            self.transmit(element);
        }
        self
    }
}
