//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Matrix2, Vector2};
use thiserror::Error;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (ray height/slope).
pub type R2 = Vector2<Scalar>;
/// Convenient alias for two-by-two real matrices (ray-transfer matrices).
pub type R2x2 = Matrix2<Scalar>;
/// Primary complex scalar type (complex beam parameter, spectral fields).
pub type CScalar = num_complex::Complex<Scalar>;

/// Returns `1/x`, treating `±∞` as exactly zero.
///
/// Inverse-curvature arithmetic leans on this so that a planar wavefront
/// (`r = ∞`) and an ideal flat lens (`f = ∞`) behave as identities.
#[inline]
#[must_use]
pub fn recip_or_zero(x: Scalar) -> Scalar {
    if x.is_infinite() {
        0.0
    } else {
        x.recip()
    }
}

/// Options controlling a scalar Newton-Raphson solve.
#[derive(Debug, Clone, Copy)]
pub struct NewtonOptions {
    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
    /// Converged when the Newton step magnitude drops below this.
    pub step_tolerance: Scalar,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            max_iterations: 64,
            step_tolerance: 1e-12,
        }
    }
}

/// Result of a successful Newton-Raphson solve.
#[derive(Debug, Clone, Copy)]
pub struct NewtonSolution {
    /// The converged root.
    pub root: Scalar,
    /// Iterations consumed.
    pub iterations: usize,
    /// Residual `|f(root)|` at the converged value.
    pub residual: Scalar,
}

/// Errors raised by the scalar root finder.
#[derive(Debug, Error)]
pub enum RootFindError {
    /// The iteration budget ran out before the step tolerance was met.
    #[error("root finder failed to converge after {iterations} iterations (residual {residual:.3e})")]
    MaxIterations {
        /// Iterations consumed before giving up.
        iterations: usize,
        /// Residual `|f(x)|` at the last iterate.
        residual: Scalar,
    },
    /// The derivative vanished or became non-finite at an iterate.
    #[error("root finder hit a degenerate derivative at x = {at:.6e}")]
    DegenerateDerivative {
        /// The iterate where the derivative broke down.
        at: Scalar,
    },
}

/// Scalar Newton-Raphson with an analytic derivative.
///
/// Well-behaved monotonic functions (everything this crate solves) converge
/// in a handful of iterations from a physically motivated seed.
pub fn newton_raphson<F, D>(
    f: F,
    df: D,
    seed: Scalar,
    options: NewtonOptions,
) -> Result<NewtonSolution, RootFindError>
where
    F: Fn(Scalar) -> Scalar,
    D: Fn(Scalar) -> Scalar,
{
    let mut x = seed;
    for iteration in 1..=options.max_iterations {
        let fx = f(x);
        let dfx = df(x);
        if !dfx.is_finite() || dfx == 0.0 {
            return Err(RootFindError::DegenerateDerivative { at: x });
        }
        let step = fx / dfx;
        x -= step;
        if step.abs() <= options.step_tolerance {
            return Ok(NewtonSolution {
                root: x,
                iterations: iteration,
                residual: f(x).abs(),
            });
        }
    }
    Err(RootFindError::MaxIterations {
        iterations: options.max_iterations,
        residual: f(x).abs(),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn newton_finds_square_root() {
        let solution = newton_raphson(
            |x| x * x - 2.0,
            |x| 2.0 * x,
            1.0,
            NewtonOptions::default(),
        )
        .expect("quadratic should converge");
        assert_relative_eq!(solution.root, 2.0_f64.sqrt(), max_relative = 1.0e-10);
        assert!(solution.iterations < 10);
    }

    #[test]
    fn newton_reports_exhaustion() {
        // A step tolerance of zero can never be met exactly for this f.
        let options = NewtonOptions {
            max_iterations: 3,
            step_tolerance: 0.0,
        };
        let err = newton_raphson(|x| x.exp() - 10.0, |x| x.exp(), 0.0, options)
            .expect_err("must exhaust iterations");
        assert!(matches!(err, RootFindError::MaxIterations { iterations: 3, .. }));
    }

    #[test]
    fn infinite_values_invert_to_zero() {
        assert_eq!(recip_or_zero(f64::INFINITY), 0.0);
        assert_eq!(recip_or_zero(f64::NEG_INFINITY), 0.0);
        assert_relative_eq!(recip_or_zero(4.0), 0.25);
    }
}
