//! Marker-typed physical quantities.
//!
//! A [`Quantity`] pairs a raw magnitude with a zero-sized unit marker so that
//! a focal length and a beam power cannot be swapped silently, while staying
//! a plain `f64` at runtime. Display output carries the unit symbol.

use std::fmt;
use std::marker::PhantomData;

/// Marker trait implemented by zero-sized unit types.
pub trait Unit {
    /// SI symbol appended by `Display` (e.g. `"m"`).
    const SYMBOL: &'static str;
}

/// Meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meter;
impl Unit for Meter {
    const SYMBOL: &'static str = "m";
}

/// Watts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watt;
impl Unit for Watt {
    const SYMBOL: &'static str = "W";
}

/// Hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hertz;
impl Unit for Hertz {
    const SYMBOL: &'static str = "Hz";
}

/// Joules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joule;
impl Unit for Joule {
    const SYMBOL: &'static str = "J";
}

/// A magnitude tagged with a unit marker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<T, U: Unit> {
    value: T,
    #[cfg_attr(feature = "serde", serde(skip))]
    _unit: PhantomData<U>,
}

impl<T, U: Unit> Quantity<T, U> {
    /// Wraps a raw magnitude.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            _unit: PhantomData,
        }
    }
}

impl<T: Copy, U: Unit> Quantity<T, U> {
    /// Returns the raw magnitude.
    #[must_use]
    pub const fn value(&self) -> T {
        self.value
    }
}

impl<T: fmt::Display, U: Unit> fmt::Display for Quantity<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, U::SYMBOL)
    }
}

/// A length in meters.
pub type Length = Quantity<crate::math::Scalar, Meter>;
/// A power in watts.
pub type Power = Quantity<crate::math::Scalar, Watt>;
/// A frequency in hertz.
pub type Frequency = Quantity<crate::math::Scalar, Hertz>;
/// An energy in joules.
pub type Energy = Quantity<crate::math::Scalar, Joule>;
