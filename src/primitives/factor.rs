//! The `(value, uncertainty)` pair exchanged between lookups and the combiner.
//!
//! ## Purpose
//!
//! `ScaleFactor` is the unit produced by every table lookup and consumed by
//! the combiner. It is a small `Copy` value; nothing in the crate stores it
//! beyond a single evaluation.
//!
//! ## Invariants
//!
//! * Uncertainties produced by the crate are non-negative.
//! * The identity `(1, 0)` leaves any factor unchanged under `merge`.
//!
//! ## Non-goals
//!
//! * This module does not implement the combination rule (see `math::merge`).

// External dependencies
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A multiplicative correction with its absolute uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleFactor<T> {
    /// Central value.
    pub value: T,

    /// Absolute uncertainty on `value`.
    pub error: T,
}

impl<T: Float> ScaleFactor<T> {
    /// Create a scale factor from its value and uncertainty.
    #[inline]
    pub fn new(value: T, error: T) -> Self {
        Self { value, error }
    }

    /// The neutral element `(1, 0)`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero())
    }

    /// A pure systematic contribution `(1, fraction)`.
    ///
    /// Folded together with table-derived factors, this adds `fraction` of the
    /// running value in quadrature to the combined uncertainty.
    #[inline]
    pub fn systematic(fraction: T) -> Self {
        Self::new(T::one(), fraction)
    }

    /// Same value with the uncertainty forced to zero.
    #[inline]
    pub fn without_error(self) -> Self {
        Self::new(self.value, T::zero())
    }

    /// True when both value and uncertainty are exactly zero (an unfilled cell).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value == T::zero() && self.error == T::zero()
    }
}

impl<T: Float> Default for ScaleFactor<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T> From<(T, T)> for ScaleFactor<T> {
    fn from((value, error): (T, T)) -> Self {
        Self { value, error }
    }
}

impl<T> From<ScaleFactor<T>> for (T, T) {
    fn from(sf: ScaleFactor<T>) -> Self {
        (sf.value, sf.error)
    }
}
