//! Calibration curve points.
//!
//! ## Purpose
//!
//! A calibration curve arrives as points with a position, asymmetric
//! horizontal half-widths and an asymmetric vertical uncertainty
//! (`CurvePoint`). The converter works on the symmetrized bin view of each
//! point (`CalibrationPoint`).
//!
//! ## Key concepts
//!
//! * **Extent**: `[x - |ex_low|, x + |ex_high|]`.
//! * **Symmetrized error**: `max(|ey_low|, |ey_high|)`.

// External dependencies
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::factor::ScaleFactor;

/// Raw curve point with asymmetric errors on both coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurvePoint<T> {
    /// Position along the curve axis.
    pub x: T,
    /// Distance from `x` to the bin's low edge.
    pub ex_low: T,
    /// Distance from `x` to the bin's high edge.
    pub ex_high: T,
    /// Central scale factor.
    pub y: T,
    /// Downward uncertainty on `y`.
    pub ey_low: T,
    /// Upward uncertainty on `y`.
    pub ey_high: T,
}

/// One bin of a calibration curve: an extent with a value and symmetric error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationPoint<T> {
    /// Low edge of the extent.
    pub low_edge: T,
    /// High edge of the extent.
    pub high_edge: T,
    /// Central scale factor.
    pub value: T,
    /// Symmetric uncertainty.
    pub error: T,
}

impl<T: Float> CalibrationPoint<T> {
    /// Create a point from its extent, value and error.
    #[inline]
    pub fn new(low_edge: T, high_edge: T, value: T, error: T) -> Self {
        Self {
            low_edge,
            high_edge,
            value,
            error,
        }
    }

    /// Create a point covering `[low_edge, high_edge]` with the given factor.
    #[inline]
    pub fn with_factor(low_edge: T, high_edge: T, sf: ScaleFactor<T>) -> Self {
        Self::new(low_edge, high_edge, sf.value, sf.error)
    }

    /// The point's `(value, error)`.
    #[inline]
    pub fn factor(&self) -> ScaleFactor<T> {
        ScaleFactor::new(self.value, self.error)
    }

    /// Extent width.
    #[inline]
    pub fn width(&self) -> T {
        self.high_edge - self.low_edge
    }
}

impl<T: Float> From<CurvePoint<T>> for CalibrationPoint<T> {
    fn from(p: CurvePoint<T>) -> Self {
        Self::new(
            p.x - p.ex_low.abs(),
            p.x + p.ex_high.abs(),
            p.y,
            p.ey_low.abs().max(p.ey_high.abs()),
        )
    }
}
