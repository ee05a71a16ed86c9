//! Combination of independent scale factors.
//!
//! ## Purpose
//!
//! This module merges scale factors that apply multiplicatively to the same
//! quantity. It is used both to combine the calibration sources of one
//! physics object and to combine all selected objects of one event.
//!
//! ## Design notes
//!
//! * **Formula**: For `a = (v_a, u_a)` and `b = (v_b, u_b)`:
//!   ```text
//!   v = v_a * v_b
//!   u = hypot(v_a * u_b, v_b * u_a)
//!   ```
//!   i.e. relative uncertainties of a product added in quadrature.
//! * **Systematics**: A flat systematic is the pseudo-factor `(1, c)` folded
//!   in the same sequence; no separate code path exists for it.
//!
//! ## Invariants
//!
//! * `(1, 0)` is the identity on both sides.
//! * `merge(a, b) == merge(b, a)` exactly.
//! * Folding is order-independent up to floating-point rounding.
//!
//! ## Non-goals
//!
//! * This module does not derive up/down variations (see `engine::weighter`).

// External dependencies
use core::iter::Product;
use core::ops::{Mul, MulAssign};
use num_traits::Float;

// Internal dependencies
use crate::primitives::factor::ScaleFactor;

// ============================================================================
// Merge
// ============================================================================

/// Merge two independent scale factors.
#[inline]
pub fn merge<T: Float>(a: ScaleFactor<T>, b: ScaleFactor<T>) -> ScaleFactor<T> {
    ScaleFactor::new(
        a.value * b.value,
        (a.value * b.error).hypot(b.value * a.error),
    )
}

/// Fold a sequence of scale factors, starting from the identity.
pub fn merge_all<T, I>(factors: I) -> ScaleFactor<T>
where
    T: Float,
    I: IntoIterator<Item = ScaleFactor<T>>,
{
    factors.into_iter().fold(ScaleFactor::identity(), merge)
}

impl<T: Float> ScaleFactor<T> {
    /// Merge with another independent scale factor.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        merge(self, other)
    }
}

// ============================================================================
// Operator sugar
// ============================================================================

impl<T: Float> Mul for ScaleFactor<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        merge(self, rhs)
    }
}

impl<T: Float> MulAssign for ScaleFactor<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = merge(*self, rhs);
    }
}

impl<T: Float> Product for ScaleFactor<T> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        merge_all(iter)
    }
}

impl<'a, T: Float> Product<&'a ScaleFactor<T>> for ScaleFactor<T> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        merge_all(iter.copied())
    }
}
