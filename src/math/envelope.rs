//! Geometric-mean envelope of two scale factors.
//!
//! ## Purpose
//!
//! When two calibration bins overlap, or a gap between them must be filled,
//! the region gets a single value derived from both neighbours. Scale factors
//! are multiplicative, so the central value is their geometric mean; the
//! uncertainty is widened until the band covers both neighbours' bands.
//!
//! ## Design notes
//!
//! * **Formula**:
//!   ```text
//!   v      = sqrt(v_a * v_b)
//!   top    = max(v_a + e_a, v_b + e_b)
//!   bottom = min(v_a - e_a, v_b - e_b)
//!   e      = max(top - v, v - bottom)
//!   ```
//!
//! ## Invariants
//!
//! * `[v - e, v + e]` contains `[v_a - e_a, v_a + e_a]` and `[v_b - e_b, v_b + e_b]`.
//! * Two identical inputs give back that input.
//!
//! ## Non-goals
//!
//! * Values with a negative product have no geometric mean; callers validate
//!   inputs first.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::factor::ScaleFactor;

/// Geometric-mean value with an error band enveloping both inputs.
#[inline]
pub fn envelope<T: Float>(a: ScaleFactor<T>, b: ScaleFactor<T>) -> ScaleFactor<T> {
    let value = (a.value * b.value).sqrt();
    let top = (a.value + a.error).max(b.value + b.error);
    let bottom = (a.value - a.error).min(b.value - b.error);
    ScaleFactor::new(value, (top - value).max(value - bottom))
}
