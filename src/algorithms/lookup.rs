//! Table lookup with boundary fallback.
//!
//! ## Purpose
//!
//! This module resolves a query `(x, y)` against a `ScaleFactorTable`. Tables
//! cover a finite measured range while events do not, so queries landing in a
//! flow cell are handled by an `OverflowPolicy` instead of failing.
//!
//! ## Key concepts
//!
//! * **Empty flow cell**: a flow cell with zero content and zero error was
//!   never filled; under `ClampEmpty` the query is moved to the nearest
//!   in-range cell, clamping each axis independently. The value is thus
//!   extrapolated flat from the nearest measured bin.
//! * **Filled flow cell**: returned as is under `ClampEmpty`. Converted tables
//!   fill the curve axis' flow cells with `(1, 1)`, so they never fall back.
//! * **ignore_error**: zeroes the returned uncertainty, for sources whose
//!   uncertainty is carried by a separate systematic term.
//!
//! ## Invariants
//!
//! * Lookups never fail and never mutate the table.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::factor::ScaleFactor;
use crate::primitives::policy::OverflowPolicy;
use crate::primitives::table::ScaleFactorTable;

/// Look up `(x, y)` under an explicit overflow policy.
pub fn lookup_with<T: Float>(
    table: &ScaleFactorTable<T>,
    x: T,
    y: T,
    ignore_error: bool,
    policy: OverflowPolicy,
) -> ScaleFactor<T> {
    let (ix, iy) = table.find_bin(x, y);
    let cell = table.bin(ix, iy);

    let substitute = table.is_flow(ix, iy)
        && match policy {
            OverflowPolicy::ClampEmpty => cell.is_empty(),
            OverflowPolicy::Clamp => true,
            OverflowPolicy::Raw => false,
        };

    let sf = if substitute {
        table.bin(table.x_axis().clamp(ix), table.y_axis().clamp(iy))
    } else {
        cell
    };

    if ignore_error { sf.without_error() } else { sf }
}

impl<T: Float> ScaleFactorTable<T> {
    /// Look up `(x, y)`, falling back to the nearest in-range cell when the
    /// query lands in an empty flow cell.
    #[inline]
    pub fn lookup(&self, x: T, y: T, ignore_error: bool) -> ScaleFactor<T> {
        lookup_with(self, x, y, ignore_error, OverflowPolicy::default())
    }

    /// Look up `(x, y)` under the given overflow policy.
    #[inline]
    pub fn lookup_with(
        &self,
        x: T,
        y: T,
        ignore_error: bool,
        policy: OverflowPolicy,
    ) -> ScaleFactor<T> {
        lookup_with(self, x, y, ignore_error, policy)
    }
}
