//! Configuration types for out-of-range table lookups.
//!
//! ## Purpose
//!
//! Calibration tables are measured over a finite range, but event coordinates
//! are not. This module defines how a lookup behaves when a coordinate falls
//! into the underflow or overflow region of either axis.
//!
//! ## Design notes
//!
//! * **Default**: `ClampEmpty`. Loaded tables start with empty flow cells, so
//!   they fall back to the nearest measured cell.
//! * **Converted curves**: Tables built from curves carry the `(1, 1)`
//!   sentinel in the curve axis' flow cells. Those cells are not empty, so
//!   under `ClampEmpty` they are returned as is and never fall back; `Clamp`
//!   extrapolates the edge bins instead.
//!
//! ## Invariants
//!
//! * No policy ever fails; every lookup returns a number.
//!
//! ## Non-goals
//!
//! * This module does not perform the lookup itself (handled by `algorithms::lookup`).

/// Policy for lookups that land in a flow cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Substitute the nearest in-range cell only when the flow cell is empty
    /// (zero content and zero error); filled flow cells are returned as is.
    #[default]
    ClampEmpty,

    /// Always substitute the nearest in-range cell for flow cells.
    Clamp,

    /// Return the flow cell's content unchanged.
    Raw,
}
