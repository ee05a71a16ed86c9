//! Overlap and gap resolution for calibration curves.
//!
//! ## Purpose
//!
//! Calibration curves are often stitched together from independently fitted
//! segments, so the extents of neighbouring points can overlap or leave gaps.
//! This module turns such a point list into a single partition of the axis:
//! sorted, contiguous, non-overlapping bins.
//!
//! ## Design notes
//!
//! * **Fixed point**: Each pass drops zero-width bins, stable-sorts the rest
//!   and scans adjacent pairs. Every overlapping pair met during the scan is
//!   split; the scan resumes after the replacement pieces, which are not
//!   re-examined until the next pass re-sorts them. Gaps are filled in place
//!   only while no split has happened in the pass, since a gap next to
//!   unsorted pieces may already be covered.
//! * **Pass cap**: The loop is bounded by `max_passes`; hitting the cap is a
//!   configuration error rather than an endless loop.
//! * **Ordering**: `(low_edge, high_edge, |ln|value||, |error|)`. Among bins
//!   with the same extent, the one whose factor is closest to 1 comes first
//!   and therefore plays the `low` role in a split.
//!
//! ## Key concepts
//!
//! * **Gap** (`low.high < high.low`): a bin spanning the gap gets the
//!   envelope of both neighbours.
//! * **Overlap** (`low.high > high.low`), split by how `high` sits in `low`:
//!   ```text
//!   plain    |--low--|            -> |low|env|high|
//!                 |---high---|
//!   same end |-----low-----|      -> |low|--env--|
//!                 |--high--|
//!   subset   |------low------|    -> |low|env|low|
//!                 |high|
//!   ```
//! * **Zero-width bins**: splits of bins sharing a low edge leave empty
//!   `[a, a]` bins behind. They are dropped at the start of every pass since
//!   no coordinate can ever fall into them.
//!
//! ## Invariants
//!
//! * The result satisfies `bins[i].high_edge == bins[i + 1].low_edge`.
//! * The result covers `[min(low_edge), max(high_edge)]` of the input.
//!
//! ## Non-goals
//!
//! * This module does not validate its input (see `engine::validator`).
//! * This module does not build the table (see `engine::converter`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::{self, Equal};
use num_traits::Float;
use tracing::{debug, trace, warn};

// Internal dependencies
use crate::math::envelope::envelope;
use crate::primitives::errors::SfError;
use crate::primitives::point::CalibrationPoint;

// ============================================================================
// Ordering
// ============================================================================

/// Distance of a factor from 1 on a log scale.
#[inline]
fn log_deviation<T: Float>(value: T) -> T {
    value.abs().ln().abs()
}

/// Sort order used before every scan.
pub fn compare_points<T: Float>(a: &CalibrationPoint<T>, b: &CalibrationPoint<T>) -> Ordering {
    a.low_edge
        .partial_cmp(&b.low_edge)
        .unwrap_or(Equal)
        .then_with(|| a.high_edge.partial_cmp(&b.high_edge).unwrap_or(Equal))
        .then_with(|| {
            log_deviation(a.value)
                .partial_cmp(&log_deviation(b.value))
                .unwrap_or(Equal)
        })
        .then_with(|| a.error.abs().partial_cmp(&b.error.abs()).unwrap_or(Equal))
}

// ============================================================================
// Pair classification
// ============================================================================

/// Relation between two neighbouring bins in sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// `low.high_edge < high.low_edge`.
    Gap,

    /// `low.high_edge == high.low_edge`.
    Contiguous,

    /// `low.high_edge > high.low_edge`.
    Overlap,
}

/// Classify a sorted pair.
#[inline]
pub fn classify<T: Float>(low: &CalibrationPoint<T>, high: &CalibrationPoint<T>) -> Adjacency {
    if low.high_edge < high.low_edge {
        Adjacency::Gap
    } else if low.high_edge > high.low_edge {
        Adjacency::Overlap
    } else {
        Adjacency::Contiguous
    }
}

/// Bin filling the gap between `low` and `high`.
#[inline]
pub fn fill_gap<T: Float>(
    low: &CalibrationPoint<T>,
    high: &CalibrationPoint<T>,
) -> CalibrationPoint<T> {
    CalibrationPoint::with_factor(
        low.high_edge,
        high.low_edge,
        envelope(low.factor(), high.factor()),
    )
}

/// Replacement bins for an overlapping pair, lowest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Split<T> {
    /// `high` ends exactly where `low` ends.
    Two([CalibrationPoint<T>; 2]),

    /// Plain overlap or strict subset.
    Three([CalibrationPoint<T>; 3]),
}

impl<T> Split<T> {
    /// The replacement bins.
    pub fn as_slice(&self) -> &[CalibrationPoint<T>] {
        match self {
            Split::Two(bins) => bins,
            Split::Three(bins) => bins,
        }
    }
}

/// Split an overlapping sorted pair into contiguous pieces.
pub fn split_overlap<T: Float>(
    low: &CalibrationPoint<T>,
    high: &CalibrationPoint<T>,
) -> Split<T> {
    let merged = envelope(low.factor(), high.factor());
    let head = CalibrationPoint::new(low.low_edge, high.low_edge, low.value, low.error);

    if low.high_edge < high.high_edge {
        Split::Three([
            head,
            CalibrationPoint::with_factor(high.low_edge, low.high_edge, merged),
            CalibrationPoint::new(low.high_edge, high.high_edge, high.value, high.error),
        ])
    } else if low.high_edge == high.high_edge {
        Split::Two([
            head,
            CalibrationPoint::with_factor(high.low_edge, high.high_edge, merged),
        ])
    } else {
        Split::Three([
            head,
            CalibrationPoint::with_factor(high.low_edge, high.high_edge, merged),
            CalibrationPoint::new(high.high_edge, low.high_edge, low.value, low.error),
        ])
    }
}

// ============================================================================
// Fixed-point resolution
// ============================================================================

/// Result of resolving a curve into a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    /// Sorted, contiguous bins of positive width.
    pub bins: Vec<CalibrationPoint<T>>,

    /// Passes performed, including the final clean one.
    pub passes: usize,

    /// Overlapping pairs split, over all passes.
    pub splits: usize,

    /// Gaps filled.
    pub gaps: usize,

    /// Zero-width bins dropped, over all passes.
    pub pruned: usize,
}

/// Running totals of one resolution.
#[derive(Debug, Default)]
struct PassStats {
    splits: usize,
    gaps: usize,
    pruned: usize,
}

/// One prune-sort-scan pass. Returns `true` when at least one overlap was split.
fn resolve_pass<T: Float>(bins: &mut Vec<CalibrationPoint<T>>, stats: &mut PassStats) -> bool {
    let before = bins.len();
    bins.retain(|b| b.high_edge > b.low_edge);
    stats.pruned += before - bins.len();

    bins.sort_by(compare_points);

    let mut changed = false;
    let mut i = 0;
    while i + 1 < bins.len() {
        let (low, high) = (bins[i], bins[i + 1]);
        match classify(&low, &high) {
            Adjacency::Contiguous => {}
            Adjacency::Gap => {
                if !changed {
                    bins.insert(i + 1, fill_gap(&low, &high));
                    stats.gaps += 1;
                }
            }
            Adjacency::Overlap => {
                let split = split_overlap(&low, &high);
                let pieces = split.as_slice().len();
                trace!(
                    index = i,
                    low = ?(low.low_edge.to_f64(), low.high_edge.to_f64()),
                    high = ?(high.low_edge.to_f64(), high.high_edge.to_f64()),
                    pieces,
                    "split overlapping bins"
                );
                bins.splice(i..i + 2, split.as_slice().iter().copied());
                stats.splits += 1;
                changed = true;
                i += pieces;
                continue;
            }
        }
        i += 1;
    }
    changed
}

/// Resolve `points` into a contiguous partition.
pub fn resolve<T: Float>(
    points: &[CalibrationPoint<T>],
    max_passes: usize,
) -> Result<Resolution<T>, SfError> {
    let mut bins = points.to_vec();
    let mut stats = PassStats::default();
    let mut passes = 0;

    loop {
        if passes >= max_passes {
            warn!(passes, bins = bins.len(), "overlap resolution did not converge");
            return Err(SfError::NotConverged {
                passes,
                bins: bins.len(),
            });
        }
        passes += 1;
        if !resolve_pass(&mut bins, &mut stats) {
            break;
        }
    }

    // Zero-width bins were dropped by the final clean pass
    if bins.is_empty() {
        return Err(SfError::DegenerateCurve);
    }

    verify_partition(&bins)?;

    let PassStats {
        splits,
        gaps,
        pruned,
    } = stats;
    debug!(
        points = points.len(),
        bins = bins.len(),
        passes,
        splits,
        gaps,
        pruned,
        "resolved curve partition"
    );

    Ok(Resolution {
        bins,
        passes,
        splits,
        gaps,
        pruned,
    })
}

/// Check that every bin ends exactly where the next one starts.
pub fn verify_partition<T: Float>(bins: &[CalibrationPoint<T>]) -> Result<(), SfError> {
    for (index, pair) in bins.windows(2).enumerate() {
        if pair[0].high_edge != pair[1].low_edge {
            return Err(SfError::DegenerateOverlap {
                index,
                high_edge: pair[0].high_edge.to_f64().unwrap_or(f64::NAN),
                next_low_edge: pair[1].low_edge.to_f64().unwrap_or(f64::NAN),
            });
        }
    }
    Ok(())
}
