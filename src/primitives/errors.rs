//! Error types for scale-factor lookup, combination and curve conversion.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by every fallible
//! operation in the crate. Errors fall into three groups:
//!
//! * **Configuration** errors are fatal at startup: a calibration source or a
//!   named item inside it is missing, or a curve could not be resolved into a
//!   table. Processing must not start when one of these is returned.
//! * **Input** errors reject malformed data or builder parameters.
//! * **Internal** errors (`DegenerateOverlap`) signal a defect in the overlap
//!   resolution and must never be observed with correct code.
//!
//! Out-of-range lookups are not errors; they are handled by the table's
//! overflow policy.
//!
//! ## Design notes
//!
//! * **no_std**: `Display` is implemented by hand; `std::error::Error` is only
//!   implemented with the `std` feature.
//! * **Comparable**: Errors implement `Clone` and `PartialEq` for testing.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;

/// Errors produced while building, converting or evaluating scale factors.
#[derive(Debug, Clone, PartialEq)]
pub enum SfError {
    /// Input sequence is empty.
    EmptyInput,

    /// A value is NaN, infinite or otherwise outside its numeric domain.
    InvalidNumericValue(String),

    /// Bin edges are missing or not strictly increasing.
    InvalidEdges(String),

    /// A calibration point has `low_edge > high_edge`.
    InvalidExtent {
        /// Index of the offending point.
        index: usize,
        /// Its low edge.
        low: f64,
        /// Its high edge.
        high: f64,
    },

    /// Two inputs that must agree in length do not.
    MismatchedInputs {
        /// Expected number of entries.
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },

    /// The resolution pass limit is zero.
    InvalidIterationLimit(usize),

    /// A range is empty, reversed or not finite.
    InvalidRange {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// A builder parameter was configured more than once.
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },

    /// The resolved partition has no bin of positive width.
    DegenerateCurve,

    /// Overlap resolution did not reach a fixed point within the pass limit.
    NotConverged {
        /// Number of passes performed.
        passes: usize,
        /// Number of bins when the limit was hit.
        bins: usize,
    },

    /// Two adjacent bins of a resolved partition are not contiguous.
    DegenerateOverlap {
        /// Index of the lower bin of the pair.
        index: usize,
        /// High edge of the lower bin.
        high_edge: f64,
        /// Low edge of the following bin.
        next_low_edge: f64,
    },

    /// A calibration source (file) could not be located or opened.
    SourceNotFound {
        /// Source name as requested.
        source: String,
        /// Underlying reason.
        reason: String,
    },

    /// A named table or curve is missing from its calibration source.
    ItemNotFound {
        /// Source name.
        source: String,
        /// Item name.
        item: String,
    },

    /// A calibration source exists but could not be parsed.
    MalformedSource {
        /// Source name.
        source: String,
        /// Parser message.
        reason: String,
    },

    /// No weighting branch is registered under the requested name.
    UnknownBranch(String),

    /// A selected object has a kind with no recipe in the active branch.
    UnknownObjectKind {
        /// Branch being evaluated.
        branch: String,
        /// Object kind without a recipe.
        kind: String,
    },
}

impl SfError {
    /// True for errors that must abort processing before any event is weighted.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SfError::SourceNotFound { .. }
                | SfError::ItemNotFound { .. }
                | SfError::MalformedSource { .. }
                | SfError::NotConverged { .. }
                | SfError::UnknownBranch(_)
                | SfError::UnknownObjectKind { .. }
        )
    }
}

impl fmt::Display for SfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SfError::EmptyInput => write!(f, "Input is empty"),
            SfError::InvalidNumericValue(msg) => write!(f, "Invalid numeric value: {}", msg),
            SfError::InvalidEdges(msg) => write!(f, "Invalid bin edges: {}", msg),
            SfError::InvalidExtent { index, low, high } => write!(
                f,
                "Invalid extent for point {}: low edge {} is above high edge {}",
                index, low, high
            ),
            SfError::MismatchedInputs { expected, got } => {
                write!(f, "Length mismatch: expected {} entries, got {}", expected, got)
            }
            SfError::InvalidIterationLimit(limit) => {
                write!(f, "Invalid max_passes: {} (must be at least 1)", limit)
            }
            SfError::InvalidRange { low, high } => write!(
                f,
                "Invalid range: [{}, {}] (bounds must be finite and increasing)",
                low, high
            ),
            SfError::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
            SfError::DegenerateCurve => {
                write!(f, "Curve resolves to no bin of positive width")
            }
            SfError::NotConverged { passes, bins } => write!(
                f,
                "Overlap resolution did not converge after {} passes ({} bins)",
                passes, bins
            ),
            SfError::DegenerateOverlap {
                index,
                high_edge,
                next_low_edge,
            } => write!(
                f,
                "Resolved bins {} and {} are not contiguous: {} != {}",
                index,
                index + 1,
                high_edge,
                next_low_edge
            ),
            SfError::SourceNotFound { source, reason } => {
                write!(f, "Could not open calibration source '{}': {}", source, reason)
            }
            SfError::ItemNotFound { source, item } => {
                write!(f, "Could not find '{}' in '{}'", item, source)
            }
            SfError::MalformedSource { source, reason } => {
                write!(f, "Malformed calibration source '{}': {}", source, reason)
            }
            SfError::UnknownBranch(name) => write!(f, "Unknown weighting branch '{}'", name),
            SfError::UnknownObjectKind { branch, kind } => write!(
                f,
                "Branch '{}' has no recipe for object kind '{}'",
                branch, kind
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SfError {}
