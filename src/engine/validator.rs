//! Input validation for curves, conversion settings and recipes.
//!
//! ## Purpose
//!
//! This module provides the validation functions run before a curve is
//! converted or a builder produces its configured object. It checks
//! requirements such as non-empty input, finite values, ordered extents and
//! parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Finite Checks**: Edges, values and errors must not be NaN or infinite.
//! * **Uncertainties**: Errors must be non-negative. Asymmetric curve errors
//!   are folded to magnitudes before they reach this check.
//! * **Extents**: A point's low edge must not exceed its high edge.
//! * **Positivity**: Values are multiplicative factors; the geometric mean
//!   used for merged bins needs them non-negative.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not resolve overlaps or build tables.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SfError;
use crate::primitives::factor::ScaleFactor;
use crate::primitives::point::CalibrationPoint;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for curve data and configuration.
///
/// Provides static methods that return `Result<(), SfError>` and fail fast
/// upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate calibration points before conversion.
    pub fn validate_points<T: Float>(points: &[CalibrationPoint<T>]) -> Result<(), SfError> {
        // Check 1: Non-empty
        if points.is_empty() {
            return Err(SfError::EmptyInput);
        }

        for (i, p) in points.iter().enumerate() {
            // Check 2: All fields finite
            Self::validate_scalar(p.low_edge, &format!("point[{}].low_edge", i))?;
            Self::validate_scalar(p.high_edge, &format!("point[{}].high_edge", i))?;
            Self::validate_scalar(p.value, &format!("point[{}].value", i))?;

            // Check 3: Ordered extent
            if p.low_edge > p.high_edge {
                return Err(SfError::InvalidExtent {
                    index: i,
                    low: p.low_edge.to_f64().unwrap_or(f64::NAN),
                    high: p.high_edge.to_f64().unwrap_or(f64::NAN),
                });
            }

            // Check 4: Non-negative factor
            if p.value < T::zero() {
                return Err(SfError::InvalidNumericValue(format!(
                    "point[{}].value={} (must be >= 0)",
                    i,
                    p.value.to_f64().unwrap_or(f64::NAN)
                )));
            }

            // Check 5: Usable uncertainty
            Self::validate_uncertainty(p.error, &format!("point[{}].error", i))?;
        }

        Ok(())
    }

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), SfError> {
        if !val.is_finite() {
            return Err(SfError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate a scale factor: finite value, finite non-negative error.
    pub fn validate_factor<T: Float>(sf: ScaleFactor<T>, name: &str) -> Result<(), SfError> {
        Self::validate_scalar(sf.value, name)?;
        Self::validate_uncertainty(sf.error, name)
    }

    /// Validate an uncertainty: finite and non-negative.
    pub fn validate_uncertainty<T: Float>(err: T, name: &str) -> Result<(), SfError> {
        if !err.is_finite() || err < T::zero() {
            return Err(SfError::InvalidNumericValue(format!(
                "{}={} (uncertainty must be finite and >= 0)",
                name,
                err.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the overlap-resolution pass limit.
    pub fn validate_max_passes(max_passes: usize) -> Result<(), SfError> {
        if max_passes == 0 {
            return Err(SfError::InvalidIterationLimit(max_passes));
        }
        Ok(())
    }

    /// Validate a finite, strictly increasing range.
    pub fn validate_range<T: Float>(low: T, high: T) -> Result<(), SfError> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(SfError::InvalidRange {
                low: low.to_f64().unwrap_or(f64::NAN),
                high: high.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), SfError> {
        if let Some(param) = duplicate_param {
            return Err(SfError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
