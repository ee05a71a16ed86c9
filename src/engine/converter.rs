//! Curve-to-table conversion.
//!
//! ## Purpose
//!
//! This module turns a calibration curve (points with possibly overlapping or
//! gapped extents) into a `ScaleFactorTable` usable by the regular lookup.
//! It validates the input, resolves the extents into a partition, and
//! materializes the partition as a table.
//!
//! ## Design notes
//!
//! * **Builder**: `CurveConverter::builder()` configures the pass limit, the
//!   dummy range of the first axis and the flow sentinel; everything is
//!   validated in `build()`.
//! * **Effectively 1-D**: The curve runs along the second axis. The first axis
//!   is a single dummy bin spanning a wide range, and every row of it,
//!   including its flow rows, carries the same values.
//! * **Sentinel**: The curve axis' underflow and overflow cells hold `(1, 1)`
//!   by default, so queries outside the curve read a neutral factor with a
//!   100% uncertainty instead of falling back to the edge bins.
//!
//! ## Invariants
//!
//! * The table's curve axis edges are the resolved partition's boundaries.
//! * A converter holds no state between conversions.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::rebin::{Resolution, resolve};
use crate::engine::validator::Validator;
use crate::primitives::axis::BinAxis;
use crate::primitives::errors::SfError;
use crate::primitives::factor::ScaleFactor;
use crate::primitives::point::{CalibrationPoint, CurvePoint};
use crate::primitives::table::ScaleFactorTable;

/// Default limit on sort-and-scan passes.
pub const DEFAULT_MAX_PASSES: usize = 10_000;

/// Default lower bound of the dummy first axis.
pub const DEFAULT_DUMMY_LOW: f64 = 0.0;

/// Default upper bound of the dummy first axis.
pub const DEFAULT_DUMMY_HIGH: f64 = 1.0e4;

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`CurveConverter`].
#[derive(Debug, Clone)]
pub struct CurveConverterBuilder<T> {
    /// Maximum number of sort-and-scan passes.
    pub max_passes: Option<usize>,

    /// Range of the single bin on the first axis.
    pub dummy_range: Option<(T, T)>,

    /// Content of the curve axis' flow cells.
    pub sentinel: Option<ScaleFactor<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for CurveConverterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> CurveConverterBuilder<T> {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            max_passes: None,
            dummy_range: None,
            sentinel: None,
            duplicate_param: None,
        }
    }

    /// Set the maximum number of sort-and-scan passes.
    pub fn max_passes(mut self, passes: usize) -> Self {
        if self.max_passes.is_some() {
            self.duplicate_param = Some("max_passes");
        }
        self.max_passes = Some(passes);
        self
    }

    /// Set the range of the dummy first axis.
    pub fn dummy_range(mut self, low: T, high: T) -> Self {
        if self.dummy_range.is_some() {
            self.duplicate_param = Some("dummy_range");
        }
        self.dummy_range = Some((low, high));
        self
    }

    /// Set the factor stored in the curve axis' underflow and overflow cells.
    pub fn sentinel(mut self, sentinel: ScaleFactor<T>) -> Self {
        if self.sentinel.is_some() {
            self.duplicate_param = Some("sentinel");
        }
        self.sentinel = Some(sentinel);
        self
    }

    /// Validate the configuration and build the converter.
    pub fn build(self) -> Result<CurveConverter<T>, SfError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let max_passes = self.max_passes.unwrap_or(DEFAULT_MAX_PASSES);
        Validator::validate_max_passes(max_passes)?;

        let (dummy_low, dummy_high) = match self.dummy_range {
            Some(range) => range,
            None => (
                T::from(DEFAULT_DUMMY_LOW).unwrap_or_else(T::zero),
                T::from(DEFAULT_DUMMY_HIGH).unwrap_or_else(T::max_value),
            ),
        };
        Validator::validate_range(dummy_low, dummy_high)?;

        let sentinel = self
            .sentinel
            .unwrap_or_else(|| ScaleFactor::new(T::one(), T::one()));
        Validator::validate_factor(sentinel, "sentinel")?;

        Ok(CurveConverter {
            max_passes,
            dummy_low,
            dummy_high,
            sentinel,
        })
    }
}

// ============================================================================
// Converter
// ============================================================================

/// Converts calibration curves into scale-factor tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveConverter<T> {
    max_passes: usize,
    dummy_low: T,
    dummy_high: T,
    sentinel: ScaleFactor<T>,
}

impl<T: Float> CurveConverter<T> {
    /// Start configuring a converter.
    pub fn builder() -> CurveConverterBuilder<T> {
        CurveConverterBuilder::new()
    }

    /// Maximum number of sort-and-scan passes.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Flow-cell sentinel.
    pub fn sentinel(&self) -> ScaleFactor<T> {
        self.sentinel
    }

    /// Convert raw curve points.
    pub fn convert_curve(&self, curve: &[CurvePoint<T>]) -> Result<ScaleFactorTable<T>, SfError> {
        let points: Vec<CalibrationPoint<T>> =
            curve.iter().copied().map(CalibrationPoint::from).collect();
        self.convert(&points)
    }

    /// Convert calibration points into a table.
    pub fn convert(
        &self,
        points: &[CalibrationPoint<T>],
    ) -> Result<ScaleFactorTable<T>, SfError> {
        let resolution = self.resolve(points)?;
        self.materialize(&resolution.bins)
    }

    /// Validate and resolve points into a contiguous partition without
    /// building a table.
    pub fn resolve(&self, points: &[CalibrationPoint<T>]) -> Result<Resolution<T>, SfError> {
        Validator::validate_points(points)?;
        resolve(points, self.max_passes)
    }

    /// Build the table for an already resolved partition.
    pub fn materialize(
        &self,
        bins: &[CalibrationPoint<T>],
    ) -> Result<ScaleFactorTable<T>, SfError> {
        let last = bins.last().ok_or(SfError::EmptyInput)?;

        let mut edges: Vec<T> = Vec::with_capacity(bins.len() + 1);
        edges.extend(bins.iter().map(|b| b.low_edge));
        edges.push(last.high_edge);

        let x_axis = BinAxis::new(Vec::from([self.dummy_low, self.dummy_high]))?;
        let y_axis = BinAxis::new(edges)?;
        let ny = y_axis.bins();
        let mut table = ScaleFactorTable::new(x_axis, y_axis);

        for ix in 0..=2 {
            table.set_bin(ix, 0, self.sentinel);
            table.set_bin(ix, ny + 1, self.sentinel);
            for (iy, bin) in bins.iter().enumerate() {
                table.set_bin(ix, iy + 1, bin.factor());
            }
        }

        Ok(table)
    }
}
