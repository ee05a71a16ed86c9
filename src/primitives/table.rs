//! Two-dimensional scale-factor table with flow cells.
//!
//! ## Purpose
//!
//! `ScaleFactorTable` stores a content and an error for every cell of a 2-D
//! binning, including the underflow and overflow cells of both axes. It is
//! built once and then only read.
//!
//! ## Design notes
//!
//! * **Layout**: `(nx + 2) * (ny + 2)` cells, global index `ix + (nx + 2) * iy`,
//!   where `ix`/`iy` are bin numbers as returned by `BinAxis::find_bin`.
//! * **Zero-filled**: Fresh tables hold `(0, 0)` everywhere, which the lookup
//!   treats as "never filled".
//! * **Sharing**: The table is `Send + Sync`; share it behind an `Arc`.
//!
//! ## Non-goals
//!
//! * This module does not implement the out-of-range policy (see
//!   `algorithms::lookup`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::axis::BinAxis;
use crate::primitives::errors::SfError;
use crate::primitives::factor::ScaleFactor;

/// A 2-D table of scale factors indexed by two continuous coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleFactorTable<T> {
    x_axis: BinAxis<T>,
    y_axis: BinAxis<T>,
    contents: Vec<T>,
    errors: Vec<T>,
}

impl<T: Float> ScaleFactorTable<T> {
    /// Create a zero-filled table over the given axes.
    pub fn new(x_axis: BinAxis<T>, y_axis: BinAxis<T>) -> Self {
        let cells = (x_axis.bins() + 2) * (y_axis.bins() + 2);
        Self {
            x_axis,
            y_axis,
            contents: vec![T::zero(); cells],
            errors: vec![T::zero(); cells],
        }
    }

    /// Create a table and fill its in-range cells from row-major slices.
    ///
    /// `values[i]` and `errors[i]` belong to bin `(i % nx + 1, i / nx + 1)`.
    /// Flow cells stay zero.
    pub fn from_values(
        x_axis: BinAxis<T>,
        y_axis: BinAxis<T>,
        values: &[T],
        errors: &[T],
    ) -> Result<Self, SfError> {
        let nx = x_axis.bins();
        let expected = nx * y_axis.bins();
        for len in [values.len(), errors.len()] {
            if len != expected {
                return Err(SfError::MismatchedInputs { expected, got: len });
            }
        }
        let mut table = Self::new(x_axis, y_axis);
        for (i, (&v, &e)) in values.iter().zip(errors).enumerate() {
            table.set_bin(i % nx + 1, i / nx + 1, ScaleFactor::new(v, e));
        }
        Ok(table)
    }

    /// The first (x) axis.
    #[inline]
    pub fn x_axis(&self) -> &BinAxis<T> {
        &self.x_axis
    }

    /// The second (y) axis.
    #[inline]
    pub fn y_axis(&self) -> &BinAxis<T> {
        &self.y_axis
    }

    #[inline]
    fn index(&self, ix: usize, iy: usize) -> usize {
        ix + (self.x_axis.bins() + 2) * iy
    }

    /// Bin numbers `(ix, iy)` of the cell containing `(x, y)`.
    #[inline]
    pub fn find_bin(&self, x: T, y: T) -> (usize, usize) {
        (self.x_axis.find_bin(x), self.y_axis.find_bin(y))
    }

    /// True when either bin number is an underflow or overflow bin.
    #[inline]
    pub fn is_flow(&self, ix: usize, iy: usize) -> bool {
        self.x_axis.is_flow(ix) || self.y_axis.is_flow(iy)
    }

    /// Content and error of a cell; out-of-table bin numbers read as empty.
    pub fn bin(&self, ix: usize, iy: usize) -> ScaleFactor<T> {
        if ix > self.x_axis.bins() + 1 || iy > self.y_axis.bins() + 1 {
            return ScaleFactor::new(T::zero(), T::zero());
        }
        let i = self.index(ix, iy);
        ScaleFactor::new(self.contents[i], self.errors[i])
    }

    /// Overwrite a cell. Bin numbers beyond the overflow are ignored.
    pub fn set_bin(&mut self, ix: usize, iy: usize, sf: ScaleFactor<T>) {
        if ix > self.x_axis.bins() + 1 || iy > self.y_axis.bins() + 1 {
            return;
        }
        let i = self.index(ix, iy);
        self.contents[i] = sf.value;
        self.errors[i] = sf.error;
    }
}
