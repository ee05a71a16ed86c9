//! Binned axis with underflow and overflow bins.
//!
//! ## Purpose
//!
//! A `BinAxis` partitions a finite range into `N` bins given by `N + 1`
//! strictly increasing edges and maps any coordinate to a bin number.
//!
//! ## Key concepts
//!
//! * **Bin numbering**: `0` is the underflow, `1..=N` are in range, `N + 1` is
//!   the overflow.
//! * **Half-open bins**: bin `i` covers `[e[i-1], e[i])`; the last edge itself
//!   belongs to the overflow.
//! * **NaN**: compares false against every edge and lands in the overflow.
//!
//! ## Invariants
//!
//! * At least two edges, all finite, strictly increasing.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SfError;

/// A binned axis defined by its edges.
#[derive(Debug, Clone, PartialEq)]
pub struct BinAxis<T> {
    edges: Vec<T>,
}

impl<T: Float> BinAxis<T> {
    /// Create an axis from explicit edges.
    pub fn new(edges: Vec<T>) -> Result<Self, SfError> {
        if edges.len() < 2 {
            return Err(SfError::InvalidEdges(format!(
                "need at least 2 edges, got {}",
                edges.len()
            )));
        }
        for (i, &e) in edges.iter().enumerate() {
            if !e.is_finite() {
                return Err(SfError::InvalidEdges(format!(
                    "edge[{}]={} is not finite",
                    i,
                    e.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        for (i, pair) in edges.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SfError::InvalidEdges(format!(
                    "edge[{}]={} does not exceed edge[{}]={}",
                    i + 1,
                    pair[1].to_f64().unwrap_or(f64::NAN),
                    i,
                    pair[0].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(Self { edges })
    }

    /// Create an axis of `bins` equal-width bins over `[low, high)`.
    pub fn uniform(bins: usize, low: T, high: T) -> Result<Self, SfError> {
        if bins == 0 {
            return Err(SfError::InvalidEdges("need at least 1 bin".into()));
        }
        let width = (high - low) / T::from(bins).unwrap_or_else(T::one);
        let mut edges: Vec<T> = (0..bins)
            .map(|i| low + width * T::from(i).unwrap_or_else(T::zero))
            .collect();
        edges.push(high);
        Self::new(edges)
    }

    /// Number of in-range bins.
    #[inline]
    pub fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// All edges, lowest first.
    #[inline]
    pub fn edges(&self) -> &[T] {
        &self.edges
    }

    /// Lowest edge.
    #[inline]
    pub fn low(&self) -> T {
        self.edges[0]
    }

    /// Highest edge.
    #[inline]
    pub fn high(&self) -> T {
        self.edges[self.edges.len() - 1]
    }

    /// Bin number containing `v` (`0` underflow, `bins() + 1` overflow).
    pub fn find_bin(&self, v: T) -> usize {
        if v < self.low() {
            0
        } else if !(v < self.high()) {
            self.bins() + 1
        } else {
            // Number of edges <= v; bin i has e[i-1] <= v < e[i].
            self.edges.partition_point(|&e| e <= v)
        }
    }

    /// True for the underflow or overflow bin number.
    #[inline]
    pub fn is_flow(&self, bin: usize) -> bool {
        bin == 0 || bin > self.bins()
    }

    /// Clamp a bin number into the in-range bins `[1, bins()]`.
    #[inline]
    pub fn clamp(&self, bin: usize) -> usize {
        bin.clamp(1, self.bins())
    }

    /// Lower and upper edge of an in-range bin.
    pub fn bin_bounds(&self, bin: usize) -> Option<(T, T)> {
        if bin == 0 || bin > self.bins() {
            return None;
        }
        Some((self.edges[bin - 1], self.edges[bin]))
    }
}
