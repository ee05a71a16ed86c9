//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure numeric rules used throughout the crate:
//! - Combination of independent scale factors
//! - The geometric-mean envelope used for merged and synthesized bins
//!
//! These are reusable building blocks with no table or curve logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Loader
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Geometric-mean envelope of two factors.
pub mod envelope;

/// Scale-factor combination.
pub mod merge;
