//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! The two table algorithms of the crate:
//! - Lookup with an out-of-range fallback policy
//! - Resolution of overlapping or gapped curve bins into a partition
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Table lookup with boundary fallback.
pub mod lookup;

/// Overlap and gap resolution.
pub mod rebin;
