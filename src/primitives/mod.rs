//! Layer 1: Primitives
//!
//! # Purpose
//!
//! Plain data types shared by every other layer: the scale factor pair,
//! binned axes, the 2-D table, curve points, policies and the error type.
//! Nothing here knows how factors are combined or how curves are resolved.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Binned axis with flow bins.
pub mod axis;

/// Crate-wide error type.
pub mod errors;

/// The `(value, uncertainty)` pair.
pub mod factor;

/// Calibration curve points.
pub mod point;

/// Lookup policy configuration.
pub mod policy;

/// 2-D scale-factor table storage.
pub mod table;
