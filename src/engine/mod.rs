//! Layer 4: Engine
//!
//! # Purpose
//!
//! Orchestration on top of the algorithms:
//! - Validation of curves and configuration
//! - Curve-to-table conversion
//! - Per-object recipes and per-event weights
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Loader
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Curve-to-table conversion.
pub mod converter;

/// Input and configuration validation.
pub mod validator;

/// Recipes, branches and event weights.
pub mod weighter;
