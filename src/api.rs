//! High-level API for scale-factor tables, combination and event weights.
//!
//! ## Purpose
//!
//! This module gathers the user-facing types of the crate in one place. The
//! internal layers stay private; everything a caller needs is re-exported
//! here and through the prelude.
//!
//! ## Key concepts
//!
//! * **Tables**: [`ScaleFactorTable`] with [`ScaleFactorTable::lookup`].
//! * **Combination**: [`ScaleFactor::merge`], [`merge_all`], or `*` / `product()`.
//! * **Curves**: [`CurveConverter::builder`] → `.build()?` → `.convert(&points)?`.
//! * **Events**: [`ObjectRecipe`] → [`WeightBranch`] → [`EventWeighter`].
//!
//! ### Configuration Flow
//!
//! 1. Load or build tables once at startup, wrap them in `Arc`.
//! 2. Describe each object kind with a recipe and group recipes into branches.
//! 3. Weigh each event; lookups and merges are pure and thread-safe.

// Publicly re-exported types
pub use crate::algorithms::lookup::lookup_with;
pub use crate::algorithms::rebin::Resolution;
pub use crate::engine::converter::{
    CurveConverter, CurveConverterBuilder, DEFAULT_DUMMY_HIGH, DEFAULT_DUMMY_LOW,
    DEFAULT_MAX_PASSES,
};
pub use crate::engine::weighter::{
    Contribution, EventWeight, EventWeighter, ObjectCandidate, ObjectRecipe, QueryMapping,
    RecipeBuilder, WeightBranch,
};
pub use crate::math::envelope::envelope;
pub use crate::math::merge::{merge, merge_all};
pub use crate::primitives::axis::BinAxis;
pub use crate::primitives::errors::SfError;
pub use crate::primitives::factor::ScaleFactor;
pub use crate::primitives::point::{CalibrationPoint, CurvePoint};
pub use crate::primitives::policy::OverflowPolicy;
pub use crate::primitives::table::ScaleFactorTable;

#[cfg(feature = "loader")]
pub use crate::loader::{CalibrationFile, CalibrationLoader, TableSpec};
