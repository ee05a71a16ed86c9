//! # scalefactor-rs — Scale-factor tables and event weights
//!
//! Per-event correction weights for physics analyses, built from calibration
//! tables (scale factors, efficiencies and their uncertainties).
//!
//! ## What is a scale factor?
//!
//! A scale factor is a multiplicative correction applied to simulated events
//! so that they match a measured quantity, e.g. the ratio of an
//! identification efficiency in data and in simulation. Calibrations provide
//! them as 2-D tables over two object coordinates (typically transverse
//! momentum and pseudo-rapidity), each cell carrying a value and an
//! uncertainty.
//!
//! The crate provides:
//!
//! 1. **Lookups** into 2-D tables with a defined out-of-range policy: an
//!    empty underflow/overflow cell falls back to the nearest measured cell.
//! 2. **Combination** of independent factors: values multiply, relative
//!    uncertainties add in quadrature. Flat systematics enter as `(1, c)`.
//! 3. **Curve conversion**: a 1-D curve whose points have overlapping or
//!    gapped extents becomes a clean, contiguous table.
//! 4. **Event weights**: per-object recipes folded over the selected objects
//!    of an event, with up/down variations.
//!
//! ## Quick Start
//!
//! ### Combining factors
//!
//! ```rust
//! use scalefactor_rs::prelude::*;
//!
//! let sfs = [
//!     ScaleFactor::new(0.97, 0.02), // identification
//!     ScaleFactor::systematic(0.03), // flat systematic
//!     ScaleFactor::new(0.99, 0.01), // isolation
//! ];
//!
//! let combined: ScaleFactor<f64> = sfs.iter().product();
//! assert!((combined.value - 0.9603).abs() < 1e-12);
//! ```
//!
//! ### Table lookups
//!
//! ```rust
//! use scalefactor_rs::prelude::*;
//!
//! let table = ScaleFactorTable::from_values(
//!     BinAxis::new(vec![10.0, 20.0, 50.0])?,
//!     BinAxis::new(vec![0.0, 1.2, 2.4])?,
//!     &[0.98, 0.99, 0.97, 0.96],
//!     &[0.01, 0.01, 0.02, 0.02],
//! )?;
//!
//! // In range
//! assert_eq!(table.lookup(15.0, 0.5, false), ScaleFactor::new(0.98, 0.01));
//!
//! // Beyond the last x edge: the empty overflow cell falls back to the last
//! // measured cell of the same row
//! assert_eq!(table.lookup(500.0, 0.5, false), ScaleFactor::new(0.99, 0.01));
//!
//! // Uncertainty dropped on request
//! assert_eq!(table.lookup(15.0, 0.5, true), ScaleFactor::new(0.98, 0.0));
//! # Result::<(), SfError>::Ok(())
//! ```
//!
//! ### Converting a curve
//!
//! ```rust
//! use scalefactor_rs::prelude::*;
//!
//! // Two points with a gap in [1, 2]
//! let points = [
//!     CalibrationPoint::new(0.0, 1.0, 2.0, 1.0),
//!     CalibrationPoint::new(2.0, 3.0, 8.0, 1.0),
//! ];
//!
//! let table = CurveConverter::builder().build()?.convert(&points)?;
//! assert_eq!(table.y_axis().edges(), &[0.0, 1.0, 2.0, 3.0]);
//!
//! // The gap gets the geometric mean, with an error covering both neighbours
//! assert_eq!(table.lookup(5.0, 1.5, false), ScaleFactor::new(4.0, 5.0));
//!
//! // Outside the curve: neutral sentinel
//! assert_eq!(table.lookup(5.0, 7.0, false), ScaleFactor::new(1.0, 1.0));
//! # Result::<(), SfError>::Ok(())
//! ```
//!
//! ### Weighting events
//!
//! ```rust
//! use scalefactor_rs::prelude::*;
//! use std::sync::Arc;
//!
//! let id = Arc::new(ScaleFactorTable::from_values(
//!     BinAxis::new(vec![10.0, 20.0, 50.0])?,
//!     BinAxis::new(vec![0.0, 1.2, 2.4])?,
//!     &[0.98, 0.99, 0.97, 0.96],
//!     &[0.01, 0.01, 0.02, 0.02],
//! )?);
//!
//! let muon = ObjectRecipe::builder()
//!     .table(id, QueryMapping::AbsSecond) // (pt, |eta|)
//!     .systematic(0.03)
//!     .build()?;
//!
//! let weighter = EventWeighter::new().with_branch(WeightBranch::new("full").with_recipe("muon", muon));
//!
//! let objects = [
//!     ObjectCandidate::new("muon", 15.0, -0.5, true),
//!     ObjectCandidate::new("muon", 30.0, 2.0, false), // not selected
//! ];
//!
//! let w = weighter.weigh("full", &objects)?;
//! assert_eq!(w.weight, 0.98);
//! assert!(w.up > w.weight && w.down < w.weight);
//! # Result::<(), SfError>::Ok(())
//! ```
//!
//! ## Out-of-range policy
//!
//! | Policy       | Flow cell empty            | Flow cell filled           |
//! |--------------|----------------------------|----------------------------|
//! | `ClampEmpty` | nearest in-range cell      | flow cell (default)        |
//! | `Clamp`      | nearest in-range cell      | nearest in-range cell      |
//! | `Raw`        | flow cell                  | flow cell                  |
//!
//! Converted tables fill their curve-axis flow cells with `(1, 1)`, so under
//! the default policy queries outside a curve read `(1, 1)`. Use `Clamp` to
//! extrapolate the edge bins instead.
//!
//! ## Curve conversion
//!
//! Points are sorted by `(low_edge, high_edge, |ln|value||, |error|)` and
//! neighbours are compared repeatedly until a full scan finds no overlap:
//!
//! - **Gap**: a bin is inserted with the geometric mean of both neighbours and
//!   an error wide enough to cover both of their error bands.
//! - **Overlap**: the pair is split into two or three contiguous bins; the
//!   overlapping part gets the same merged value, the rest keeps its
//!   original value.
//!
//! The loop is capped (`max_passes`, default 10 000); a curve that does not
//! settle within the cap is rejected with [`SfError::NotConverged`].
//!
//! ## Concurrency
//!
//! Tables, recipes, branches and weighters are immutable once built and are
//! `Send + Sync`. Build them at startup, share them through `Arc`, and weigh
//! events from as many threads as needed.
//!
//! ## Loading calibrations
//!
//! With the `loader` feature, `CalibrationLoader`
//! reads named tables and curves from JSON files. A missing file or item is
//! a configuration error and should abort processing.
//!
//! ## Feature flags
//!
//! | Feature  | Default | Description                                   |
//! |----------|---------|-----------------------------------------------|
//! | `std`    | yes     | Standard library support                      |
//! | `serde`  | no      | `Serialize`/`Deserialize` for data types      |
//! | `loader` | no      | JSON calibration loader (implies `std`, `serde`) |
//! | `dev`    | no      | Expose internal modules for testing           |
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! ```toml
//! [dependencies]
//! scalefactor-rs = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures.
//
// Contains the scale factor pair, binned axes, the 2-D table, curve points,
// lookup policies and the error type.
mod primitives;

// Layer 2: Math - pure numeric rules.
//
// Contains scale-factor combination and the geometric-mean envelope.
mod math;

// Layer 3: Algorithms - table algorithms.
//
// Contains the lookup with boundary fallback and the overlap/gap resolution
// of calibration curves.
mod algorithms;

// Layer 4: Engine - orchestration.
//
// Contains validation, curve-to-table conversion and event weighting.
mod engine;

// Layer 5: Loader - calibration sources.
#[cfg(feature = "loader")]
mod loader;

// Public API surface.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use scalefactor_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        BinAxis, CalibrationPoint, CurveConverter, CurvePoint, EventWeight, EventWeighter,
        ObjectCandidate, ObjectRecipe, OverflowPolicy, QueryMapping, ScaleFactor,
        ScaleFactorTable, SfError, WeightBranch, merge, merge_all,
    };

    #[cfg(feature = "loader")]
    pub use crate::api::CalibrationLoader;
}

pub use api::*;

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal loader.
    #[cfg(feature = "loader")]
    pub mod loader {
        pub use crate::loader::*;
    }
}
