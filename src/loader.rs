//! Layer 5: Loader
//!
//! ## Purpose
//!
//! This module loads named calibration items (tables and curves) from JSON
//! calibration sources once at startup. Every failure here is a
//! configuration error: weights computed without the requested calibration
//! would be silently wrong, so callers abort before processing events.
//!
//! ## Key concepts
//!
//! * **Source**: a JSON file below the loader's root directory.
//! * **Item**: a named table or curve inside a source.
//!
//! ```json
//! {
//!   "tables": {
//!     "SF": { "x_edges": [10, 20, 50], "y_edges": [0, 1.2, 2.4],
//!             "values": [0.98, 0.99, 0.97, 0.96],
//!             "errors": [0.01, 0.01, 0.02, 0.02] }
//!   },
//!   "curves": {
//!     "ratio_eta": [ { "x": 0.5, "ex_low": 0.5, "ex_high": 0.5,
//!                      "y": 0.99, "ey_low": 0.01, "ey_high": 0.02 } ]
//!   }
//! }
//! ```
//!
//! `values` and `errors` list the in-range cells row by row, first axis
//! fastest. Flow cells start empty.
//!
//! ## Non-goals
//!
//! * This module does not cache sources; each call reads its file.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// External dependencies
use num_traits::Float;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{error, info};

// Internal dependencies
use crate::engine::converter::CurveConverter;
use crate::primitives::axis::BinAxis;
use crate::primitives::errors::SfError;
use crate::primitives::point::CurvePoint;
use crate::primitives::table::ScaleFactorTable;

// ============================================================================
// File format
// ============================================================================

/// Serialized form of a 2-D table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableSpec<T> {
    /// Edges of the first axis.
    pub x_edges: Vec<T>,
    /// Edges of the second axis.
    pub y_edges: Vec<T>,
    /// In-range contents, first axis fastest.
    pub values: Vec<T>,
    /// In-range errors, same layout as `values`.
    pub errors: Vec<T>,
}

impl<T: Float> TableSpec<T> {
    /// Build the table described by this spec.
    pub fn into_table(self) -> Result<ScaleFactorTable<T>, SfError> {
        ScaleFactorTable::from_values(
            BinAxis::new(self.x_edges)?,
            BinAxis::new(self.y_edges)?,
            &self.values,
            &self.errors,
        )
    }
}

/// Contents of one calibration source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalibrationFile<T> {
    /// Named tables.
    #[serde(default = "BTreeMap::new")]
    pub tables: BTreeMap<String, TableSpec<T>>,
    /// Named curves.
    #[serde(default = "BTreeMap::new")]
    pub curves: BTreeMap<String, Vec<CurvePoint<T>>>,
}

// ============================================================================
// Loader
// ============================================================================

/// Loads calibration items from sources below a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationLoader {
    root: PathBuf,
}

impl CalibrationLoader {
    /// Create a loader resolving sources relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read and parse a whole source.
    pub fn read_source<T>(&self, source: &str) -> Result<CalibrationFile<T>, SfError>
    where
        T: Float + DeserializeOwned,
    {
        let path = self.root.join(source);
        let file = File::open(&path).map_err(|e| {
            error!(path = %path.display(), "could not open calibration source");
            SfError::SourceNotFound {
                source: source.to_string(),
                reason: e.to_string(),
            }
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| SfError::MalformedSource {
            source: source.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a named table.
    pub fn table<T>(&self, source: &str, name: &str) -> Result<Arc<ScaleFactorTable<T>>, SfError>
    where
        T: Float + DeserializeOwned,
    {
        let spec = self
            .read_source::<T>(source)?
            .tables
            .remove(name)
            .ok_or_else(|| missing(source, name))?;
        let table = spec.into_table().map_err(|e| SfError::MalformedSource {
            source: source.to_string(),
            reason: format!("table '{}': {}", name, e),
        })?;
        info!(
            source,
            item = name,
            x_bins = table.x_axis().bins(),
            y_bins = table.y_axis().bins(),
            "loaded calibration table"
        );
        Ok(Arc::new(table))
    }

    /// Load a named curve.
    pub fn curve<T>(&self, source: &str, name: &str) -> Result<Vec<CurvePoint<T>>, SfError>
    where
        T: Float + DeserializeOwned,
    {
        let curve = self
            .read_source::<T>(source)?
            .curves
            .remove(name)
            .ok_or_else(|| missing(source, name))?;
        info!(source, item = name, points = curve.len(), "loaded calibration curve");
        Ok(curve)
    }

    /// Load a named curve and convert it into a table.
    ///
    /// Conversion failures, including non-convergence, are reported as
    /// configuration errors against the source.
    pub fn curve_table<T>(
        &self,
        source: &str,
        name: &str,
        converter: &CurveConverter<T>,
    ) -> Result<Arc<ScaleFactorTable<T>>, SfError>
    where
        T: Float + DeserializeOwned,
    {
        let curve = self.curve::<T>(source, name)?;
        let table = converter.convert_curve(&curve).map_err(|e| match e {
            SfError::NotConverged { .. } => e,
            other => SfError::MalformedSource {
                source: source.to_string(),
                reason: format!("curve '{}': {}", name, other),
            },
        })?;
        Ok(Arc::new(table))
    }
}

fn missing(source: &str, name: &str) -> SfError {
    error!(source, item = name, "calibration item not found");
    SfError::ItemNotFound {
        source: source.to_string(),
        item: name.to_string(),
    }
}
