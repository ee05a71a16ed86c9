//! Per-object recipes and per-event weights.
//!
//! ## Purpose
//!
//! This module composes table lookups and the combiner into event weights:
//!
//! 1. An [`ObjectRecipe`] lists the contributions folded for one physics
//!    object: table lookups (with a mapping from the object's coordinates to
//!    the table axes) and flat systematic pseudo-factors.
//! 2. A [`WeightBranch`] holds one recipe per object kind and folds the
//!    recipes of all selected objects of an event.
//! 3. An [`EventWeighter`] holds the branches (e.g. full and fast simulation
//!    calibrations) and selects one by name.
//!
//! ## Design notes
//!
//! * **Immutable**: Recipes share tables through `Arc`; everything is
//!   `Send + Sync` once built.
//! * **Uniform folding**: Systematics are `(1, c)` entries in the same fold
//!   as table lookups.
//! * **Variations**: The up/down pair `(w + u, w - u)` is derived here, after
//!   the fold, not by the combiner.
//!
//! ## Non-goals
//!
//! * This module does not read or write event records.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{collections::BTreeMap, sync::Arc};

// External dependencies
use num_traits::Float;
use tracing::trace;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::merge::merge;
use crate::primitives::errors::SfError;
use crate::primitives::factor::ScaleFactor;
use crate::primitives::policy::OverflowPolicy;
use crate::primitives::table::ScaleFactorTable;

// ============================================================================
// Coordinates
// ============================================================================

/// How an object's `(first, second)` coordinates map onto a table's `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMapping {
    /// `(first, second)`.
    #[default]
    Direct,

    /// `(first, |second|)`, for tables symmetric in the second coordinate.
    AbsSecond,

    /// `(second, first)`, for tables with swapped axes.
    Swapped,

    /// `(|second|, first)`.
    SwappedAbs,
}

impl QueryMapping {
    /// Table coordinates for an object.
    #[inline]
    pub fn apply<T: Float>(&self, first: T, second: T) -> (T, T) {
        match self {
            QueryMapping::Direct => (first, second),
            QueryMapping::AbsSecond => (first, second.abs()),
            QueryMapping::Swapped => (second, first),
            QueryMapping::SwappedAbs => (second.abs(), first),
        }
    }
}

// ============================================================================
// Contributions and recipes
// ============================================================================

/// One entry of an object recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum Contribution<T> {
    /// Look the object up in a table.
    Table {
        /// Shared calibration table.
        table: Arc<ScaleFactorTable<T>>,
        /// Coordinate mapping.
        mapping: QueryMapping,
        /// Drop the table's uncertainty.
        ignore_error: bool,
        /// Out-of-range handling.
        policy: OverflowPolicy,
    },

    /// Flat systematic `(1, c)`.
    Systematic(T),

    /// Systematic depending on the first coordinate: `(1, inside)` when
    /// `low <= first <= high`, `(1, outside)` otherwise.
    WindowedSystematic {
        /// Lower window bound.
        low: T,
        /// Upper window bound.
        high: T,
        /// Uncertainty inside the window.
        inside: T,
        /// Uncertainty outside the window.
        outside: T,
    },
}

impl<T: Float> Contribution<T> {
    /// The factor this entry contributes for an object.
    pub fn evaluate(&self, first: T, second: T) -> ScaleFactor<T> {
        match self {
            Contribution::Table {
                table,
                mapping,
                ignore_error,
                policy,
            } => {
                let (x, y) = mapping.apply(first, second);
                table.lookup_with(x, y, *ignore_error, *policy)
            }
            Contribution::Systematic(c) => ScaleFactor::systematic(*c),
            Contribution::WindowedSystematic {
                low,
                high,
                inside,
                outside,
            } => {
                if first < *low || first > *high {
                    ScaleFactor::systematic(*outside)
                } else {
                    ScaleFactor::systematic(*inside)
                }
            }
        }
    }
}

/// Ordered contributions folded for one physics object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecipe<T> {
    contributions: Vec<Contribution<T>>,
}

impl<T: Float> ObjectRecipe<T> {
    /// Start an empty recipe.
    pub fn builder() -> RecipeBuilder<T> {
        RecipeBuilder::new()
    }

    /// The recipe's contributions in fold order.
    pub fn contributions(&self) -> &[Contribution<T>] {
        &self.contributions
    }

    /// Combined factor for an object at `(first, second)`.
    pub fn evaluate(&self, first: T, second: T) -> ScaleFactor<T> {
        self.contributions
            .iter()
            .map(|c| c.evaluate(first, second))
            .fold(ScaleFactor::identity(), merge)
    }
}

/// Builder for [`ObjectRecipe`].
#[derive(Debug, Clone)]
pub struct RecipeBuilder<T> {
    contributions: Vec<Contribution<T>>,
}

impl<T: Float> Default for RecipeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RecipeBuilder<T> {
    /// Create an empty recipe builder.
    pub fn new() -> Self {
        Self {
            contributions: Vec::new(),
        }
    }

    /// Append a table lookup with the default overflow policy.
    pub fn table(self, table: Arc<ScaleFactorTable<T>>, mapping: QueryMapping) -> Self {
        self.table_with(table, mapping, false, OverflowPolicy::default())
    }

    /// Append a table lookup with explicit error handling and policy.
    pub fn table_with(
        mut self,
        table: Arc<ScaleFactorTable<T>>,
        mapping: QueryMapping,
        ignore_error: bool,
        policy: OverflowPolicy,
    ) -> Self {
        self.contributions.push(Contribution::Table {
            table,
            mapping,
            ignore_error,
            policy,
        });
        self
    }

    /// Append a flat systematic `(1, fraction)`.
    pub fn systematic(mut self, fraction: T) -> Self {
        self.contributions.push(Contribution::Systematic(fraction));
        self
    }

    /// Append a systematic that depends on the first coordinate.
    pub fn windowed_systematic(mut self, low: T, high: T, inside: T, outside: T) -> Self {
        self.contributions.push(Contribution::WindowedSystematic {
            low,
            high,
            inside,
            outside,
        });
        self
    }

    /// Validate the systematic terms and build the recipe.
    pub fn build(self) -> Result<ObjectRecipe<T>, SfError> {
        for c in &self.contributions {
            match c {
                Contribution::Table { .. } => {}
                Contribution::Systematic(fraction) => {
                    Validator::validate_uncertainty(*fraction, "systematic")?;
                }
                Contribution::WindowedSystematic {
                    low,
                    high,
                    inside,
                    outside,
                } => {
                    Validator::validate_range(*low, *high)?;
                    Validator::validate_uncertainty(*inside, "windowed_systematic.inside")?;
                    Validator::validate_uncertainty(*outside, "windowed_systematic.outside")?;
                }
            }
        }
        Ok(ObjectRecipe {
            contributions: self.contributions,
        })
    }
}

// ============================================================================
// Events
// ============================================================================

/// A physics object candidate of one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectCandidate<'a, T> {
    /// Object kind, matched against the branch's recipes.
    pub kind: &'a str,
    /// First coordinate (e.g. transverse momentum).
    pub first: T,
    /// Second coordinate (e.g. pseudo-rapidity).
    pub second: T,
    /// Whether the object passes the selection.
    pub selected: bool,
}

impl<'a, T> ObjectCandidate<'a, T> {
    /// Create a candidate.
    pub fn new(kind: &'a str, first: T, second: T, selected: bool) -> Self {
        Self {
            kind,
            first,
            second,
            selected,
        }
    }
}

/// Combined event weight with its up/down variations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventWeight<T> {
    /// Central weight.
    pub weight: T,
    /// `weight + uncertainty`.
    pub up: T,
    /// `weight - uncertainty`.
    pub down: T,
}

impl<T: Float> EventWeight<T> {
    /// Weight and symmetric variations from a combined factor.
    #[inline]
    pub fn from_factor(sf: ScaleFactor<T>) -> Self {
        Self {
            weight: sf.value,
            up: sf.value + sf.error,
            down: sf.value - sf.error,
        }
    }

    /// The `[up, down]` pair.
    #[inline]
    pub fn variations(&self) -> [T; 2] {
        [self.up, self.down]
    }
}

impl<T: Float> From<ScaleFactor<T>> for EventWeight<T> {
    fn from(sf: ScaleFactor<T>) -> Self {
        Self::from_factor(sf)
    }
}

/// One calibration variant: a recipe per object kind.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightBranch<T> {
    name: String,
    recipes: BTreeMap<String, ObjectRecipe<T>>,
}

impl<T: Float> WeightBranch<T> {
    /// Create a branch without recipes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recipes: BTreeMap::new(),
        }
    }

    /// Register the recipe for an object kind, replacing any previous one.
    pub fn with_recipe(mut self, kind: impl Into<String>, recipe: ObjectRecipe<T>) -> Self {
        self.recipes.insert(kind.into(), recipe);
        self
    }

    /// Branch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recipe for an object kind.
    pub fn recipe(&self, kind: &str) -> Option<&ObjectRecipe<T>> {
        self.recipes.get(kind)
    }

    /// Fold the recipes of all selected objects.
    pub fn combine(&self, objects: &[ObjectCandidate<'_, T>]) -> Result<ScaleFactor<T>, SfError> {
        let mut sf = ScaleFactor::identity();
        for obj in objects.iter().filter(|o| o.selected) {
            let recipe = self
                .recipes
                .get(obj.kind)
                .ok_or_else(|| SfError::UnknownObjectKind {
                    branch: self.name.clone(),
                    kind: obj.kind.to_string(),
                })?;
            sf = merge(sf, recipe.evaluate(obj.first, obj.second));
        }
        trace!(
            branch = %self.name,
            objects = objects.len(),
            value = sf.value.to_f64(),
            error = sf.error.to_f64(),
            "combined event scale factor"
        );
        Ok(sf)
    }

    /// Event weight and variations for the selected objects.
    pub fn weigh(&self, objects: &[ObjectCandidate<'_, T>]) -> Result<EventWeight<T>, SfError> {
        self.combine(objects).map(EventWeight::from_factor)
    }
}

/// Set of weighting branches selected by name.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWeighter<T> {
    branches: BTreeMap<String, WeightBranch<T>>,
}

impl<T: Float> Default for EventWeighter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> EventWeighter<T> {
    /// Create a weighter without branches.
    pub fn new() -> Self {
        Self {
            branches: BTreeMap::new(),
        }
    }

    /// Register a branch under its name, replacing any previous one.
    pub fn with_branch(mut self, branch: WeightBranch<T>) -> Self {
        self.branches.insert(branch.name.clone(), branch);
        self
    }

    /// Branch by name.
    pub fn branch(&self, name: &str) -> Option<&WeightBranch<T>> {
        self.branches.get(name)
    }

    /// Names of all registered branches, sorted.
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    /// Weigh an event with the named branch.
    pub fn weigh(
        &self,
        branch: &str,
        objects: &[ObjectCandidate<'_, T>],
    ) -> Result<EventWeight<T>, SfError> {
        self.branches
            .get(branch)
            .ok_or_else(|| SfError::UnknownBranch(branch.to_string()))?
            .weigh(objects)
    }

    /// Weigh an event with every branch, in name order.
    pub fn weigh_all(
        &self,
        objects: &[ObjectCandidate<'_, T>],
    ) -> Result<Vec<(&str, EventWeight<T>)>, SfError> {
        self.branches
            .values()
            .map(|b| Ok((b.name(), b.weigh(objects)?)))
            .collect()
    }
}
