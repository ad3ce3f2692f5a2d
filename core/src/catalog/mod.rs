//! Route catalog
//!
//! Immutable per-(trial, difficulty, variant) route data: waypoints, lost
//! supplies, crystal motes, rapids and pillars. Everything is parsed once at
//! startup into an arena keyed by [`RouteKey`]; lookups never touch disk.
//!
//! # Layout
//!
//! ```text
//! <root>/<trial>/<difficulty>/<variant>/
//!     route.json  supplies.json  crystal_motes.json  rapids.json  pillars.json
//! ```

mod loader;
mod records;

pub use loader::load_route_set;
pub use records::{PillarDef, RouteSet, SupplyMeta, Waypoint};

use std::path::Path;
use std::sync::LazyLock;

use barracuda_types::{Difficulty, RouteVariant, TrialKind};
use hashbrown::{HashMap, HashSet};

use crate::error::CatalogError;

static EMPTY_ROUTE_SET: LazyLock<RouteSet> = LazyLock::new(RouteSet::new);

/// Catalog key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub trial: TrialKind,
    pub difficulty: Difficulty,
    pub variant: RouteVariant,
}

impl RouteKey {
    pub fn new(trial: TrialKind, difficulty: Difficulty, variant: RouteVariant) -> Self {
        Self {
            trial,
            difficulty,
            variant,
        }
    }

    /// Every key the catalog knows how to load
    pub fn all() -> impl Iterator<Item = RouteKey> {
        TrialKind::ALL.into_iter().flat_map(|trial| {
            Difficulty::ALL.into_iter().flat_map(move |difficulty| {
                RouteVariant::ALL
                    .into_iter()
                    .map(move |variant| RouteKey::new(trial, difficulty, variant))
            })
        })
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.trial.key(),
            self.difficulty.key(),
            self.variant.key()
        )
    }
}

/// Pre-parsed route data for every key
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    sets: HashMap<RouteKey, RouteSet>,
    /// Union of crate object ids across all sets
    supply_objects: HashSet<i32>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every (trial, difficulty, variant) under `root`.
    ///
    /// Missing directories and files become empty sets; unreadable or
    /// malformed files abort the load.
    pub fn load_dir(root: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for key in RouteKey::all() {
            let dir = root
                .join(key.trial.key())
                .join(key.difficulty.key())
                .join(key.variant.key());

            if !dir.is_dir() {
                tracing::debug!(%key, "No route data directory");
                continue;
            }

            let set = load_route_set(&dir)?;
            tracing::debug!(
                %key,
                waypoints = set.waypoints.len(),
                supplies = set.supplies.len(),
                pillars = set.pillars.len(),
                "Loaded route set"
            );
            catalog.insert(key, set);
        }

        tracing::info!(root = %root.display(), sets = catalog.len(), "Route catalog loaded");
        Ok(catalog)
    }

    /// Add or replace the set for a key
    pub fn insert(&mut self, key: RouteKey, set: RouteSet) {
        self.supply_objects.extend(set.supplies.keys().copied());
        self.sets.insert(key, set);
    }

    /// Route data for a key; an unknown key yields an empty set
    pub fn lookup(
        &self,
        trial: TrialKind,
        difficulty: Difficulty,
        variant: RouteVariant,
    ) -> &RouteSet {
        self.get(&RouteKey::new(trial, difficulty, variant))
    }

    pub fn get(&self, key: &RouteKey) -> &RouteSet {
        self.sets.get(key).unwrap_or(&EMPTY_ROUTE_SET)
    }

    /// Whether any route lists this object id as a lost-supply crate
    pub fn is_supply_object(&self, object_id: i32) -> bool {
        self.supply_objects.contains(&object_id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
