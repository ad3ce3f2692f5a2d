//! Object classification table
//!
//! Maps scene object type ids to the trial-relevant role they play (sail,
//! hull, pillar clickbox, collection boat). Loaded from a TOML file:
//!
//! ```toml
//! [[sail]]
//! material = "oak"
//! object_ids = [101, 102, 103]
//!
//! [[hull]]
//! class = "skiff"
//! object_ids = [201]
//!
//! [[pillar]]
//! index = 1
//! object_ids = [301]
//!
//! [boats]
//! jubbly = [401, 402, 403]
//! tempor_north = [501]
//! tempor_south = [601]
//! ```

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::ship_parts::{HullClass, SailMaterial};
use crate::error::CatalogError;

/// Role a classified object plays in the trials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Sail(SailMaterial),
    Hull(HullClass),
    /// Pillar clickbox, carrying the 1-based pillar identifier
    Pillar(u8),
    JubblyBoat,
    TemporNorthBoat,
    TemporSouthBoat,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config file structure
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SailEntry {
    pub material: SailMaterial,
    #[serde(default)]
    pub object_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullEntry {
    pub class: HullClass,
    #[serde(default)]
    pub object_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarEntry {
    pub index: u8,
    #[serde(default)]
    pub object_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoatIds {
    #[serde(default)]
    pub jubbly: Vec<i32>,
    #[serde(default)]
    pub tempor_north: Vec<i32>,
    #[serde(default)]
    pub tempor_south: Vec<i32>,
}

/// Root structure of `objects.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectTableConfig {
    #[serde(default, rename = "sail")]
    pub sails: Vec<SailEntry>,
    #[serde(default, rename = "hull")]
    pub hulls: Vec<HullEntry>,
    #[serde(default, rename = "pillar")]
    pub pillars: Vec<PillarEntry>,
    #[serde(default)]
    pub boats: BoatIds,
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookup table
// ─────────────────────────────────────────────────────────────────────────────

/// Object id -> role index
#[derive(Debug, Clone, Default)]
pub struct ObjectTable {
    kinds: HashMap<i32, ObjectKind>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lookup from a parsed config.
    ///
    /// An id listed under two roles keeps its first role; the duplicate is
    /// logged and skipped.
    pub fn from_config(config: &ObjectTableConfig) -> Self {
        let mut table = Self::new();

        for sail in &config.sails {
            table.insert_all(&sail.object_ids, ObjectKind::Sail(sail.material));
        }
        for hull in &config.hulls {
            table.insert_all(&hull.object_ids, ObjectKind::Hull(hull.class));
        }
        for pillar in &config.pillars {
            table.insert_all(&pillar.object_ids, ObjectKind::Pillar(pillar.index));
        }
        table.insert_all(&config.boats.jubbly, ObjectKind::JubblyBoat);
        table.insert_all(&config.boats.tempor_north, ObjectKind::TemporNorthBoat);
        table.insert_all(&config.boats.tempor_south, ObjectKind::TemporSouthBoat);

        table
    }

    /// Load `objects.toml`. A missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Object table not found, no objects will be classified");
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ObjectTableConfig =
            toml::from_str(&contents).map_err(|e| CatalogError::Toml {
                path: path.to_path_buf(),
                source: e,
            })?;

        let table = Self::from_config(&config);
        tracing::info!(path = %path.display(), objects = table.len(), "Loaded object table");
        Ok(table)
    }

    /// Register a single id. Returns false if the id already had a role.
    pub fn insert(&mut self, object_id: i32, kind: ObjectKind) -> bool {
        if let Some(existing) = self.kinds.get(&object_id) {
            tracing::warn!(object_id, ?existing, ?kind, "Duplicate object id in object table");
            return false;
        }
        self.kinds.insert(object_id, kind);
        true
    }

    fn insert_all(&mut self, ids: &[i32], kind: ObjectKind) {
        for &id in ids {
            self.insert(id, kind);
        }
    }

    pub fn classify(&self, object_id: i32) -> Option<ObjectKind> {
        self.kinds.get(&object_id).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
