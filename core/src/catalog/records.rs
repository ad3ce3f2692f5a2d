//! Catalog record types and their on-disk JSON shapes.

use hashbrown::HashMap;
use serde::Deserialize;

use crate::game_data::WorldPoint;

// ═══════════════════════════════════════════════════════════════════════════
// JSON shapes
// ═══════════════════════════════════════════════════════════════════════════

/// Route, crystal-mote and rapids entries share this shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegionPointRecord {
    pub region_id: i32,
    pub region_x: i32,
    pub region_y: i32,
    #[serde(rename = "z")]
    pub plane: i32,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SupplyRecord {
    pub varbit: i32,
    pub object_id: i32,
    pub order: u32,
    pub index: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PillarRecord {
    pub region_id: i32,
    pub region_x: i32,
    pub region_y: i32,
    #[serde(rename = "z")]
    pub plane: i32,
    pub order: u32,
    pub pillar: u8,
    pub varbit_id: i32,
}

// ═══════════════════════════════════════════════════════════════════════════
// Parsed records
// ═══════════════════════════════════════════════════════════════════════════

/// A tile tagged with the route order it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint {
    pub position: WorldPoint,
    pub order: u32,
}

impl From<RegionPointRecord> for Waypoint {
    fn from(r: RegionPointRecord) -> Self {
        Self {
            position: WorldPoint::from_region(r.region_id, r.region_x, r.region_y, r.plane),
            order: r.order,
        }
    }
}

/// Static metadata for one lost-supply crate type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyMeta {
    pub object_id: i32,
    /// Offset from the objective varbit base; the crate is collected once
    /// that varbit reads zero
    pub objective_offset: i32,
    /// Route order bucket the crate is shown in
    pub order: u32,
    /// Number drawn over the crate
    pub index: u32,
}

impl From<SupplyRecord> for SupplyMeta {
    fn from(r: SupplyRecord) -> Self {
        Self {
            object_id: r.object_id,
            objective_offset: r.varbit,
            order: r.order,
            index: r.index,
        }
    }
}

/// One pillar objective in a Jubbly Jive route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PillarDef {
    pub position: WorldPoint,
    /// Position of this pillar in the route; waves are bands of this value
    pub order: u32,
    /// 1-based pillar identifier, matches the spawned clickbox
    pub pillar: u8,
    /// Completion varbit; reads >= 2 once the pillar is done
    pub varbit_id: i32,
}

impl From<PillarRecord> for PillarDef {
    fn from(r: PillarRecord) -> Self {
        Self {
            position: WorldPoint::from_region(r.region_id, r.region_x, r.region_y, r.plane),
            order: r.order,
            pillar: r.pillar,
            varbit_id: r.varbit_id,
        }
    }
}

/// Everything the catalog holds for one (trial, difficulty, variant)
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    pub waypoints: Vec<Waypoint>,
    /// Keyed by crate object id
    pub supplies: HashMap<i32, SupplyMeta>,
    pub crystal_motes: Vec<Waypoint>,
    pub rapids: Vec<Waypoint>,
    /// Sorted by `order`
    pub pillars: Vec<PillarDef>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
            && self.supplies.is_empty()
            && self.crystal_motes.is_empty()
            && self.rapids.is_empty()
            && self.pillars.is_empty()
    }

    pub fn waypoints_at(&self, order: u32) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter().filter(move |w| w.order == order)
    }

    pub fn crystal_motes_at(&self, order: u32) -> impl Iterator<Item = &Waypoint> {
        self.crystal_motes.iter().filter(move |w| w.order == order)
    }

    pub fn rapids_at(&self, order: u32) -> impl Iterator<Item = &Waypoint> {
        self.rapids.iter().filter(move |w| w.order == order)
    }

    pub fn supply(&self, object_id: i32) -> Option<&SupplyMeta> {
        self.supplies.get(&object_id)
    }

    /// Replace the pillar list, keeping it sorted by order
    pub fn set_pillars(&mut self, mut pillars: Vec<PillarDef>) {
        pillars.sort_by_key(|p| p.order);
        self.pillars = pillars;
    }

    /// Insert supplies, returning object ids that were already present
    pub fn add_supplies(&mut self, supplies: impl IntoIterator<Item = SupplyMeta>) -> Vec<i32> {
        let mut duplicates = Vec::new();
        for meta in supplies {
            if self.supplies.insert(meta.object_id, meta).is_some() {
                duplicates.push(meta.object_id);
            }
        }
        duplicates
    }
}
