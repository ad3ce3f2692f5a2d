//! Scene object registry
//!
//! Tracks the currently spawned objects overlays care about: lost-supply
//! crates, Jubbly Jive pillars and the collection boats. The registry is
//! fed by spawn/despawn notifications and only ever read by the tracker and
//! the guidance queries.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::RouteCatalog;
use crate::game_data::{ObjectKind, ObjectTable, WorldPoint};

/// A spawned world object as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object type id
    pub object_id: i32,
    pub position: WorldPoint,
    /// World view the object lives in (boats have their own)
    pub world_view: i32,
}

impl SceneObject {
    pub fn new(object_id: i32, position: WorldPoint, world_view: i32) -> Self {
        Self {
            object_id,
            position,
            world_view,
        }
    }

    fn location_key(&self) -> (i32, WorldPoint) {
        (self.object_id, self.position)
    }
}

#[derive(Debug, Clone)]
pub struct SceneRegistry {
    objects: Arc<ObjectTable>,
    catalog: Arc<RouteCatalog>,

    /// Crates keyed by (type id, position)
    lost_supplies: HashMap<(i32, WorldPoint), SceneObject>,
    /// Pillar clickboxes keyed by 1-based pillar identifier
    pillars: HashMap<u8, SceneObject>,
    jubbly_boat: Option<SceneObject>,
    tempor_north_boat: Option<SceneObject>,
    tempor_south_boat: Option<SceneObject>,
}

impl SceneRegistry {
    pub fn new(objects: Arc<ObjectTable>, catalog: Arc<RouteCatalog>) -> Self {
        Self {
            objects,
            catalog,
            lost_supplies: HashMap::new(),
            pillars: HashMap::new(),
            jubbly_boat: None,
            tempor_north_boat: None,
            tempor_south_boat: None,
        }
    }

    // --- Notifications ---

    pub fn on_object_spawned(&mut self, obj: SceneObject) {
        if self.catalog.is_supply_object(obj.object_id) {
            self.lost_supplies.insert(obj.location_key(), obj);
        }

        match self.objects.classify(obj.object_id) {
            Some(ObjectKind::Pillar(index)) => {
                self.pillars.insert(index, obj);
            }
            Some(ObjectKind::JubblyBoat) => self.jubbly_boat = Some(obj),
            Some(ObjectKind::TemporNorthBoat) => self.tempor_north_boat = Some(obj),
            Some(ObjectKind::TemporSouthBoat) => self.tempor_south_boat = Some(obj),
            // Ship parts belong to the tracker's Ship
            Some(ObjectKind::Sail(_) | ObjectKind::Hull(_)) | None => {}
        }
    }

    pub fn on_object_despawned(&mut self, obj: &SceneObject) {
        self.lost_supplies.remove(&obj.location_key());

        if let Some(ObjectKind::Pillar(index)) = self.objects.classify(obj.object_id)
            && self.pillars.get(&index) == Some(obj)
        {
            self.pillars.remove(&index);
        }

        for slot in [
            &mut self.jubbly_boat,
            &mut self.tempor_north_boat,
            &mut self.tempor_south_boat,
        ] {
            if slot.as_ref() == Some(obj) {
                *slot = None;
            }
        }
    }

    /// A world view was unloaded. Crates only survive non-top-level unloads.
    pub fn on_world_view_unloaded(&mut self, top_level: bool) {
        if top_level {
            tracing::trace!(cleared = self.lost_supplies.len(), "Top-level world view unloaded");
            self.lost_supplies.clear();
        }
    }

    // --- Queries ---

    pub fn lost_supplies(&self) -> impl Iterator<Item = &SceneObject> {
        self.lost_supplies.values()
    }

    pub fn pillar(&self, index: u8) -> Option<&SceneObject> {
        self.pillars.get(&index)
    }

    pub fn jubbly_boat(&self) -> Option<&SceneObject> {
        self.jubbly_boat.as_ref()
    }

    pub fn tempor_north_boat(&self) -> Option<&SceneObject> {
        self.tempor_north_boat.as_ref()
    }

    pub fn tempor_south_boat(&self) -> Option<&SceneObject> {
        self.tempor_south_boat.as_ref()
    }
}
