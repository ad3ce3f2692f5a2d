//! The local player's boat, assembled from spawned hull and sail objects.

use crate::game_data::{HullClass, ObjectKind, SailMaterial, speed_boost_ticks};
use crate::scene::SceneObject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    world_view: i32,
    hull: Option<(SceneObject, HullClass)>,
    sail: Option<(SceneObject, SailMaterial)>,
}

impl Ship {
    pub fn new(world_view: i32) -> Self {
        Self {
            world_view,
            hull: None,
            sail: None,
        }
    }

    pub fn world_view(&self) -> i32 {
        self.world_view
    }

    /// Record a spawned hull or sail. Objects from other world views and
    /// non-ship objects are ignored; returns whether the ship changed.
    pub fn apply_spawn(&mut self, obj: SceneObject, kind: Option<ObjectKind>) -> bool {
        if obj.world_view != self.world_view {
            return false;
        }
        match kind {
            Some(ObjectKind::Hull(class)) => {
                self.hull = Some((obj, class));
                true
            }
            Some(ObjectKind::Sail(material)) => {
                self.sail = Some((obj, material));
                true
            }
            _ => false,
        }
    }

    /// Drop whichever part is this exact object
    pub fn apply_despawn(&mut self, obj: &SceneObject) {
        if self.hull.as_ref().is_some_and(|(o, _)| o == obj) {
            self.hull = None;
        }
        if self.sail.as_ref().is_some_and(|(o, _)| o == obj) {
            self.sail = None;
        }
    }

    pub fn hull_class(&self) -> Option<HullClass> {
        self.hull.map(|(_, class)| class)
    }

    pub fn sail_material(&self) -> Option<SailMaterial> {
        self.sail.map(|(_, material)| material)
    }

    pub fn is_complete(&self) -> bool {
        self.hull.is_some() && self.sail.is_some()
    }

    /// Speed-boost duration for the current hull/sail pairing
    pub fn speed_boost_ticks(&self) -> Option<u32> {
        Some(speed_boost_ticks(self.hull_class()?, self.sail_material()?))
    }
}
