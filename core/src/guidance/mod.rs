//! Guidance queries
//!
//! Derives what overlays should draw from a progress snapshot, the route
//! catalog and the scene registry. Everything here is read-only; an empty
//! result means there is nothing to show.

use barracuda_types::{Difficulty, RouteVariants, TrialKind};
use serde::Serialize;

use crate::catalog::{PillarDef, RouteCatalog, RouteSet, Waypoint};
use crate::game_data::varbit;
use crate::scene::{SceneObject, SceneRegistry};
use crate::signal_processor::{ProgressSnapshot, WorldReader};

/// A lost-supply crate that still needs collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupplyTarget {
    pub object: SceneObject,
    /// Number drawn over the crate
    pub index: u32,
}

/// The pillar under the Jubbly Jive cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PillarTarget {
    pub def: PillarDef,
    /// Spawned clickbox, when loaded
    pub object: Option<SceneObject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoatLabel {
    Jubbly,
    Collect,
    Deliver,
}

impl BoatLabel {
    pub fn text(self) -> &'static str {
        match self {
            Self::Jubbly => "Jubbly",
            Self::Collect => "Collect",
            Self::Deliver => "Deliver",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoatHighlight {
    pub object: SceneObject,
    pub label: BoatLabel,
}

/// Speed boost countdown for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedBoostView {
    pub remaining: u32,
    pub max: u32,
}

impl SpeedBoostView {
    /// Progress as 0.0 (expired) to 1.0 (full)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        (self.remaining as f32 / self.max as f32).clamp(0.0, 1.0)
    }
}

/// Borrowed inputs for every guidance query
#[derive(Clone, Copy)]
pub struct Guidance<'a> {
    pub snapshot: &'a ProgressSnapshot,
    pub catalog: &'a RouteCatalog,
    pub registry: &'a SceneRegistry,
    pub routes: &'a RouteVariants,
}

impl<'a> Guidance<'a> {
    pub fn new(
        snapshot: &'a ProgressSnapshot,
        catalog: &'a RouteCatalog,
        registry: &'a SceneRegistry,
        routes: &'a RouteVariants,
    ) -> Self {
        Self {
            snapshot,
            catalog,
            registry,
            routes,
        }
    }

    /// Active trial, difficulty and the route set selected for them
    fn active(&self) -> Option<(TrialKind, Difficulty, &'a RouteSet)> {
        if !self.snapshot.in_trial {
            return None;
        }
        let trial = self.snapshot.trial?;
        let difficulty = self.snapshot.difficulty?;
        let variant = self.routes.variant(trial, difficulty);
        Some((trial, difficulty, self.catalog.lookup(trial, difficulty, variant)))
    }

    /// Waypoints for the current route order
    pub fn route_segment(&self) -> Vec<Waypoint> {
        let Some((_, _, set)) = self.active() else {
            return Vec::new();
        };
        set.waypoints_at(self.snapshot.route_order).copied().collect()
    }

    /// Spawned crates in the current order whose objective is still open
    pub fn visible_supplies(&self, world: &dyn WorldReader) -> Vec<SupplyTarget> {
        let Some((_, _, set)) = self.active() else {
            return Vec::new();
        };

        let mut targets: Vec<SupplyTarget> = self
            .registry
            .lost_supplies()
            .filter_map(|obj| {
                let meta = set.supply(obj.object_id)?;
                if meta.order != self.snapshot.route_order {
                    return None;
                }
                let objective = varbit::objective(meta.objective_offset)?;
                (world.varbit(objective) != 0).then_some(SupplyTarget {
                    object: *obj,
                    index: meta.index,
                })
            })
            .collect();
        targets.sort_by_key(|t| t.index);
        targets
    }

    /// Gwenith Glide crystal motes for the current order
    pub fn crystal_motes(&self) -> Vec<Waypoint> {
        match self.active() {
            Some((TrialKind::GwenithGlide, _, set)) => {
                set.crystal_motes_at(self.snapshot.route_order).copied().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Rapids for the current order (Jubbly Jive and Tempor Tantrum)
    pub fn rapids(&self) -> Vec<Waypoint> {
        match self.active() {
            Some((TrialKind::JubblyJive | TrialKind::TemporTantrum, _, set)) => {
                set.rapids_at(self.snapshot.route_order).copied().collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn pillar_target(&self) -> Option<PillarTarget> {
        let (trial, _, set) = self.active()?;
        if trial != TrialKind::JubblyJive {
            return None;
        }
        let cursor = self.snapshot.pillar?;
        let def = *set.pillars.get(cursor.index)?;
        Some(PillarTarget {
            def,
            object: self.registry.pillar(def.pillar).copied(),
        })
    }

    pub fn boat_highlight(&self) -> Option<BoatHighlight> {
        let (trial, _, _) = self.active()?;
        let snap = self.snapshot;
        let (object, label) = match trial {
            TrialKind::JubblyJive if snap.jubbly_boat_highlight => {
                (self.registry.jubbly_boat()?, BoatLabel::Jubbly)
            }
            TrialKind::TemporTantrum if snap.tempor_south_highlight => {
                (self.registry.tempor_south_boat()?, BoatLabel::Collect)
            }
            TrialKind::TemporTantrum if snap.tempor_north_highlight => {
                (self.registry.tempor_north_boat()?, BoatLabel::Deliver)
            }
            _ => return None,
        };
        Some(BoatHighlight {
            object: *object,
            label,
        })
    }

    pub fn speed_boost(&self) -> Option<SpeedBoostView> {
        let boost = self.snapshot.speed_boost;
        (self.snapshot.running && boost.is_active()).then_some(SpeedBoostView {
            remaining: boost.remaining,
            max: boost.max,
        })
    }
}
