use barracuda_types::{Difficulty, TrialKind};
use serde::Serialize;

use super::run_state::{RunState, SpeedBoost};
use super::ship::Ship;
use super::trials::TemporBoat;
use crate::game_data::{HullClass, SailMaterial};

/// Position of the Jubbly Jive pillar cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarCursor {
    /// Index into the active pillar list
    pub index: usize,
    pub order: u32,
    pub pillar: u8,
    pub varbit_id: i32,
    pub wave: u8,
}

/// Read-only view of tracker state for overlays and the replay tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub running: bool,
    pub in_trial: bool,
    pub trial: Option<TrialKind>,
    pub difficulty: Option<Difficulty>,
    pub route_order: u32,
    pub stage: u32,
    pub total_stages: u32,
    pub trials_completed: i32,

    pub box_latch_armed: bool,
    pub pillar: Option<PillarCursor>,
    pub jubbly_boat_highlight: bool,
    pub tempor_north_highlight: bool,
    pub tempor_south_highlight: bool,

    pub speed_boost: SpeedBoost,
    pub hull: Option<HullClass>,
    pub sail: Option<SailMaterial>,
}

impl ProgressSnapshot {
    pub(crate) fn capture(state: &RunState, ship: Option<&Ship>) -> Self {
        let trial = state.trial.as_ref();
        let gwenith = trial.and_then(|t| t.as_gwenith());
        let jubbly = trial.and_then(|t| t.as_jubbly());
        let tempor_target = trial.and_then(|t| t.as_tempor()).and_then(|t| t.target());

        Self {
            running: state.running,
            in_trial: state.in_trial(),
            trial: state.trial_kind(),
            difficulty: state.difficulty(),
            route_order: state.progress.order,
            stage: state.progress.stage,
            total_stages: state.total_stages,
            trials_completed: state.trials_completed,

            box_latch_armed: gwenith.is_some_and(|g| g.latch().is_armed()),
            pillar: jubbly.and_then(|j| j.pillars().cursor()),
            jubbly_boat_highlight: jubbly.is_some_and(|j| j.boat_highlight()),
            tempor_north_highlight: tempor_target == Some(TemporBoat::North),
            tempor_south_highlight: tempor_target == Some(TemporBoat::South),

            speed_boost: state.speed_boost,
            hull: ship.and_then(Ship::hull_class),
            sail: ship.and_then(Ship::sail_material),
        }
    }
}
