use barracuda_types::{Difficulty, TrialKind};
use serde::Serialize;

use crate::scene::SceneObject;

use super::snapshot::PillarCursor;

/// Chat channel of an incoming line. Only game messages are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Game,
    Other,
}

/// Raw notifications delivered by the host, one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum TrialEvent {
    Tick,
    VariableChanged { varbit_id: i32, value: i32 },
    ChatLine { kind: ChatKind, text: String },
    ObjectSpawned(SceneObject),
    ObjectDespawned(SceneObject),
    WorldViewUnloaded { top_level: bool },
}

/// Signals emitted by the tracker for things that changed.
/// These describe progress at a higher level than the raw notifications.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum TrialSignal {
    // Run lifecycle
    RunStarted {
        trial: Option<TrialKind>,
        difficulty: Option<Difficulty>,
    },
    RunEnded {
        trial: Option<TrialKind>,
        final_order: u32,
    },
    TrialIdentified {
        trial: TrialKind,
    },

    // Route progress
    RouteAdvanced {
        trial: TrialKind,
        order: u32,
        stage: u32,
    },
    BoxLatchArmed {
        trigger_value: i32,
    },
    PillarCursorMoved {
        cursor: Option<PillarCursor>,
    },

    SpeedBoostStarted {
        ticks: u32,
    },
}
