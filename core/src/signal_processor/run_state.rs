//! Run state and run-boundary detection.
//!
//! A run is bracketed by the time-started varp:
//! - Idle: the counter reads zero
//! - Running: the counter went from zero to non-zero and has not returned
//!
//! The edge is computed from the value cached on the previous tick, so a
//! single-tick flicker produces at most one transition per tick.

use barracuda_types::{Difficulty, TrialKind};
use serde::Serialize;

use super::trials::ActiveTrial;

/// Transition produced by comparing consecutive time-started readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEdge {
    Unchanged,
    Started,
    Ended,
}

/// Compare the previous and current time-started readings.
pub fn detect_run_edge(previous: i32, current: i32, running: bool) -> RunEdge {
    if !running && previous == 0 && current != 0 {
        RunEdge::Started
    } else if running && previous != 0 && current == 0 {
        RunEdge::Ended
    } else {
        RunEdge::Unchanged
    }
}

/// Route cursor and per-run stage counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteProgress {
    /// 1-based route order; never decreases within a run
    pub order: u32,
    /// Splits completed this run
    pub stage: u32,
}

impl Default for RouteProgress {
    fn default() -> Self {
        Self { order: 1, stage: 0 }
    }
}

impl RouteProgress {
    /// Advance both the route cursor and the stage counter
    pub fn advance(&mut self) {
        self.order += 1;
        self.stage += 1;
    }

    /// Advance the route cursor only
    pub fn advance_order(&mut self) {
        self.order += 1;
    }
}

/// Tick-based speed boost countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SpeedBoost {
    pub remaining: u32,
    pub max: u32,
}

impl SpeedBoost {
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
        self.max = ticks;
    }

    /// Count down by one tick, saturating at zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0 && self.max > 0
    }
}

/// Everything the tracker knows about the current run
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub running: bool,
    /// Set by a chat announcement; may precede `running`
    pub trial: Option<ActiveTrial>,
    /// Raw trial-type code snapshotted at run start
    pub trial_type_code: i32,
    pub total_stages: u32,
    pub progress: RouteProgress,
    pub speed_boost: SpeedBoost,

    /// time-started reading from the previous tick
    pub last_time_start: i32,
    pub trials_completed: i32,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_trial(&self) -> bool {
        self.trial.is_some()
    }

    pub fn trial_kind(&self) -> Option<TrialKind> {
        self.trial.as_ref().map(ActiveTrial::kind)
    }

    /// Difficulty decoded from the run's trial-type code, if any
    pub fn run_difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_trial_type_code(self.trial_type_code)
    }

    /// Difficulty as shown to readers: only reported while in a trial
    pub fn difficulty(&self) -> Option<Difficulty> {
        if self.in_trial() {
            self.run_difficulty()
        } else {
            None
        }
    }

    /// Clear all run state. Tick caches are preserved.
    pub fn reset(&mut self) {
        *self = Self {
            last_time_start: self.last_time_start,
            trials_completed: self.trials_completed,
            ..Self::default()
        };
    }
}
