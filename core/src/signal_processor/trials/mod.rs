//! Per-trial progress handlers
//!
//! Each trial advances the route on its own cues. The tracker owns one
//! [`ActiveTrial`] while a trial is identified and forwards chat lines and
//! in-run variable changes to it through [`TrialHandler`].

mod gwenith;
mod jubbly;
mod tempor;

pub use gwenith::{BoxLatch, GwenithGlide};
pub use jubbly::{JubblyJive, PillarProgress, WaveBand};
pub use tempor::{TemporBoat, TemporTantrum};

use barracuda_types::{Difficulty, RouteVariants, TrialKind};

use super::WorldReader;
use super::run_state::RouteProgress;
use super::signal::TrialSignal;
use crate::catalog::RouteCatalog;

/// Read-only inputs handed to a trial handler
pub struct HandlerContext<'a> {
    pub world: &'a dyn WorldReader,
    pub catalog: &'a RouteCatalog,
    pub routes: &'a RouteVariants,
    /// Decoded from the run's trial-type code
    pub difficulty: Option<Difficulty>,
    pub running: bool,
}

/// Trial-specific progress rules
pub trait TrialHandler {
    fn kind(&self) -> TrialKind;

    /// A run started with this trial active, or the trial was identified
    /// while a run was already underway. Resets per-run state.
    fn on_run_started(&mut self, _ctx: &HandlerContext<'_>) {}

    /// The trial's announcement line was seen (again)
    fn on_announced(&mut self) {}

    fn on_chat_line(
        &mut self,
        _line: &str,
        _progress: &mut RouteProgress,
        _ctx: &HandlerContext<'_>,
        _signals: &mut Vec<TrialSignal>,
    ) {
    }

    /// Only called while a run is active
    fn on_variable_changed(
        &mut self,
        _varbit_id: i32,
        _value: i32,
        _progress: &mut RouteProgress,
        _ctx: &HandlerContext<'_>,
        _signals: &mut Vec<TrialSignal>,
    ) {
    }
}

/// State of the identified trial
#[derive(Debug, Clone)]
pub enum ActiveTrial {
    GwenithGlide(GwenithGlide),
    JubblyJive(JubblyJive),
    TemporTantrum(TemporTantrum),
}

impl ActiveTrial {
    pub fn new(kind: TrialKind) -> Self {
        match kind {
            TrialKind::GwenithGlide => Self::GwenithGlide(GwenithGlide::default()),
            TrialKind::JubblyJive => Self::JubblyJive(JubblyJive::default()),
            TrialKind::TemporTantrum => Self::TemporTantrum(TemporTantrum::default()),
        }
    }

    pub fn kind(&self) -> TrialKind {
        self.handler().kind()
    }

    pub fn handler(&self) -> &dyn TrialHandler {
        match self {
            Self::GwenithGlide(h) => h,
            Self::JubblyJive(h) => h,
            Self::TemporTantrum(h) => h,
        }
    }

    pub fn handler_mut(&mut self) -> &mut dyn TrialHandler {
        match self {
            Self::GwenithGlide(h) => h,
            Self::JubblyJive(h) => h,
            Self::TemporTantrum(h) => h,
        }
    }

    pub fn as_gwenith(&self) -> Option<&GwenithGlide> {
        match self {
            Self::GwenithGlide(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_jubbly(&self) -> Option<&JubblyJive> {
        match self {
            Self::JubblyJive(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_tempor(&self) -> Option<&TemporTantrum> {
        match self {
            Self::TemporTantrum(h) => Some(h),
            _ => None,
        }
    }
}

/// Emit a route-advanced signal for the current progress
pub(crate) fn route_advanced(kind: TrialKind, progress: &RouteProgress) -> TrialSignal {
    tracing::debug!(%kind, order = progress.order, stage = progress.stage, "Route advanced");
    TrialSignal::RouteAdvanced {
        trial: kind,
        order: progress.order,
        stage: progress.stage,
    }
}
