//! Trial progress state machine
//!
//! Host notifications come in as [`TrialEvent`]s; the [`TrialTracker`]
//! updates run state and returns the [`TrialSignal`]s describing what
//! changed. Polled game variables are read through [`WorldReader`].

pub mod run_state;
pub mod ship;
pub mod signal;
pub mod snapshot;
pub mod tracker;
pub mod trials;

#[cfg(test)]
mod tracker_tests;

pub use run_state::{RouteProgress, RunEdge, RunState, SpeedBoost, detect_run_edge};
pub use ship::Ship;
pub use signal::{ChatKind, TrialEvent, TrialSignal};
pub use snapshot::{PillarCursor, ProgressSnapshot};
pub use tracker::TrialTracker;
pub use trials::{ActiveTrial, TemporBoat, TrialHandler};

/// Access to game variables and the local player.
///
/// Implemented by the host client; the replay tool provides a scripted one.
pub trait WorldReader {
    fn varp(&self, id: i32) -> i32;
    fn varbit(&self, id: i32) -> i32;
    /// World view the local player stands in, None when logged out
    fn local_world_view(&self) -> Option<i32>;
}

/// Trait for components that react to tracker signals
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &TrialSignal);
}
