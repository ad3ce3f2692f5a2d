use std::sync::Arc;

use barracuda_types::{RouteVariants, TrialKind};

use super::WorldReader;
use super::run_state::{RouteProgress, RunEdge, RunState, detect_run_edge};
use super::ship::Ship;
use super::signal::{ChatKind, TrialEvent, TrialSignal};
use super::snapshot::ProgressSnapshot;
use super::trials::{ActiveTrial, HandlerContext};
use crate::catalog::RouteCatalog;
use crate::game_data::{ObjectTable, chat, varbit, varp};
use crate::scene::SceneObject;

/// Speed boost length when the boat's hull or sail is unknown
const FALLBACK_BOOST_TICKS: u32 = 1;

/// Tracks run lifecycle and route progress for the active trial.
///
/// Single-threaded: every notification is applied in arrival order and
/// returns the signals it produced.
#[derive(Debug)]
pub struct TrialTracker {
    catalog: Arc<RouteCatalog>,
    objects: Arc<ObjectTable>,
    routes: RouteVariants,

    state: RunState,
    ship: Option<Ship>,
}

impl TrialTracker {
    pub fn new(catalog: Arc<RouteCatalog>, objects: Arc<ObjectTable>, routes: RouteVariants) -> Self {
        Self {
            catalog,
            objects,
            routes,
            state: RunState::new(),
            ship: None,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn routes(&self) -> &RouteVariants {
        &self.routes
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::capture(&self.state, self.ship.as_ref())
    }

    /// Apply one host notification
    pub fn handle(&mut self, event: &TrialEvent, world: &dyn WorldReader) -> Vec<TrialSignal> {
        match event {
            TrialEvent::Tick => self.on_tick(world),
            TrialEvent::VariableChanged { varbit_id, value } => {
                self.on_variable_changed(*varbit_id, *value, world)
            }
            TrialEvent::ChatLine { kind, text } => self.on_chat_line(*kind, text, world),
            TrialEvent::ObjectSpawned(obj) => {
                self.on_object_spawned(*obj, world);
                Vec::new()
            }
            TrialEvent::ObjectDespawned(obj) => {
                self.on_object_despawned(obj);
                Vec::new()
            }
            // Scene bookkeeping only
            TrialEvent::WorldViewUnloaded { .. } => Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_tick(&mut self, world: &dyn WorldReader) -> Vec<TrialSignal> {
        let mut signals = Vec::new();
        let time_start = world.varp(varp::TIME_START);

        match detect_run_edge(self.state.last_time_start, time_start, self.state.running) {
            RunEdge::Started => self.start_run(world, &mut signals),
            RunEdge::Ended => self.end_run(&mut signals),
            RunEdge::Unchanged => {}
        }

        self.state.last_time_start = time_start;
        self.state.trials_completed = world.varp(varp::TRIALS_COMPLETED);
        self.state.speed_boost.tick();

        signals
    }

    fn start_run(&mut self, world: &dyn WorldReader, signals: &mut Vec<TrialSignal>) {
        let state = &mut self.state;
        state.running = true;
        state.trial_type_code = world.varbit(varbit::IN_TRIAL);
        state.total_stages = state.run_difficulty().map_or(0, |d| d.total_stages());
        state.progress = RouteProgress::default();

        let ctx = HandlerContext {
            world,
            catalog: &self.catalog,
            routes: &self.routes,
            difficulty: state.run_difficulty(),
            running: true,
        };
        if let Some(trial) = state.trial.as_mut() {
            trial.handler_mut().on_run_started(&ctx);
        }

        tracing::info!(
            trial = ?state.trial_kind(),
            difficulty = ?state.run_difficulty(),
            code = state.trial_type_code,
            "Trial run started"
        );
        signals.push(TrialSignal::RunStarted {
            trial: state.trial_kind(),
            difficulty: state.run_difficulty(),
        });
    }

    fn end_run(&mut self, signals: &mut Vec<TrialSignal>) {
        let trial = self.state.trial_kind();
        let final_order = self.state.progress.order;
        self.state.reset();

        tracing::info!(?trial, final_order, "Trial run ended");
        signals.push(TrialSignal::RunEnded { trial, final_order });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Variables
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_variable_changed(
        &mut self,
        varbit_id: i32,
        value: i32,
        world: &dyn WorldReader,
    ) -> Vec<TrialSignal> {
        let mut signals = Vec::new();
        if !self.state.running {
            return signals;
        }

        let ctx = HandlerContext {
            world,
            catalog: &self.catalog,
            routes: &self.routes,
            difficulty: self.state.run_difficulty(),
            running: self.state.running,
        };
        if let Some(trial) = self.state.trial.as_mut() {
            trial.handler_mut().on_variable_changed(
                varbit_id,
                value,
                &mut self.state.progress,
                &ctx,
                &mut signals,
            );
        }
        signals
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chat
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_chat_line(
        &mut self,
        kind: ChatKind,
        text: &str,
        world: &dyn WorldReader,
    ) -> Vec<TrialSignal> {
        let mut signals = Vec::new();
        if kind != ChatKind::Game {
            return signals;
        }

        if let Some(&trial) = chat::TRIAL_ANNOUNCEMENTS.get(text) {
            self.identify_trial(trial, world, &mut signals);
        }

        if chat::is_speed_boost(text) {
            self.start_speed_boost(world, &mut signals);
        }

        let ctx = HandlerContext {
            world,
            catalog: &self.catalog,
            routes: &self.routes,
            difficulty: self.state.run_difficulty(),
            running: self.state.running,
        };
        if let Some(trial) = self.state.trial.as_mut() {
            trial
                .handler_mut()
                .on_chat_line(text, &mut self.state.progress, &ctx, &mut signals);
        }
        signals
    }

    fn identify_trial(
        &mut self,
        kind: TrialKind,
        world: &dyn WorldReader,
        signals: &mut Vec<TrialSignal>,
    ) {
        let state = &mut self.state;
        let same_kind = state.trial_kind() == Some(kind);
        if !same_kind {
            let mut trial = ActiveTrial::new(kind);
            if state.running {
                let ctx = HandlerContext {
                    world,
                    catalog: &self.catalog,
                    routes: &self.routes,
                    difficulty: state.run_difficulty(),
                    running: true,
                };
                trial.handler_mut().on_run_started(&ctx);
            }
            state.trial = Some(trial);
        }

        if let Some(trial) = state.trial.as_mut() {
            trial.handler_mut().on_announced();
        }

        tracing::info!(%kind, same_kind, running = state.running, "Trial identified");
        signals.push(TrialSignal::TrialIdentified { trial: kind });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ship and speed boost
    // ─────────────────────────────────────────────────────────────────────────

    fn start_speed_boost(&mut self, world: &dyn WorldReader, signals: &mut Vec<TrialSignal>) {
        // A stale ship from another world view must not supply a duration
        if let Some(view) = world.local_world_view() {
            self.ship_for_view(view);
        }

        let ticks = self
            .ship
            .as_ref()
            .and_then(Ship::speed_boost_ticks)
            .filter(|&t| t > 0)
            .unwrap_or(FALLBACK_BOOST_TICKS);

        self.state.speed_boost.start(ticks);
        tracing::debug!(ticks, "Speed boost started");
        signals.push(TrialSignal::SpeedBoostStarted { ticks });
    }

    pub fn on_object_spawned(&mut self, obj: SceneObject, world: &dyn WorldReader) {
        let Some(view) = world.local_world_view() else {
            return;
        };
        let kind = self.objects.classify(obj.object_id);
        let ship = self.ship_for_view(view);
        if ship.apply_spawn(obj, kind) {
            tracing::trace!(
                hull = ?ship.hull_class(),
                sail = ?ship.sail_material(),
                "Ship part updated"
            );
        }
    }

    /// The ship for `view`, replacing one built for another world view
    fn ship_for_view(&mut self, view: i32) -> &mut Ship {
        if self.ship.as_ref().is_some_and(|s| s.world_view() != view) {
            self.ship = None;
        }
        self.ship.get_or_insert_with(|| Ship::new(view))
    }

    pub fn on_object_despawned(&mut self, obj: &SceneObject) {
        if let Some(ship) = self.ship.as_mut() {
            ship.apply_despawn(obj);
        }
    }
}
