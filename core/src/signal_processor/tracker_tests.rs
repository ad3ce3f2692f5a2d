//! Tests for the trial tracker
//!
//! Drives the tracker through scripted notifications against an in-memory
//! world and checks run lifecycle, per-trial route progress and the speed
//! boost countdown.

use std::sync::Arc;

use barracuda_types::{Difficulty, RouteVariant, RouteVariants, TrialKind};
use hashbrown::HashMap;

use super::WorldReader;
use super::signal::{ChatKind, TrialEvent, TrialSignal};
use super::tracker::TrialTracker;
use crate::catalog::{PillarDef, RouteCatalog, RouteKey, RouteSet};
use crate::game_data::{
    HullClass, ObjectKind, ObjectTable, SailMaterial, WorldPoint, chat, varbit, varp,
};
use crate::scene::SceneObject;

const SWORDFISH: i32 = 2;
const SHARK: i32 = 3;
const MARLIN: i32 = 4;

const HULL_ID: i32 = 7001;
const SAIL_ID: i32 = 7002;

#[derive(Debug, Default)]
struct FakeWorld {
    varps: HashMap<i32, i32>,
    varbits: HashMap<i32, i32>,
    view: Option<i32>,
}

impl WorldReader for FakeWorld {
    fn varp(&self, id: i32) -> i32 {
        self.varps.get(&id).copied().unwrap_or(0)
    }

    fn varbit(&self, id: i32) -> i32 {
        self.varbits.get(&id).copied().unwrap_or(0)
    }

    fn local_world_view(&self) -> Option<i32> {
        self.view
    }
}

fn pillar(order: u32, varbit_id: i32) -> PillarDef {
    PillarDef {
        position: WorldPoint::new(3000 + order as i32, 3000, 0),
        order,
        pillar: order as u8,
        varbit_id,
    }
}

fn make_tracker() -> TrialTracker {
    let mut shark = RouteSet::new();
    shark.set_pillars(vec![pillar(1, 500), pillar(2, 501), pillar(3, 502)]);

    let mut marlin = RouteSet::new();
    marlin.set_pillars((1..=12).map(|o| pillar(o, 600 + o as i32)).collect());

    let mut catalog = RouteCatalog::new();
    catalog.insert(
        RouteKey::new(TrialKind::JubblyJive, Difficulty::Shark, RouteVariant::Wiki),
        shark,
    );
    catalog.insert(
        RouteKey::new(TrialKind::JubblyJive, Difficulty::Marlin, RouteVariant::Wiki),
        marlin,
    );

    let mut objects = ObjectTable::new();
    objects.insert(HULL_ID, ObjectKind::Hull(HullClass::Skiff));
    objects.insert(SAIL_ID, ObjectKind::Sail(SailMaterial::Mahogany));

    TrialTracker::new(Arc::new(catalog), Arc::new(objects), RouteVariants::default())
}

fn game(tracker: &mut TrialTracker, world: &FakeWorld, text: &str) -> Vec<TrialSignal> {
    tracker.on_chat_line(ChatKind::Game, text, world)
}

fn announce(tracker: &mut TrialTracker, world: &FakeWorld, trial: TrialKind) {
    let line = format!("You prepare to begin the {}...", trial.display_name());
    game(tracker, world, &line);
}

fn start_run(tracker: &mut TrialTracker, world: &mut FakeWorld, code: i32) -> Vec<TrialSignal> {
    world.varbits.insert(varbit::IN_TRIAL, code);
    world.varps.insert(varp::TIME_START, 1200);
    tracker.on_tick(world)
}

fn end_run(tracker: &mut TrialTracker, world: &mut FakeWorld) -> Vec<TrialSignal> {
    world.varps.insert(varp::TIME_START, 0);
    tracker.on_tick(world)
}

fn imbue(stage: u32) -> String {
    format!("{}Speed ({stage}/8)", chat::IMBUE_PREFIX)
}

fn lure_line() -> String {
    format!("You spot 4 {}", chat::LURE_SUFFIX)
}

// ═══════════════════════════════════════════════════════════════════════════
// Run lifecycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_run_start_resets_progress() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::GwenithGlide);

    let signals = start_run(&mut tracker, &mut world, MARLIN);
    assert_eq!(
        signals,
        vec![TrialSignal::RunStarted {
            trial: Some(TrialKind::GwenithGlide),
            difficulty: Some(Difficulty::Marlin),
        }]
    );

    let snap = tracker.snapshot();
    assert!(snap.running);
    assert!(snap.in_trial);
    assert_eq!(snap.route_order, 1);
    assert_eq!(snap.stage, 0);
    assert_eq!(snap.total_stages, 10);
    assert!(!snap.box_latch_armed);
}

#[test]
fn test_run_start_fires_once() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    assert_eq!(start_run(&mut tracker, &mut world, SWORDFISH).len(), 1);

    // Counter keeps moving while running
    world.varps.insert(varp::TIME_START, 1300);
    assert!(tracker.on_tick(&world).is_empty());
    assert!(tracker.snapshot().running);
}

#[test]
fn test_run_end_clears_everything() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    start_run(&mut tracker, &mut world, SHARK);

    game(&mut tracker, &world, &lure_line());
    game(&mut tracker, &world, chat::SAIL_TRIM);
    let snap = tracker.snapshot();
    assert!(snap.pillar.is_some());
    assert_eq!(snap.route_order, 2);

    let signals = end_run(&mut tracker, &mut world);
    assert_eq!(
        signals,
        vec![TrialSignal::RunEnded {
            trial: Some(TrialKind::JubblyJive),
            final_order: 2,
        }]
    );

    let snap = tracker.snapshot();
    assert!(!snap.running);
    assert!(!snap.in_trial);
    assert_eq!(snap.trial, None);
    assert_eq!(snap.difficulty, None);
    assert_eq!(snap.route_order, 1);
    assert_eq!(snap.speed_boost.remaining, 0);
    assert_eq!(snap.speed_boost.max, 0);
    assert_eq!(snap.pillar, None);
    assert!(!snap.jubbly_boat_highlight);
}

#[test]
fn test_trials_completed_cached_each_tick() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    world.varps.insert(varp::TRIALS_COMPLETED, 42);
    tracker.on_tick(&world);
    assert_eq!(tracker.snapshot().trials_completed, 42);
}

#[test]
fn test_variable_changes_ignored_outside_run() {
    let mut tracker = make_tracker();
    let world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);

    let signals = tracker.on_variable_changed(varbit::JUBBLY_SUPPLY_SHARK, 1, &world);
    assert!(signals.is_empty());
    assert_eq!(tracker.snapshot().route_order, 1);
}

#[test]
fn test_non_game_chat_ignored() {
    let mut tracker = make_tracker();
    let world = FakeWorld::default();
    let signals = tracker.on_chat_line(
        ChatKind::Other,
        "You prepare to begin the Gwenith Glide...",
        &world,
    );
    assert!(signals.is_empty());
    assert_eq!(tracker.snapshot().trial, None);
}

#[test]
fn test_handle_dispatches_events() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    world.varps.insert(varp::TIME_START, 5);
    world.varbits.insert(varbit::IN_TRIAL, SWORDFISH);

    let chat_event = TrialEvent::ChatLine {
        kind: ChatKind::Game,
        text: "You reset your progress in the Tempor Tantrum.".to_string(),
    };
    let signals = tracker.handle(&chat_event, &world);
    assert_eq!(
        signals,
        vec![TrialSignal::TrialIdentified {
            trial: TrialKind::TemporTantrum
        }]
    );

    let signals = tracker.handle(&TrialEvent::Tick, &world);
    assert!(matches!(signals[0], TrialSignal::RunStarted { .. }));
    assert!(tracker.snapshot().tempor_south_highlight);
}

// ═══════════════════════════════════════════════════════════════════════════
// Gwenith Glide
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_gwenith_imbue_sequence_and_box_latch() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::GwenithGlide);
    start_run(&mut tracker, &mut world, MARLIN);

    for stage in 1..=6 {
        game(&mut tracker, &world, &imbue(stage));
    }
    assert_eq!(tracker.snapshot().route_order, 7);
    assert_eq!(tracker.snapshot().stage, 6);

    let signals = game(&mut tracker, &world, &imbue(7));
    assert!(signals.contains(&TrialSignal::BoxLatchArmed { trigger_value: 0 }));
    let snap = tracker.snapshot();
    assert_eq!(snap.route_order, 8);
    assert!(snap.box_latch_armed);

    tracker.on_variable_changed(varbit::LOST_SUPPLY_TRIGGER, 1, &world);
    assert_eq!(tracker.snapshot().route_order, 8);
    let signals = tracker.on_variable_changed(varbit::LOST_SUPPLY_TRIGGER, 0, &world);
    assert_eq!(
        signals,
        vec![TrialSignal::RouteAdvanced {
            trial: TrialKind::GwenithGlide,
            order: 9,
            stage: 7,
        }]
    );
    assert!(!tracker.snapshot().box_latch_armed);

    // A second falling edge before re-arming does nothing
    tracker.on_variable_changed(varbit::LOST_SUPPLY_TRIGGER, 1, &world);
    tracker.on_variable_changed(varbit::LOST_SUPPLY_TRIGGER, 0, &world);
    assert_eq!(tracker.snapshot().route_order, 9);

    // Final imbue records the stage without advancing
    assert!(game(&mut tracker, &world, &imbue(8)).is_empty());
    assert_eq!(tracker.snapshot().route_order, 9);
    assert_eq!(tracker.snapshot().stage, 8);
}

#[test]
fn test_gwenith_repeated_imbue_is_idempotent() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::GwenithGlide);
    start_run(&mut tracker, &mut world, SHARK);

    game(&mut tracker, &world, &imbue(1));
    game(&mut tracker, &world, &imbue(2));
    assert!(game(&mut tracker, &world, &imbue(2)).is_empty());
    assert!(game(&mut tracker, &world, &imbue(1)).is_empty());
    assert_eq!(tracker.snapshot().route_order, 3);
}

#[test]
fn test_gwenith_rejects_out_of_range_imbue() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::GwenithGlide);
    start_run(&mut tracker, &mut world, SHARK);

    game(&mut tracker, &world, &imbue(0));
    game(&mut tracker, &world, &imbue(9));
    game(&mut tracker, &world, &format!("{}Speed (x/8)", chat::IMBUE_PREFIX));
    game(&mut tracker, &world, &format!("{}Speed 3/8", chat::IMBUE_PREFIX));
    assert_eq!(tracker.snapshot().route_order, 1);
}

#[test]
fn test_gwenith_latch_seeded_from_world_at_run_start() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::GwenithGlide);
    start_run(&mut tracker, &mut world, MARLIN);
    for stage in 1..=6 {
        game(&mut tracker, &world, &imbue(stage));
    }

    // Trigger already high when the latch arms
    world.varbits.insert(varbit::LOST_SUPPLY_TRIGGER, 1);
    game(&mut tracker, &world, &imbue(7));
    tracker.on_variable_changed(varbit::LOST_SUPPLY_TRIGGER, 0, &world);
    assert_eq!(tracker.snapshot().route_order, 9);
}

// ═══════════════════════════════════════════════════════════════════════════
// Jubbly Jive
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_jubbly_pillar_cursor() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    start_run(&mut tracker, &mut world, SHARK);

    let signals = game(&mut tracker, &world, &lure_line());
    assert!(matches!(
        signals[0],
        TrialSignal::PillarCursorMoved { cursor: Some(c) } if c.index == 0 && c.wave == 1
    ));
    assert!(!tracker.snapshot().jubbly_boat_highlight);

    // Not the pillar under the cursor
    assert!(tracker.on_variable_changed(502, 2, &world).is_empty());
    // Not complete yet
    assert!(tracker.on_variable_changed(500, 1, &world).is_empty());

    tracker.on_variable_changed(500, 2, &world);
    assert_eq!(tracker.snapshot().pillar.map(|c| c.index), Some(1));
    assert_eq!(tracker.snapshot().pillar.map(|c| c.pillar), Some(2));

    tracker.on_variable_changed(501, 2, &world);
    let signals = tracker.on_variable_changed(502, 3, &world);
    assert_eq!(signals, vec![TrialSignal::PillarCursorMoved { cursor: None }]);
    assert_eq!(tracker.snapshot().pillar, None);
}

#[test]
fn test_jubbly_marlin_second_wave() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    start_run(&mut tracker, &mut world, MARLIN);

    game(&mut tracker, &world, &lure_line());
    for order in 1..=9 {
        tracker.on_variable_changed(600 + order, 2, &world);
    }
    assert_eq!(tracker.snapshot().pillar, None);

    game(&mut tracker, &world, &lure_line());
    let cursor = tracker.snapshot().pillar.unwrap();
    assert_eq!(cursor.wave, 2);
    assert_eq!(cursor.order, 10);
}

#[test]
fn test_jubbly_lure_without_pillar_route_still_advances() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    // No Swordfish pillars are loaded
    start_run(&mut tracker, &mut world, SWORDFISH);

    let signals = game(&mut tracker, &world, &lure_line());
    assert_eq!(
        signals,
        vec![
            TrialSignal::PillarCursorMoved { cursor: None },
            TrialSignal::RouteAdvanced {
                trial: TrialKind::JubblyJive,
                order: 2,
                stage: 1,
            },
        ]
    );

    let snap = tracker.snapshot();
    assert_eq!(snap.pillar, None);
    assert_eq!(snap.route_order, 2);
    assert_eq!(snap.stage, 1);
    assert!(!snap.jubbly_boat_highlight);
}

#[test]
fn test_jubbly_lure_with_unknown_difficulty() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    start_run(&mut tracker, &mut world, 0);

    let signals = game(&mut tracker, &world, &lure_line());
    assert_eq!(
        signals,
        vec![TrialSignal::RouteAdvanced {
            trial: TrialKind::JubblyJive,
            order: 2,
            stage: 1,
        }]
    );

    let snap = tracker.snapshot();
    assert_eq!(snap.pillar, None);
    assert!(!snap.jubbly_boat_highlight);
}

#[test]
fn test_jubbly_boat_highlight_follows_chat() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    assert!(tracker.snapshot().jubbly_boat_highlight);

    start_run(&mut tracker, &mut world, SHARK);
    assert!(tracker.snapshot().jubbly_boat_highlight);

    game(&mut tracker, &world, &lure_line());
    assert!(!tracker.snapshot().jubbly_boat_highlight);

    game(&mut tracker, &world, "You successfully lure a jubbly to Gurtob!");
    assert!(tracker.snapshot().jubbly_boat_highlight);
}

#[test]
fn test_jubbly_supply_counters_by_difficulty() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    start_run(&mut tracker, &mut world, MARLIN);

    // Shark counter does nothing on Marlin
    tracker.on_variable_changed(varbit::JUBBLY_SUPPLY_SHARK, 1, &world);
    assert_eq!(tracker.snapshot().route_order, 1);

    tracker.on_variable_changed(varbit::JUBBLY_SUPPLY_MARLIN_A, 1, &world);
    tracker.on_variable_changed(varbit::JUBBLY_SUPPLY_MARLIN_B, 1, &world);
    let snap = tracker.snapshot();
    assert_eq!(snap.route_order, 3);
    assert_eq!(snap.stage, 2);
}

#[test]
fn test_same_trial_reannounce_keeps_progress() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::JubblyJive);
    start_run(&mut tracker, &mut world, SHARK);
    game(&mut tracker, &world, &lure_line());
    tracker.on_variable_changed(500, 2, &world);

    announce(&mut tracker, &world, TrialKind::JubblyJive);
    let snap = tracker.snapshot();
    assert_eq!(snap.pillar.map(|c| c.index), Some(1));
    assert!(snap.jubbly_boat_highlight);
}

// ═══════════════════════════════════════════════════════════════════════════
// Tempor Tantrum
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_tempor_highlights_mutually_exclusive() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::TemporTantrum);

    let snap = tracker.snapshot();
    assert!(!snap.tempor_north_highlight && !snap.tempor_south_highlight);

    start_run(&mut tracker, &mut world, SWORDFISH);
    let lines = [
        "You collect the rum shipment.",
        "You deliver the rum shipment.",
        "You collect the rum shipment.",
        "Something unrelated.",
    ];
    for line in lines {
        game(&mut tracker, &world, line);
        let snap = tracker.snapshot();
        assert!(snap.tempor_north_highlight != snap.tempor_south_highlight);
    }
    assert!(tracker.snapshot().tempor_north_highlight);
    assert_eq!(tracker.snapshot().route_order, 4);

    end_run(&mut tracker, &mut world);
    let snap = tracker.snapshot();
    assert!(!snap.tempor_north_highlight && !snap.tempor_south_highlight);
}

#[test]
fn test_tempor_identified_mid_run() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    start_run(&mut tracker, &mut world, SHARK);
    announce(&mut tracker, &world, TrialKind::TemporTantrum);

    let snap = tracker.snapshot();
    assert!(snap.tempor_south_highlight);
    assert_eq!(snap.difficulty, Some(Difficulty::Shark));
}

#[test]
fn test_tempor_cues_ignored_before_run() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld::default();
    announce(&mut tracker, &world, TrialKind::TemporTantrum);

    let signals = game(&mut tracker, &world, "You collect the rum shipment.");
    assert!(signals.is_empty());
    let snap = tracker.snapshot();
    assert!(!snap.running);
    assert!(!snap.tempor_north_highlight && !snap.tempor_south_highlight);
    assert_eq!(snap.route_order, 1);

    start_run(&mut tracker, &mut world, SHARK);
    assert!(tracker.snapshot().tempor_south_highlight);
}

// ═══════════════════════════════════════════════════════════════════════════
// Speed boost
// ═══════════════════════════════════════════════════════════════════════════

fn spawn_ship(tracker: &mut TrialTracker, world: &FakeWorld, view: i32) {
    for id in [HULL_ID, SAIL_ID] {
        let obj = SceneObject::new(id, WorldPoint::new(10, 10, 0), view);
        tracker.on_object_spawned(obj, world);
    }
}

#[test]
fn test_speed_boost_uses_ship_duration() {
    let mut tracker = make_tracker();
    let world = FakeWorld {
        view: Some(3),
        ..FakeWorld::default()
    };
    spawn_ship(&mut tracker, &world, 3);

    let signals = game(&mut tracker, &world, chat::WIND_MOTE_RELEASE);
    assert_eq!(signals, vec![TrialSignal::SpeedBoostStarted { ticks: 27 }]);

    for _ in 0..27 {
        tracker.on_tick(&world);
    }
    assert_eq!(tracker.snapshot().speed_boost.remaining, 0);
    tracker.on_tick(&world);
    let boost = tracker.snapshot().speed_boost;
    assert_eq!(boost.remaining, 0);
    assert_eq!(boost.max, 27);
}

#[test]
fn test_speed_boost_fallback_without_ship() {
    let mut tracker = make_tracker();
    let world = FakeWorld::default();
    let signals = game(&mut tracker, &world, chat::SAIL_TRIM);
    assert_eq!(signals, vec![TrialSignal::SpeedBoostStarted { ticks: 1 }]);
}

#[test]
fn test_speed_boost_world_view_change_drops_ship() {
    let mut tracker = make_tracker();
    let mut world = FakeWorld {
        view: Some(3),
        ..FakeWorld::default()
    };
    spawn_ship(&mut tracker, &world, 3);
    assert_eq!(tracker.snapshot().hull, Some(HullClass::Skiff));

    world.view = Some(8);
    let signals = game(&mut tracker, &world, chat::SAIL_TRIM);
    assert_eq!(signals, vec![TrialSignal::SpeedBoostStarted { ticks: 1 }]);
    assert_eq!(tracker.ship().map(|s| s.world_view()), Some(8));
}

#[test]
fn test_ship_parts_from_other_world_view_ignored() {
    let mut tracker = make_tracker();
    let world = FakeWorld {
        view: Some(3),
        ..FakeWorld::default()
    };
    spawn_ship(&mut tracker, &world, 5);
    let snap = tracker.snapshot();
    assert_eq!(snap.hull, None);
    assert_eq!(snap.sail, None);
}
