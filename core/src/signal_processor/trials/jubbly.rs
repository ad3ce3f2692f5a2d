use barracuda_types::{Difficulty, TrialKind};

use super::{HandlerContext, TrialHandler, route_advanced};
use crate::catalog::PillarDef;
use crate::game_data::{chat, varbit};
use crate::signal_processor::run_state::RouteProgress;
use crate::signal_processor::signal::TrialSignal;
use crate::signal_processor::snapshot::PillarCursor;

const MAX_WAVE: u8 = 2;
/// A pillar's completion varbit reads at least this once done
const PILLAR_DONE: i32 = 2;

/// Range of pillar orders belonging to one wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveBand {
    pub first: u32,
    /// Inclusive upper bound, None when unbounded
    pub last: Option<u32>,
}

impl WaveBand {
    pub fn for_wave(difficulty: Difficulty, wave: u8) -> Self {
        match (difficulty.is_hardest(), wave) {
            (true, 2) => Self {
                first: 10,
                last: Some(18),
            },
            (true, _) => Self {
                first: 1,
                last: Some(9),
            },
            (false, _) => Self {
                first: 1,
                last: None,
            },
        }
    }

    pub fn contains(&self, order: u32) -> bool {
        order >= self.first && self.last.is_none_or(|last| order <= last)
    }
}

/// Cursor into the active pillar list for the current wave
#[derive(Debug, Clone, Default)]
pub struct PillarProgress {
    route: Vec<PillarDef>,
    cursor: Option<usize>,
    wave: u8,
    band: Option<WaveBand>,
}

impl PillarProgress {
    /// Start the next wave over `route`
    pub fn begin_wave(&mut self, route: Vec<PillarDef>, difficulty: Difficulty) {
        self.wave = if difficulty.is_hardest() {
            (self.wave + 1).min(MAX_WAVE)
        } else {
            1
        };
        let band = WaveBand::for_wave(difficulty, self.wave);
        self.cursor = route.iter().position(|p| band.contains(p.order));
        self.band = Some(band);
        self.route = route;
    }

    /// Advance past the current pillar once its varbit reports completion.
    /// Returns true when the cursor changed.
    pub fn observe(&mut self, varbit_id: i32, value: i32) -> bool {
        let Some(index) = self.cursor else {
            return false;
        };
        let Some(current) = self.route.get(index) else {
            return false;
        };
        if current.varbit_id != varbit_id || value < PILLAR_DONE {
            return false;
        }

        let next = index + 1;
        self.cursor = match (self.route.get(next), self.band) {
            (Some(p), Some(band)) if band.contains(p.order) => Some(next),
            _ => None,
        };
        true
    }

    pub fn current(&self) -> Option<&PillarDef> {
        self.route.get(self.cursor?)
    }

    pub fn wave(&self) -> u8 {
        self.wave
    }

    pub fn cursor(&self) -> Option<PillarCursor> {
        let index = self.cursor?;
        let def = self.route.get(index)?;
        Some(PillarCursor {
            index,
            order: def.order,
            pillar: def.pillar,
            varbit_id: def.varbit_id,
            wave: self.wave,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct JubblyJive {
    pillars: PillarProgress,
    boat_highlight: bool,
}

impl JubblyJive {
    pub fn pillars(&self) -> &PillarProgress {
        &self.pillars
    }

    pub fn boat_highlight(&self) -> bool {
        self.boat_highlight
    }

    fn start_wave(&mut self, ctx: &HandlerContext<'_>, signals: &mut Vec<TrialSignal>) {
        let Some(difficulty) = ctx.difficulty else {
            tracing::debug!("Lure cue without a known difficulty");
            return;
        };
        let variant = ctx.routes.variant(TrialKind::JubblyJive, difficulty);
        let route = ctx
            .catalog
            .lookup(TrialKind::JubblyJive, difficulty, variant)
            .pillars
            .clone();
        if route.is_empty() {
            tracing::debug!(%difficulty, "No pillar route loaded");
        }

        self.pillars.begin_wave(route, difficulty);
        tracing::debug!(wave = self.pillars.wave(), cursor = ?self.pillars.cursor(), "Pillar wave started");
        signals.push(TrialSignal::PillarCursorMoved {
            cursor: self.pillars.cursor(),
        });
    }
}

impl TrialHandler for JubblyJive {
    fn kind(&self) -> TrialKind {
        TrialKind::JubblyJive
    }

    fn on_run_started(&mut self, _ctx: &HandlerContext<'_>) {
        self.pillars.reset();
        self.boat_highlight = true;
    }

    fn on_announced(&mut self) {
        self.boat_highlight = true;
    }

    fn on_chat_line(
        &mut self,
        line: &str,
        progress: &mut RouteProgress,
        ctx: &HandlerContext<'_>,
        signals: &mut Vec<TrialSignal>,
    ) {
        if line.starts_with(chat::LURE_SUCCESS_PREFIX) {
            self.boat_highlight = true;
        }

        if line.ends_with(chat::LURE_SUFFIX) {
            self.start_wave(ctx, signals);
            self.boat_highlight = false;
            progress.advance();
            signals.push(route_advanced(self.kind(), progress));
        }
    }

    fn on_variable_changed(
        &mut self,
        varbit_id: i32,
        value: i32,
        progress: &mut RouteProgress,
        ctx: &HandlerContext<'_>,
        signals: &mut Vec<TrialSignal>,
    ) {
        if self.pillars.observe(varbit_id, value) {
            signals.push(TrialSignal::PillarCursorMoved {
                cursor: self.pillars.cursor(),
            });
        }

        // Toad supply counters tick up once per collection run
        let supply_counter = match ctx.difficulty {
            Some(Difficulty::Shark) => varbit_id == varbit::JUBBLY_SUPPLY_SHARK,
            Some(Difficulty::Marlin) => matches!(
                varbit_id,
                varbit::JUBBLY_SUPPLY_MARLIN_A | varbit::JUBBLY_SUPPLY_MARLIN_B
            ),
            _ => false,
        };
        if supply_counter {
            progress.advance();
            signals.push(route_advanced(self.kind(), progress));
        }
    }
}
