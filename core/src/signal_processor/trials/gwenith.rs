use barracuda_types::TrialKind;

use super::{HandlerContext, TrialHandler, route_advanced};
use crate::game_data::{chat, varbit};
use crate::signal_processor::run_state::RouteProgress;
use crate::signal_processor::signal::TrialSignal;

/// Stage whose imbue arms the lost-supply box latch
const LATCH_STAGE: u32 = 7;
const FINAL_STAGE: u32 = 8;

/// One-shot advance on the lost-supply trigger falling from 1 to 0.
///
/// Armed by the stage-7 imbue; fires at most once until armed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxLatch {
    armed: bool,
    fired: bool,
    last_value: i32,
}

impl BoxLatch {
    pub fn arm(&mut self, current: i32) {
        self.armed = true;
        self.fired = false;
        self.last_value = current;
    }

    /// Feed a new trigger reading; returns true when the latch fires
    pub fn observe(&mut self, value: i32) -> bool {
        let fire = self.armed && !self.fired && self.last_value == 1 && value == 0;
        if fire {
            self.fired = true;
        }
        self.last_value = value;
        fire
    }

    pub fn is_armed(&self) -> bool {
        self.armed && !self.fired
    }

    pub fn last_value(&self) -> i32 {
        self.last_value
    }
}

#[derive(Debug, Clone, Default)]
pub struct GwenithGlide {
    latch: BoxLatch,
}

impl GwenithGlide {
    pub fn latch(&self) -> &BoxLatch {
        &self.latch
    }
}

impl TrialHandler for GwenithGlide {
    fn kind(&self) -> TrialKind {
        TrialKind::GwenithGlide
    }

    fn on_run_started(&mut self, ctx: &HandlerContext<'_>) {
        self.latch = BoxLatch {
            last_value: ctx.world.varbit(varbit::LOST_SUPPLY_TRIGGER),
            ..BoxLatch::default()
        };
    }

    fn on_chat_line(
        &mut self,
        line: &str,
        progress: &mut RouteProgress,
        ctx: &HandlerContext<'_>,
        signals: &mut Vec<TrialSignal>,
    ) {
        let Some(stage) = chat::parse_imbue_stage(line) else {
            return;
        };
        if !(1..=FINAL_STAGE).contains(&stage) || stage <= progress.stage {
            tracing::debug!(stage, current = progress.stage, "Ignoring out-of-sequence imbue");
            return;
        }

        progress.stage = stage;
        // The final imbue closes the course without a new route segment
        if stage == FINAL_STAGE {
            return;
        }
        progress.advance_order();
        signals.push(route_advanced(self.kind(), progress));

        if stage == LATCH_STAGE {
            let current = ctx.world.varbit(varbit::LOST_SUPPLY_TRIGGER);
            self.latch.arm(current);
            tracing::debug!(trigger = current, "Box latch armed");
            signals.push(TrialSignal::BoxLatchArmed {
                trigger_value: current,
            });
        }
    }

    fn on_variable_changed(
        &mut self,
        varbit_id: i32,
        value: i32,
        progress: &mut RouteProgress,
        _ctx: &HandlerContext<'_>,
        signals: &mut Vec<TrialSignal>,
    ) {
        if varbit_id != varbit::LOST_SUPPLY_TRIGGER {
            return;
        }
        if self.latch.observe(value) {
            progress.advance_order();
            signals.push(route_advanced(self.kind(), progress));
        }
    }
}
