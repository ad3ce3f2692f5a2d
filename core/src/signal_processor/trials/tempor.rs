use barracuda_types::TrialKind;
use serde::Serialize;

use super::{HandlerContext, TrialHandler, route_advanced};
use crate::game_data::chat;
use crate::signal_processor::run_state::RouteProgress;
use crate::signal_processor::signal::TrialSignal;

/// Which rum boat is the next target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporBoat {
    /// Collection point
    South,
    /// Delivery point
    North,
}

#[derive(Debug, Clone, Default)]
pub struct TemporTantrum {
    /// None until a run is underway
    target: Option<TemporBoat>,
}

impl TemporTantrum {
    pub fn target(&self) -> Option<TemporBoat> {
        self.target
    }
}

impl TrialHandler for TemporTantrum {
    fn kind(&self) -> TrialKind {
        TrialKind::TemporTantrum
    }

    fn on_run_started(&mut self, _ctx: &HandlerContext<'_>) {
        self.target = Some(TemporBoat::South);
    }

    fn on_chat_line(
        &mut self,
        line: &str,
        progress: &mut RouteProgress,
        ctx: &HandlerContext<'_>,
        signals: &mut Vec<TrialSignal>,
    ) {
        // Boat targets only exist while a run is underway
        if !ctx.running {
            return;
        }
        let target = if line.starts_with(chat::RUM_COLLECT_PREFIX) {
            TemporBoat::North
        } else if line.starts_with(chat::RUM_DELIVER_PREFIX) {
            TemporBoat::South
        } else {
            return;
        };

        self.target = Some(target);
        progress.advance();
        signals.push(route_advanced(self.kind(), progress));
    }
}
