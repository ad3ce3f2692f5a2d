//! Snapshot and signal output

use std::io::Write;

use barracuda_core::guidance::{BoatHighlight, PillarTarget, SpeedBoostView, SupplyTarget};
use barracuda_core::{ProgressSnapshot, SignalHandler, TrialSession, TrialSignal, WorldReader};
use clap::ValueEnum;
use serde::Serialize;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Guidance as drawn after a tick
#[derive(Debug, Serialize)]
pub struct GuidanceView {
    pub route_points: usize,
    pub crystal_motes: usize,
    pub rapids: usize,
    pub supplies: Vec<SupplyTarget>,
    pub pillar: Option<u8>,
    pub pillar_spawned: bool,
    pub boat: Option<BoatHighlight>,
    pub speed_boost: Option<SpeedBoostView>,
}

impl GuidanceView {
    pub fn collect(session: &TrialSession, snapshot: &ProgressSnapshot, world: &dyn WorldReader) -> Self {
        let guidance = session.guidance(snapshot);
        let pillar: Option<PillarTarget> = guidance.pillar_target();
        Self {
            route_points: guidance.route_segment().len(),
            crystal_motes: guidance.crystal_motes().len(),
            rapids: guidance.rapids().len(),
            supplies: guidance.visible_supplies(world),
            pillar: pillar.map(|p| p.def.pillar),
            pillar_spawned: pillar.is_some_and(|p| p.object.is_some()),
            boat: guidance.boat_highlight(),
            speed_boost: guidance.speed_boost(),
        }
    }
}

#[derive(Serialize)]
struct TickRecord<'a> {
    tick: u64,
    snapshot: &'a ProgressSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    guidance: Option<&'a GuidanceView>,
}

pub fn format_snapshot(
    tick: u64,
    snapshot: &ProgressSnapshot,
    guidance: Option<&GuidanceView>,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string(&TickRecord {
            tick,
            snapshot,
            guidance,
        })
        .map_err(|e| e.to_string()),
        OutputFormat::Text => Ok(format_text(tick, snapshot, guidance)),
    }
}

fn format_text(tick: u64, snap: &ProgressSnapshot, guidance: Option<&GuidanceView>) -> String {
    let trial = snap.trial.map_or("-".to_string(), |t| t.to_string());
    let difficulty = snap.difficulty.map_or("-".to_string(), |d| d.to_string());
    let mut out = format!(
        "[{tick:>5}] {state:<7} {trial} ({difficulty}) order={} stage={}/{} completed={}",
        snap.route_order,
        snap.stage,
        snap.total_stages,
        snap.trials_completed,
        state = if snap.running { "running" } else { "idle" },
    );

    if snap.box_latch_armed {
        out.push_str(" latch=armed");
    }
    if let Some(cursor) = snap.pillar {
        out.push_str(&format!(" pillar={}@{} wave={}", cursor.pillar, cursor.order, cursor.wave));
    }
    if snap.jubbly_boat_highlight {
        out.push_str(" boat=jubbly");
    }
    if snap.tempor_south_highlight {
        out.push_str(" boat=collect");
    }
    if snap.tempor_north_highlight {
        out.push_str(" boat=deliver");
    }
    if snap.speed_boost.remaining > 0 {
        out.push_str(&format!(" boost={}/{}", snap.speed_boost.remaining, snap.speed_boost.max));
    }

    if let Some(g) = guidance {
        out.push_str(&format!(
            "\n        route={} motes={} rapids={} supplies={}",
            g.route_points,
            g.crystal_motes,
            g.rapids,
            g.supplies.len()
        ));
        if let Some(boat) = g.boat {
            out.push_str(&format!(" highlight={}@{}", boat.label.text(), boat.object.position));
        }
    }
    out
}

/// Prints each tracker signal as it arrives
pub struct SignalPrinter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> SignalPrinter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SignalHandler for SignalPrinter<W> {
    fn handle_signal(&mut self, signal: &TrialSignal) {
        let line = match self.format {
            OutputFormat::Json => match serde_json::to_string(signal) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to serialize signal");
                    return;
                }
            },
            OutputFormat::Text => format!("  > {signal:?}"),
        };
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "Failed to write signal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barracuda_types::TrialKind;

    #[test]
    fn test_signal_printer_json() {
        let mut printer = SignalPrinter::new(Vec::new(), OutputFormat::Json);
        printer.handle_signal(&TrialSignal::TrialIdentified {
            trial: TrialKind::JubblyJive,
        });
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out.trim(), r#"{"signal":"trial_identified","trial":"jubbly_jive"}"#);
    }
}
