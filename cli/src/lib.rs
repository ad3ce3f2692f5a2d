pub mod render;
pub mod script;

use std::io::Write;

use barracuda_core::{SignalHandler, TrialEvent, TrialSession};

use render::{GuidanceView, OutputFormat, SignalPrinter, format_snapshot};
use script::{Command, ScriptedWorld};

/// Output options for a replay
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    pub format: OutputFormat,
    pub show_signals: bool,
    pub show_guidance: bool,
}

/// Feed `commands` through `session`, writing a snapshot after every tick.
/// Returns the number of ticks delivered.
pub fn replay<W: Write>(
    session: &mut TrialSession,
    commands: &[Command],
    options: ReplayOptions,
    out: &mut W,
) -> Result<u64, String> {
    let mut world = ScriptedWorld::new();
    let mut ticks = 0u64;

    for command in commands {
        for event in world.apply(command) {
            if options.show_signals {
                let mut printer = SignalPrinter::new(&mut *out, options.format);
                let mut handlers: [&mut dyn SignalHandler; 1] = [&mut printer];
                session.dispatch(&event, &world, &mut handlers);
            } else {
                session.handle(&event, &world);
            }

            if matches!(event, TrialEvent::Tick) {
                ticks += 1;
                let snapshot = session.snapshot();
                let guidance = options
                    .show_guidance
                    .then(|| GuidanceView::collect(session, &snapshot, &world));
                let line = format_snapshot(ticks, &snapshot, guidance.as_ref(), options.format)?;
                writeln!(out, "{line}").map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(ticks)
}
