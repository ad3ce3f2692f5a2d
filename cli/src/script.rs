//! Replay script parsing and the scripted world
//!
//! One command per line, shell-quoted. `#` starts a comment line.
//!
//! ```text
//! view 1
//! spawn 59000 3300 3300 0 --view 1
//! chat "You prepare to begin the Tempor Tantrum..."
//! varp 4987 1200
//! varbit 18410 2
//! tick
//! ```

use barracuda_core::game_data::WorldPoint;
use barracuda_core::{ChatKind, SceneObject, TrialEvent, WorldReader};
use clap::{Parser, Subcommand, ValueEnum};
use hashbrown::HashMap;

#[derive(Parser, Debug)]
#[command(about = "replay script line")]
struct ScriptLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Deliver one or more ticks
    Tick {
        #[arg(default_value_t = 1)]
        count: u32,
    },
    /// Set a varp (read on tick, no notification)
    Varp { id: i32, value: i32 },
    /// Set a varbit and deliver a change notification
    Varbit { id: i32, value: i32 },
    /// Set a varbit silently
    Var { id: i32, value: i32 },
    /// Deliver a chat line
    Chat {
        text: String,
        #[arg(long, value_enum, default_value_t = Channel::Game)]
        channel: Channel,
    },
    Spawn {
        object_id: i32,
        x: i32,
        y: i32,
        #[arg(default_value_t = 0)]
        plane: i32,
        #[arg(long, default_value_t = 0)]
        view: i32,
    },
    Despawn {
        object_id: i32,
        x: i32,
        y: i32,
        #[arg(default_value_t = 0)]
        plane: i32,
        #[arg(long, default_value_t = 0)]
        view: i32,
    },
    /// Unload a world view
    Unload {
        #[arg(long)]
        top_level: bool,
    },
    /// Set the local player's world view; omit the id to log out
    View { id: Option<i32> },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Game,
    Other,
}

/// Parse one script line. Blank lines and comments yield None.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "replay".to_string());
    let parsed = ScriptLine::try_parse_from(args).map_err(|e| e.to_string())?;
    Ok(Some(parsed.command))
}

/// Parse a whole script, reporting the first bad line
pub fn parse_script(source: &str) -> Result<Vec<Command>, String> {
    let mut commands = Vec::new();
    for (n, line) in source.lines().enumerate() {
        if let Some(cmd) = parse_line(line).map_err(|e| format!("line {}: {e}", n + 1))? {
            commands.push(cmd);
        }
    }
    Ok(commands)
}

/// In-memory game variables driven by the script
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    varps: HashMap<i32, i32>,
    varbits: HashMap<i32, i32>,
    view: Option<i32>,
}

impl ScriptedWorld {
    pub fn new() -> Self {
        Self {
            view: Some(0),
            ..Self::default()
        }
    }

    /// Apply a command to the world and return the events it delivers
    pub fn apply(&mut self, command: &Command) -> Vec<TrialEvent> {
        match command {
            Command::Tick { count } => (0..*count).map(|_| TrialEvent::Tick).collect(),
            Command::Varp { id, value } => {
                self.varps.insert(*id, *value);
                Vec::new()
            }
            Command::Varbit { id, value } => {
                self.varbits.insert(*id, *value);
                vec![TrialEvent::VariableChanged {
                    varbit_id: *id,
                    value: *value,
                }]
            }
            Command::Var { id, value } => {
                self.varbits.insert(*id, *value);
                Vec::new()
            }
            Command::Chat { text, channel } => {
                let kind = match channel {
                    Channel::Game => ChatKind::Game,
                    Channel::Other => ChatKind::Other,
                };
                vec![TrialEvent::ChatLine {
                    kind,
                    text: text.clone(),
                }]
            }
            Command::Spawn {
                object_id,
                x,
                y,
                plane,
                view,
            } => vec![TrialEvent::ObjectSpawned(SceneObject::new(
                *object_id,
                WorldPoint::new(*x, *y, *plane),
                *view,
            ))],
            Command::Despawn {
                object_id,
                x,
                y,
                plane,
                view,
            } => vec![TrialEvent::ObjectDespawned(SceneObject::new(
                *object_id,
                WorldPoint::new(*x, *y, *plane),
                *view,
            ))],
            Command::Unload { top_level } => vec![TrialEvent::WorldViewUnloaded {
                top_level: *top_level,
            }],
            Command::View { id } => {
                self.view = *id;
                Vec::new()
            }
        }
    }
}

impl WorldReader for ScriptedWorld {
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
