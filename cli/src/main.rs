use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use barracuda_core::TrialSession;
use barracuda_core::config::{load_config, resolve_data_dir};
use barracuda_replay::render::OutputFormat;
use barracuda_replay::script::parse_script;
use barracuda_replay::{ReplayOptions, replay};
use barracuda_types::TrialsConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Replay a scripted event log through the trials tracker")]
struct Cli {
    /// Script file, or `-` for stdin
    script: PathBuf,

    /// Config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route catalog root, overrides the config
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print tracker signals as they are emitted
    #[arg(long)]
    signals: bool,

    /// Include guidance queries in each snapshot
    #[arg(long)]
    guidance: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If BARRACUDA_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("BARRACUDA_LOG_PATH")
        && let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Fallback to stderr so stdout stays clean for snapshots
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn read_script(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        return Ok(source);
    }
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => load_config(Some(path)).map_err(|e| e.to_string())?,
        None => TrialsConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let data_dir = resolve_data_dir(&config);
    let mut session =
        TrialSession::load(&data_dir, config.routes).map_err(|e| e.to_string())?;

    let commands = parse_script(&read_script(&cli.script)?)?;
    tracing::info!(commands = commands.len(), "Replaying script");

    let options = ReplayOptions {
        format: cli.format,
        show_signals: cli.signals,
        show_guidance: cli.guidance,
    };
    let mut stdout = io::stdout().lock();
    let ticks = replay(&mut session, &commands, options, &mut stdout)?;
    stdout.flush().map_err(|e| e.to_string())?;

    tracing::info!(ticks, "Replay finished");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Replay failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
