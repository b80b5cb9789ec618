//! Pose Playback - Main Entry Point
//!
//! Reads a checkpoint log, assembles the pose series of one entity and
//! plays it back in a viewer window or on the console.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use crossbeam_channel::Sender;
use pose_playback::{
    config::PlaybackConfig,
    pipeline::{assemble_file, discover_entities, Assembly, AssemblyReport, OrderingPolicy},
    session::{ConsoleRenderer, PlaybackCommand, PlaybackController, PlaybackRunner},
    CheckpointLogReader,
};
use std::fs::File;
use std::io::{BufRead, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pose-playback")]
#[command(about = "Play back agent poses recorded in a checkpoint log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Trace every matched record
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the pose series and play it back
    Play {
        #[command(flatten)]
        source: SourceArgs,

        /// Milliseconds between frames
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Print frames to stdout instead of opening a window
        #[arg(long)]
        headless: bool,

        /// Keep waiting for commands after the last frame (headless only)
        #[arg(long)]
        keep_open: bool,
    },
    /// List the entities that have pose records in the log
    Entities {
        /// Checkpoint log (JSON lines)
        log: Option<PathBuf>,

        /// Key suffix of pose records (repeatable)
        #[arg(long = "suffix")]
        suffixes: Vec<String>,
    },
    /// Write the assembled series, summary and diagnostics as JSON
    Dump {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Checkpoint log (JSON lines)
    log: Option<PathBuf>,

    /// Key prefix of the tracked entity
    #[arg(long)]
    prefix: Option<String>,

    /// Key suffix of pose records (repeatable)
    #[arg(long = "suffix")]
    suffixes: Vec<String>,

    /// Abort when a time of interest goes backwards
    #[arg(long)]
    strict: bool,

    /// Exit with an error when any diagnostic was collected
    #[arg(long)]
    fail_on_diagnostics: bool,
}

impl SourceArgs {
    fn apply(self, config: &mut PlaybackConfig) {
        if let Some(log) = self.log {
            config.log_path = Some(log);
        }
        if let Some(prefix) = self.prefix {
            config.key_prefix = prefix;
        }
        if !self.suffixes.is_empty() {
            config.key_suffixes = self.suffixes;
        }
        if self.strict {
            config.ordering = OrderingPolicy::Strict;
        }
        if self.fail_on_diagnostics {
            config.fail_on_diagnostics = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "info,pose_playback=trace"
    } else {
        "info,pose_playback=debug"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = PlaybackConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Play {
            source,
            interval_ms,
            headless,
            keep_open,
        } => {
            source.apply(&mut config);
            if let Some(ms) = interval_ms {
                config.tick_interval_ms = ms;
            }
            if keep_open {
                config.exit_when_exhausted = false;
            }
            config.validate()?;
            play(&config, headless)
        }
        Commands::Entities { log, suffixes } => {
            if let Some(log) = log {
                config.log_path = Some(log);
            }
            if !suffixes.is_empty() {
                config.key_suffixes = suffixes;
            }
            config.validate()?;
            list_entities(&config)
        }
        Commands::Dump { source, output } => {
            source.apply(&mut config);
            config.validate()?;
            dump(&config, output)
        }
    }
}

fn load_assembly(config: &PlaybackConfig) -> anyhow::Result<Assembly> {
    let path = config.require_log_path()?;
    tracing::info!(
        "Reading {:?} (prefix {:?}, suffixes {:?})",
        path,
        config.key_prefix,
        config.key_suffixes
    );

    let assembly = assemble_file(path, &config.key_filter(), config.ordering)
        .with_context(|| format!("Failed to assemble pose series from {:?}", path))?;

    let summary = assembly.summary();
    if let (Some(first), Some(last)) = (summary.first_toi, summary.last_toi) {
        tracing::info!("{} samples, TOI {}..={}", summary.samples, first, last);
    }
    for diagnostic in &assembly.diagnostics {
        tracing::warn!("{}", diagnostic);
    }

    Ok(assembly)
}

fn check_diagnostics(config: &PlaybackConfig, assembly: &Assembly) -> anyhow::Result<()> {
    if config.fail_on_diagnostics && assembly.has_diagnostics() {
        bail!(
            "{} diagnostics collected while assembling the pose series",
            assembly.diagnostics.len()
        );
    }
    Ok(())
}

fn play(config: &PlaybackConfig, headless: bool) -> anyhow::Result<()> {
    let assembly = load_assembly(config)?;
    check_diagnostics(config, &assembly)?;

    if assembly.series.is_empty() {
        tracing::warn!("No pose samples matched {:?}", config.key_prefix);
    }

    #[cfg(feature = "viewer")]
    {
        if !headless {
            let summary = assembly.summary();
            let diagnostics = assembly.diagnostics.len();
            let controller = PlaybackController::new(assembly.series);
            pose_playback::frontend::run_viewer(
                controller,
                summary,
                config.key_prefix.clone(),
                diagnostics,
                config.tick_interval(),
            )?;
            return Ok(());
        }
    }

    #[cfg(not(feature = "viewer"))]
    {
        if !headless {
            tracing::warn!("Built without the viewer feature, playing on the console");
        }
    }

    run_headless(config, assembly)
}

fn run_headless(config: &PlaybackConfig, assembly: Assembly) -> anyhow::Result<()> {
    let (command_tx, command_rx) = crossbeam_channel::unbounded();
    spawn_command_reader(command_tx);

    let mut controller = PlaybackController::new(assembly.series);
    let mut renderer = ConsoleRenderer::new(std::io::stdout());
    let outcome = PlaybackRunner::new(config.tick_interval())
        .with_exit_when_exhausted(config.exit_when_exhausted)
        .run(&mut controller, &mut renderer, &command_rx);

    tracing::info!(
        "Playback ended ({:?}) after {} frames",
        outcome,
        renderer.frames_written()
    );
    Ok(())
}

/// Forward console input as playback commands: `q` quits, any other line
/// (including an empty one) toggles pause
fn spawn_command_reader(commands: Sender<PlaybackCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = match line.trim() {
                "q" | "quit" => PlaybackCommand::Quit,
                _ => PlaybackCommand::TogglePause,
            };
            if commands.send(command).is_err() {
                break;
            }
        }
    });
}

fn list_entities(config: &PlaybackConfig) -> anyhow::Result<()> {
    let path = config.require_log_path()?;
    let reader = CheckpointLogReader::open(path)?;
    let entities = discover_entities(reader, &config.key_suffixes);

    if entities.is_empty() {
        tracing::warn!("No keys in {:?} contain {:?}", path, config.key_suffixes);
    }
    for entity in entities {
        println!("{}", entity);
    }
    Ok(())
}

fn dump(config: &PlaybackConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let assembly = load_assembly(config)?;
    let filter = config.key_filter();
    let report = AssemblyReport::new(&assembly, &filter, config.log_path.as_deref());

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {:?}", path))?;
            report.write_json(BufWriter::new(file))?;
            tracing::info!("Wrote {} samples to {:?}", assembly.series.len(), path);
        }
        None => report.write_json(std::io::stdout().lock())?,
    }

    check_diagnostics(config, &assembly)
}
