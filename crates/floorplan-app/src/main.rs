//! Headless editor entry point.
//!
//! Replays a gesture script against a fresh session and prints the final
//! frame, or lists the key bindings with `--keys`.

use clap::Parser;
use floorplan_app::{AsciiRenderer, Replay, Script, ScriptError, ShortcutRegistry};
use floorplan_core::NotificationLevel;
use floorplan_core::storage::FileCache;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "floorplan",
    about = "Replay floor-plan editing scripts and print the resulting plan",
    version
)]
struct Options {
    /// Gesture script to replay.
    #[arg(required_unless_present = "keys")]
    script: Option<PathBuf>,

    /// Write the final design JSON here.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for the working-copy cache.
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Shade the frame with the design's heatmap.
    #[arg(long)]
    heatmap: bool,

    /// Print key bindings and exit.
    #[arg(long)]
    keys: bool,
}

fn run(options: Options) -> Result<(), ScriptError> {
    if options.keys {
        println!("{}", ShortcutRegistry::help());
        return Ok(());
    }
    // clap guarantees a script unless --keys was given
    let Some(path) = options.script else {
        return Ok(());
    };

    let script = Script::load(&path)?;
    log::info!("Replaying {} steps from {}", script.steps.len(), path.display());

    let renderer = AsciiRenderer::new().with_heatmap(options.heatmap);
    let mut replay = Replay::new(script.config.clone(), renderer).strict(script.strict);
    if let Some(dir) = options.cache {
        replay = replay.with_cache(Box::new(FileCache::new(dir)?));
    }
    replay.run(&script.steps)?;
    let report = replay.into_report();

    println!("{}", report.frame);
    for notification in &report.notifications {
        let tag = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
        };
        println!("[{}] {}", tag, notification.message);
    }

    if let Some(out) = options.out {
        let json = report.document.to_json()?;
        std::fs::write(&out, json)?;
        log::info!("Wrote design to {}", out.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Options::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
