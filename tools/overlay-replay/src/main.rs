//! Overlay Replay
//!
//! Replays a JSON gesture script through a bubble overlay window backed by a
//! logging platform, then prints the emitted intents and the final placement
//! as JSON. Set `RUST_LOG=info` to see every platform call.

mod replay;
mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use script::{load_config, Script};

#[derive(Debug, Parser)]
#[command(name = "overlay-replay")]
#[command(about = "Replay pointer gestures through a timer bubble overlay")]
struct Cli {
    /// Gesture script (JSON)
    script: PathBuf,
    /// Overlay config overrides (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let script = Script::load(&cli.script)?;
    info!("replaying {} events from {}", script.events.len(), cli.script.display());

    let report = replay::run(&script, config)?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
