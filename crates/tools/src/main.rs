use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{CommandJournal, ReplayResult, SimConfig, replay_to_end};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Replays a recorded command journal and reports how the run ended.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,

    /// Optional TOML file overriding simulation constants
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SimConfig::default(),
    };
    let journal = CommandJournal::load(&args.journal)
        .with_context(|| format!("Failed to load journal: {}", args.journal.display()))?;

    let result: ReplayResult =
        replay_to_end(&config, &journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Commands Applied: {}", result.commands_applied);
    println!("Quit Early: {}", result.quit);
    println!("Final Tick: {}", result.final_tick);
    println!("Outcome: {:?}", result.final_state);
    println!("Score: {}", result.final_score);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
