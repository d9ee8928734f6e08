use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::{
    Command, CommandJournal, CommandOutcome, DEFAULT_LEVEL, Direction, Game, SimConfig,
    WeaponKind,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    commands: u32,
    /// Level file to play instead of the built-in one
    #[arg(short, long)]
    map: Option<PathBuf>,
    /// Write the issued commands as a replayable journal
    #[arg(short, long)]
    record: Option<PathBuf>,
    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn random_command(rng: &mut ChaCha8Rng) -> Command {
    // Mostly moves, with the occasional weapon swap.
    match rng.gen_range(0..10) {
        0 => Command::SwitchWeapon(WeaponKind::Silver),
        1 => Command::SwitchWeapon(WeaponKind::Steel),
        _ => Command::Move(Direction::ALL[rng.gen_range(0..Direction::ALL.len())]),
    }
}

fn check_invariants(game: &Game) -> Result<()> {
    let mut occupied = BTreeSet::new();
    for enemy in game.enemies() {
        if !occupied.insert(enemy.pos) {
            bail!("Invariant failed: two enemies on {:?}", enemy.pos);
        }
        if !game.board().is_walkable(enemy.pos) {
            bail!("Invariant failed: enemy inside wall at {:?}", enemy.pos);
        }
        if enemy.hp > enemy.max_hp {
            bail!("Invariant failed: enemy HP above max");
        }
    }
    if occupied.contains(&game.player().pos) {
        bail!("Invariant failed: enemy standing on the player");
    }
    if game.enemies().count() > game.config().max_active_enemies {
        bail!("Invariant failed: more enemies than the cap");
    }
    if game.collected_rewards() > game.required_rewards() {
        bail!("Invariant failed: collected more rewards than were placed");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .init();

    let args = Args::parse();

    let map = match &args.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read map: {}", path.display()))?,
        None => DEFAULT_LEVEL.to_string(),
    };

    println!("Starting fuzz harness on seed {} for max {} commands...", args.seed, args.commands);
    let mut game = Game::from_map_str(SimConfig::default(), &map, args.seed)
        .context("Failed to build game from map")?;
    game.initialize();
    game.start();
    let mut journal = CommandJournal::new(args.seed, map);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for issued in 0..args.commands {
        if game.is_game_over() {
            println!("Finished with {:?} after {} commands", game.game_state(), issued);
            break;
        }
        let command = random_command(&mut rng);
        journal.record(command);
        if game.apply_command(command) == CommandOutcome::Quit {
            break;
        }
        check_invariants(&game)?;
    }

    println!(
        "Fuzzing completed: tick {}, score {}, hash {}",
        game.current_tick(),
        game.score(),
        game.snapshot_hash()
    );

    if let Some(path) = &args.record {
        journal
            .save(path)
            .with_context(|| format!("Failed to write journal: {}", path.display()))?;
        println!("Journal written to {}", path.display());
    }
    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }
    Ok(())
}
