use thiserror::Error;
use tracing::info;

use crate::board::MapLoadError;
use crate::config::SimConfig;
use crate::game::Game;
use crate::journal::CommandJournal;
use crate::types::{CommandOutcome, GameState};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Journal map is invalid: {0}")]
    Map(#[from] MapLoadError),

    #[error("Unexpected command sequence number {found}, expected {expected}")]
    UnknownCommandSeq { expected: u64, found: u64 },

    #[error("Command {seq} arrives after the run already ended")]
    GameAlreadyOver { seq: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_state: GameState,
    pub final_score: i64,
    pub final_tick: u64,
    pub final_snapshot_hash: u64,
    pub commands_applied: usize,
    pub quit: bool,
}

/// Rebuilds the journal's run from its map and seed and feeds every command through the
/// synchronous driver. Stops early on `Quit`; a command recorded after the run ended is an
/// error because a faithful recording can never contain one.
pub fn replay_to_end(
    config: &SimConfig,
    journal: &CommandJournal,
) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::from_map_str(config.clone(), &journal.map, journal.seed)?;
    game.initialize();
    game.start();

    let mut commands_applied = 0;
    let mut quit = false;
    for (expected, record) in (0_u64..).zip(&journal.commands) {
        if record.seq != expected {
            return Err(ReplayError::UnknownCommandSeq { expected, found: record.seq });
        }
        match game.apply_command(record.command) {
            CommandOutcome::Applied { .. } => commands_applied += 1,
            CommandOutcome::Quit => {
                quit = true;
                break;
            }
            CommandOutcome::Ignored => {
                return Err(ReplayError::GameAlreadyOver { seq: record.seq });
            }
        }
    }

    let result = ReplayResult {
        final_state: game.game_state(),
        final_score: game.score(),
        final_tick: game.current_tick(),
        final_snapshot_hash: game.snapshot_hash(),
        commands_applied,
        quit,
    };
    info!(
        state = ?result.final_state,
        score = result.final_score,
        tick = result.final_tick,
        commands = result.commands_applied,
        "replay finished"
    );
    Ok(result)
}
