//! Per-enemy finite-state controller.
//! The state is recomputed from scratch every decision; nothing carries over between ticks.

use rand::Rng;

use super::pathfinding::find_next_move;
use crate::board::Board;
use crate::config::SimConfig;
use crate::state::{Enemy, Player};
use crate::types::*;

pub fn next_ai_state(enemy_pos: Pos, player: Option<&Player>, config: &SimConfig) -> AiState {
    let Some(player) = player.filter(|p| p.is_alive()) else {
        return AiState::Patrol;
    };
    let distance = enemy_pos.manhattan(player.pos);
    if distance <= config.attack_range {
        AiState::Attack
    } else if distance <= config.chase_range {
        AiState::Chase
    } else {
        AiState::Patrol
    }
}

/// Picks the enemy's state and what it wants to do with it. Damage is applied by the caller.
pub fn decide_intent<R: Rng>(
    board: &Board,
    enemy: &Enemy,
    player: Option<&Player>,
    config: &SimConfig,
    rng: &mut R,
) -> (AiState, Intent) {
    let state = next_ai_state(enemy.pos, player, config);
    let intent = match (state, player) {
        (AiState::Attack, _) => Intent::Attack,
        (AiState::Chase, Some(player)) => {
            find_next_move(board, enemy.pos, player.pos, config.pathfinding)
                .map_or(Intent::Stay, Intent::Move)
        }
        (AiState::Patrol, _) => patrol_step(board, enemy.pos, config.patrol_attempts, rng),
        _ => Intent::Stay,
    };
    (state, intent)
}

fn patrol_step<R: Rng>(board: &Board, from: Pos, attempts: u32, rng: &mut R) -> Intent {
    for _ in 0..attempts {
        let dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let next = from.step(dir);
        if board.is_walkable(next) && board.enemy_at(next).is_none() {
            return Intent::Move(dir);
        }
    }
    Intent::Stay
}
