//! Context construction, run reset, and occupant placement.
//! This module isolates setup from the per-tick flow; nothing here advances time.

use std::iter::repeat_n;

use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;
use tracing::{debug, info, warn};

use super::*;
use crate::board::{MapLoadError, parse_map};
use crate::state::{Reward, Trap};

const PLAYER_NAME: &str = "Gerald";

impl Game {
    /// Builds an empty, not-yet-started context on `board`. Call [`Game::initialize`] to
    /// populate it.
    pub fn new(config: SimConfig, board: Board, seed: u64) -> Self {
        let player = Player::new(PLAYER_NAME, board.start(), &config);
        let state = World {
            board,
            player,
            enemies: SlotMap::with_key(),
            rewards: SlotMap::with_key(),
            traps: SlotMap::with_key(),
        };
        Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            state,
            game_state: GameState::NotStarted,
            score: 0,
            rewards_collected: 0,
            required_rewards: 0,
            active_bonuses: Vec::new(),
            spawner: SpawnManager::default(),
            observers: Vec::new(),
        }
    }

    pub fn from_map_str(config: SimConfig, map: &str, seed: u64) -> Result<Self, MapLoadError> {
        let board = parse_map(map)?;
        Ok(Self::new(config, board, seed))
    }

    /// Resets to a fresh playable run on the same board.
    ///
    /// Counters, score, spawn timer and state are zeroed, the player returns to the start
    /// cell at full health with the weapon it was holding, and enemies, rewards and traps
    /// are scattered over random empty cells. The random stream is not reseeded, so
    /// consecutive runs in one context differ.
    pub fn initialize(&mut self) {
        self.clear_population();
        self.tick = 0;
        self.score = 0;
        self.rewards_collected = 0;
        self.required_rewards = 0;
        self.spawner.reset();
        self.game_state = GameState::NotStarted;

        let start = self.state.board.start();
        self.state.player.pos = start;
        self.state.player.set_hp(self.config.player_start_hp);

        self.populate();

        info!(
            seed = self.seed,
            enemies = self.state.enemies.len(),
            rewards = self.required_rewards,
            bonuses = self.active_bonuses.len(),
            traps = self.state.traps.len(),
            "run initialized"
        );
        self.notify_update();
    }

    fn populate(&mut self) {
        let config = self.config.clone();
        let enemy_kinds = repeat_n(EnemyKind::Monster, config.initial_monsters)
            .chain(repeat_n(EnemyKind::Human, config.initial_humans));
        for kind in enemy_kinds {
            if let Some(pos) = self.random_empty_cell(config.empty_cell_attempts) {
                self.spawn_enemy_at(kind, pos);
            } else {
                warn!(enemy = kind.label(), "no empty cell for initial enemy");
            }
        }

        for _ in 0..config.regular_rewards {
            if let Some(pos) = self.random_empty_cell(config.empty_cell_attempts) {
                self.place_reward(Reward::regular(pos, config.score_collect));
            } else {
                warn!("no empty cell for reward");
            }
        }

        for _ in 0..config.bonus_rewards {
            if let Some(pos) = self.random_empty_cell(config.empty_cell_attempts) {
                self.place_reward(Reward::bonus(
                    pos,
                    config.bonus_score,
                    config.bonus_duration_ticks,
                ));
            } else {
                warn!("no empty cell for bonus reward");
            }
        }

        for _ in 0..config.traps {
            if let Some(pos) = self.random_empty_cell(config.empty_cell_attempts) {
                self.place_trap(Trap::new(pos, config.trap_penalty, config.trap_cooldown_ticks));
            } else {
                warn!("no empty cell for trap");
            }
        }
    }

    /// Random placeable cell that the player is not standing on.
    pub(super) fn random_empty_cell(&mut self, attempts: u32) -> Option<Pos> {
        let player = self.state.player.pos;
        self.state.board.random_empty_cell(&mut self.rng, attempts, &[player])
    }

    /// Removes every enemy, reward and trap from the board and the registries.
    pub fn clear_population(&mut self) {
        self.state.board.clear_occupants();
        self.state.enemies.clear();
        self.state.rewards.clear();
        self.state.traps.clear();
        self.active_bonuses.clear();
    }

    /// Places an enemy on a walkable cell that holds no other enemy and is not the player's.
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, pos: Pos) -> Option<EnemyId> {
        if pos == self.state.player.pos {
            return None;
        }
        let cell = self.state.board.cell_at(pos)?;
        if !cell.is_walkable() || cell.enemy().is_some() {
            return None;
        }
        let id = self.state.enemies.insert(Enemy::spawn(kind, pos, &self.config));
        self.state.enemies[id].id = id;
        if let Some(cell) = self.state.board.cell_at_mut(pos) {
            cell.enemy = Some(id);
        }
        debug!(enemy = kind.label(), x = pos.x, y = pos.y, "enemy spawned");
        Some(id)
    }

    /// Takes an enemy off its cell and out of the registry.
    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        let enemy = self.state.enemies.remove(id)?;
        if let Some(cell) = self.state.board.cell_at_mut(enemy.pos)
            && cell.enemy == Some(id)
        {
            cell.enemy = None;
        }
        Some(enemy)
    }

    /// Regular rewards raise the required count; bonuses join the countdown list.
    pub fn place_reward(&mut self, reward: Reward) -> Option<RewardId> {
        let pos = reward.pos;
        let cell = self.state.board.cell_at(pos)?;
        if !cell.is_walkable() || cell.reward().is_some() {
            return None;
        }
        let bonus = reward.is_bonus();
        let id = self.state.rewards.insert(reward);
        self.state.rewards[id].id = id;
        if let Some(cell) = self.state.board.cell_at_mut(pos) {
            cell.reward = Some(id);
        }
        if bonus {
            self.active_bonuses.push(id);
        } else {
            self.required_rewards += 1;
        }
        Some(id)
    }

    pub fn place_trap(&mut self, trap: Trap) -> Option<TrapId> {
        let pos = trap.pos;
        let cell = self.state.board.cell_at(pos)?;
        if !cell.is_walkable() || cell.trap().is_some() {
            return None;
        }
        let id = self.state.traps.insert(trap);
        self.state.traps[id].id = id;
        if let Some(cell) = self.state.board.cell_at_mut(pos) {
            cell.trap = Some(id);
        }
        Some(id)
    }

    /// Teleports the player without any cell interaction. Refused for walls, cells outside
    /// the board, and cells held by an enemy.
    pub fn set_player_position(&mut self, pos: Pos) -> bool {
        let open = self
            .state
            .board
            .cell_at(pos)
            .is_some_and(|cell| cell.is_walkable() && cell.enemy().is_none());
        if open {
            self.state.player.pos = pos;
        }
        open
    }

    pub fn set_player_hp(&mut self, hp: i32) {
        self.state.player.set_hp(hp);
    }
}
