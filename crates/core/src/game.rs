//! Simulation context: owns the world, runs ticks, and applies player commands.
//! Decision logic lives in the focused submodules; this file holds the shared state and accessors.

use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::board::Board;
use crate::config::SimConfig;
use crate::state::{Enemy, Player, World};
use crate::types::*;

mod ai;
mod bootstrap;
mod combat;
mod engine;
mod lifecycle;
mod observer;
pub mod pathfinding;

#[cfg(test)]
mod test_support;

pub use ai::{decide_intent, next_ai_state};
pub use combat::{AttackOutcome, player_attack_damage, weapon_damage};
pub use lifecycle::SpawnManager;
pub use observer::{
    EnemyView, EventRecorder, GameObserver, ObserverEvent, PlayerView, RewardView, Snapshot,
    TrapView,
};

pub struct Game {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    config: SimConfig,
    state: World,
    game_state: GameState,
    score: i64,
    rewards_collected: usize,
    required_rewards: usize,
    // Bonus rewards still on the board and counting down, in placement order.
    active_bonuses: Vec<RewardId>,
    spawner: SpawnManager,
    observers: Vec<Box<dyn GameObserver + Send>>,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.state.enemies.get(id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.state.enemies.values()
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn is_game_over(&self) -> bool {
        self.game_state.is_terminal()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn collected_rewards(&self) -> usize {
        self.rewards_collected
    }

    pub fn required_rewards(&self) -> usize {
        self.required_rewards
    }

    pub fn add_observer<O: GameObserver + Send + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Moves a freshly initialized run into `Running`. Any other state is left alone.
    pub fn start(&mut self) -> bool {
        if self.game_state != GameState::NotStarted {
            return false;
        }
        self.game_state = GameState::Running;
        info!(seed = self.seed, "run started");
        true
    }

    /// Player on the exit with every required reward gathered.
    pub fn check_win_condition(&self) -> bool {
        let on_exit = self.state.board.cell_at(self.state.player.pos).is_some_and(|c| c.is_exit());
        on_exit && self.rewards_collected >= self.required_rewards
    }

    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_i64(self.score);
        hasher.write_u8(self.game_state as u8);
        hasher.write_u64(self.rewards_collected as u64);

        let player = &self.state.player;
        hasher.write_i32(player.pos.x);
        hasher.write_i32(player.pos.y);
        hasher.write_i32(player.hp);
        hasher.write_u8(player.weapon.kind as u8);

        for enemy in self.state.enemies.values() {
            hasher.write_u8(enemy.kind as u8);
            hasher.write_i32(enemy.pos.x);
            hasher.write_i32(enemy.pos.y);
            hasher.write_i32(enemy.hp);
        }
        for reward in self.state.rewards.values() {
            hasher.write_i32(reward.pos.x);
            hasher.write_i32(reward.pos.y);
            hasher.write_u8(u8::from(reward.collected));
            hasher.write_u32(reward.ticks_remaining().unwrap_or(u32::MAX));
        }
        for trap in self.state.traps.values() {
            hasher.write_u8(u8::from(trap.armed));
            hasher.write_u32(trap.cooldown);
        }
        hasher.write_u32(self.spawner.elapsed());

        hasher.finish()
    }

    fn add_score(&mut self, points: i64) {
        self.score += points;
        let score = self.score;
        for observer in &mut self.observers {
            observer.on_score_changed(score);
        }
    }

    fn notify_update(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_update(&snapshot);
        }
    }

    fn notify_bonus_timer(&mut self, ticks_remaining: u32) {
        for observer in &mut self.observers {
            observer.on_bonus_timer_update(ticks_remaining);
        }
    }

    fn notify_game_end(&mut self, won: bool) {
        let score = self.score;
        for observer in &mut self.observers {
            observer.on_game_end(won, score);
        }
    }
}
