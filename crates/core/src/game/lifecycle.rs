//! Time-driven world upkeep: bonus countdowns, trap cooldowns, and enemy reinforcements.

use std::mem;

use rand::Rng;
use tracing::{debug, warn};

use super::*;

/// Counts ticks towards the next reinforcement attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnManager {
    timer: u32,
}

impl SpawnManager {
    /// Returns true, and restarts the count, once every `interval` ticks.
    pub fn tick(&mut self, interval: u32) -> bool {
        self.timer += 1;
        if self.timer >= interval {
            self.timer = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.timer = 0;
    }

    pub fn elapsed(&self) -> u32 {
        self.timer
    }
}

impl Game {
    pub(super) fn advance_bonus_rewards(&mut self) {
        let mut still_active = Vec::with_capacity(self.active_bonuses.len());
        for id in mem::take(&mut self.active_bonuses) {
            let Some(reward) = self.state.rewards.get_mut(id) else {
                continue;
            };
            if reward.tick() {
                let pos = reward.pos;
                self.state.rewards.remove(id);
                if let Some(cell) = self.state.board.cell_at_mut(pos)
                    && cell.reward == Some(id)
                {
                    cell.reward = None;
                }
                debug!(x = pos.x, y = pos.y, "bonus reward expired");
                self.notify_bonus_timer(0);
            } else if let Some(remaining) = reward.ticks_remaining() {
                still_active.push(id);
                self.notify_bonus_timer(remaining);
            }
        }
        self.active_bonuses = still_active;
    }

    pub(super) fn advance_traps(&mut self) {
        for trap in self.state.traps.values_mut() {
            if trap.tick() {
                debug!(x = trap.pos.x, y = trap.pos.y, "trap re-armed");
            }
        }
    }

    pub(super) fn advance_spawner(&mut self) {
        if !self.spawner.tick(self.config.spawn_interval_ticks) {
            return;
        }
        if self.state.enemies.len() >= self.config.max_active_enemies {
            return;
        }
        let Some(pos) = self.random_empty_cell(self.config.spawn_attempts) else {
            warn!(tick = self.tick, "no free cell for reinforcement");
            return;
        };
        let kind = if self.rng.gen_bool(0.5) { EnemyKind::Monster } else { EnemyKind::Human };
        self.spawn_enemy_at(kind, pos);
    }
}
