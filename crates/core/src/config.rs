//! Tuning constants for a run, grouped into one serde-backed structure.
//! Every number the simulation consults lives here so balance changes never touch engine code.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EnemyKind, PathfindingMode, WeaponKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyStats {
    pub hp: i32,
    pub damage: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub player_start_hp: i32,
    pub silver_base_damage: i32,
    pub steel_base_damage: i32,
    /// Flat damage added to a player attack when the weapon matches the target.
    pub matched_attack_bonus: i32,

    pub monster_hp: i32,
    pub monster_damage: i32,
    pub human_hp: i32,
    pub human_damage: i32,

    pub chase_range: u32,
    pub attack_range: u32,
    pub patrol_attempts: u32,
    pub pathfinding: PathfindingMode,

    pub max_active_enemies: usize,
    pub spawn_interval_ticks: u32,
    pub spawn_attempts: u32,
    pub empty_cell_attempts: u32,

    pub trap_penalty: i32,
    pub trap_hp_damage: i32,
    pub trap_cooldown_ticks: u32,

    pub score_kill: i64,
    pub score_collect: i64,
    pub score_win: i64,

    pub initial_monsters: usize,
    pub initial_humans: usize,
    pub regular_rewards: usize,
    pub bonus_rewards: usize,
    pub bonus_score: i64,
    pub bonus_duration_ticks: u32,
    pub traps: usize,

    pub tick_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_start_hp: 100,
            silver_base_damage: 30,
            steel_base_damage: 30,
            matched_attack_bonus: 20,
            monster_hp: 60,
            monster_damage: 15,
            human_hp: 50,
            human_damage: 10,
            chase_range: 8,
            attack_range: 1,
            patrol_attempts: 4,
            pathfinding: PathfindingMode::Simplified,
            max_active_enemies: 5,
            spawn_interval_ticks: 15,
            spawn_attempts: 10,
            empty_cell_attempts: 1000,
            trap_penalty: 20,
            trap_hp_damage: 0,
            trap_cooldown_ticks: 10,
            score_kill: 50,
            score_collect: 100,
            score_win: 500,
            initial_monsters: 3,
            initial_humans: 2,
            regular_rewards: 5,
            bonus_rewards: 2,
            bonus_score: 200,
            bonus_duration_ticks: 15,
            traps: 3,
            tick_interval_ms: 500,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval_ticks == 0 {
            return Err(ConfigError::Invalid("spawn_interval_ticks must be positive".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.attack_range > self.chase_range {
            return Err(ConfigError::Invalid(format!(
                "attack_range {} exceeds chase_range {}",
                self.attack_range, self.chase_range
            )));
        }
        if self.silver_base_damage <= 0 || self.steel_base_damage <= 0 {
            return Err(ConfigError::Invalid("weapon base damage must be positive".into()));
        }
        if self.player_start_hp <= 0 {
            return Err(ConfigError::Invalid("player_start_hp must be positive".into()));
        }
        Ok(())
    }

    pub fn enemy_stats(&self, kind: EnemyKind) -> EnemyStats {
        match kind {
            EnemyKind::Monster => EnemyStats { hp: self.monster_hp, damage: self.monster_damage },
            EnemyKind::Human => EnemyStats { hp: self.human_hp, damage: self.human_damage },
        }
    }

    pub fn base_damage(&self, weapon: WeaponKind) -> i32 {
        match weapon {
            WeaponKind::Silver => self.silver_base_damage,
            WeaponKind::Steel => self.steel_base_damage,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
