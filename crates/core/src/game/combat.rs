//! Weapon-versus-enemy damage rules and fight resolution.

use tracing::debug;

use super::*;
use crate::state::Weapon;

const MATCHED_MULTIPLIER: f64 = 1.5;
const MISMATCHED_MULTIPLIER: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Killed { enemy: EnemyId, damage: i32 },
    Survived { enemy: EnemyId, damage: i32, counter_damage: i32 },
}

/// Base damage scaled by the weapon/enemy matchup, rounded to the nearest integer.
pub fn weapon_damage(weapon: Weapon, target: EnemyKind) -> i32 {
    let multiplier = if weapon.is_effective_against(target) {
        MATCHED_MULTIPLIER
    } else {
        MISMATCHED_MULTIPLIER
    };
    (f64::from(weapon.base_damage) * multiplier).round() as i32
}

/// Damage of a player swing: the weapon multiplier plus the flat bonus on a matched weapon.
pub fn player_attack_damage(weapon: Weapon, target: EnemyKind, config: &SimConfig) -> i32 {
    let bonus = if weapon.is_effective_against(target) { config.matched_attack_bonus } else { 0 };
    weapon_damage(weapon, target) + bonus
}

impl Game {
    /// The player strikes the enemy standing on `target`. A kill frees the cell for the player;
    /// a survivor hits back once and the player stays put.
    pub(super) fn resolve_player_attack(
        &mut self,
        enemy_id: EnemyId,
        target: Pos,
    ) -> AttackOutcome {
        let weapon = self.state.player.weapon;
        let Some(enemy) = self.state.enemies.get_mut(enemy_id) else {
            return AttackOutcome::Killed { enemy: enemy_id, damage: 0 };
        };
        let damage = player_attack_damage(weapon, enemy.kind, &self.config);
        enemy.take_damage(damage);
        debug!(
            enemy = enemy.kind.label(),
            weapon = weapon.name(),
            damage,
            enemy_hp = enemy.hp,
            "player attacks"
        );

        if enemy.is_alive() {
            let counter_damage = enemy.damage;
            self.state.player.take_damage(counter_damage);
            return AttackOutcome::Survived { enemy: enemy_id, damage, counter_damage };
        }

        self.remove_enemy(enemy_id);
        self.add_score(self.config.score_kill);
        self.state.player.pos = target;
        AttackOutcome::Killed { enemy: enemy_id, damage }
    }

    /// Flat enemy damage with no weapon factor and no counter.
    pub(super) fn resolve_enemy_attack(&mut self, enemy_id: EnemyId) {
        let Some(enemy) = self.state.enemies.get(enemy_id) else {
            return;
        };
        let damage = enemy.damage;
        debug!(enemy = enemy.kind.label(), damage, "enemy attacks player");
        self.state.player.take_damage(damage);
    }
}
