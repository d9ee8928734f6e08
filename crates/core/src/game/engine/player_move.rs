//! Player entry points driven by the input layer.

use tracing::debug;

use super::*;
use crate::state::Weapon;

impl Game {
    /// Tries to step the player one cell. Returns the player's position afterwards.
    ///
    /// Walls and the board edge leave the player in place; observers still get an update.
    /// A finished run ignores the move entirely. Stepping into a live enemy starts a fight
    /// instead of a move; the player only advances if the enemy dies.
    pub fn apply_player_move(&mut self, direction: Direction) -> Pos {
        let from = self.state.player.pos;
        if self.game_state.is_terminal() {
            return from;
        }
        let dest = from.step(direction);
        if !self.state.board.is_walkable(dest) {
            self.notify_update();
            return from;
        }

        if let Some(enemy_id) = self.state.board.enemy_at(dest) {
            let alive = self.state.enemies.get(enemy_id).is_some_and(|enemy| enemy.is_alive());
            if alive {
                self.resolve_player_attack(enemy_id, dest);
                self.notify_update();
                return self.state.player.pos;
            }
            self.reap_enemy(enemy_id);
        }

        self.state.player.pos = dest;
        self.collect_reward_at(dest);
        self.spring_trap_at(dest);
        self.notify_update();
        dest
    }

    pub fn switch_weapon(&mut self, kind: WeaponKind) {
        self.state.player.weapon = Weapon::from_config(kind, &self.config);
        debug!(weapon = kind.name(), "weapon switched");
    }

    /// Synchronous driver: a move is followed by exactly one tick, a weapon switch only
    /// notifies, and quitting touches nothing.
    pub fn apply_command(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Quit => return CommandOutcome::Quit,
            _ if self.is_game_over() => return CommandOutcome::Ignored,
            Command::Move(direction) => {
                self.apply_player_move(direction);
                self.tick();
            }
            Command::SwitchWeapon(kind) => {
                self.switch_weapon(kind);
                self.notify_update();
            }
        }
        CommandOutcome::Applied { player_pos: self.state.player.pos, state: self.game_state }
    }

    fn collect_reward_at(&mut self, pos: Pos) {
        let Some(id) = self.state.board.cell_at(pos).and_then(|cell| cell.reward()) else {
            return;
        };
        if let Some(cell) = self.state.board.cell_at_mut(pos) {
            cell.reward = None;
        }
        self.active_bonuses.retain(|bonus| *bonus != id);
        let Some(mut reward) = self.state.rewards.remove(id) else {
            return;
        };
        let points = reward.collect();
        if points == 0 {
            return;
        }
        let bonus = reward.is_bonus();
        if !bonus {
            self.rewards_collected += 1;
        }
        debug!(
            x = pos.x,
            y = pos.y,
            points,
            bonus,
            collected = self.rewards_collected,
            "reward collected"
        );
        self.add_score(points);
        if bonus {
            self.notify_bonus_timer(0);
        }
    }

    fn spring_trap_at(&mut self, pos: Pos) {
        let Some(id) = self.state.board.cell_at(pos).and_then(|cell| cell.trap()) else {
            return;
        };
        let Some(trap) = self.state.traps.get_mut(id) else {
            return;
        };
        if !trap.armed {
            return;
        }
        let penalty = trap.trigger();
        debug!(x = pos.x, y = pos.y, penalty, "trap triggered");
        self.state.player.take_damage(self.config.trap_hp_damage);
        self.add_score(-i64::from(penalty));
    }
}
