//! One simulation step: world upkeep, enemy turns, and end-of-run evaluation.

use tracing::{debug, info};

use super::*;

impl Game {
    /// Advances the world by one tick. Does nothing unless the run is `Running`.
    pub fn tick(&mut self) {
        if self.game_state != GameState::Running {
            return;
        }
        self.tick += 1;

        self.advance_bonus_rewards();
        self.reap_dead_enemies();
        self.run_enemy_turns();
        self.advance_traps();
        self.advance_spawner();
        self.evaluate_end_of_run();

        self.notify_update();
    }

    /// Removes enemies left at zero health and credits the kills.
    pub(super) fn reap_dead_enemies(&mut self) {
        let dead: Vec<EnemyId> = self
            .state
            .enemies
            .iter()
            .filter(|(_, enemy)| !enemy.is_alive())
            .map(|(id, _)| id)
            .collect();
        for id in dead {
            self.reap_enemy(id);
        }
    }

    pub(super) fn reap_enemy(&mut self, id: EnemyId) {
        if let Some(enemy) = self.remove_enemy(id) {
            debug!(enemy = enemy.kind.label(), x = enemy.pos.x, y = enemy.pos.y, "enemy slain");
            self.add_score(self.config.score_kill);
        }
    }

    fn run_enemy_turns(&mut self) {
        let ids: Vec<EnemyId> = self.state.enemies.keys().collect();
        for id in ids {
            let Some(enemy) = self.state.enemies.get(id) else {
                continue;
            };
            let (ai_state, intent) = decide_intent(
                &self.state.board,
                enemy,
                Some(&self.state.player),
                &self.config,
                &mut self.rng,
            );
            if let Some(enemy) = self.state.enemies.get_mut(id) {
                enemy.ai_state = ai_state;
            }
            match intent {
                Intent::Attack => self.resolve_enemy_attack(id),
                Intent::Move(direction) => {
                    self.try_move_enemy(id, direction);
                }
                Intent::Stay => {}
            }
        }
    }

    /// Re-checks the destination against the board as it stands now, since enemies that
    /// acted earlier this tick may have taken it.
    fn try_move_enemy(&mut self, id: EnemyId, direction: Direction) -> bool {
        let Some(from) = self.state.enemies.get(id).map(|enemy| enemy.pos) else {
            return false;
        };
        let to = from.step(direction);
        let open = self.state.board.is_walkable(to)
            && self.state.board.enemy_at(to).is_none()
            && to != self.state.player.pos;
        if !open {
            return false;
        }

        if let Some(cell) = self.state.board.cell_at_mut(from)
            && cell.enemy == Some(id)
        {
            cell.enemy = None;
        }
        if let Some(cell) = self.state.board.cell_at_mut(to) {
            cell.enemy = Some(id);
        }
        if let Some(enemy) = self.state.enemies.get_mut(id) {
            enemy.pos = to;
        }
        true
    }

    fn evaluate_end_of_run(&mut self) {
        if !self.state.player.is_alive() {
            self.game_state = GameState::Lost;
            info!(tick = self.tick, score = self.score, "player died; run lost");
            self.notify_game_end(false);
            return;
        }
        if self.check_win_condition() {
            self.game_state = GameState::Won;
            self.add_score(self.config.score_win);
            info!(tick = self.tick, score = self.score, "exit reached; run won");
            self.notify_game_end(true);
        }
    }
}
