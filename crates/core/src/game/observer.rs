//! Read-only notification surface for renderers and other consumers.
//!
//! Observers are called synchronously at the end of each mutation cycle and only ever
//! receive owned data. A [`Snapshot`] is built once per cycle, so a consumer on another
//! thread can keep it without touching live simulation state.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use super::*;

pub trait GameObserver {
    fn on_update(&mut self, _snapshot: &Snapshot) {}
    fn on_score_changed(&mut self, _score: i64) {}
    fn on_bonus_timer_update(&mut self, _ticks_remaining: u32) {}
    fn on_game_end(&mut self, _won: bool, _final_score: i64) {}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub pos: Pos,
    pub hp: i32,
    pub weapon: WeaponKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub ai_state: AiState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RewardView {
    pub pos: Pos,
    pub score: i64,
    /// `None` for regular rewards.
    pub ticks_remaining: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrapView {
    pub pos: Pos,
    pub armed: bool,
    pub cooldown: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub state: GameState,
    pub score: i64,
    pub rewards_collected: usize,
    pub rewards_required: usize,
    pub width: usize,
    pub height: usize,
    pub exit: Pos,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub rewards: Vec<RewardView>,
    pub traps: Vec<TrapView>,
}

impl Game {
    pub fn snapshot(&self) -> Snapshot {
        let world = &self.state;
        let player = &world.player;
        Snapshot {
            tick: self.tick,
            state: self.game_state,
            score: self.score,
            rewards_collected: self.rewards_collected,
            rewards_required: self.required_rewards,
            width: world.board.width(),
            height: world.board.height(),
            exit: world.board.exit(),
            player: PlayerView {
                name: player.name.clone(),
                pos: player.pos,
                hp: player.hp,
                weapon: player.weapon.kind,
            },
            enemies: world
                .enemies
                .values()
                .map(|enemy| EnemyView {
                    kind: enemy.kind,
                    pos: enemy.pos,
                    hp: enemy.hp,
                    max_hp: enemy.max_hp,
                    ai_state: enemy.ai_state,
                })
                .collect(),
            rewards: world
                .rewards
                .values()
                .filter(|reward| !reward.collected && !reward.is_expired())
                .map(|reward| RewardView {
                    pos: reward.pos,
                    score: reward.score,
                    ticks_remaining: reward.ticks_remaining(),
                })
                .collect(),
            traps: world
                .traps
                .values()
                .map(|trap| TrapView { pos: trap.pos, armed: trap.armed, cooldown: trap.cooldown })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObserverEvent {
    Update { tick: u64, state: GameState },
    ScoreChanged(i64),
    BonusTimer(u32),
    GameEnd { won: bool, final_score: i64 },
}

/// Observer that appends every notification to a shared log.
/// Clone it before registering and read the log through the clone.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<ObserverEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn push(&self, event: ObserverEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

impl GameObserver for EventRecorder {
    fn on_update(&mut self, snapshot: &Snapshot) {
        self.push(ObserverEvent::Update { tick: snapshot.tick, state: snapshot.state });
    }

    fn on_score_changed(&mut self, score: i64) {
        self.push(ObserverEvent::ScoreChanged(score));
    }

    fn on_bonus_timer_update(&mut self, ticks_remaining: u32) {
        self.push(ObserverEvent::BonusTimer(ticks_remaining));
    }

    fn on_game_end(&mut self, won: bool, final_score: i64) {
        self.push(ObserverEvent::GameEnd { won, final_score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;
    use crate::state::{Reward, Trap};

    #[derive(Default)]
    struct Silent;

    impl GameObserver for Silent {}

    #[test]
    fn snapshot_reflects_population() {
        let mut game = corridor_game();
        game.spawn_enemy_at(EnemyKind::Monster, Pos::new(3, 1)).unwrap();
        game.place_reward(Reward::regular(Pos::new(2, 1), 100)).unwrap();
        game.place_trap(Trap::new(Pos::new(4, 1), 20, 10)).unwrap();

        let snapshot = game.snapshot();
        assert_eq!((snapshot.width, snapshot.height), (7, 3));
        assert_eq!(snapshot.state, GameState::NotStarted);
        assert_eq!(snapshot.player.pos, Pos::new(1, 1));
        assert_eq!(snapshot.player.weapon, WeaponKind::Silver);
        let monster = snapshot.enemies.iter().find(|e| e.pos == Pos::new(3, 1));
        assert_eq!(monster.map(|e| e.kind), Some(EnemyKind::Monster));
        assert_eq!(snapshot.rewards.len(), 1);
        assert_eq!(snapshot.rewards_required, 1);
        let trap = TrapView { pos: Pos::new(4, 1), armed: true, cooldown: 0 };
        assert_eq!(snapshot.traps, vec![trap]);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let mut game = corridor_game();
        let before = game.snapshot();
        game.start();
        game.apply_player_move(Direction::Right);
        assert_eq!(before.player.pos, Pos::new(1, 1));
        assert_eq!(game.snapshot().player.pos, Pos::new(2, 1));
    }

    #[test]
    fn observers_are_notified_in_registration_order() {
        let mut game = corridor_game();
        let first = EventRecorder::new();
        let second = EventRecorder::new();
        game.add_observer(first.clone());
        game.add_observer(Silent);
        game.add_observer(second.clone());

        game.start();
        game.tick();

        let expected = vec![ObserverEvent::Update { tick: 1, state: GameState::Running }];
        assert_eq!(first.events(), expected);
        assert_eq!(second.events(), expected);
    }

    #[test]
    fn recorder_clear_empties_the_shared_log() {
        let recorder = EventRecorder::new();
        let mut handle = recorder.clone();
        handle.on_score_changed(10);
        assert_eq!(recorder.events(), vec![ObserverEvent::ScoreChanged(10)]);
        recorder.clear();
        assert!(recorder.events().is_empty());
    }
}
