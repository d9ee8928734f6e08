use slotmap::SlotMap;

use crate::board::Board;
use crate::config::SimConfig;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub base_damage: i32,
}

impl Weapon {
    pub fn from_config(kind: WeaponKind, config: &SimConfig) -> Self {
        Self { kind, base_damage: config.base_damage(kind) }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_effective_against(&self, target: EnemyKind) -> bool {
        self.kind.favored() == target
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub pos: Pos,
    pub hp: i32,
    pub weapon: Weapon,
}

impl Player {
    pub fn new(name: impl Into<String>, pos: Pos, config: &SimConfig) -> Self {
        Self {
            name: name.into(),
            pos,
            hp: config.player_start_hp,
            weapon: Weapon::from_config(WeaponKind::Silver, config),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Non-positive amounts are ignored; health never drops below zero.
    pub fn take_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.hp = (self.hp - amount).max(0);
    }

    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.max(0);
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub ai_state: AiState,
}

impl Enemy {
    pub fn spawn(kind: EnemyKind, pos: Pos, config: &SimConfig) -> Self {
        let stats = config.enemy_stats(kind);
        Self {
            id: EnemyId::default(), // Assigned on insertion.
            kind,
            pos,
            hp: stats.hp,
            max_hp: stats.hp,
            damage: stats.damage,
            ai_state: AiState::Patrol,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.hp = (self.hp - amount).max(0);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardKind {
    /// Permanent and counted towards the win condition.
    Regular,
    Bonus { duration: u32, ticks_remaining: u32, expired: bool },
}

#[derive(Clone, Debug)]
pub struct Reward {
    pub id: RewardId,
    pub pos: Pos,
    pub score: i64,
    pub collected: bool,
    pub kind: RewardKind,
}

impl Reward {
    pub fn regular(pos: Pos, score: i64) -> Self {
        Self { id: RewardId::default(), pos, score, collected: false, kind: RewardKind::Regular }
    }

    pub fn bonus(pos: Pos, score: i64, duration: u32) -> Self {
        Self {
            id: RewardId::default(),
            pos,
            score,
            collected: false,
            kind: RewardKind::Bonus { duration, ticks_remaining: duration, expired: false },
        }
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, RewardKind::Bonus { .. })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.kind, RewardKind::Bonus { expired: true, .. })
    }

    pub fn ticks_remaining(&self) -> Option<u32> {
        match self.kind {
            RewardKind::Regular => None,
            RewardKind::Bonus { ticks_remaining, .. } => Some(ticks_remaining),
        }
    }

    /// Score is paid out once; expired bonuses pay nothing.
    pub fn collect(&mut self) -> i64 {
        if self.collected || self.is_expired() {
            return 0;
        }
        self.collected = true;
        self.score
    }

    /// Advances a bonus countdown. Returns true only on the tick the bonus expires.
    pub fn tick(&mut self) -> bool {
        let collected = self.collected;
        let RewardKind::Bonus { ticks_remaining, expired, .. } = &mut self.kind else {
            return false;
        };
        if *expired || collected {
            return false;
        }
        *ticks_remaining = ticks_remaining.saturating_sub(1);
        if *ticks_remaining == 0 {
            *expired = true;
            return true;
        }
        false
    }
}

#[derive(Clone, Debug)]
pub struct Trap {
    pub id: TrapId,
    pub pos: Pos,
    pub penalty: i32,
    pub armed: bool,
    pub cooldown: u32,
    pub cooldown_ticks: u32,
}

impl Trap {
    pub fn new(pos: Pos, penalty: i32, cooldown_ticks: u32) -> Self {
        Self { id: TrapId::default(), pos, penalty, armed: true, cooldown: 0, cooldown_ticks }
    }

    /// Returns the penalty and disarms when armed, zero otherwise.
    pub fn trigger(&mut self) -> i32 {
        if !self.armed {
            return 0;
        }
        self.armed = false;
        self.cooldown = self.cooldown_ticks;
        self.penalty
    }

    /// Returns true on the tick the trap re-arms.
    pub fn tick(&mut self) -> bool {
        if self.armed {
            return false;
        }
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            self.armed = true;
            return true;
        }
        false
    }
}

pub struct World {
    pub board: Board,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub rewards: SlotMap<RewardId, Reward>,
    pub traps: SlotMap<TrapId, Trap>,
}

impl World {
    pub fn enemy_at(&self, pos: Pos) -> Option<&Enemy> {
        self.board.enemy_at(pos).and_then(|id| self.enemies.get(id))
    }
}
