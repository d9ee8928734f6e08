use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct RewardId;
    pub struct TrapId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(dx, dy)` with y growing downwards.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction of a single cardinal step from `from` to `to`, if they are adjacent.
    pub fn between(from: Pos, to: Pos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| from.step(*dir) == to)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Monster,
    Human,
}

impl EnemyKind {
    /// Case-insensitive lookup; anything unrecognised becomes a monster.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "human" => EnemyKind::Human,
            _ => EnemyKind::Monster,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EnemyKind::Monster => "Monster",
            EnemyKind::Human => "HumanEnemy",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Silver,
    Steel,
}

impl WeaponKind {
    /// Case-insensitive lookup; anything unrecognised becomes steel.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "silver" => WeaponKind::Silver,
            _ => WeaponKind::Steel,
        }
    }

    pub const fn favored(self) -> EnemyKind {
        match self {
            WeaponKind::Silver => EnemyKind::Monster,
            WeaponKind::Steel => EnemyKind::Human,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            WeaponKind::Silver => "Silver Sword",
            WeaponKind::Steel => "Steel Sword",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    Idle,
    Patrol,
    Chase,
    Attack,
}

/// What an enemy wants to do this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Attack,
    Move(Direction),
    Stay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    Running,
    /// Reserved. No rule enters or leaves this state.
    Paused,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathfindingMode {
    /// Closed-set search without cost relaxation on revisits.
    #[default]
    Simplified,
    /// Textbook A* that relaxes g-costs and always yields a shortest path.
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    SwitchWeapon(WeaponKind),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied { player_pos: Pos, state: GameState },
    Ignored,
    Quit,
}
