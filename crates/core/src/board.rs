//! Spatial grid of cells and the occupancy slots simulation systems write into.
//! The board answers bounds, walkability, and placement queries; it never decides gameplay.

use rand::Rng;

use crate::types::{EnemyId, Pos, RewardId, TrapId};

mod loader;

pub use loader::{DEFAULT_LEVEL, MapLoadError, load_map, parse_map};

#[derive(Clone, Debug)]
pub struct Cell {
    pos: Pos,
    wall: bool,
    start: bool,
    exit: bool,
    pub(crate) enemy: Option<EnemyId>,
    pub(crate) reward: Option<RewardId>,
    pub(crate) trap: Option<TrapId>,
}

impl Cell {
    fn new(pos: Pos, wall: bool, start: bool, exit: bool) -> Self {
        Self { pos, wall, start, exit, enemy: None, reward: None, trap: None }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn is_wall(&self) -> bool {
        self.wall
    }

    pub fn is_walkable(&self) -> bool {
        !self.wall
    }

    pub fn is_start(&self) -> bool {
        self.start
    }

    pub fn is_exit(&self) -> bool {
        self.exit
    }

    pub fn enemy(&self) -> Option<EnemyId> {
        self.enemy
    }

    pub fn reward(&self) -> Option<RewardId> {
        self.reward
    }

    pub fn trap(&self) -> Option<TrapId> {
        self.trap
    }

    /// Walkable with every occupant slot vacant.
    pub fn is_empty(&self) -> bool {
        !self.wall && self.enemy.is_none() && self.reward.is_none() && self.trap.is_none()
    }

    fn clear_occupants(&mut self) {
        self.enemy = None;
        self.reward = None;
        self.trap = None;
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Pos,
    exit: Pos,
}

impl Board {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn cell_at(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub(crate) fn cell_at_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells.get_mut(idx)
    }

    /// False for walls and for anything outside the grid.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell_at(pos).is_some_and(Cell::is_walkable)
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.cell_at(pos).and_then(Cell::enemy)
    }

    /// Probes random coordinates for a walkable, unoccupied cell that is neither start nor exit.
    /// Positions in `avoid` are rejected like any other unsuitable probe.
    pub fn random_empty_cell<R: Rng>(
        &self,
        rng: &mut R,
        attempts: u32,
        avoid: &[Pos],
    ) -> Option<Pos> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        for _ in 0..attempts {
            let pos = Pos {
                y: rng.gen_range(0..self.height) as i32,
                x: rng.gen_range(0..self.width) as i32,
            };
            if !avoid.contains(&pos) && self.cell_at(pos).is_some_and(is_placeable) {
                return Some(pos);
            }
        }
        None
    }

    pub(crate) fn clear_occupants(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_occupants);
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

pub(crate) fn is_placeable(cell: &Cell) -> bool {
    cell.is_empty() && !cell.is_start() && !cell.is_exit()
}
