//! Grid A* used by chasing enemies.
//! Walls, the board edge, and cells held by other enemies block expansion; the goal cell is
//! always enterable even when occupied.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::Board;
use crate::types::{Direction, PathfindingMode, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
    node: usize,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    pos: Pos,
    parent: Option<usize>,
    g: u32,
}

/// First step from `start` towards `goal`, or `None` when already there or unreachable.
pub fn find_next_move(
    board: &Board,
    start: Pos,
    goal: Pos,
    mode: PathfindingMode,
) -> Option<Direction> {
    if start == goal {
        return None;
    }
    let path = find_path(board, start, goal, mode)?;
    let next = path.first().copied()?;
    Direction::between(start, next)
}

/// Cells to walk through from `start` (exclusive) to `goal` (inclusive).
pub fn find_path(board: &Board, start: Pos, goal: Pos, mode: PathfindingMode) -> Option<Vec<Pos>> {
    if !board.in_bounds(start) || !board.in_bounds(goal) {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }
    match mode {
        PathfindingMode::Simplified => closed_set_search(board, start, goal),
        PathfindingMode::Strict => relaxing_search(board, start, goal),
    }
}

// Each coordinate is expanded at most once; a cheaper route discovered later is never revisited.
fn closed_set_search(board: &Board, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let mut nodes = vec![SearchNode { pos: start, parent: None, g: 0 }];
    let mut open_set = BTreeSet::new();
    let mut closed = BTreeSet::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x, node: 0 });

    while let Some(entry) = open_set.pop_first() {
        let current = nodes[entry.node];
        if current.pos == goal {
            return Some(unwind(&nodes, entry.node));
        }
        if !closed.insert(current.pos) {
            continue;
        }
        for n in neighbors(current.pos) {
            if closed.contains(&n) || !is_step_open(board, n, goal) {
                continue;
            }
            let g = current.g + 1;
            let h = manhattan(n, goal);
            nodes.push(SearchNode { pos: n, parent: Some(entry.node), g });
            open_set.insert(OpenNode { f: g + h, h, y: n.y, x: n.x, node: nodes.len() - 1 });
        }
    }
    None
}

fn relaxing_search(board: &Board, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x, node: 0 });
    g_score.insert(start, 0_u32);

    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let Some(cur_g) = g_score.get(&p).copied() else {
            continue;
        };
        for n in neighbors(p) {
            if !is_step_open(board, n, goal) {
                continue;
            }
            let tg = cur_g + 1;
            if tg < g_score.get(&n).copied().unwrap_or(u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x, node: 0 });
            }
        }
    }
    None
}

fn is_step_open(board: &Board, pos: Pos, goal: Pos) -> bool {
    if !board.is_walkable(pos) {
        return false;
    }
    pos == goal || board.enemy_at(pos).is_none()
}

fn unwind(nodes: &[SearchNode], mut idx: usize) -> Vec<Pos> {
    let mut path = Vec::new();
    while let Some(parent) = nodes[idx].parent {
        path.push(nodes[idx].pos);
        idx = parent;
    }
    path.reverse();
    path
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = *came.get(&p)?;
        result.push(p);
    }
    result.reverse();
    result.remove(0);
    Some(result)
}

fn neighbors(p: Pos) -> [Pos; 4] {
    Direction::ALL.map(|dir| p.step(dir))
}

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.manhattan(b)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::game::test_support::*;
    use crate::types::EnemyKind;

    const MODES: [PathfindingMode; 2] = [PathfindingMode::Simplified, PathfindingMode::Strict];

    fn assert_valid_path(board: &Board, start: Pos, goal: Pos, path: &[Pos]) {
        let mut prev = start;
        for (i, step) in path.iter().enumerate() {
            assert_eq!(prev.manhattan(*step), 1, "step {i} is not adjacent");
            assert!(board.is_walkable(*step), "step {i} walks into a wall");
            if *step != goal {
                assert!(board.enemy_at(*step).is_none(), "step {i} passes through an enemy");
            }
            prev = *step;
        }
        assert_eq!(prev, goal);
    }

    #[test]
    fn same_cell_has_no_direction() {
        let board = open_board(7, 7);
        for mode in MODES {
            assert_eq!(find_next_move(&board, Pos::new(3, 3), Pos::new(3, 3), mode), None);
        }
    }

    #[test]
    fn straight_line_moves_towards_goal() {
        let board = open_board(9, 9);
        for mode in MODES {
            assert_eq!(
                find_next_move(&board, Pos::new(2, 4), Pos::new(6, 4), mode),
                Some(Direction::Right)
            );
            assert_eq!(
                find_next_move(&board, Pos::new(4, 6), Pos::new(4, 1), mode),
                Some(Direction::Up)
            );
        }
    }

    #[test]
    fn routes_around_a_wall() {
        let board = crate::board::parse_map(
            "\
#######
#S..#.#
#.#.#.#
#.#...#
#....E#
#######",
        )
        .unwrap();
        for mode in MODES {
            let path = find_path(&board, Pos::new(3, 1), Pos::new(5, 1), mode).expect("path");
            assert_valid_path(&board, Pos::new(3, 1), Pos::new(5, 1), &path);
            assert_eq!(path.len(), 6);
            assert_eq!(
                find_next_move(&board, Pos::new(3, 1), Pos::new(5, 1), mode),
                Some(Direction::Down)
            );
        }
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let board = crate::board::parse_map(
            "\
#######
#S....#
#..#..#
#.#.#.#
#..#.E#
#######",
        )
        .unwrap();
        for mode in MODES {
            assert_eq!(find_next_move(&board, Pos::new(1, 1), Pos::new(3, 3), mode), None);
            assert!(find_path(&board, Pos::new(1, 1), Pos::new(3, 3), mode).is_none());
        }
    }

    #[test]
    fn enemies_block_the_corridor_but_not_the_goal() {
        let mut game = corridor_game();
        let blocker = game.spawn_enemy_at(EnemyKind::Monster, Pos::new(3, 1)).expect("blocker");
        let hunter_goal = Pos::new(5, 1);
        for mode in MODES {
            assert_eq!(find_next_move(game.board(), Pos::new(1, 1), hunter_goal, mode), None);
        }

        game.remove_enemy(blocker);
        game.spawn_enemy_at(EnemyKind::Human, hunter_goal).expect("occupied goal");
        for mode in MODES {
            assert_eq!(
                find_next_move(game.board(), Pos::new(1, 1), hunter_goal, mode),
                Some(Direction::Right)
            );
        }
    }

    #[test]
    fn both_modes_agree_on_path_length_in_a_maze() {
        let board = crate::board::parse_map(crate::board::DEFAULT_LEVEL).unwrap();
        let start = board.start();
        let goal = board.exit();
        let simplified = find_path(&board, start, goal, PathfindingMode::Simplified).unwrap();
        let strict = find_path(&board, start, goal, PathfindingMode::Strict).unwrap();
        assert_valid_path(&board, start, goal, &simplified);
        assert_valid_path(&board, start, goal, &strict);
        assert_eq!(simplified.len(), strict.len());
    }

    proptest! {
        #[test]
        fn first_step_closes_distance_on_open_grids(
            sx in 1..10_i32, sy in 1..10_i32, tx in 1..10_i32, ty in 1..10_i32,
            strict in any::<bool>(),
        ) {
            let board = open_board(11, 11);
            let start = Pos::new(sx, sy);
            let goal = Pos::new(tx, ty);
            let mode = if strict { PathfindingMode::Strict } else { PathfindingMode::Simplified };
            match find_next_move(&board, start, goal, mode) {
                None => prop_assert_eq!(start, goal),
                Some(dir) => {
                    prop_assert!(start.step(dir).manhattan(goal) < start.manhattan(goal));
                }
            }
        }
    }
}
