//! ASCII level parsing into a validated [`Board`].

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use super::{Board, Cell};
use crate::types::Pos;

/// Level used when no map file is supplied.
pub const DEFAULT_LEVEL: &str = "\
####################
#S.....#...........#
#.####.#.#####.###.#
#.#....#.....#...#.#
#.#.########.###.#.#
#...#......#...#...#
###.#.####.###.#.###
#...#.#..#.....#...#
#.###.#..#######.#.#
#.....#..........#.#
#.#####.####.###.#.#
#.......#......#..E#
####################";

#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("map is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    UnequalRowWidth { row: usize, expected: usize, found: usize },

    #[error("map must contain a start position (S)")]
    MissingStart,

    #[error("map must contain an exit position (E)")]
    MissingExit,

    #[error("second start position at {pos:?}")]
    DuplicateStart { pos: Pos },

    #[error("second exit position at {pos:?}")]
    DuplicateExit { pos: Pos },
}

pub fn load_map(path: &Path) -> Result<Board, MapLoadError> {
    let text = fs::read_to_string(path)?;
    parse_map(&text)
}

/// Blank lines and lines starting with `//` are ignored.
pub fn parse_map(text: &str) -> Result<Board, MapLoadError> {
    let rows: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && !line.starts_with("//"))
        .collect();

    let Some(first) = rows.first() else {
        return Err(MapLoadError::Empty);
    };
    let width = first.chars().count();
    let height = rows.len();

    let mut cells = Vec::with_capacity(width * height);
    let mut start = None;
    let mut exit = None;

    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(MapLoadError::UnequalRowWidth { row: y, expected: width, found });
        }
        for (x, glyph) in row.chars().enumerate() {
            let pos = Pos { y: y as i32, x: x as i32 };
            let cell = match glyph {
                '#' => Cell::new(pos, true, false, false),
                '.' => Cell::new(pos, false, false, false),
                'S' => {
                    if start.replace(pos).is_some() {
                        return Err(MapLoadError::DuplicateStart { pos });
                    }
                    Cell::new(pos, false, true, false)
                }
                'E' => {
                    if exit.replace(pos).is_some() {
                        return Err(MapLoadError::DuplicateExit { pos });
                    }
                    Cell::new(pos, false, false, true)
                }
                other => {
                    warn!(glyph = %other, x, y, "unknown map character, treating as empty");
                    Cell::new(pos, false, false, false)
                }
            };
            cells.push(cell);
        }
    }

    let start = start.ok_or(MapLoadError::MissingStart)?;
    let exit = exit.ok_or(MapLoadError::MissingExit)?;

    info!(width, height, "map loaded");
    Ok(Board { width, height, cells, start, exit })
}
