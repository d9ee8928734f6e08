//! Shared test fixtures for the `game` submodule test suites.
//! Boards are built through the map parser so fixtures exercise the same path as real levels.

use super::*;
use crate::board::parse_map;

pub(super) const FIXTURE_SEED: u64 = 0xD0_6E;

/// Walled rectangle with start in the top-left corner and exit in the bottom-right one.
pub(super) fn open_board(width: usize, height: usize) -> Board {
    let mut text = String::new();
    for y in 0..height {
        for x in 0..width {
            let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            let glyph = if border {
                '#'
            } else if (x, y) == (1, 1) {
                'S'
            } else if (x, y) == (width - 2, height - 2) {
                'E'
            } else {
                '.'
            };
            text.push(glyph);
        }
        text.push('\n');
    }
    parse_map(&text).expect("open board fixture parses")
}

/// One-row corridor `S...E` with an empty population and the player on the start cell.
pub(super) fn corridor_game() -> Game {
    let board = parse_map("#######\n#S...E#\n#######").expect("corridor fixture parses");
    Game::new(SimConfig::default(), board, FIXTURE_SEED)
}

/// Empty open room, already running.
pub(super) fn running_room(width: usize, height: usize) -> Game {
    let mut game = Game::new(SimConfig::default(), open_board(width, height), FIXTURE_SEED);
    game.start();
    game
}
