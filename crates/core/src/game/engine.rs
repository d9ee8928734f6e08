//! Simulation engine composition: the periodic tick and the synchronous player entry points.
//! This file wires focused engine submodules together.

use super::*;

mod advance;
mod player_move;
