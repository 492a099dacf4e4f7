//! Raw king steps.
//!
//! Only the geometry lives here. Attack filtering, castling and summon
//! markers are layered on in `move_generation::legal_moves_king`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Neighbouring squares that are empty or hold an enemy.
pub fn king_step_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    ALL_DIRECTIONS
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&sq| board.is_open_for(sq, color))
        .collect()
}

/// Chebyshev distance of at most one.
#[inline]
pub fn squares_touch(a: Square, b: Square) -> bool {
    a.distance(b) <= 1
}
