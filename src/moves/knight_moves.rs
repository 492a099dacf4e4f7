//! Extended knight: every square of the 5x5 box outside the 3x3 core.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// The sixteen ring offsets.
pub const KNIGHT_OFFSETS: [(i8, i8); 16] = generate_ring_offsets();

const fn generate_ring_offsets() -> [(i8, i8); 16] {
    let mut table = [(0i8, 0i8); 16];
    let mut idx = 0usize;
    let mut d_row = -2i8;

    while d_row <= 2 {
        let mut d_col = -2i8;
        while d_col <= 2 {
            if d_row == -2 || d_row == 2 || d_col == -2 || d_col == 2 {
                table[idx] = (d_row, d_col);
                idx += 1;
            }
            d_col += 1;
        }
        d_row += 1;
    }

    table
}

pub fn knight_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&sq| board.is_open_for(sq, color))
        .collect()
}
