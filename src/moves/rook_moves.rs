//! Hop rook destinations.
//!
//! Each orthogonal ray runs until the first occupied square, which is a
//! capture when it holds an enemy. The ray then checks exactly one square
//! past the blocker (empty or enemy lands) and stops there.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn rook_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::with_capacity(16);

    for (d_row, d_col) in ORTHOGONAL_DIRECTIONS {
        trace_hop_ray(board, from, color, d_row, d_col, &mut out);
    }

    out
}

fn trace_hop_ray(
    board: &Board,
    from: Square,
    color: Color,
    d_row: i8,
    d_col: i8,
    out: &mut Vec<Square>,
) {
    let mut cursor = from.offset(d_row, d_col);

    while let Some(sq) = cursor {
        if board.is_empty(sq) {
            out.push(sq);
            cursor = sq.offset(d_row, d_col);
            continue;
        }

        if board.is_enemy(sq, color) {
            out.push(sq);
        }

        if let Some(past) = sq.offset(d_row, d_col) {
            if board.is_open_for(past, color) {
                out.push(past);
            }
        }
        return;
    }
}
