//! Hybrid bishop destinations: diagonal slides plus a single king step.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn bishop_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::with_capacity(20);

    for (d_row, d_col) in DIAGONAL_DIRECTIONS {
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
            break;
        }
    }

    for (d_row, d_col) in ALL_DIRECTIONS {
        if let Some(sq) = from.offset(d_row, d_col) {
            if board.is_open_for(sq, color) && !out.contains(&sq) {
                out.push(sq);
            }
        }
    }

    out
}
