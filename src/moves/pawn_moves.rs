//! Pawn destinations.
//!
//! Pawns step one square in any of the eight directions onto an empty
//! square, and capture only along the diagonals. On top of that come the
//! two-square advance from the starting row and en passant.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Pseudo-legal pawn destinations. Pass `None` for `en_passant` when
/// computing attacks.
pub fn pawn_destinations(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
) -> Vec<Square> {
    let mut out = Vec::with_capacity(10);

    for (d_row, d_col) in ALL_DIRECTIONS {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        let diagonal = d_row != 0 && d_col != 0;
        if board.is_empty(to) || (diagonal && board.is_enemy(to, color)) {
            out.push(to);
        }
    }

    if from.row == color.pawn_start_row() {
        let forward = color.forward();
        if let (Some(one), Some(two)) = (from.offset(forward, 0), from.offset(2 * forward, 0)) {
            if board.is_empty(one) && board.is_empty(two) {
                out.push(two);
            }
        }
    }

    if let Some(ep) = en_passant {
        if is_en_passant_capture(board, from, color, ep) && !out.contains(&ep) {
            out.push(ep);
        }
    }

    out
}

/// True when `ep` is a forward diagonal of `from` and the pawn that just
/// double-stepped stands beside `from`.
pub fn is_en_passant_capture(board: &Board, from: Square, color: Color, ep: Square) -> bool {
    let forward_diagonal = [-1, 1]
        .into_iter()
        .any(|d_col| from.offset(color.forward(), d_col) == Some(ep));
    if !forward_diagonal || !board.is_empty(ep) {
        return false;
    }
    let Some(victim_square) = Square::new(from.row, ep.col) else {
        return false;
    };
    matches!(
        board.piece_at(victim_square),
        Some(p) if p.kind == PieceKind::Pawn && p.color != color
    )
}
