//! King move generation: safe steps, castling and summon markers.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KING_HOME_COL, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::king_summon::{summon_eligible, summon_targets};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_square_attacked, king_square};
use crate::moves::king_moves::{king_step_destinations, squares_touch};
use crate::moves::move_descriptions::{CastleMove, MoveTarget};

/// Pseudo-legal king targets for the king of `color` on `from`.
///
/// Steps are already checked against attacks and enemy-king adjacency; the
/// legality filter still runs over them.
pub fn generate_king_moves(game_state: &GameState, from: Square, color: Color) -> Vec<MoveTarget> {
    let board = &game_state.board;
    let mut out: Vec<MoveTarget> = safe_king_steps(board, from, color)
        .into_iter()
        .map(MoveTarget::Step)
        .collect();

    if summon_eligible(from, color, game_state.king_states.get(color)) {
        out.extend(
            summon_targets(board, from, color, None)
                .into_iter()
                .map(MoveTarget::Summon),
        );
    }

    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if !game_state.has_castling_right(color, side) {
            continue;
        }
        if let Some(castle) = castle_if_available(board, from, color, side) {
            out.push(MoveTarget::Castle(castle));
        }
    }

    out
}

fn safe_king_steps(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let king = Piece::new(color, PieceKind::King);
    let enemy_king = king_square(board, color.opposite());

    king_step_destinations(board, from, color)
        .into_iter()
        .filter(|&to| {
            if enemy_king.is_some_and(|ek| squares_touch(ek, to)) {
                return false;
            }
            let mut simulated = board.clone();
            simulated.take(from);
            simulated.place(to, king);
            !is_square_attacked(&simulated, to, color.opposite())
        })
        .collect()
}

/// King and rook squares for castling on `side`.
pub fn castle_squares(color: Color, side: CastleSide) -> Option<CastleMove> {
    let row = color.home_row();
    let (rook_col, king_to_col, rook_to_col) = match side {
        CastleSide::KingSide => (KINGSIDE_ROOK_COL, 6, 5),
        CastleSide::QueenSide => (QUEENSIDE_ROOK_COL, 2, 3),
    };
    Some(CastleMove {
        side,
        king_from: Square::new(row, KING_HOME_COL)?,
        king_to: Square::new(row, king_to_col)?,
        rook_from: Square::new(row, rook_col)?,
        rook_to: Square::new(row, rook_to_col)?,
    })
}

/// Castling requires the king and rook on their home squares, an empty path
/// between them, and no attack on the king's start, transit and landing
/// squares. Rights are checked by the caller.
fn castle_if_available(board: &Board, from: Square, color: Color, side: CastleSide) -> Option<CastleMove> {
    let castle = castle_squares(color, side)?;
    if from != castle.king_from {
        return None;
    }
    if board.piece_at(castle.rook_from) != Some(Piece::new(color, PieceKind::Rook)) {
        return None;
    }

    let row = castle.king_from.row;
    let (lo, hi) = if castle.rook_from.col < castle.king_from.col {
        (castle.rook_from.col + 1, castle.king_from.col)
    } else {
        (castle.king_from.col + 1, castle.rook_from.col)
    };
    for col in lo..hi {
        if !board.is_empty(Square::new(row, col)?) {
            return None;
        }
    }

    let transit = Square::new(row, (castle.king_from.col + castle.king_to.col) / 2)?;
    let enemy = color.opposite();
    for sq in [castle.king_from, transit, castle.king_to] {
        if is_square_attacked(board, sq, enemy) {
            return None;
        }
    }

    Some(castle)
}
