//! Board simulation and full move application.
//!
//! `simulate_move` only relocates pieces on a cloned board and is what the
//! legality filter uses. `apply_move` produces the complete next position:
//! rights, en-passant target, clocks, side to move and summon state.

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::king_summon::KingSummonState;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{CastleMove, MoveTarget};
use crate::moves::pawn_moves::is_en_passant_capture;

/// A summoned piece and where it was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummonPlacement {
    pub kind: PieceKind,
    pub square: Square,
}

/// Result of applying one move.
#[derive(Debug, Clone)]
pub struct AppliedMove {
    pub state: GameState,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
    pub summon: Option<SummonPlacement>,
}

/// Relocate pieces for `target` on a copy of `board`. Summon markers leave
/// the board unchanged since the summoned kind is not known yet.
pub fn simulate_move(
    board: &Board,
    from: Square,
    target: &MoveTarget,
    en_passant: Option<Square>,
) -> Result<Board, ChessErrors> {
    let piece = board
        .piece_at(from)
        .ok_or(ChessErrors::CannotMoveFromEmptySquare(from))?;
    let mut next = board.clone();

    match *target {
        MoveTarget::Step(to) => {
            if let Some(victim) = en_passant_victim(board, from, to, piece, en_passant) {
                next.take(victim);
            }
            next.take(from);
            next.place(to, piece);
        }
        MoveTarget::Castle(castle) => relocate_castle(&mut next, piece, castle),
        MoveTarget::Summon(_) => {}
    }

    Ok(next)
}

/// Apply a move for the side to move.
///
/// `choice` is the promotion kind for a pawn reaching the far rank and the
/// summoned kind for a `Summon` target; it must be `None` otherwise.
pub fn apply_move(
    game_state: &GameState,
    from: Square,
    target: MoveTarget,
    choice: Option<PieceKind>,
) -> Result<AppliedMove, ChessErrors> {
    let piece = game_state
        .board
        .piece_at(from)
        .ok_or(ChessErrors::CannotMoveFromEmptySquare(from))?;
    let mover = piece.color;
    let mut next = game_state.clone();

    let mut captured = None;
    let mut en_passant = false;
    let mut castle = None;
    let mut promotion = None;
    let mut summon = None;

    match target {
        MoveTarget::Step(to) => {
            let victim = en_passant_victim(&game_state.board, from, to, piece, game_state.en_passant_square);
            if let Some(victim) = victim {
                captured = next.board.take(victim);
                en_passant = true;
            } else {
                captured = next.board.take(to);
            }
            next.board.take(from);

            let placed = if piece.kind == PieceKind::Pawn && to.row == mover.opposite().home_row() {
                let kind = checked_choice(choice, "promotion")?;
                promotion = Some(kind);
                Piece::new(mover, kind)
            } else {
                reject_unused_choice(choice)?;
                piece
            };
            next.board.place(to, placed);

            if piece.kind == PieceKind::Rook {
                clear_corner_right(&mut next.castling_rights, mover, from);
            }
            if let Some(taken) = captured {
                if taken.kind == PieceKind::Rook {
                    clear_corner_right(&mut next.castling_rights, taken.color, to);
                }
            }

            next.en_passant_square = if piece.kind == PieceKind::Pawn && from.row.abs_diff(to.row) == 2 {
                Square::new((from.row + to.row) / 2, from.col)
            } else {
                None
            };
        }
        MoveTarget::Castle(castle_move) => {
            reject_unused_choice(choice)?;
            relocate_castle(&mut next.board, piece, castle_move);
            castle = Some(castle_move.side);
            next.en_passant_square = None;
        }
        MoveTarget::Summon(square) => {
            let kind = checked_choice(choice, "summon")?;
            next.board.place(square, Piece::new(mover, kind));
            next.king_states.set(mover, KingSummonState::SUMMONED);
            summon = Some(SummonPlacement { kind, square });
            next.en_passant_square = None;
        }
    }

    if piece.kind == PieceKind::King {
        next.castling_rights &=
            !(castle_flag(mover, CastleSide::KingSide) | castle_flag(mover, CastleSide::QueenSide));
    }

    if piece.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = mover.opposite();

    refresh_summon_state(&mut next, mover);

    Ok(AppliedMove {
        state: next,
        piece,
        captured,
        en_passant,
        castle,
        promotion,
        summon,
    })
}

/// Place a summoned piece into a position where the king has just arrived
/// on the enemy home rank. The turn has already passed, so only the board
/// and the mover's summon state change.
pub fn place_summoned(
    game_state: &GameState,
    mover: Color,
    placement: SummonPlacement,
) -> Result<GameState, ChessErrors> {
    if !placement.kind.is_promotion_choice() {
        return Err(ChessErrors::InvalidPieceChoice(format!("{:?}", placement.kind)));
    }
    let mut next = game_state.clone();
    next.board.place(placement.square, Piece::new(mover, placement.kind));
    next.king_states.set(mover, KingSummonState::SUMMONED);
    Ok(next)
}

fn en_passant_victim(
    board: &Board,
    from: Square,
    to: Square,
    piece: Piece,
    en_passant: Option<Square>,
) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || en_passant != Some(to) {
        return None;
    }
    if !is_en_passant_capture(board, from, piece.color, to) {
        return None;
    }
    Square::new(from.row, to.col)
}

fn relocate_castle(board: &mut Board, king: Piece, castle: CastleMove) {
    board.take(castle.king_from);
    let rook = board.take(castle.rook_from);
    board.place(castle.king_to, king);
    if let Some(rook) = rook {
        board.place(castle.rook_to, rook);
    }
}

fn clear_corner_right(rights: &mut CastlingRights, color: Color, square: Square) {
    if square.row != color.home_row() {
        return;
    }
    match square.col {
        KINGSIDE_ROOK_COL => *rights &= !castle_flag(color, CastleSide::KingSide),
        QUEENSIDE_ROOK_COL => *rights &= !castle_flag(color, CastleSide::QueenSide),
        _ => {}
    }
}

fn refresh_summon_state(state: &mut GameState, mover: Color) {
    let Some(king) = state.board.find_king(mover) else {
        return;
    };
    let current = state.king_states.get(mover);
    state
        .king_states
        .set(mover, current.after_king_on_row(king.row, mover.home_row()));
}

fn checked_choice(choice: Option<PieceKind>, what: &str) -> Result<PieceKind, ChessErrors> {
    match choice {
        Some(kind) if kind.is_promotion_choice() => Ok(kind),
        Some(kind) => Err(ChessErrors::InvalidPieceChoice(format!("{kind:?}"))),
        None => Err(ChessErrors::InvalidPieceChoice(format!("missing {what} piece"))),
    }
}

fn reject_unused_choice(choice: Option<PieceKind>) -> Result<(), ChessErrors> {
    match choice {
        Some(kind) => Err(ChessErrors::InvalidPieceChoice(format!("{kind:?}"))),
        None => Ok(()),
    }
}
