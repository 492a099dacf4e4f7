//! Check, terminal and draw evaluation for a position.
//!
//! Checkmate and stalemate mean the side to move has no legal move at all,
//! summon markers included. Draws are advisory: they are reported, never
//! enforced.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game_status::repetition::RepetitionTable;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    ThreefoldRepetition,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl DrawKind {
    pub fn message(self) -> &'static str {
        match self {
            DrawKind::ThreefoldRepetition => "Draw by threefold repetition.",
            DrawKind::FiftyMoveRule => "Draw by fifty-move rule.",
            DrawKind::InsufficientMaterial => "Draw by insufficient material.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawInfo {
    pub kind: DrawKind,
    pub message: String,
}

impl From<DrawKind> for DrawInfo {
    fn from(kind: DrawKind) -> Self {
        Self {
            kind,
            message: kind.message().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub draw: Option<DrawInfo>,
}

impl GameStatus {
    /// No further move is possible.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.checkmate || self.stalemate
    }
}

pub fn evaluate_status(game_state: &GameState, repetitions: &RepetitionTable) -> GameStatus {
    let side = game_state.side_to_move;
    let check = is_king_in_check(&game_state.board, side);
    let can_move = has_any_legal_moves(game_state, side);

    let checkmate = check && !can_move;
    let stalemate = !check && !can_move;

    let draw = if checkmate {
        None
    } else {
        detect_draw(game_state, repetitions).map(DrawInfo::from)
    };

    GameStatus {
        check,
        checkmate,
        stalemate,
        draw,
    }
}

fn detect_draw(game_state: &GameState, repetitions: &RepetitionTable) -> Option<DrawKind> {
    if repetitions.is_repetition_draw(&game_state.position_key()) {
        return Some(DrawKind::ThreefoldRepetition);
    }
    if game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        return Some(DrawKind::FiftyMoveRule);
    }
    if is_insufficient_material(game_state) {
        return Some(DrawKind::InsufficientMaterial);
    }
    None
}

/// Only the two kings remain.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    game_state
        .board
        .pieces()
        .all(|(_, piece)| piece.kind == PieceKind::King)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn status_of(fen: &str) -> GameStatus {
        let state = parse_fen(fen).unwrap();
        let table = RepetitionTable::new(state.position_key());
        evaluate_status(&state, &table)
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        // Pawns may step onto any empty square, so the bishop covers f7-e8.
        let status = status_of("R5k1/5ppp/8/8/2B5/8/8/6K1 b - - 1 1");
        assert!(status.check);
        assert!(status.checkmate);
        assert!(!status.stalemate);
        assert!(status.draw.is_none());
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        // a7 and b7 touch the white king; the rook's open file covers b8.
        let status = status_of("k7/8/K7/8/8/8/8/1R6 b - - 0 1");
        assert!(!status.check);
        assert!(!status.checkmate);
        assert!(status.stalemate);
        assert!(status.draw.is_none());
    }

    #[test]
    fn bare_kings_are_insufficient_material() {
        let status = status_of("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            status.draw,
            Some(DrawInfo {
                kind: DrawKind::InsufficientMaterial,
                message: "Draw by insufficient material.".to_owned(),
            })
        );
    }

    #[test]
    fn hundred_quiet_halfmoves_draw() {
        let status = status_of("4k3/8/8/8/8/8/8/R3K3 w - - 100 60");
        assert_eq!(status.draw.map(|d| d.kind), Some(DrawKind::FiftyMoveRule));
        let status = status_of("4k3/8/8/8/8/8/8/R3K3 w - - 99 60");
        assert!(status.draw.is_none());
    }
}
