//! Complete position snapshot.
//!
//! `GameState` bundles the board with every rule flag a move depends on:
//! side to move, castling rights, en-passant target, per-color summon state
//! and the two clocks. It is a plain value; history nodes each own one.

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::king_summon::KingStates;
use crate::utils::fen_generator::{generate_fen, position_key};
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub king_states: KingStates,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            king_states: KingStates::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard opening position, Light to move, all castling rights.
    pub fn new_game() -> Self {
        Self {
            board: Board::starting(),
            castling_rights: CASTLE_ALL,
            ..Self::default()
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Canonical text used by the repetition table.
    #[inline]
    pub fn position_key(&self) -> String {
        position_key(self)
    }

    #[inline]
    pub fn has_castling_right(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights & castle_flag(color, side) != 0
    }
}
