//! Move targets produced by the generators.
//!
//! A generator never emits a bare square: each candidate is tagged with how
//! it is played, so castling and summon markers travel through the same
//! pipeline as ordinary steps.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastleSide, Square};

/// King and rook squares of one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastleMove {
    pub side: CastleSide,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveTarget {
    /// Ordinary relocation (including captures, double pushes, en passant).
    Step(Square),
    Castle(CastleMove),
    /// A square the standing king may summon a piece onto.
    Summon(Square),
}

impl MoveTarget {
    /// The square a user selects to play this target.
    #[inline]
    pub fn destination(&self) -> Square {
        match self {
            MoveTarget::Step(sq) | MoveTarget::Summon(sq) => *sq,
            MoveTarget::Castle(castle) => castle.king_to,
        }
    }

    #[inline]
    pub fn is_summon(&self) -> bool {
        matches!(self, MoveTarget::Summon(_))
    }
}

/// Wrap plain squares as `Step` targets.
pub fn steps(squares: impl IntoIterator<Item = Square>) -> Vec<MoveTarget> {
    squares.into_iter().map(MoveTarget::Step).collect()
}
