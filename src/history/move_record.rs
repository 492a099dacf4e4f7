//! Immutable record of one committed move.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{AppliedMove, SummonPlacement};

/// Everything needed to show, replay or ship a move. `state` is the full
/// position after the move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub summon: Option<SummonPlacement>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
    /// The color that made the move.
    pub turn: Color,
    pub state: GameState,
    pub timestamp: DateTime<Utc>,
}

impl MoveRecord {
    /// Build a record from an applied move. `arrival_summon` carries the
    /// piece placed by a king that just reached the enemy home rank, in which
    /// case `state` is the position with that piece already placed.
    pub fn from_applied(
        from: Square,
        to: Square,
        applied: AppliedMove,
        arrival_summon: Option<SummonPlacement>,
        state: Option<GameState>,
    ) -> Self {
        Self {
            from,
            to,
            piece: applied.piece,
            captured: applied.captured,
            promotion: applied.promotion,
            summon: applied.summon.or(arrival_summon),
            castle: applied.castle,
            en_passant: applied.en_passant,
            turn: applied.piece.color,
            state: state.unwrap_or(applied.state),
            timestamp: Utc::now(),
        }
    }

    /// Same move and same resulting position, ignoring the timestamp.
    pub fn same_move(&self, other: &MoveRecord) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.piece == other.piece
            && self.promotion == other.promotion
            && self.summon == other.summon
            && self.castle == other.castle
            && self.state == other.state
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Short coordinate notation: `e2e4`, `a7a8=Q`, `O-O`, `e8e8@f8=N`.
    pub fn notation(&self) -> String {
        if let Some(side) = self.castle {
            return match side {
                CastleSide::KingSide => "O-O".to_owned(),
                CastleSide::QueenSide => "O-O-O".to_owned(),
            };
        }

        let mut out = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            out.push('=');
            out.push(kind.letter().to_ascii_uppercase());
        }
        if let Some(summon) = self.summon {
            out.push_str(&format!("@{}={}", summon.square, summon.kind.letter().to_ascii_uppercase()));
        }
        out
    }
}
