//! Per-color king summon state machine.
//!
//! Fresh `{false, false, false}` -> Summoned `{true, true, false}` ->
//! Ready `{false, false, true}`. Ready passes the eligibility test exactly as
//! Fresh does; `returned_home` stays set as a marker.

use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KingSummonState {
    pub has_summoned: bool,
    pub needs_return: bool,
    pub returned_home: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummonPhase {
    Fresh,
    Summoned,
    Ready,
}

impl KingSummonState {
    pub const FRESH: Self = Self {
        has_summoned: false,
        needs_return: false,
        returned_home: false,
    };
    pub const SUMMONED: Self = Self {
        has_summoned: true,
        needs_return: true,
        returned_home: false,
    };
    pub const READY: Self = Self {
        has_summoned: false,
        needs_return: false,
        returned_home: true,
    };

    #[inline]
    pub fn can_summon(self) -> bool {
        !self.has_summoned && (!self.needs_return || self.returned_home)
    }

    /// State after the king of this color ends a move on `king_row`.
    pub fn after_king_on_row(self, king_row: u8, home_row: u8) -> Self {
        if king_row == home_row && (self.has_summoned || self.needs_return) {
            Self::READY
        } else {
            self
        }
    }

    pub fn phase(self) -> SummonPhase {
        if self.has_summoned {
            SummonPhase::Summoned
        } else if self.returned_home {
            SummonPhase::Ready
        } else {
            SummonPhase::Fresh
        }
    }
}

/// Summon state for both colors, indexed by [`Color::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KingStates([KingSummonState; 2]);

impl KingStates {
    #[inline]
    pub fn get(&self, color: Color) -> KingSummonState {
        self.0[color.index()]
    }

    #[inline]
    pub fn set(&mut self, color: Color, state: KingSummonState) {
        self.0[color.index()] = state;
    }
}

/// A king may summon when it stands on the opponent's home rank and its
/// state allows it.
pub fn summon_eligible(king: Square, color: Color, state: KingSummonState) -> bool {
    king.row == color.opposite().home_row() && state.can_summon()
}

/// Squares a summoned piece may be placed on: the empty horizontal
/// neighbours of the king. `vacated` is the square the king just left; it is
/// admitted unless a friendly piece stands on it.
pub fn summon_targets(
    board: &Board,
    king: Square,
    color: Color,
    vacated: Option<Square>,
) -> Vec<Square> {
    let mut targets = Vec::with_capacity(2);
    for d_col in [-1, 1] {
        let Some(sq) = king.offset(0, d_col) else {
            continue;
        };
        let reopened = vacated == Some(sq) && !board.is_friendly(sq, color);
        if board.is_empty(sq) || reopened {
            targets.push(sq);
        }
    }
    targets
}
