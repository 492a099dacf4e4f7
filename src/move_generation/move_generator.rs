use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::SummonPlacement;
use crate::moves::move_descriptions::MoveTarget;

pub type MoveGenResult<T> = Result<T, ChessErrors>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_checkmate: bool,
}

/// One complete turn with its resulting position.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub from: Square,
    pub target: MoveTarget,
    /// Promotion kind, or the summoned kind for a standing summon.
    pub choice: Option<PieceKind>,
    /// Piece placed beside a king that has just reached the enemy home rank.
    pub arrival_summon: Option<SummonPlacement>,
    pub is_capture: bool,
    pub game_after_move: GameState,
    pub annotations: MoveAnnotations,
}

impl GeneratedMove {
    #[inline]
    pub fn is_summon(&self) -> bool {
        self.target.is_summon() || self.arrival_summon.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.choice.is_some() && !self.target.is_summon()
    }
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}
