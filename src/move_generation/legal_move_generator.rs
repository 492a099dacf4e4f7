//! Full legal move generation pipeline.
//!
//! Gathers per-piece pseudo-legal targets, simulates each on a cloned board
//! and drops those leaving the mover's king attacked. This filter is the only
//! place legality is decided: the orchestrator, terminal detection and the
//! turn expander below all go through it.

use crate::game_state::board::Board;
use crate::game_state::king_summon::{summon_eligible, summon_targets};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{
    apply_move, place_summoned, simulate_move, SummonPlacement,
};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::pseudo_legal_destinations;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerator,
};
use crate::moves::move_descriptions::{steps, CastleMove, MoveTarget};

/// Keep the candidates that do not leave `piece`'s king attacked.
///
/// Summon markers pass untouched. Any step onto a king is dropped.
pub fn filter_legal_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    candidates: Vec<MoveTarget>,
    en_passant: Option<Square>,
) -> Vec<MoveTarget> {
    candidates
        .into_iter()
        .filter(|target| match target {
            MoveTarget::Summon(_) => true,
            MoveTarget::Step(to) | MoveTarget::Castle(CastleMove { king_to: to, .. }) => {
                if matches!(board.piece_at(*to), Some(p) if p.kind == PieceKind::King) {
                    return false;
                }
                match simulate_move(board, from, target, en_passant) {
                    Ok(next) => !is_king_in_check(&next, piece.color),
                    Err(_) => false,
                }
            }
        })
        .collect()
}

/// Legal targets of the piece on `from`, for whichever color owns it.
pub fn legal_moves_from(game_state: &GameState, from: Square) -> Vec<MoveTarget> {
    let Some(piece) = game_state.board.piece_at(from) else {
        return Vec::new();
    };
    let en_passant = if piece.color == game_state.side_to_move {
        game_state.en_passant_square
    } else {
        None
    };

    let candidates = match piece.kind {
        PieceKind::King => generate_king_moves(game_state, from, piece.color),
        _ => steps(pseudo_legal_destinations(&game_state.board, from, piece, en_passant)),
    };

    filter_legal_moves(&game_state.board, from, piece, candidates, en_passant)
}

/// Every legal `(origin, target)` pair for the side to move.
pub fn all_legal_moves(game_state: &GameState) -> Vec<(Square, MoveTarget)> {
    let side = game_state.side_to_move;
    let mut out = Vec::with_capacity(64);
    for (from, _) in game_state.board.pieces_of(side) {
        out.extend(legal_moves_from(game_state, from).into_iter().map(|t| (from, t)));
    }
    out
}

pub fn has_any_legal_moves(game_state: &GameState, color: Color) -> bool {
    game_state
        .board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves_from(game_state, from).is_empty())
}

/// The legal target a user means by picking `to` for the piece on `from`.
/// A standing king's summon marker shares its square with a possible step;
/// the step wins so the marker is only reachable through an explicit
/// summon request.
pub fn find_legal_target(game_state: &GameState, from: Square, to: Square) -> Option<MoveTarget> {
    let targets = legal_moves_from(game_state, from);
    targets
        .iter()
        .find(|t| !t.is_summon() && t.destination() == to)
        .copied()
}

/// Expands legal targets into complete turns: one per promotion kind, one
/// per summon kind and square, and for a king arriving on the enemy home
/// rank both the plain move and every arrival summon.
pub struct LegalMoveGenerator;

/// Same turns as [`LegalMoveGenerator`] without check annotations.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_turns(game_state, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_turns(game_state, false)
    }
}

fn generate_turns(game_state: &GameState, annotate: bool) -> MoveGenResult<Vec<GeneratedMove>> {
    let mover = game_state.side_to_move;
    let mut out = Vec::with_capacity(64);

    for (from, target) in all_legal_moves(game_state) {
        let Some(piece) = game_state.board.piece_at(from) else {
            continue;
        };

        match target {
            MoveTarget::Summon(_) => {
                for kind in PROMOTION_CHOICES {
                    let applied = apply_move(game_state, from, target, Some(kind))?;
                    out.push(turn(from, target, Some(kind), None, false, applied.state, annotate));
                }
            }
            MoveTarget::Step(to)
                if piece.kind == PieceKind::Pawn && to.row == mover.opposite().home_row() =>
            {
                for kind in PROMOTION_CHOICES {
                    let applied = apply_move(game_state, from, target, Some(kind))?;
                    let capture = applied.captured.is_some();
                    out.push(turn(from, target, Some(kind), None, capture, applied.state, annotate));
                }
            }
            _ => {
                let applied = apply_move(game_state, from, target, None)?;
                let capture = applied.captured.is_some();

                if let (PieceKind::King, MoveTarget::Step(to)) = (piece.kind, target) {
                    let arrived = &applied.state;
                    if summon_eligible(to, mover, arrived.king_states.get(mover)) {
                        for square in summon_targets(&arrived.board, to, mover, Some(from)) {
                            for kind in PROMOTION_CHOICES {
                                let placement = SummonPlacement { kind, square };
                                let summoned = place_summoned(arrived, mover, placement)?;
                                out.push(turn(from, target, None, Some(placement), capture, summoned, annotate));
                            }
                        }
                    }
                }

                out.push(turn(from, target, None, None, capture, applied.state, annotate));
            }
        }
    }

    Ok(out)
}

fn turn(
    from: Square,
    target: MoveTarget,
    choice: Option<PieceKind>,
    arrival_summon: Option<SummonPlacement>,
    is_capture: bool,
    game_after_move: GameState,
    annotate: bool,
) -> GeneratedMove {
    let annotations = if annotate {
        annotate_move(&game_after_move)
    } else {
        MoveAnnotations::default()
    };
    GeneratedMove {
        from,
        target,
        choice,
        arrival_summon,
        is_capture,
        game_after_move,
        annotations,
    }
}

fn annotate_move(after: &GameState) -> MoveAnnotations {
    let defender = after.side_to_move;
    let gives_check = is_king_in_check(&after.board, defender);
    MoveAnnotations {
        gives_check,
        is_checkmate: gives_check && !has_any_legal_moves(after, defender),
    }
}
