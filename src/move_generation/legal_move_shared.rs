//! Per-kind dispatch into the raw generators.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::king_step_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::pawn_destinations;
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Pseudo-legal step destinations of `piece` standing on `from`.
///
/// Kings yield only their raw neighbour steps here; the attack-aware king
/// generator lives in `legal_moves_king`.
pub fn pseudo_legal_destinations(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Option<Square>,
) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, from, piece.color, en_passant),
        PieceKind::Knight => knight_destinations(board, from, piece.color),
        PieceKind::Bishop => bishop_destinations(board, from, piece.color),
        PieceKind::Rook => rook_destinations(board, from, piece.color),
        PieceKind::Queen => queen_destinations(board, from, piece.color),
        PieceKind::King => king_step_destinations(board, from, piece.color),
    }
}
