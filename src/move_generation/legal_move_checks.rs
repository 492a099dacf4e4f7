//! Attack and check detection.
//!
//! A square is attacked by a color when one of that color's non-king pieces
//! lists it among its pseudo-legal step destinations, with pawns generated
//! without en passant. Kings never attack; adjacency between kings is handled
//! by the king generator. Nothing here calls the legality filter.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::pseudo_legal_destinations;
use crate::moves::queen_moves::queen_sees;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find_king(color)
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    board
        .pieces_of(attacker_color)
        .any(|(from, piece)| piece_attacks(board, from, piece, square))
}

/// Squares and kinds of every `attacker_color` piece attacking `square`.
pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    board
        .pieces_of(attacker_color)
        .filter(|&(from, piece)| piece_attacks(board, from, piece, square))
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}

/// Pieces currently giving check to `color`'s king.
pub fn checking_pieces(board: &Board, color: Color) -> Vec<Square> {
    let Some(king_sq) = king_square(board, color) else {
        return Vec::new();
    };
    attackers_to_square(board, king_sq, color.opposite())
        .into_iter()
        .map(|(sq, _)| sq)
        .collect()
}

fn piece_attacks(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
    match piece.kind {
        PieceKind::King => false,
        // One segment test instead of scanning all 63 squares.
        PieceKind::Queen => queen_sees(board, from, target, piece.color),
        _ => pseudo_legal_destinations(board, from, piece, None).contains(&target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn starting_position_has_no_check() {
        let board = Board::starting();
        assert!(!is_king_in_check(&board, Color::Light));
        assert!(!is_king_in_check(&board, Color::Dark));
        assert!(is_square_attacked(&board, sq("e3"), Color::Light));
        assert!(!is_square_attacked(&board, sq("e5"), Color::Light));
    }

    #[test]
    fn hop_rook_checks_through_one_blocker() {
        let state = parse_fen("4k3/4p3/8/8/8/8/8/4RK2 b - - 0 1").unwrap();
        assert!(is_king_in_check(&state.board, Color::Dark));

        let state = parse_fen("4k3/8/8/8/8/8/4P3/4RK2 b - - 0 1").unwrap();
        assert!(!is_king_in_check(&state.board, Color::Dark));

        let state = parse_fen("8/8/8/8/8/4k3/4P3/4RK2 b - - 0 1").unwrap();
        assert!(is_king_in_check(&state.board, Color::Dark));
        assert_eq!(checking_pieces(&state.board, Color::Dark), vec![sq("e1")]);
    }

    #[test]
    fn kings_do_not_attack() {
        let state = parse_fen("8/8/8/8/8/3k4/8/3K4 w - - 0 1").unwrap();
        assert!(!is_square_attacked(&state.board, sq("d2"), Color::Dark));
        assert!(attackers_to_square(&state.board, sq("d2"), Color::Light).is_empty());
    }

    #[test]
    fn queen_attack_uses_line_of_sight() {
        let state = parse_fen("7k/8/8/8/8/8/8/Q6K b - - 0 1").unwrap();
        assert!(is_king_in_check(&state.board, Color::Dark));
        assert_eq!(
            attackers_to_square(&state.board, sq("h8"), Color::Light),
            vec![(sq("a1"), PieceKind::Queen)]
        );
    }
}
