//! The 8x8 piece-or-empty grid.
//!
//! `Board` is a plain value: cloning it is how every simulation and every
//! history snapshot gets its own copy.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard opening layout.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.cells[Color::Dark.home_row() as usize][col] = Some(Piece::new(Color::Dark, *kind));
            board.cells[Color::Light.home_row() as usize][col] =
                Some(Piece::new(Color::Light, *kind));
            board.cells[Color::Dark.pawn_start_row() as usize][col] =
                Some(Piece::new(Color::Dark, PieceKind::Pawn));
            board.cells[Color::Light.pawn_start_row() as usize][col] =
                Some(Piece::new(Color::Light, PieceKind::Pawn));
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(p) if p.color != color)
    }

    #[inline]
    pub fn is_friendly(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(p) if p.color == color)
    }

    /// Empty or enemy-occupied: a square a piece of `color` may land on.
    #[inline]
    pub fn is_open_for(&self, square: Square, color: Color) -> bool {
        !self.is_friendly(square, color)
    }

    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.cells[square.row as usize][square.col as usize] = Some(piece);
    }

    /// Empty a cell, returning what stood there.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize].take()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count_kind(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.kind == kind).count()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Rows as arrays, row 0 first.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_board_has_thirty_two_pieces_and_both_kings() {
        let board = Board::starting();
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.find_king(Color::Light), Square::new(7, 4));
        assert_eq!(board.find_king(Color::Dark), Square::new(0, 4));
        assert_eq!(board.count_kind(Color::Light, PieceKind::Pawn), 8);
    }

    #[test]
    fn take_empties_the_cell() {
        let mut board = Board::starting();
        let e2 = Square::new(6, 4).unwrap();
        assert_eq!(board.take(e2), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        assert!(board.is_empty(e2));
        assert!(board.is_open_for(e2, Color::Dark));
        assert!(board.is_enemy(Square::new(0, 0).unwrap(), Color::Light));
    }
}
