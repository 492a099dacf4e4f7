//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the internal
//! `(row, col)` squares, where rank 8 is row 0.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    Square::new(b'8' - rank, file - b'a')
        .ok_or_else(|| ChessErrors::InvalidAlgebraicString(square.to_owned()))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.col);
    let rank_char = char::from(b'8' - square.row);
    format!("{file_char}{rank_char}")
}

/// Parse a four-character coordinate pair such as `e2e4`.
pub fn parse_coordinate_move(text: &str) -> Result<(Square, Square), ChessErrors> {
    if text.len() != 4 || !text.is_ascii() {
        return Err(ChessErrors::InvalidAlgebraicString(text.to_owned()));
    }
    Ok((algebraic_to_square(&text[..2])?, algebraic_to_square(&text[2..])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_rows_and_columns() {
        assert_eq!(algebraic_to_square("a1").unwrap(), Square::new(7, 0).unwrap());
        assert_eq!(algebraic_to_square("h8").unwrap(), Square::new(0, 7).unwrap());
        assert_eq!(square_to_algebraic(Square::new(7, 0).unwrap()), "a1");
        assert_eq!(square_to_algebraic(Square::new(4, 4).unwrap()), "e4");
    }

    #[test]
    fn rejects_malformed_squares() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(parse_coordinate_move("e2e").is_err());
    }

    #[test]
    fn parses_coordinate_moves() {
        let (from, to) = parse_coordinate_move("g1f3").unwrap();
        assert_eq!(from.to_string(), "g1");
        assert_eq!(to.to_string(), "f3");
    }
}
