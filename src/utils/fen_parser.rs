//! FEN-to-GameState parser.
//!
//! Builds a full position from a Forsyth-Edwards Notation string. FEN has no
//! field for the summon ability, so both kings start Fresh.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::fen_generator::CASTLING_LETTERS;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessErrors> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [layout, side, castling, en_passant, halfmove, fullmove] = fields[..] else {
        return Err(invalid(format!(
            "FEN needs 6 fields, found {}",
            fields.len()
        )));
    };

    let state = GameState {
        board: parse_board(layout)?,
        side_to_move: parse_side(side)?,
        castling_rights: parse_castling(castling)?,
        en_passant_square: match en_passant {
            "-" => None,
            text => Some(algebraic_to_square(text)?),
        },
        halfmove_clock: parse_counter(halfmove, "halfmove clock")?,
        fullmove_number: parse_counter(fullmove, "fullmove number")?,
        ..GameState::new_empty()
    };

    if let Some(color) = [Color::Light, Color::Dark]
        .into_iter()
        .find(|&color| state.board.count_kind(color, PieceKind::King) != 1)
    {
        return Err(ChessErrors::MissingKing(color));
    }
    Ok(state)
}

fn invalid(message: impl Into<String>) -> ChessErrors {
    ChessErrors::InvalidFen(message.into())
}

fn parse_counter(text: &str, name: &str) -> Result<u16, ChessErrors> {
    text.parse()
        .map_err(|_| invalid(format!("Invalid {name}: {text}")))
}

fn parse_board(board_part: &str) -> Result<Board, ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("Board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();

    // The first FEN rank is rank 8, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("Invalid empty-square count '{ch}'")));
                }
                col += empty_count as u8;
                if col > 8 {
                    return Err(invalid("Board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("Invalid piece character '{ch}' in board layout")))?;

            let square = Square::new(row as u8, col)
                .ok_or_else(|| invalid("Board rank has too many files"))?;
            board.place(square, piece);
            col += 1;
        }

        if col != 8 {
            return Err(invalid("Board rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn parse_side(text: &str) -> Result<Color, ChessErrors> {
    match text {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(format!("Invalid side-to-move field: {text}"))),
    }
}

fn parse_castling(text: &str) -> Result<CastlingRights, ChessErrors> {
    if text == "-" {
        return Ok(0);
    }
    text.chars().try_fold(0, |rights, ch| {
        CASTLING_LETTERS
            .iter()
            .find(|&&(_, letter)| letter == ch)
            .map(|&(flag, _)| rights | flag)
            .ok_or_else(|| invalid(format!("Invalid castling rights character: {ch}")))
    })
}
