use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    format!(
        "{} {} {}",
        position_key(game_state),
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

/// The first four FEN fields: board, side, castling, en passant.
pub fn position_key(game_state: &GameState) -> String {
    format!(
        "{} {} {} {}",
        generate_board_field(&game_state.board),
        side_letter(game_state.side_to_move),
        generate_castling_field(game_state.castling_rights),
        generate_en_passant_field(game_state.en_passant_square)
    )
}

fn side_letter(color: Color) -> char {
    match color {
        Color::Light => 'w',
        Color::Dark => 'b',
    }
}

/// Piece placement, rank 8 first.
pub fn generate_board_field(board: &Board) -> String {
    board
        .rows()
        .iter()
        .map(|cells| {
            let mut rank = String::with_capacity(8);
            let mut gap = 0u8;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if gap > 0 {
                            rank.push(char::from(b'0' + gap));
                            gap = 0;
                        }
                        rank.push(piece.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                rank.push(char::from(b'0' + gap));
            }
            rank
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) const CASTLING_LETTERS: [(CastlingRights, char); 4] = [
    (CASTLE_LIGHT_KINGSIDE, 'K'),
    (CASTLE_LIGHT_QUEENSIDE, 'Q'),
    (CASTLE_DARK_KINGSIDE, 'k'),
    (CASTLE_DARK_QUEENSIDE, 'q'),
];

fn generate_castling_field(rights: CastlingRights) -> String {
    let field: String = CASTLING_LETTERS
        .iter()
        .filter(|(flag, _)| (rights & flag) != 0)
        .map(|&(_, letter)| letter)
        .collect();
    if field.is_empty() {
        "-".to_owned()
    } else {
        field
    }
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    square.map_or_else(|| "-".to_owned(), square_to_algebraic)
}

#[cfg(test)]
mod tests {
    use super::{generate_fen, position_key};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE, Color};
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_fen_is_reproduced() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(generate_fen(&parsed), STARTING_POSITION_FEN);
    }

    #[test]
    fn custom_position_fen_is_reproduced() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = parse_fen(fen).expect("custom FEN should parse");

        assert_eq!(generate_fen(&parsed), fen);
        assert_eq!(parsed.side_to_move, Color::Dark);
        assert_eq!(
            parsed.castling_rights,
            CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );
    }

    #[test]
    fn position_key_includes_en_passant() {
        let parsed = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        assert_eq!(position_key(&parsed), "4k3/8/8/3pP3/8/8/8/4K3 w - d6");
    }
}
