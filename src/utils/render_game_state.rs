//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the demo binary, tests, and
//! diagnostics in text environments.

use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;

/// Render the board of a position to a Unicode string, rank 8 at the top.
pub fn render_game_state(game_state: &GameState) -> String {
    render_board(&game_state.board)
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for (row, cells) in board.rows().iter().enumerate() {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Some(piece) => out.push(piece.to_unicode()),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}
