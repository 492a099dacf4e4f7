//! Canonical rule constants.
//!
//! Starting layout, draw thresholds, and the fixed home squares used by
//! castling.

/// Standard starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture that trigger the fifty-move draw.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position key that trigger the repetition draw.
pub const REPETITION_DRAW_COUNT: u32 = 3;

/// Column of both kings' home squares.
pub const KING_HOME_COL: u8 = 4;

pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;
