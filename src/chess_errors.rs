//! Errors used throughout the rules engine.
//!
//! Rule violations during play are not errors: the orchestrator reports them
//! as rejected outcomes and leaves the game untouched. `ChessErrors` covers the
//! recoverable failures at the text and wire boundaries (FEN, algebraic
//! squares, piece glyphs, sync messages) and the internal "moved nothing"
//! condition raised when a simulation is asked to move from an empty square.
//!
//! Usage guidelines:
//! - Functions that parse or decode return `Result<..., ChessErrors>`.
//! - Callers should treat `CannotMoveFromEmptySquare` and `MissingKing` as a
//!   corrupted or hand-built invalid position rather than user input.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

/// Unified error type for the engine.
#[derive(Debug, Error)]
pub enum ChessErrors {
    /// An algebraic square such as `e4` failed to parse.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraicString(String),

    /// A FEN string had malformed structure or an unknown token.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A character is not one of the twelve piece glyphs.
    #[error("unknown piece glyph '{0}'")]
    InvalidPieceGlyph(char),

    /// A piece kind that may not be promoted to or summoned was requested.
    #[error("{0} is not a valid promotion or summon choice")]
    InvalidPieceChoice(String),

    /// A simulation was asked to move a piece from an empty square.
    #[error("no piece on origin square {0}")]
    CannotMoveFromEmptySquare(Square),

    /// A position does not hold exactly one king of the given color.
    #[error("position must contain exactly one {0:?} king")]
    MissingKing(Color),

    /// A perft worker thread died before reporting.
    #[error("perft worker thread panicked")]
    WorkerPanicked,

    /// A sync message or configuration blob failed to encode or decode.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
