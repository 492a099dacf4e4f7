//! Crate root module declarations for the hop chess rules engine.
//!
//! This file exposes the subsystems (board model, raw movement, legal move
//! generation, status evaluation, move history, the game orchestrator with
//! its sync messages, and text helpers) so the demo binary, tests and
//! benchmarks can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod king_summon;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod move_generator;
    pub mod perft;
}

pub mod game_status {
    pub mod evaluator;
    pub mod repetition;
}

pub mod history {
    pub mod analysis_line;
    pub mod history_tree;
    pub mod move_record;
}

pub mod game {
    pub mod config;
    pub mod game;
    pub mod sync;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
