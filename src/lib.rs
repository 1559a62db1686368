//! Crate root module declarations for the mailbox chess engine.
//!
//! Exposes the board model, move generation, search, players and utility
//! helpers so the binary, benches and external tooling share stable module
//! paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod mailbox;
    pub mod piece_square_tables;
    pub mod undo_stack;
}

pub mod moves {
    pub mod chess_move;
}

pub mod move_generation {
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod search_engine;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod match_harness;
    pub mod render_board;
}
