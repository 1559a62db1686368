//! Square, side and move conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices, and resolves long-algebraic move text against the moves a
//! board generates.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Convert algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> EngineResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!((square as usize) < BOARD_SIZE);
    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    format!("{file_char}{rank_char}")
}

/// Parse a side name: `w`/`white` or `b`/`black`, case-insensitive.
pub fn parse_color(text: &str) -> EngineResult<Color> {
    match text.to_ascii_lowercase().as_str() {
        "w" | "white" | "light" => Ok(Color::Light),
        "b" | "black" | "dark" => Ok(Color::Dark),
        _ => Err(EngineError::InvalidSide(text.to_owned())),
    }
}

/// Find the generated move for `side` whose long-algebraic form is `text`.
pub fn find_move(board: &Board, side: Color, text: &str) -> EngineResult<Move> {
    let mut moves = Vec::with_capacity(64);
    board.generate_moves(&mut moves, side);
    let wanted = text.trim().to_ascii_lowercase();
    moves
        .into_iter()
        .find(|mv| mv.to_string() == wanted)
        .ok_or(EngineError::UnknownMove(wanted))
}
