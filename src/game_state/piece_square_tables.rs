//! Material values and piece-square tables feeding the board's incremental score.
//!
//! Tables are written from Light's point of view with `a1` first; Dark reads
//! them through [`mirror`]. Material is in tenths of a centipawn so the table
//! bonuses stay small next to it.

use crate::game_state::chess_types::*;
use crate::game_state::mailbox::mirror;

pub const PAWN_VALUE: Score = 1000;
pub const KNIGHT_VALUE: Score = 3200;
pub const BISHOP_VALUE: Score = 3300;
pub const ROOK_VALUE: Score = 5000;
pub const QUEEN_VALUE: Score = 9000;
pub const KING_VALUE: Score = 100_000;

#[rustfmt::skip]
pub const PAWN_TABLE: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHT_TABLE: [Score; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
pub const BISHOP_TABLE: [Score; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
pub const ROOK_TABLE: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
pub const QUEEN_TABLE: [Score; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
pub const KING_MIDDLE_GAME_TABLE: [Score; 64] = [
     20, 30, 10,  0,  0, 10, 30, 20,
     20, 20,  0,  0,  0,  0, 20, 20,
    -10,-20,-20,-20,-20,-20,-20,-10,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
];

#[rustfmt::skip]
pub const KING_END_GAME_TABLE: [Score; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

/// Square index into a Light-oriented table for a piece of the given sign.
#[inline]
pub fn table_square(code: PieceCode, square: Square) -> usize {
    if code < 0 {
        mirror(square) as usize
    } else {
        square as usize
    }
}

/// Signed contribution of `code` standing on `square` to the incremental score.
///
/// Kings use the middle-game table; end-game weighting is an evaluator option.
pub fn piece_square_value(code: PieceCode, square: Square) -> Score {
    let idx = table_square(code, square);
    let sign = if code < 0 { -1 } else { 1 };
    let unsigned = match code.abs() {
        PAWN => PAWN_VALUE + PAWN_TABLE[idx],
        KNIGHT => KNIGHT_VALUE + KNIGHT_TABLE[idx],
        BISHOP => BISHOP_VALUE + BISHOP_TABLE[idx],
        ROOK => ROOK_VALUE + ROOK_TABLE[idx],
        QUEEN => QUEEN_VALUE + QUEEN_TABLE[idx],
        KING => KING_VALUE + KING_MIDDLE_GAME_TABLE[idx],
        _ => {
            debug_assert!(false, "no score for piece code {code}");
            0
        }
    };
    unsigned * sign
}
