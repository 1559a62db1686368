//! Canonical chess-rule constants.
//!
//! Static rule literals: the starting placement, pawn start/promotion ranks
//! and the movement offsets expressed in padded mailbox units.

use crate::game_state::chess_types::MAILBOX_W;

/// Standard starting position. Only the placement field is read by the loader.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// 0-based ranks the pawns of each side start on.
pub const LIGHT_PAWN_START_RANK: usize = 1;
pub const DARK_PAWN_START_RANK: usize = 6;

pub const KNIGHT_OFFSETS: [isize; 8] = [
    MAILBOX_W + 2,
    MAILBOX_W - 2,
    -MAILBOX_W + 2,
    -MAILBOX_W - 2,
    2 * MAILBOX_W + 1,
    2 * MAILBOX_W - 1,
    -2 * MAILBOX_W + 1,
    -2 * MAILBOX_W - 1,
];

pub const DIAGONAL_OFFSETS: [isize; 4] = [MAILBOX_W + 1, MAILBOX_W - 1, -MAILBOX_W + 1, -MAILBOX_W - 1];

pub const ORTHOGONAL_OFFSETS: [isize; 4] = [1, -1, MAILBOX_W, -MAILBOX_W];

pub const KING_OFFSETS: [isize; 8] = [
    1,
    -1,
    MAILBOX_W,
    -MAILBOX_W,
    MAILBOX_W + 1,
    MAILBOX_W - 1,
    -MAILBOX_W + 1,
    -MAILBOX_W - 1,
];
