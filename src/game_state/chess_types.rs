//! Core scalar types and piece codes shared by the board, move generation and search.
//!
//! Pieces are stored as signed `i8` codes directly in the mailbox grid: the
//! magnitude selects the piece kind and the sign selects the side (positive for
//! Light, negative for Dark). Border cells of the grid hold `OUT_OF_BOUNDS`.

pub use crate::game_state::board::Board;
pub use crate::game_state::undo_stack::UndoStack;

/// Signed piece code stored in a mailbox cell.
pub type PieceCode = i8;

/// Signed evaluation score, positive favoring Light unless stated otherwise.
pub type Score = i32;

/// Index into the padded 10x12 grid (`0..120`).
pub type Cell = usize;

/// Compact board square index (`0..64`, rank-major, `0 == a1`, `63 == h8`).
pub type Square = u8;

/// Reserved state byte (castling / first-move bits in a future extension).
pub type BoardFlags = u8;

pub const BOARD_SIZE: usize = 64;
pub const BOARD_DIM: usize = 8;

pub const MAILBOX_SIZE: usize = 120;
pub const MAILBOX_W: isize = 10;
pub const MAILBOX_H: isize = 12;

pub const EMPTY: PieceCode = 0;
pub const PAWN: PieceCode = 1;
pub const KNIGHT: PieceCode = 2;
pub const BISHOP: PieceCode = 3;
pub const ROOK: PieceCode = 4;
pub const QUEEN: PieceCode = 5;
pub const KING: PieceCode = 6;
pub const OUT_OF_BOUNDS: PieceCode = 100;

/// Largest representable score; negating it never overflows.
pub const SCORE_INFINITY: Score = Score::MAX;

/// Score of a node whose side to move has no moves. Kept one inside the
/// window bounds so neither it nor its negation reads as an empty table slot.
pub const SCORE_LOSS: Score = -(SCORE_INFINITY - 1);

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// `+1` for Light, `-1` for Dark; the negamax perspective multiplier.
    #[inline]
    pub const fn sign(self) -> Score {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Apply this side's sign to an unsigned piece kind code.
    #[inline]
    pub const fn piece(self, kind: PieceCode) -> PieceCode {
        match self {
            Color::Light => kind,
            Color::Dark => -kind,
        }
    }

    /// Whether `code` is a real piece belonging to this side.
    #[inline]
    pub const fn owns(self, code: PieceCode) -> bool {
        if code == EMPTY || code == OUT_OF_BOUNDS {
            return false;
        }
        match self {
            Color::Light => code > 0,
            Color::Dark => code < 0,
        }
    }

    /// Side letter used by the diagnostic board dump.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Color::Light => 'w',
            Color::Dark => 'b',
        }
    }
}

/// Side owning a non-empty, on-board piece code.
#[inline]
pub fn color_of(code: PieceCode) -> Option<Color> {
    match code {
        EMPTY | OUT_OF_BOUNDS => None,
        c if c > 0 => Some(Color::Light),
        _ => Some(Color::Dark),
    }
}

/// Uppercase piece letter for a signed code, `' '` for empty and `'?'` otherwise.
pub fn piece_letter(code: PieceCode) -> char {
    if code == OUT_OF_BOUNDS {
        return '?';
    }
    match code.abs() {
        PAWN => 'P',
        KNIGHT => 'N',
        BISHOP => 'B',
        ROOK => 'R',
        QUEEN => 'Q',
        KING => 'K',
        0 => ' ',
        _ => '?',
    }
}
