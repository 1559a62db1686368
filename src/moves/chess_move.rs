//! Move descriptors and the reversible make/unmake protocol.
//!
//! A [`Move`] is a small `Copy` value: kind, source and destination cells and
//! one auxiliary byte. `make` mutates a board in place and records whatever it
//! overwrote on an [`UndoStack`]; `unmake` pops exactly those values back in
//! reverse order. The pair is what lets search reuse one board for the whole
//! tree.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::game_state::mailbox::square_of;
use crate::utils::algebraic::square_to_algebraic;

/// Placeholder for a scratch score that has not been computed.
pub const SCORE_NOT_YET_DETERMINED: Score = Score::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Piece moves to an empty cell.
    Quiet,
    /// Piece moves onto (and removes) whatever holds the destination.
    Capture,
    /// Pawn reaches the last rank; `aux` is the signed promoted code.
    Promotion,
    /// Move that also replaces the board flags with `aux`.
    ChangeFlag,
    /// No move: empty position or an aborted search.
    #[default]
    None,
}

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub kind: MoveKind,
    pub from: u8,
    pub to: u8,
    pub aux: i8,
    /// Ordering scratch, not part of the move's identity.
    pub score: Score,
    /// Ordering scratch, not part of the move's identity.
    pub hash: u64,
}

impl Default for Move {
    fn default() -> Self {
        Self::NONE
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.from == other.from
            && self.to == other.to
            && self.aux == other.aux
    }
}

impl Eq for Move {}

impl Move {
    pub const NONE: Move = Move {
        kind: MoveKind::None,
        from: 0,
        to: 0,
        aux: 0,
        score: SCORE_NOT_YET_DETERMINED,
        hash: 0,
    };

    #[inline]
    pub const fn new(kind: MoveKind, from: Cell, to: Cell, aux: i8) -> Self {
        Self {
            kind,
            from: from as u8,
            to: to as u8,
            aux,
            score: SCORE_NOT_YET_DETERMINED,
            hash: 0,
        }
    }

    #[inline]
    pub const fn quiet(from: Cell, to: Cell) -> Self {
        Self::new(MoveKind::Quiet, from, to, 0)
    }

    #[inline]
    pub const fn capture(from: Cell, to: Cell) -> Self {
        Self::new(MoveKind::Capture, from, to, 0)
    }

    #[inline]
    pub const fn promotion(from: Cell, to: Cell, promoted: PieceCode) -> Self {
        Self::new(MoveKind::Promotion, from, to, promoted)
    }

    #[inline]
    pub const fn change_flag(from: Cell, to: Cell, flags: BoardFlags) -> Self {
        Self::new(MoveKind::ChangeFlag, from, to, flags as i8)
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.kind == MoveKind::None
    }

    #[inline]
    pub fn from_cell(&self) -> Cell {
        self.from as Cell
    }

    #[inline]
    pub fn to_cell(&self) -> Cell {
        self.to as Cell
    }

    /// Whether the move can remove an enemy piece (used for "loud" counts).
    #[inline]
    pub fn is_capture_kind(&self) -> bool {
        matches!(self.kind, MoveKind::Capture)
    }

    pub fn make(&self, board: &mut Board, stack: &mut UndoStack) {
        let (from, to) = (self.from_cell(), self.to_cell());
        match self.kind {
            MoveKind::Quiet => {
                board.set_piece(to, board[from]);
                board.set_piece(from, EMPTY);
            }
            MoveKind::Capture => {
                stack.push(i32::from(board[to]));
                stack.push(i32::from(board[from]));
                board.set_piece(to, board[from]);
                board.set_piece(from, EMPTY);
            }
            MoveKind::Promotion => {
                stack.push(i32::from(board[to]));
                stack.push(i32::from(board[from]));
                board.set_piece(to, self.aux);
                board.set_piece(from, EMPTY);
            }
            MoveKind::ChangeFlag => {
                stack.push(i32::from(board.flags()));
                stack.push(i32::from(board[to]));
                stack.push(i32::from(board[from]));
                board.set_piece(to, board[from]);
                board.set_piece(from, EMPTY);
                board.set_flags(self.aux as BoardFlags);
            }
            MoveKind::None => {
                debug_assert!(false, "make called on the none move");
            }
        }
    }

    pub fn unmake(&self, board: &mut Board, stack: &mut UndoStack) {
        let (from, to) = (self.from_cell(), self.to_cell());
        match self.kind {
            MoveKind::Quiet => {
                board.set_piece(from, board[to]);
                board.set_piece(to, EMPTY);
            }
            MoveKind::Capture | MoveKind::Promotion => {
                board.set_piece(from, stack.pop() as PieceCode);
                board.set_piece(to, stack.pop() as PieceCode);
            }
            MoveKind::ChangeFlag => {
                board.set_piece(from, stack.pop() as PieceCode);
                board.set_piece(to, stack.pop() as PieceCode);
                board.set_flags(stack.pop() as BoardFlags);
            }
            MoveKind::None => {
                debug_assert!(false, "unmake called on the none move");
            }
        }
    }
}

/// Long algebraic form (`e2e4`, `e7e8q`); the none move prints as `0000`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "0000");
        }
        let (Some(from), Some(to)) = (square_of(self.from_cell()), square_of(self.to_cell()))
        else {
            return write!(f, "????");
        };
        write!(f, "{}{}", square_to_algebraic(from), square_to_algebraic(to))?;
        if self.kind == MoveKind::Promotion {
            let letter = piece_letter(self.aux).to_ascii_lowercase();
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}
