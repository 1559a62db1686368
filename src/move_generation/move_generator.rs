//! Pseudo-legal move generation over the padded mailbox.
//!
//! Every offset walk relies on the border sentinels: stepping off the 8x8 area
//! lands on an `OUT_OF_BOUNDS` cell, which no target rule accepts. No king
//! safety test is made, so moves that leave the mover's king attacked are
//! still produced.

use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::mailbox::{cell_of, offset_cell};
use crate::moves::chess_move::Move;

/// Which destinations a single step may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    /// Empty cell only.
    Quiet,
    /// Enemy piece only.
    Loud,
    /// Empty cell or enemy piece.
    Generic,
}

/// How an accepted step is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAs {
    Quiet,
    Capture,
    /// Capture when the destination is occupied, quiet otherwise.
    ByTarget,
    /// Queen and knight promotions, as captures or pushes alike.
    Promotion,
}

#[inline]
fn is_enemy(mover: PieceCode, target: PieceCode) -> bool {
    target != EMPTY && target != OUT_OF_BOUNDS && (mover < 0) != (target < 0)
}

#[inline]
pub fn target_allowed(rule: TargetRule, board: &Board, from: Cell, to: Cell) -> bool {
    let target = board[to];
    match rule {
        TargetRule::Quiet => target == EMPTY,
        TargetRule::Loud => is_enemy(board[from], target),
        TargetRule::Generic => target == EMPTY || is_enemy(board[from], target),
    }
}

#[inline]
fn record(record: RecordAs, board: &Board, from: Cell, to: Cell, out: &mut Vec<Move>) {
    match record {
        RecordAs::Quiet => out.push(Move::quiet(from, to)),
        RecordAs::Capture => out.push(Move::capture(from, to)),
        RecordAs::ByTarget => {
            if board[to] == EMPTY {
                out.push(Move::quiet(from, to));
            } else {
                out.push(Move::capture(from, to));
            }
        }
        RecordAs::Promotion => {
            let side = if board[from] < 0 {
                Color::Dark
            } else {
                Color::Light
            };
            out.push(Move::promotion(from, to, side.piece(QUEEN)));
            out.push(Move::promotion(from, to, side.piece(KNIGHT)));
        }
    }
}

/// Record `from -> to` when `rule` accepts it; returns whether it did.
#[inline]
fn try_add(
    board: &Board,
    from: Cell,
    to: Cell,
    rule: TargetRule,
    record_as: RecordAs,
    out: &mut Vec<Move>,
) -> bool {
    if target_allowed(rule, board, from, to) {
        record(record_as, board, from, to, out);
        true
    } else {
        false
    }
}

/// Walk `offset` through empty cells, then take one enemy piece if it blocks.
fn add_slide(board: &Board, from: Cell, offset: isize, out: &mut Vec<Move>) {
    let mut to = offset_cell(from, offset);
    while try_add(board, from, to, TargetRule::Quiet, RecordAs::Quiet, out) {
        to = offset_cell(to, offset);
    }
    try_add(board, from, to, TargetRule::Loud, RecordAs::Capture, out);
}

fn add_steps(board: &Board, from: Cell, offsets: &[isize], out: &mut Vec<Move>) {
    for &offset in offsets {
        try_add(
            board,
            from,
            offset_cell(from, offset),
            TargetRule::Generic,
            RecordAs::ByTarget,
            out,
        );
    }
}

fn add_pawn_moves(board: &Board, from: Cell, square: Square, side: Color, out: &mut Vec<Move>) {
    let rank = square as usize / BOARD_DIM;
    let (forward, start_rank, last_push_rank) = match side {
        Color::Light => (MAILBOX_W, LIGHT_PAWN_START_RANK, 6),
        Color::Dark => (-MAILBOX_W, DARK_PAWN_START_RANK, 1),
    };
    let (capture_as, push_as) = if rank == last_push_rank {
        (RecordAs::Promotion, RecordAs::Promotion)
    } else {
        (RecordAs::Capture, RecordAs::Quiet)
    };

    let push = offset_cell(from, forward);
    try_add(board, from, offset_cell(push, 1), TargetRule::Loud, capture_as, out);
    try_add(board, from, offset_cell(push, -1), TargetRule::Loud, capture_as, out);
    if try_add(board, from, push, TargetRule::Quiet, push_as, out) && rank == start_rank {
        try_add(
            board,
            from,
            offset_cell(push, forward),
            TargetRule::Quiet,
            RecordAs::Quiet,
            out,
        );
    }
}

/// Append every pseudo-legal move for `side` to `out`.
pub fn generate_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    for square in 0..BOARD_SIZE as Square {
        let from = cell_of(square);
        let piece = board[from];
        if !side.owns(piece) {
            continue;
        }

        match piece.abs() {
            PAWN => add_pawn_moves(board, from, square, side, out),
            KNIGHT => add_steps(board, from, &KNIGHT_OFFSETS, out),
            BISHOP => {
                for offset in DIAGONAL_OFFSETS {
                    add_slide(board, from, offset, out);
                }
            }
            ROOK => {
                for offset in ORTHOGONAL_OFFSETS {
                    add_slide(board, from, offset, out);
                }
            }
            QUEEN => {
                for offset in DIAGONAL_OFFSETS.into_iter().chain(ORTHOGONAL_OFFSETS) {
                    add_slide(board, from, offset, out);
                }
            }
            KING => add_steps(board, from, &KING_OFFSETS, out),
            _ => debug_assert!(false, "unknown piece code {piece}"),
        }
    }
}

/// Number of pseudo-legal moves `side` has; the evaluator's mobility term.
pub fn count_moves(board: &Board, side: Color) -> usize {
    let mut moves = Vec::with_capacity(64);
    generate_moves(board, side, &mut moves);
    moves.len()
}

/// Number of distinct `(from, to)` pairs `side` can play; the two promotion
/// choices on one square count once.
pub fn count_destinations(board: &Board, side: Color) -> usize {
    let mut moves = Vec::with_capacity(64);
    generate_moves(board, side, &mut moves);
    moves.dedup_by_key(|mv| (mv.from, mv.to));
    moves.len()
}
