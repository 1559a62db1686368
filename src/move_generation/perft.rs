//! Perft: count move sequences to a fixed depth.
//!
//! Runs on a single board with make/unmake, so it exercises generation and
//! the undo protocol together. Counts are pseudo-legal: no check filtering.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
    }
}

/// Perft from `board` with `side` to move. `board` is left unchanged.
pub fn perft(board: &mut Board, side: Color, depth: u8) -> PerftCounts {
    let mut stack = UndoStack::with_capacity(usize::from(depth) * 3);
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(board, &mut stack, side, depth, &mut counts);
    debug_assert!(stack.is_empty());
    counts
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(board: &mut Board, side: Color, depth: u8) -> Vec<(Move, PerftCounts)> {
    let mut stack = UndoStack::new();
    let mut moves = Vec::with_capacity(64);
    board.generate_moves(&mut moves, side);

    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut counts = PerftCounts::default();
        if depth <= 1 {
            record_leaf(board, &mv, &mut counts);
        } else {
            mv.make(board, &mut stack);
            perft_recurse(board, &mut stack, side.opposite(), depth - 1, &mut counts);
            mv.unmake(board, &mut stack);
        }
        out.push((mv, counts));
    }
    out
}

/// Sum of a divide listing.
pub fn total(divide: &[(Move, PerftCounts)]) -> PerftCounts {
    let mut sum = PerftCounts::default();
    for (_, counts) in divide {
        sum.merge(*counts);
    }
    sum
}

fn record_leaf(board: &Board, mv: &Move, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if board[mv.to_cell()] != EMPTY {
        counts.captures += 1;
    }
    if mv.kind == MoveKind::Promotion {
        counts.promotions += 1;
    }
}

fn perft_recurse(
    board: &mut Board,
    stack: &mut UndoStack,
    side: Color,
    depth: u8,
    counts: &mut PerftCounts,
) {
    let mut moves = Vec::with_capacity(64);
    board.generate_moves(&mut moves, side);

    if depth == 1 {
        for mv in &moves {
            record_leaf(board, mv, counts);
        }
        return;
    }

    for mv in moves {
        mv.make(board, stack);
        perft_recurse(board, stack, side.opposite(), depth - 1, counts);
        mv.unmake(board, stack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut board = Board::starting_position();
        assert_eq!(
            perft(&mut board, Color::Light, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn starting_position_node_counts() {
        let mut board = Board::starting_position();
        let expected = [1, 20, 400, 8902];
        for (depth, nodes) in expected.into_iter().enumerate() {
            let counts = perft(&mut board, Color::Light, depth as u8);
            assert_eq!(counts.nodes, nodes, "perft({depth})");
        }
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn starting_position_captures_at_depth_three() {
        let mut board = Board::starting_position();
        let counts = perft(&mut board, Color::Light, 3);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.promotions, 0);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::starting_position();
        let divide = perft_divide(&mut board, Color::Light, 3);
        assert_eq!(divide.len(), 20);
        assert_eq!(total(&divide), perft(&mut board, Color::Light, 3));
        assert!(divide.iter().all(|(_, c)| c.nodes > 0));
    }

    #[test]
    fn promotions_are_counted_twice_per_square() {
        let mut board = Board::from_fen("1n6/P7/8/8/8/8/8/8");
        let counts = perft(&mut board, Color::Light, 1);
        assert_eq!(counts.nodes, 4);
        assert_eq!(counts.promotions, 4);
        assert_eq!(counts.captures, 2);
    }

    #[test]
    fn board_hash_and_score_survive_deep_walk() {
        let mut board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R");
        let before = board.clone();
        perft(&mut board, Color::Light, 3);
        assert_eq!(board, before);
        assert_eq!(board.zobrist_hash(), board.recompute_hash());
        assert_eq!(board.score(), board.recompute_score());
    }
}
