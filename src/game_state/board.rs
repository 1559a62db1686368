//! Padded mailbox board with incremental hash and score.
//!
//! `Board` is the central model for the engine. It stores signed piece codes in
//! a 10x12 grid and keeps a Zobrist hash and a material + piece-square score in
//! lock-step with the grid. [`Board::set_piece`] is the only writer of the grid,
//! which is what keeps both running values exact under make/unmake.

use std::ops::Index;
use std::sync::Arc;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::mailbox::{cell_of, is_border, square_of, MAILBOX64};
use crate::game_state::piece_square_tables::piece_square_value;
use crate::move_generation::move_generator;
use crate::moves::chess_move::Move;
use crate::search::zobrist::ZobristKeys;
use crate::utils::fen_parser::load_placement;

#[derive(Debug)]
pub struct Board {
    cells: [PieceCode; MAILBOX_SIZE],
    score: Score,
    hash: u64,
    flags: BoardFlags,
    keys: Arc<ZobristKeys>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(ZobristKeys::standard())
    }
}

impl Board {
    /// Empty board hashed with `keys`.
    pub fn new(keys: Arc<ZobristKeys>) -> Self {
        let mut cells = [EMPTY; MAILBOX_SIZE];
        for (cell, code) in cells.iter_mut().enumerate() {
            if is_border(cell) {
                *code = OUT_OF_BOUNDS;
            }
        }
        let hash = keys.flag_key(0);
        Self {
            cells,
            score: 0,
            hash,
            flags: 0,
            keys,
        }
    }

    /// Board in the standard starting position.
    pub fn starting_position() -> Self {
        let mut board = Self::default();
        board.setup_board();
        board
    }

    /// Board holding the placement field of `fen`; see [`Board::load_board_from_fen`].
    pub fn from_fen(fen: &str) -> Self {
        let mut board = Self::default();
        board.load_board_from_fen(fen);
        board
    }

    /// Remove every piece and reset the flags byte.
    pub fn clear(&mut self) {
        for sq in 0..BOARD_SIZE as Square {
            self.set_piece(cell_of(sq), EMPTY);
        }
        self.set_flags(0);
    }

    pub fn setup_board(&mut self) {
        self.load_board_from_fen(STARTING_POSITION_FEN);
    }

    /// Clear the board and place the pieces of a FEN placement field.
    ///
    /// Lenient by contract: unknown characters are skipped and anything after
    /// the first space is ignored.
    pub fn load_board_from_fen(&mut self, fen: &str) {
        self.clear();
        load_placement(self, fen);
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn flags(&self) -> BoardFlags {
        self.flags
    }

    #[inline]
    pub fn keys(&self) -> &Arc<ZobristKeys> {
        &self.keys
    }

    pub fn set_flags(&mut self, flags: BoardFlags) {
        self.hash ^= self.keys.flag_key(self.flags);
        self.flags = flags;
        self.hash ^= self.keys.flag_key(self.flags);
    }

    #[inline]
    pub fn piece_at_square(&self, square: Square) -> PieceCode {
        self.cells[cell_of(square)]
    }

    /// Write `code` into `cell`, keeping hash and score in sync.
    ///
    /// `cell` must be a real board cell; border cells are never written.
    pub fn set_piece(&mut self, cell: Cell, code: PieceCode) {
        debug_assert!(!is_border(cell), "write to border cell {cell}");
        let Some(square) = square_of(cell) else {
            return;
        };

        let previous = self.cells[cell];
        if previous != EMPTY {
            self.score -= piece_square_value(previous, square);
            self.hash ^= self.keys.piece_key(square, previous);
        }

        self.cells[cell] = code;

        if code != EMPTY {
            self.score += piece_square_value(code, square);
            self.hash ^= self.keys.piece_key(square, code);
        }
    }

    #[inline]
    pub fn set_piece_at_square(&mut self, square: Square, code: PieceCode) {
        self.set_piece(cell_of(square), code);
    }

    /// Append every pseudo-legal move for `side` to `moves`.
    pub fn generate_moves(&self, moves: &mut Vec<Move>, side: Color) {
        move_generator::generate_moves(self, side, moves);
    }

    /// Occupied squares in `a1..h8` order with their piece codes.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        MAILBOX64.iter().enumerate().filter_map(move |(sq, &cell)| {
            let code = self.cells[cell as usize];
            (code != EMPTY).then_some((sq as Square, code))
        })
    }

    /// Hash rebuilt from scratch; always equal to [`Board::zobrist_hash`].
    pub fn recompute_hash(&self) -> u64 {
        self.occupied()
            .fold(self.keys.flag_key(self.flags), |hash, (sq, code)| {
                hash ^ self.keys.piece_key(sq, code)
            })
    }

    /// Score rebuilt from scratch; always equal to [`Board::score`].
    pub fn recompute_score(&self) -> Score {
        self.occupied()
            .map(|(sq, code)| piece_square_value(code, sq))
            .sum()
    }
}

impl Index<Cell> for Board {
    type Output = PieceCode;

    #[inline]
    fn index(&self, cell: Cell) -> &PieceCode {
        &self.cells[cell]
    }
}

/// Copies replay piece placement instead of copying the running values.
impl Clone for Board {
    fn clone(&self) -> Self {
        let mut copy = Board::new(Arc::clone(&self.keys));
        copy.set_flags(self.flags);
        for (sq, code) in self.occupied() {
            copy.set_piece_at_square(sq, code);
        }
        debug_assert_eq!(copy.hash, self.hash);
        debug_assert_eq!(copy.score, self.score);
        copy
    }
}

/// Grid, flags, score and hash; the key table itself is not compared.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.flags == other.flags
            && self.score == other.score
            && self.hash == other.hash
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_zero_score_and_sentinel_border() {
        let board = Board::default();
        assert_eq!(board.score(), 0);
        assert_eq!(board[0], OUT_OF_BOUNDS);
        assert_eq!(board[119], OUT_OF_BOUNDS);
        assert_eq!(board[cell_of(0)], EMPTY);
        assert_eq!(board.zobrist_hash(), board.keys().flag_key(0));
    }

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::starting_position();
        assert_eq!(board.score(), 0);
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.piece_at_square(4), KING);
        assert_eq!(board.piece_at_square(59), -QUEEN);
    }

    #[test]
    fn copy_reproduces_hash_and_score() {
        let mut original = Board::starting_position();
        original.set_piece_at_square(12, EMPTY);
        original.set_piece_at_square(28, PAWN);
        original.set_flags(5);
        let copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.zobrist_hash(), original.zobrist_hash());
        assert_eq!(copy.score(), original.score());
    }

    #[test]
    fn incremental_values_match_recomputation() {
        let mut board = Board::default();
        let writes: [(Square, PieceCode); 9] = [
            (0, ROOK),
            (63, -ROOK),
            (27, QUEEN),
            (27, -KNIGHT),
            (0, EMPTY),
            (36, -PAWN),
            (36, PAWN),
            (12, KING),
            (27, EMPTY),
        ];
        for (sq, code) in writes {
            board.set_piece_at_square(sq, code);
            assert_eq!(board.zobrist_hash(), board.recompute_hash());
            assert_eq!(board.score(), board.recompute_score());
        }
    }

    #[test]
    fn flags_toggle_hash_reversibly() {
        let mut board = Board::starting_position();
        let before = board.zobrist_hash();
        board.set_flags(3);
        assert_ne!(board.zobrist_hash(), before);
        assert_eq!(board.zobrist_hash(), board.recompute_hash());
        board.set_flags(0);
        assert_eq!(board.zobrist_hash(), before);
    }

    #[test]
    fn alternate_key_table_changes_hash_only() {
        let standard = Board::starting_position();
        let mut other = Board::new(Arc::new(ZobristKeys::from_seed(99)));
        other.setup_board();
        assert_eq!(other.score(), standard.score());
        assert_ne!(other.zobrist_hash(), standard.zobrist_hash());
    }

    #[test]
    fn reload_clears_previous_pieces() {
        let mut board = Board::starting_position();
        board.load_board_from_fen("4k3/8/8/8/8/8/8/4K3");
        assert_eq!(board.occupied().count(), 2);
        assert_eq!(board.score(), 0);
    }
}
