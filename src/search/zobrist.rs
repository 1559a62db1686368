//! Zobrist key tables for incremental position hashing.
//!
//! Keys are drawn from a seeded generator so hashes are deterministic across
//! runs. A table is an ordinary immutable value handed to every [`Board`] by
//! `Arc`; tests can build alternates from other seeds.
//!
//! [`Board`]: crate::game_state::board::Board

use std::sync::{Arc, OnceLock};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::game_state::chess_types::*;

/// Seed of the process-wide default table.
pub const DEFAULT_ZOBRIST_SEED: u64 = 5489;

const PIECE_CODE_SLOTS: usize = 16;
const PIECE_CODE_BIAS: isize = 8;
const FLAG_VALUES: usize = 256;

const KEY_MIN: u64 = 1 << 61;
const KEY_MAX: u64 = 1 << 62;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    piece_square: Vec<u64>,
    flags: [u64; FLAG_VALUES],
}

static STANDARD: OnceLock<Arc<ZobristKeys>> = OnceLock::new();

impl ZobristKeys {
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_square = vec![0u64; BOARD_SIZE * PIECE_CODE_SLOTS];
        for key in &mut piece_square {
            *key = rng.random_range(KEY_MIN..=KEY_MAX);
        }

        let mut flags = [0u64; FLAG_VALUES];
        for key in &mut flags {
            *key = rng.random_range(KEY_MIN..=KEY_MAX);
        }

        Self {
            piece_square,
            flags,
        }
    }

    /// Shared table built once from [`DEFAULT_ZOBRIST_SEED`].
    pub fn standard() -> Arc<ZobristKeys> {
        STANDARD
            .get_or_init(|| Arc::new(ZobristKeys::from_seed(DEFAULT_ZOBRIST_SEED)))
            .clone()
    }

    /// Key for `code` standing on compact `square`.
    #[inline]
    pub fn piece_key(&self, square: Square, code: PieceCode) -> u64 {
        let slot = (code as isize + PIECE_CODE_BIAS) as usize;
        debug_assert!(slot < PIECE_CODE_SLOTS, "piece code {code} has no key");
        self.piece_square[square as usize * PIECE_CODE_SLOTS + slot]
    }

    #[inline]
    pub fn flag_key(&self, flags: BoardFlags) -> u64 {
        self.flags[flags as usize]
    }
}
