//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct indexing by `hash % capacity` with no chaining. A slot is replaced
//! when empty, when the new entry was searched deeper, or on a one-in-three
//! coin flip so that an old deep entry cannot pin a slot forever. Colliding
//! positions overwrite each other; that loss is accepted.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::Score;

/// Default slot count: a prime just under 2^20.
pub const DEFAULT_TT_CAPACITY: usize = 1_048_573;

/// Score value marking an unused slot.
pub const EMPTY_SCORE: Score = Score::MAX;

const DEFAULT_REPLACEMENT_SEED: u64 = 0x7a5c_3e11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: Score,
}

impl TTEntry {
    pub const EMPTY: TTEntry = TTEntry {
        hash: 0,
        depth: 0,
        score: EMPTY_SCORE,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.score == EMPTY_SCORE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    rng: StdRng,
    stats: TTStats,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_CAPACITY)
    }
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self::with_seed(capacity, DEFAULT_REPLACEMENT_SEED)
    }

    /// Table whose replacement coin is drawn from `seed`.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self {
            entries: vec![TTEntry::EMPTY; capacity.max(1)],
            rng: StdRng::seed_from_u64(seed),
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
        self.stats = TTStats::default();
    }

    #[inline]
    fn idx(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Entry for `hash` searched to at least `min_depth`.
    pub fn lookup(&mut self, hash: u64, min_depth: u8) -> Option<TTEntry> {
        self.stats.probes += 1;
        let entry = self.entries[self.idx(hash)];
        if entry.is_empty() || entry.hash != hash || entry.depth < min_depth {
            return None;
        }
        self.stats.hits += 1;
        Some(entry)
    }

    pub fn insert(&mut self, hash: u64, depth: u8, score: Score) {
        debug_assert_ne!(score, EMPTY_SCORE, "score collides with the empty marker");
        let idx = self.idx(hash);
        let slot = self.entries[idx];
        let replace = slot.is_empty() || slot.depth < depth || self.rng.random_ratio(1, 3);
        if replace {
            self.entries[idx] = TTEntry { hash, depth, score };
            self.stats.stores += 1;
        }
    }
}
