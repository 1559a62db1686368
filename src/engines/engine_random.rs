//! Random-move player.
//!
//! Selects uniformly from the generated moves; used as a sparring partner in
//! self-play and for diagnostics.

use std::time::Instant;

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::Player;
use crate::game_state::chess_types::{Board, Color};
use crate::moves::chess_move::Move;
use crate::search::search_engine::SearchResult;

pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Player whose choices repeat for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn pick_best_move(&mut self, board: &Board, side: Color) -> SearchResult {
        let started = Instant::now();
        let mut moves = Vec::with_capacity(64);
        board.generate_moves(&mut moves, side);

        let best_move = moves.choose(&mut self.rng).copied().unwrap_or(Move::NONE);
        log::debug!("random player picked {best_move} from {} moves", moves.len());

        SearchResult {
            best_move,
            score: 0,
            reached_depth: 0,
            nodes: moves.len() as u64,
            elapsed: started.elapsed(),
        }
    }
}
