//! Player abstraction shared by the search engine, the random player and the
//! match harness.

use crate::game_state::chess_types::{Board, Color};
use crate::search::search_engine::SearchResult;

pub trait Player: Send {
    fn name(&self) -> &str;

    /// Forget anything learned from a previous game.
    fn new_game(&mut self) {}

    /// Choose a move for `side`. `board` is never modified.
    ///
    /// Returns the none move when `side` has nothing to play.
    fn pick_best_move(&mut self, board: &Board, side: Color) -> SearchResult;
}
