//! Time-bounded iterative deepening over negamax with alpha-beta pruning.
//!
//! The engine owns everything a search mutates: one transposition table per
//! side to move, the undo stack and the scorer. The caller's board is copied
//! once per search and the copy is walked in place with make/unmake.
//!
//! Cancellation is cooperative. The deadline is read only at nodes of depth
//! `deadline_poll_depth` or more, before and after the move loop; an expired
//! deadline makes that node return the none move with score 0, which the
//! driver treats as "this depth did not finish".

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use crate::engines::engine_trait::Player;
use crate::engines::time_management::TimeBudget;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, ScoreFunction};
use crate::search::transposition_table::{TTStats, TranspositionTable, DEFAULT_TT_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub time_budget: TimeBudget,
    /// First iterative-deepening depth.
    pub start_depth: u8,
    pub max_depth: u8,
    /// Nodes deeper than this sort their moves by a one-ply estimate.
    pub ordering_depth: u8,
    /// Nodes at least this deep check the deadline.
    pub deadline_poll_depth: u8,
    /// Slots per transposition table.
    pub tt_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: TimeBudget::default(),
            start_depth: 3,
            max_depth: 64,
            ordering_depth: 4,
            deadline_poll_depth: 4,
            tt_capacity: DEFAULT_TT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Move from the deepest completed pass; the none move if no pass completed.
    pub best_move: Move,
    /// Score of `best_move` from the mover's point of view.
    pub score: Score,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self {
            best_move: Move::NONE,
            score: 0,
            reached_depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
        }
    }
}

pub struct SearchEngine<S: BoardScorer = ScoreFunction> {
    config: SearchConfig,
    scorer: S,
    tables: [TranspositionTable; 2],
    stack: UndoStack,
    nodes: u64,
}

impl SearchEngine<ScoreFunction> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, ScoreFunction::default())
    }
}

impl Default for SearchEngine<ScoreFunction> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: BoardScorer> SearchEngine<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> Self {
        Self {
            config,
            scorer,
            tables: [
                TranspositionTable::new(config.tt_capacity),
                TranspositionTable::new(config.tt_capacity),
            ],
            stack: UndoStack::with_capacity(256),
            nodes: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_time_budget(&mut self, budget: TimeBudget) {
        self.config.time_budget = budget;
    }

    #[inline]
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Light's table first, then Dark's.
    pub fn tt_stats(&self) -> [TTStats; 2] {
        [self.tables[0].stats(), self.tables[1].stats()]
    }

    pub fn clear_tables(&mut self) {
        for table in &mut self.tables {
            table.clear();
        }
    }

    /// Run iterative deepening on a private copy of `board`.
    pub fn pick_best_move(&mut self, board: &Board, side: Color) -> SearchResult {
        let started = Instant::now();
        let deadline = self.config.time_budget.deadline_from(started);
        let mut copy = board.clone();
        self.nodes = 0;
        self.stack.clear();

        let mut result = SearchResult::default();
        let first = self.config.start_depth.max(1);
        for depth in first..=self.config.max_depth {
            let (best_move, score) = self.negamax(
                &mut copy,
                side,
                depth,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                deadline,
            );
            if best_move.is_none() {
                log::debug!(
                    "depth {depth} did not complete after {:?}",
                    started.elapsed()
                );
                break;
            }
            result.best_move = best_move;
            result.score = score;
            result.reached_depth = depth;
            log::debug!(
                "depth {depth}: {best_move} score {score} nodes {}",
                self.nodes
            );
        }
        debug_assert!(self.stack.is_empty());
        debug_assert_eq!(&copy, board);

        result.nodes = self.nodes;
        result.elapsed = started.elapsed();
        log::info!(
            "search {:?}: {} score {} depth {} nodes {} in {:?}",
            side,
            result.best_move,
            result.score,
            result.reached_depth,
            result.nodes,
            result.elapsed
        );
        result
    }

    /// Search `board` to `depth` with `side` to move.
    ///
    /// Returns the best move and its score from `side`'s point of view. A
    /// position where `side` has no moves scores [`SCORE_LOSS`].
    /// When no cutoff happens the score lies in `[alpha, beta]`; a score of
    /// `beta` or more means the window was refuted. A depth-0 call returns the
    /// signed static evaluation.
    pub fn negamax(
        &mut self,
        board: &mut Board,
        side: Color,
        depth: u8,
        alpha: Score,
        beta: Score,
        deadline: Instant,
    ) -> (Move, Score) {
        self.search(board, side, depth, 0, alpha, beta, deadline)
    }

    #[allow(clippy::too_many_arguments)]
    fn search(
        &mut self,
        board: &mut Board,
        side: Color,
        depth: u8,
        ply: u16,
        mut alpha: Score,
        beta: Score,
        deadline: Instant,
    ) -> (Move, Score) {
        self.nodes += 1;
        let sign = side.sign();

        // A root hit would leave no move to play.
        if ply > 0 {
            if let Some(entry) = self.tables[side.index()].lookup(board.zobrist_hash(), depth) {
                return (Move::NONE, entry.score * sign);
            }
        }

        if depth == 0 {
            return (Move::NONE, self.scorer.score(board) * sign);
        }

        let mut moves = Vec::with_capacity(64);
        board.generate_moves(&mut moves, side);

        if depth > self.config.ordering_depth {
            self.order_moves(board, side, &mut moves);
        }

        let polls = depth >= self.config.deadline_poll_depth;
        if polls && Instant::now() >= deadline {
            return (Move::NONE, 0);
        }

        let original_alpha = alpha;
        let mut best_move = Move::NONE;
        let mut best = if moves.is_empty() { SCORE_LOSS } else { -SCORE_INFINITY };

        for mv in &moves {
            mv.make(board, &mut self.stack);
            let (_, child) = self.search(
                board,
                side.opposite(),
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                deadline,
            );
            mv.unmake(board, &mut self.stack);
            let score = -child;

            if score > best {
                best = score;
                best_move = *mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        if polls && Instant::now() >= deadline {
            return (Move::NONE, 0);
        }

        self.tables[side.index()].insert(board.zobrist_hash(), depth, best * sign);

        let score = if best >= beta {
            best
        } else {
            best.max(original_alpha)
        };
        (best_move, score)
    }

    /// Sort `moves` best-first for `side` using a one-ply estimate.
    ///
    /// The estimate is a cached score for the resulting position when the
    /// opponent's table has one, otherwise the board's running score.
    fn order_moves(&mut self, board: &mut Board, side: Color, moves: &mut [Move]) {
        let replies = side.opposite().index();
        for mv in moves.iter_mut() {
            mv.make(board, &mut self.stack);
            mv.hash = board.zobrist_hash();
            mv.score = match self.tables[replies].lookup(mv.hash, 0) {
                Some(entry) => entry.score,
                None => board.score(),
            };
            mv.unmake(board, &mut self.stack);
        }
        let sign = side.sign();
        moves.sort_by_key(|mv| Reverse(mv.score.saturating_mul(sign)));
        log::trace!(
            "ordered {} moves for {:?}, first {}",
            moves.len(),
            side,
            moves.first().copied().unwrap_or(Move::NONE)
        );
    }
}

impl<S: BoardScorer> Player for SearchEngine<S> {
    fn name(&self) -> &str {
        "Mailbox Negamax"
    }

    fn new_game(&mut self) {
        self.clear_tables();
    }

    fn pick_best_move(&mut self, board: &Board, side: Color) -> SearchResult {
        SearchEngine::pick_best_move(self, board, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::ScoreWeights;

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(3600)
    }

    fn small_engine(budget: TimeBudget) -> SearchEngine {
        SearchEngine::new(SearchConfig {
            time_budget: budget,
            tt_capacity: 1 << 14,
            ..SearchConfig::default()
        })
    }

    #[test]
    fn depth_zero_returns_signed_evaluation() {
        let mut board = Board::from_fen("4k3/8/8/8/4P3/3P4/8/1N2K1N1");
        let eval = ScoreFunction::default().score(&board);
        assert_ne!(eval, 0);
        let mut engine = small_engine(TimeBudget::default());
        for side in [Color::Light, Color::Dark] {
            let (mv, score) = engine.negamax(
                &mut board,
                side,
                0,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                far_deadline(),
            );
            assert!(mv.is_none());
            assert_eq!(score, eval * side.sign());
        }
    }

    #[test]
    fn windowed_results_respect_alpha_beta_bounds() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R";
        let mut board = Board::from_fen(fen);
        let mut engine = small_engine(TimeBudget::default());
        let (_, exact) = engine.negamax(
            &mut board,
            Color::Light,
            2,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            far_deadline(),
        );

        let windows = [
            (exact - 500, exact + 500),
            (exact + 1, exact + 400),
            (exact - 400, exact - 1),
            (exact - 1, exact + 1),
            (-SCORE_INFINITY, exact - 100),
            (exact + 100, SCORE_INFINITY),
        ];
        for (alpha, beta) in windows {
            let mut engine = small_engine(TimeBudget::default());
            let (_, score) =
                engine.negamax(&mut board, Color::Light, 2, alpha, beta, far_deadline());
            if score < beta {
                assert!(score >= alpha, "{score} below [{alpha}, {beta}]");
            }
            if exact > alpha && exact < beta {
                assert_eq!(score, exact);
            } else if exact >= beta {
                assert!(score >= beta);
            } else {
                assert_eq!(score, alpha);
            }
        }
        assert_eq!(board, Board::from_fen(fen));
    }

    #[test]
    fn root_without_moves_returns_none_and_zero() {
        let board = Board::from_fen("8/8/8/8/8/8/8/8");
        let mut engine = small_engine(TimeBudget::default());
        let result = engine.pick_best_move(&board, Color::Light);
        assert!(result.best_move.is_none());
        assert_eq!(result.score, 0);
        assert_eq!(result.reached_depth, 0);

        let mut empty = board.clone();
        let (mv, score) = engine.negamax(&mut empty, Color::Dark, 2, 5, 10, far_deadline());
        assert!(mv.is_none());
        assert_eq!(score, 5);
    }

    #[test]
    fn leaving_the_opponent_without_moves_wins() {
        // Taking Dark's lone king leaves Dark nothing to move.
        let fen = "4k2R/8/8/8/8/8/8/4K3";
        let mut board = Board::from_fen(fen);
        let mut engine = small_engine(TimeBudget::default());
        let (mv, score) = engine.negamax(
            &mut board,
            Color::Light,
            2,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            far_deadline(),
        );
        assert_eq!(mv.to_string(), "h8e8");
        assert_eq!(score, -SCORE_LOSS);
        assert_eq!(board, Board::from_fen(fen));

        // Stored in Dark's table from Light's point of view.
        let mut after = Board::from_fen("4R3/8/8/8/8/8/8/4K3");
        let entry = engine.tables[Color::Dark.index()]
            .lookup(after.zobrist_hash(), 1)
            .expect("moveless child is cached");
        assert_eq!(entry.score, -SCORE_LOSS);
        assert!(!entry.is_empty());

        let (mv, child) = engine.negamax(
            &mut after,
            Color::Dark,
            1,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            far_deadline(),
        );
        assert!(mv.is_none());
        assert_eq!(child, SCORE_LOSS);
    }

    #[test]
    fn expired_deadline_aborts_deep_nodes_only() {
        let mut board = Board::starting_position();
        let mut engine = small_engine(TimeBudget::default());
        let past = Instant::now();
        let (mv, score) = engine.negamax(
            &mut board,
            Color::Light,
            4,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            past,
        );
        assert!(mv.is_none());
        assert_eq!(score, 0);

        let (mv, _) = engine.negamax(
            &mut board,
            Color::Light,
            3,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            past,
        );
        assert!(!mv.is_none());
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn zero_budget_keeps_shallow_result() {
        let board = Board::starting_position();
        let mut engine = small_engine(TimeBudget::Fixed(Duration::ZERO));
        let result = engine.pick_best_move(&board, Color::Light);
        assert_eq!(result.reached_depth, 3);
        assert!(!result.best_move.is_none());
        assert!(result.nodes > 0);
    }

    #[test]
    fn no_move_when_first_depth_fails() {
        let board = Board::starting_position();
        let mut engine = SearchEngine::new(SearchConfig {
            time_budget: TimeBudget::Fixed(Duration::ZERO),
            start_depth: 4,
            tt_capacity: 1 << 12,
            ..SearchConfig::default()
        });
        let result = engine.pick_best_move(&board, Color::Light);
        assert!(result.best_move.is_none());
        assert_eq!(result.reached_depth, 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn more_time_never_reaches_less_depth() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3");
        let mut short = small_engine(TimeBudget::Fixed(Duration::ZERO));
        let mut long = small_engine(TimeBudget::Fixed(Duration::from_millis(200)));
        let a = short.pick_best_move(&board, Color::Light);
        let b = long.pick_best_move(&board, Color::Light);
        assert!(b.reached_depth >= a.reached_depth);
        assert!(!b.best_move.is_none());
    }

    #[test]
    fn takes_a_hanging_queen() {
        let board = Board::from_fen("4k3/8/8/3q4/8/8/3Q4/4K3");
        let mut engine = small_engine(TimeBudget::Fixed(Duration::ZERO));
        let result = engine.pick_best_move(&board, Color::Light);
        assert_eq!(result.best_move.to_string(), "d2d5");
        assert!(result.score > 0);

        // The queens attack each other and neither is defended.
        let board = Board::from_fen("k7/8/3q4/8/1Q6/8/8/7K");
        let mut engine = small_engine(TimeBudget::Fixed(Duration::ZERO));
        let result = engine.pick_best_move(&board, Color::Dark);
        assert_eq!(result.best_move.to_string(), "d6b4");
        assert!(result.score > 0);
    }

    #[test]
    fn captures_the_king_when_it_can() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4R1K1");
        let mut engine = small_engine(TimeBudget::Fixed(Duration::ZERO));
        let result = engine.pick_best_move(&board, Color::Light);
        assert_eq!(result.best_move.to_string(), "e1e8");
    }

    #[test]
    fn caller_board_and_stack_are_untouched() {
        let board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R");
        let before = board.clone();
        let mut engine = small_engine(TimeBudget::Fixed(Duration::from_millis(50)));
        engine.pick_best_move(&board, Color::Dark);
        assert_eq!(board, before);
        assert!(engine.stack.is_empty());
    }

    #[test]
    fn ordering_pass_keeps_board_balanced() {
        let mut board = Board::starting_position();
        let mut engine = SearchEngine::new(SearchConfig {
            ordering_depth: 0,
            tt_capacity: 1 << 12,
            ..SearchConfig::default()
        });
        let mut moves = Vec::new();
        board.generate_moves(&mut moves, Color::Dark);
        engine.order_moves(&mut board, Color::Dark, &mut moves);
        assert_eq!(board, Board::starting_position());
        assert!(engine.stack.is_empty());
        assert!(moves.windows(2).all(|w| -w[0].score >= -w[1].score));
        assert!(moves.iter().all(|m| m.hash != 0));
    }

    #[test]
    fn stores_mover_relative_scores_as_light_relative() {
        let mut board = Board::from_fen("4k3/8/8/3q4/8/8/3Q4/4K3");
        let mut engine = small_engine(TimeBudget::default());
        let (_, score) = engine.negamax(
            &mut board,
            Color::Dark,
            1,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            far_deadline(),
        );
        let entry = engine.tables[Color::Dark.index()]
            .lookup(board.zobrist_hash(), 1)
            .expect("root stored");
        assert_eq!(entry.score, -score);
        assert!(engine.tt_stats()[1].stores > 0);
    }

    #[test]
    fn custom_weights_change_the_evaluation() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/1N2K1N1");
        let scorer = ScoreFunction::new(ScoreWeights {
            duplicate_knight: 0,
            ..ScoreWeights::default()
        });
        let config = SearchConfig {
            tt_capacity: 1 << 10,
            ..SearchConfig::default()
        };
        let mut plain = SearchEngine::with_scorer(config, scorer);
        let mut weighted = small_engine(TimeBudget::default());
        let (_, a) = plain.negamax(&mut board, Color::Light, 0, -1, 1, far_deadline());
        let (_, b) = weighted.negamax(&mut board, Color::Light, 0, -1, 1, far_deadline());
        assert_eq!(a - b, 40);
    }
}
