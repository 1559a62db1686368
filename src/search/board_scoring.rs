//! Static board evaluation.
//!
//! Search delegates leaf scoring to [`BoardScorer`], so alternate heuristics
//! can be swapped without touching search code. All scorers here are pure
//! functions of the board and report from Light's point of view; the search
//! applies the side sign.

use crate::game_state::chess_types::*;
use crate::game_state::mailbox::{cell_of, offset_cell};
use crate::game_state::piece_square_tables::{
    table_square, KING_END_GAME_TABLE, KING_MIDDLE_GAME_TABLE,
};
use crate::move_generation::move_generator::count_destinations;

pub const DUPLICATE_KNIGHT_PENALTY: Score = 40;
pub const PAWN_PROTECTION_BONUS: Score = 50;
pub const MOBILITY_BONUS: Score = 10;

/// Phase value at which the mop-up term switches on (out of [`PHASE_SCALE`]).
pub const MOP_UP_PHASE: i32 = 160;
pub const PHASE_SCALE: i32 = 256;

pub trait BoardScorer: Send + Sync {
    /// Score with positive values favoring Light.
    fn score(&self, board: &Board) -> Score;
}

/// Multipliers for each evaluation term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub material: Score,
    pub duplicate_knight: Score,
    pub pawn_protection: Score,
    pub mobility: Score,
    /// King table interpolation by game phase plus the late-endgame mop-up term.
    pub endgame_terms: bool,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            material: 1,
            duplicate_knight: 1,
            pawn_protection: 1,
            mobility: 0,
            endgame_terms: false,
        }
    }
}

/// The board's running material + piece-square score, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalScorer;

impl BoardScorer for IncrementalScorer {
    #[inline]
    fn score(&self, board: &Board) -> Score {
        board.score()
    }
}

/// Weighted evaluator used by the search engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFunction {
    pub weights: ScoreWeights,
}

impl ScoreFunction {
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }
}

impl BoardScorer for ScoreFunction {
    fn score(&self, board: &Board) -> Score {
        let w = &self.weights;
        let material = board.score();
        let mut combined = material * w.material;
        combined += duplicate_knight_term(board) * w.duplicate_knight;
        combined += pawn_protection_term(board) * w.pawn_protection;
        if w.mobility != 0 {
            combined += mobility_term(board) * w.mobility;
        }
        if w.endgame_terms {
            let phase = game_phase(board);
            combined += king_phase_term(board, phase);
            if phase > MOP_UP_PHASE {
                combined += mop_up_term(board, material);
            }
        }
        combined
    }
}

/// Penalty for a side keeping more than one knight.
pub fn duplicate_knight_term(board: &Board) -> Score {
    let (mut light, mut dark) = (0, 0);
    for (_, code) in board.occupied() {
        match code {
            KNIGHT => light += 1,
            c if c == -KNIGHT => dark += 1,
            _ => {}
        }
    }
    let mut term = 0;
    if light > 1 {
        term -= DUPLICATE_KNIGHT_PENALTY;
    }
    if dark > 1 {
        term += DUPLICATE_KNIGHT_PENALTY;
    }
    term
}

/// Bonus per pawn defended diagonally by a pawn of its own side.
pub fn pawn_protection_term(board: &Board) -> Score {
    let mut defended: Score = 0;
    for (sq, code) in board.occupied() {
        let (behind, sign) = match code {
            PAWN => (-MAILBOX_W, 1),
            c if c == -PAWN => (MAILBOX_W, -1),
            _ => continue,
        };
        let back = offset_cell(cell_of(sq), behind);
        if board[offset_cell(back, 1)] == code || board[offset_cell(back, -1)] == code {
            defended += sign;
        }
    }
    defended * PAWN_PROTECTION_BONUS
}

/// Difference in reachable `(from, to)` pairs.
pub fn mobility_term(board: &Board) -> Score {
    let light = count_destinations(board, Color::Light) as Score;
    let dark = count_destinations(board, Color::Dark) as Score;
    (light - dark) * MOBILITY_BONUS
}

/// Game phase in `0..=PHASE_SCALE`; 0 with all minor and major pieces on, `PHASE_SCALE` with none.
pub fn game_phase(board: &Board) -> i32 {
    const KNIGHT_PHASE: i32 = 1;
    const BISHOP_PHASE: i32 = 1;
    const ROOK_PHASE: i32 = 2;
    const QUEEN_PHASE: i32 = 4;
    const TOTAL_PHASE: i32 = KNIGHT_PHASE * 4 + BISHOP_PHASE * 4 + ROOK_PHASE * 4 + QUEEN_PHASE * 2;

    let mut phase = TOTAL_PHASE;
    for (_, code) in board.occupied() {
        phase -= match code.abs() {
            KNIGHT => KNIGHT_PHASE,
            BISHOP => BISHOP_PHASE,
            ROOK => ROOK_PHASE,
            QUEEN => QUEEN_PHASE,
            _ => 0,
        };
    }
    let phase = phase.max(0);
    (phase * PHASE_SCALE + TOTAL_PHASE / 2) / TOTAL_PHASE
}

/// Shift each king's table value from the middle-game table toward the end-game one.
///
/// The incremental score already counts the middle-game value, so only the
/// difference is added.
pub fn king_phase_term(board: &Board, phase: i32) -> Score {
    let mut term = 0;
    for (sq, code) in board.occupied() {
        if code.abs() != KING {
            continue;
        }
        let idx = table_square(code, sq);
        let delta = KING_END_GAME_TABLE[idx] - KING_MIDDLE_GAME_TABLE[idx];
        let shifted = delta * phase / PHASE_SCALE;
        term += if code > 0 { shifted } else { -shifted };
    }
    term
}

/// Reward the side ahead in material for centralizing pressure on the losing king.
///
/// Grows as the losing king nears the edge and as the two kings close in.
pub fn mop_up_term(board: &Board, material: Score) -> Score {
    if material == 0 {
        return 0;
    }
    let (mut light_king, mut dark_king) = (None, None);
    for (sq, code) in board.occupied() {
        match code {
            KING => light_king = Some(sq),
            c if c == -KING => dark_king = Some(sq),
            _ => {}
        }
    }
    let (Some(light_king), Some(dark_king)) = (light_king, dark_king) else {
        return 0;
    };

    let file = |sq: Square| f64::from(sq % 8);
    let rank = |sq: Square| f64::from(sq / 8);
    let losing = if material > 0 { dark_king } else { light_king };
    let center = (BOARD_DIM as f64 - 1.0) / 2.0;
    let center_distance = (file(losing) - center).abs() + (rank(losing) - center).abs();
    let king_distance =
        (file(light_king) - file(dark_king)).abs() + (rank(light_king) - rank(dark_king)).abs();

    let value = (4.7 * center_distance + 1.6 * (14.0 - king_distance)) * 10.0;
    let value = value as Score;
    if material > 0 {
        value
    } else {
        -value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(fen: &str) -> Score {
        ScoreFunction::default().score(&Board::from_fen(fen))
    }

    #[test]
    fn starting_position_is_level() {
        let board = Board::starting_position();
        assert_eq!(ScoreFunction::default().score(&board), 0);
        let all_terms = ScoreFunction::new(ScoreWeights {
            mobility: 1,
            endgame_terms: true,
            ..ScoreWeights::default()
        });
        assert_eq!(all_terms.score(&board), 0);
    }

    #[test]
    fn incremental_scorer_returns_running_score() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/3QK3");
        assert_eq!(IncrementalScorer.score(&board), board.score());
        assert!(board.score() > 0);
    }

    #[test]
    fn second_knight_is_penalized() {
        let one = Board::from_fen("4k3/8/8/8/8/8/8/1N2K3");
        let two = Board::from_fen("4k3/8/8/8/8/8/8/1N2K1N1");
        assert_eq!(duplicate_knight_term(&one), 0);
        assert_eq!(duplicate_knight_term(&two), -DUPLICATE_KNIGHT_PENALTY);

        let dark = Board::from_fen("1n2k1n1/8/8/8/8/8/8/4K3");
        assert_eq!(duplicate_knight_term(&dark), DUPLICATE_KNIGHT_PENALTY);
    }

    #[test]
    fn defended_pawns_score_for_their_side() {
        // d3 defends e4 for Light.
        let light = Board::from_fen("4k3/8/8/8/4P3/3P4/8/4K3");
        assert_eq!(pawn_protection_term(&light), PAWN_PROTECTION_BONUS);
        // d6 defends e5 for Dark.
        let dark = Board::from_fen("4k3/8/3p4/4p3/8/8/8/4K3");
        assert_eq!(pawn_protection_term(&dark), -PAWN_PROTECTION_BONUS);
        // An enemy pawn behind does not count.
        let mixed = Board::from_fen("4k3/8/8/8/4P3/3p4/8/4K3");
        assert_eq!(pawn_protection_term(&mixed), 0);
    }

    #[test]
    fn chain_of_three_counts_two_defended() {
        let board = Board::from_fen("4k3/8/8/8/5P2/4P3/3P4/4K3");
        assert_eq!(pawn_protection_term(&board), 2 * PAWN_PROTECTION_BONUS);
        assert_eq!(
            evaluate("4k3/8/8/8/5P2/4P3/3P4/4K3"),
            board.score() + 2 * PAWN_PROTECTION_BONUS
        );
    }

    #[test]
    fn mobility_only_counts_when_weighted() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3");
        let plain = ScoreFunction::default().score(&board);
        let mobile = ScoreFunction::new(ScoreWeights {
            mobility: 1,
            ..ScoreWeights::default()
        })
        .score(&board);
        assert!(mobility_term(&board) > 0);
        assert_eq!(mobile - plain, mobility_term(&board));
    }

    #[test]
    fn phase_runs_from_opening_to_bare_kings() {
        assert_eq!(game_phase(&Board::starting_position()), 0);
        assert_eq!(game_phase(&Board::from_fen("4k3/8/8/8/8/8/8/4K3")), PHASE_SCALE);
        let rooks_only = game_phase(&Board::from_fen("r3k3/8/8/8/8/8/8/R3K3"));
        assert!(rooks_only > MOP_UP_PHASE && rooks_only < PHASE_SCALE);
    }

    #[test]
    fn mop_up_prefers_cornered_losing_king() {
        let cornered = Board::from_fen("k7/8/1K6/8/8/8/8/7R");
        let central = Board::from_fen("8/8/8/3k4/8/8/8/K6R");
        let a = mop_up_term(&cornered, cornered.score());
        let b = mop_up_term(&central, central.score());
        assert!(a > b);
        assert!(a > 0);

        let mirrored = Board::from_fen("K7/8/1k6/8/8/8/8/7r");
        assert_eq!(mop_up_term(&mirrored, mirrored.score()), -a);
    }

    #[test]
    fn endgame_terms_are_symmetric() {
        let scorer = ScoreFunction::new(ScoreWeights {
            endgame_terms: true,
            ..ScoreWeights::default()
        });
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3");
        assert_eq!(scorer.score(&board), 0);
    }

    #[test]
    fn mobility_counts_a_promotion_square_once() {
        // Light: one promotion square plus three king steps. Dark: three king steps.
        let board = Board::from_fen("8/4P3/8/8/8/8/8/K6k");
        assert_eq!(mobility_term(&board), (4 - 3) * MOBILITY_BONUS);
    }
}
