//! Head-to-head match harness for local testing.
//!
//! Plays two [`Player`]s against each other on one board. Moves are
//! pseudo-legal, so a game ends when a king is captured, when the side to
//! move has no moves at all, or at the ply limit.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::engines::engine_trait::Player;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_parser::placement_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// `winner` took the opposing king.
    KingCaptured { winner: Color },
    /// The side to move had no moves and no king was lost.
    NoMoves { stuck: Color },
    /// A player answered with the none move.
    Resigned { side: Color },
    DrawMaxPlies,
}

impl MatchOutcome {
    /// Result token as written in a PGN header.
    pub fn result_token(&self) -> &'static str {
        match self {
            MatchOutcome::KingCaptured {
                winner: Color::Light,
            }
            | MatchOutcome::Resigned { side: Color::Dark } => "1-0",
            MatchOutcome::KingCaptured {
                winner: Color::Dark,
            }
            | MatchOutcome::Resigned { side: Color::Light } => "0-1",
            MatchOutcome::NoMoves { .. } | MatchOutcome::DrawMaxPlies => "1/2-1/2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub max_plies: u16,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_plies: 300 }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub started_at: DateTime<Utc>,
    pub initial_board: Board,
    pub final_board: Board,
    pub played_moves: Vec<String>,
    pub white_name: String,
    pub black_name: String,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time: Duration,
    pub black_total_time: Duration,
}

impl MatchResult {
    pub fn report(&self) -> String {
        let avg = |total: Duration, count: u32| {
            if count == 0 {
                0.0
            } else {
                total.as_secs_f64() * 1000.0 / f64::from(count)
            }
        };
        format!(
            "started={} outcome={:?} plies={} white_avg_ms={:.3} black_avg_ms={:.3}",
            self.started_at.to_rfc3339(),
            self.outcome,
            self.played_moves.len(),
            avg(self.white_total_time, self.white_move_count),
            avg(self.black_total_time, self.black_move_count),
        )
    }

    /// Game record with long-algebraic movetext.
    pub fn to_pgn(&self) -> String {
        let mut headers = BTreeMap::<&str, String>::new();
        headers.insert("Event", "Mailbox Chess Match".to_owned());
        headers.insert("Site", "Local".to_owned());
        headers.insert("Date", self.started_at.format("%Y.%m.%d").to_string());
        headers.insert("Round", "-".to_owned());
        headers.insert("White", self.white_name.clone());
        headers.insert("Black", self.black_name.clone());
        headers.insert("Result", self.outcome.result_token().to_owned());

        let placement = placement_of(&self.initial_board);
        if !STARTING_POSITION_FEN.starts_with(&placement) {
            headers.insert("SetUp", "1".to_owned());
            headers.insert("FEN", format!("{placement} w - - 0 1"));
        }

        let mut out = String::new();
        for (key, value) in &headers {
            out.push_str(&format!("[{key} \"{value}\"]\n"));
        }
        out.push('\n');

        let mut parts = Vec::with_capacity(self.played_moves.len() + 1);
        for (ply, lan) in self.played_moves.iter().enumerate() {
            if ply % 2 == 0 {
                parts.push(format!("{}. {}", ply / 2 + 1, lan));
            } else {
                parts.push(lan.clone());
            }
        }
        parts.push(self.outcome.result_token().to_owned());
        out.push_str(&parts.join(" "));
        out.push('\n');
        out
    }
}

/// Play a match from the starting position, Light moving first.
pub fn play_match(
    white: &mut dyn Player,
    black: &mut dyn Player,
    config: MatchConfig,
) -> MatchResult {
    play_match_from_board(Board::starting_position(), white, black, config)
}

/// Play a match from `board`, Light moving first.
pub fn play_match_from_board(
    mut board: Board,
    white: &mut dyn Player,
    black: &mut dyn Player,
    config: MatchConfig,
) -> MatchResult {
    white.new_game();
    black.new_game();

    let started_at = Utc::now();
    let initial_board = board.clone();
    let mut stack = UndoStack::new();
    let mut played_moves = Vec::new();
    let mut counts = [0u32; 2];
    let mut times = [Duration::ZERO; 2];
    let mut side = Color::Light;
    let mut outcome = MatchOutcome::DrawMaxPlies;

    for _ in 0..config.max_plies {
        let mut moves = Vec::with_capacity(64);
        board.generate_moves(&mut moves, side);
        if moves.is_empty() {
            outcome = MatchOutcome::NoMoves { stuck: side };
            break;
        }

        let player: &mut dyn Player = match side {
            Color::Light => &mut *white,
            Color::Dark => &mut *black,
        };
        let clock = Instant::now();
        let chosen = player.pick_best_move(&board, side).best_move;
        times[side.index()] += clock.elapsed();
        counts[side.index()] += 1;

        if chosen.is_none() || !moves.contains(&chosen) {
            log::warn!("{} returned unusable move {chosen}", player.name());
            outcome = MatchOutcome::Resigned { side };
            break;
        }

        let captured = board[chosen.to_cell()];
        chosen.make(&mut board, &mut stack);
        played_moves.push(chosen.to_string());
        log::debug!("ply {}: {:?} plays {chosen}", played_moves.len(), side);

        if captured == side.opposite().piece(KING) {
            outcome = MatchOutcome::KingCaptured { winner: side };
            break;
        }
        side = side.opposite();
    }

    MatchResult {
        outcome,
        started_at,
        initial_board,
        final_board: board,
        played_moves,
        white_name: white.name().to_owned(),
        black_name: black.name().to_owned(),
        white_move_count: counts[Color::Light.index()],
        black_move_count: counts[Color::Dark.index()],
        white_total_time: times[Color::Light.index()],
        black_total_time: times[Color::Dark.index()],
    }
}
