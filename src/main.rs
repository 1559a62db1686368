use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mailbox_chess::engines::engine_random::RandomPlayer;
use mailbox_chess::engines::engine_trait::Player;
use mailbox_chess::engines::time_management::TimeBudget;
use mailbox_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use mailbox_chess::game_state::chess_types::Board;
use mailbox_chess::move_generation::perft::{perft, perft_divide, total};
use mailbox_chess::search::board_scoring::{ScoreFunction, ScoreWeights};
use mailbox_chess::search::search_engine::{SearchConfig, SearchEngine};
use mailbox_chess::utils::algebraic::parse_color;
use mailbox_chess::utils::match_harness::{play_match, MatchConfig};
use mailbox_chess::utils::render_board::render_board;

#[derive(Parser, Debug)]
#[command(author, version, about = "Mailbox chess engine: perft, search and self-play", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count move sequences from a position
    Perft {
        /// Piece placement (FEN); defaults to the starting position
        #[arg(long)]
        fen: Option<String>,

        /// Side to move: 'w' or 'b'
        #[arg(long, default_value = "w")]
        side: String,

        #[arg(long, default_value_t = 3)]
        depth: u8,

        /// Print per-move counts
        #[arg(long)]
        divide: bool,
    },

    /// Search a position and print the chosen move
    Best {
        #[arg(long)]
        fen: Option<String>,

        #[arg(long, default_value = "w")]
        side: String,

        /// Thinking time in seconds
        #[arg(long, default_value_t = 1)]
        difficulty: u32,

        /// Thinking time in milliseconds; overrides --difficulty
        #[arg(long)]
        millis: Option<u64>,

        /// Weight of the mobility term
        #[arg(long, default_value_t = 0)]
        mobility: i32,

        /// Enable phase-tapered king tables and the mop-up term
        #[arg(long)]
        endgame: bool,
    },

    /// Play the engine against itself (or a random player) from the start
    Selfplay {
        #[arg(long, default_value_t = 1)]
        difficulty: u32,

        #[arg(long, default_value_t = 300)]
        max_plies: u16,

        /// Let a random player take Dark
        #[arg(long)]
        random_black: bool,

        /// Print the game as PGN
        #[arg(long)]
        pgn: bool,
    },
}

fn load_board(fen: Option<&str>) -> Board {
    Board::from_fen(fen.unwrap_or(STARTING_POSITION_FEN))
}

fn time_budget(difficulty: u32, millis: Option<u64>) -> TimeBudget {
    match millis {
        Some(ms) => TimeBudget::Fixed(Duration::from_millis(ms)),
        None => TimeBudget::Difficulty(difficulty),
    }
}

fn run_perft(fen: Option<&str>, side: &str, depth: u8, divide: bool) -> Result<()> {
    let side = parse_color(side).context("perft side")?;
    let mut board = load_board(fen);
    let started = Instant::now();

    let counts = if divide {
        let listing = perft_divide(&mut board, side, depth);
        for (mv, counts) in &listing {
            println!("{mv}: {}", counts.nodes);
        }
        total(&listing)
    } else {
        perft(&mut board, side, depth)
    };

    let elapsed = started.elapsed();
    println!(
        "depth {depth}: nodes {} captures {} promotions {} ({:.3}s)",
        counts.nodes,
        counts.captures,
        counts.promotions,
        elapsed.as_secs_f64()
    );
    Ok(())
}

fn run_best(
    fen: Option<&str>,
    side: &str,
    budget: TimeBudget,
    mobility: i32,
    endgame: bool,
) -> Result<()> {
    let side = parse_color(side).context("search side")?;
    let board = load_board(fen);
    println!("{}", render_board(&board));

    let scorer = ScoreFunction::new(ScoreWeights {
        mobility,
        endgame_terms: endgame,
        ..ScoreWeights::default()
    });
    let config = SearchConfig {
        time_budget: budget,
        ..SearchConfig::default()
    };
    let mut engine = SearchEngine::with_scorer(config, scorer);
    let result = engine.pick_best_move(&board, side);

    if result.best_move.is_none() {
        println!("no move");
    } else {
        println!(
            "bestmove {} score {} depth {} nodes {} time {:.3}s",
            result.best_move,
            result.score,
            result.reached_depth,
            result.nodes,
            result.elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn run_selfplay(difficulty: u32, max_plies: u16, random_black: bool, pgn: bool) -> Result<()> {
    let config = SearchConfig {
        time_budget: TimeBudget::Difficulty(difficulty),
        ..SearchConfig::default()
    };
    let mut white = SearchEngine::new(config);
    let mut black: Box<dyn Player> = if random_black {
        Box::new(RandomPlayer::new())
    } else {
        Box::new(SearchEngine::new(config))
    };

    let result = play_match(&mut white, black.as_mut(), MatchConfig { max_plies });
    println!("{}", result.final_board);
    println!("{}", result.report());
    if pgn {
        println!("{}", result.to_pgn());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Perft {
            fen,
            side,
            depth,
            divide,
        } => run_perft(fen.as_deref(), &side, depth, divide),
        Command::Best {
            fen,
            side,
            difficulty,
            millis,
            mobility,
            endgame,
        } => run_best(
            fen.as_deref(),
            &side,
            time_budget(difficulty, millis),
            mobility,
            endgame,
        ),
        Command::Selfplay {
            difficulty,
            max_plies,
            random_black,
            pgn,
        } => run_selfplay(difficulty, max_plies, random_black, pgn),
    }
}
