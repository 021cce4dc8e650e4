//! Draughts-Rust: a draughts engine with an alpha-beta computer player.
//!
//! ## Usage
//!
//! - `draughts-rust` - Show a demo
//! - `draughts-rust play --player1 human --player2 alpha-beta` - Play a match
//! - `draughts-rust demo` - Watch the search play against a random player
//!
//! Add `-v` (repeatable) for more log output, or set `RUST_LOG`.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use draughts_rust::board::{Board, PlayerTurn};
use draughts_rust::constants::{DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
use draughts_rust::game::{Match, Outcome};
use draughts_rust::player::{Player, PlayerKind, PlayerOptions, RandomAiPlayer};
use draughts_rust::search::{AlphaBetaAiPlayer, evaluate};

/// Draughts-Rust: a draughts (checkers) engine
#[derive(Parser)]
#[command(name = "draughts-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match between two players
    Play {
        /// Who plays the men starting on rows 5-7
        #[arg(long, value_enum, default_value_t = Kind::Human)]
        player1: Kind,
        /// Who plays the men starting on rows 0-2
        #[arg(long, value_enum, default_value_t = Kind::AlphaBeta)]
        player2: Kind,
        /// Search depth in plies for alpha-beta players
        #[arg(
            long,
            default_value_t = DEFAULT_SEARCH_DEPTH,
            value_parser = clap::value_parser!(u32).range(0..=MAX_SEARCH_DEPTH as i64)
        )]
        depth: u32,
        /// Seed for the random player and the choice of who starts
        #[arg(long)]
        seed: Option<u64>,
        /// Declare a draw after this many turns
        #[arg(long)]
        max_turns: Option<usize>,
    },
    /// Run a short demo of the engine
    Demo,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Kind {
    Human,
    Random,
    AlphaBeta,
}

impl From<Kind> for PlayerKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Human => PlayerKind::Human,
            Kind::Random => PlayerKind::RandomAi,
            Kind::AlphaBeta => PlayerKind::AlphaBetaAi,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Play {
            player1,
            player2,
            depth,
            seed,
            max_turns,
        }) => {
            let options = PlayerOptions { depth, seed };
            let p1 = Player::create(PlayerTurn::Player1, player1.into(), options);
            let p2_options = PlayerOptions {
                seed: seed.map(|s| s.wrapping_add(1)),
                ..options
            };
            let p2 = Player::create(PlayerTurn::Player2, player2.into(), p2_options);
            let mut game = Match::new(p1, p2);
            if let Some(seed) = seed {
                game = game.with_seed(seed);
            }
            if let Some(turns) = max_turns {
                game = game.with_turn_limit(turns);
            }
            report(game.start()?);
        }
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Winner(winner) => println!("{winner} wins!"),
        Outcome::Draw => println!("Draw."),
    }
}

fn run_demo() -> Result<()> {
    println!("Draughts-Rust: Draughts Engine with Alpha-Beta Search\n");

    println!("=== Starting Position ===");
    let board = Board::new();
    println!("{board}");
    println!("Evaluation for Player 1: {}\n", evaluate(&board, PlayerTurn::Player1));

    println!("=== Alpha-Beta (depth 4) vs Random ===");
    let mut game = Match::new(
        Player::AlphaBetaAi(AlphaBetaAiPlayer::with_depth(PlayerTurn::Player1, 4)),
        Player::RandomAi(RandomAiPlayer::with_seed(PlayerTurn::Player2, 1)),
    )
    .with_seed(1)
    .with_turn_limit(200)
    .show_board(false);
    let outcome = game.start()?;
    println!("{}", game.board());
    report(outcome);
    Ok(())
}
