//! Draughts-Rust: a draughts (checkers) engine.
//!
//! This crate keeps an 8x8 board of men and kings for two players, validates
//! moves under the mandatory-capture rule (resolving multi-jump chains to
//! their longest continuation) and picks moves for a computer player with an
//! alpha-beta search.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, probe order and search parameters
//! - [`position`] - Board coordinates and their text notation
//! - [`board`] - Pieces, the board and its derived queries
//! - [`movement`] - Move validation, capture chains, execute and undo
//! - [`search`] - Alpha-beta search and the evaluation heuristic
//! - [`player`] - Human, random and search-driven players
//! - [`game`] - A match between two players
//!
//! ## Example
//!
//! ```
//! use draughts_rust::board::{Board, PlayerTurn};
//! use draughts_rust::search::AlphaBetaAiPlayer;
//!
//! let mut board = Board::new();
//!
//! // Let the search pick a move for the first player and play it
//! let ai = AlphaBetaAiPlayer::with_depth(PlayerTurn::Player1, 4);
//! let movement = ai.get_movement(&mut board).unwrap();
//! movement.execute(&mut board);
//! println!("{movement}\n{board}");
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod movement;
pub mod player;
pub mod position;
pub mod search;
