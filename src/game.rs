//! A match between two players.
//!
//! The match owns the only board of the game. Each turn it checks whether the
//! side to move can move at all (if not, that side has lost), asks the
//! player for a movement and executes it.

use log::info;

use crate::board::{Board, PlayerTurn};
use crate::player::Player;

/// How a match ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerTurn),
    /// Turn limit reached
    Draw,
}

pub struct Match {
    board: Board,
    player1: Player,
    player2: Player,
    rng: fastrand::Rng,
    turn_limit: Option<usize>,
    show_board: bool,
}

impl Match {
    pub fn new(player1: Player, player2: Player) -> Self {
        debug_assert_eq!(player1.turn(), PlayerTurn::Player1);
        debug_assert_eq!(player2.turn(), PlayerTurn::Player2);
        Self {
            board: Board::new(),
            player1,
            player2,
            rng: fastrand::Rng::new(),
            turn_limit: None,
            show_board: true,
        }
    }

    /// Seed the draw for who starts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Declare a draw after `turns` movements.
    pub fn with_turn_limit(mut self, turns: usize) -> Self {
        self.turn_limit = Some(turns);
        self
    }

    /// Start from `board` instead of the standard layout.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Print the board to stdout before every turn.
    pub fn show_board(mut self, show: bool) -> Self {
        self.show_board = show;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn random_turn(&mut self) -> PlayerTurn {
        if self.rng.bool() {
            PlayerTurn::Player1
        } else {
            PlayerTurn::Player2
        }
    }

    /// Play until one side cannot move or the turn limit is reached.
    pub fn start(&mut self) -> anyhow::Result<Outcome> {
        let mut turn = self.random_turn();
        info!("{turn} starts");

        let mut played = 0;
        loop {
            if self.show_board {
                println!("{}", self.board);
            }
            if !self.board.player_can_move(turn) {
                let winner = turn.opponent();
                info!("{turn} cannot move, {winner} wins after {played} turns");
                return Ok(Outcome::Winner(winner));
            }
            if self.turn_limit.is_some_and(|limit| played >= limit) {
                info!("turn limit reached, draw");
                return Ok(Outcome::Draw);
            }

            let player = match turn {
                PlayerTurn::Player1 => &mut self.player1,
                _ => &mut self.player2,
            };
            let movement = player.get_movement(&mut self.board)?;
            info!("{player}: {movement}");
            if self.show_board {
                println!("{player} plays {movement}");
            }
            movement.execute(&mut self.board);

            played += 1;
            turn = turn.opponent();
        }
    }
}
