//! The three kinds of player and the single capability they share: choosing
//! a movement for the current board.

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use log::warn;

use crate::board::{Board, PlayerTurn};
use crate::constants::DEFAULT_SEARCH_DEPTH;
use crate::movement::{MoveError, Movement};
use crate::position::Position;
use crate::search::AlphaBetaAiPlayer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    RandomAi,
    AlphaBetaAi,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::RandomAi => write!(f, "random AI"),
            PlayerKind::AlphaBetaAi => write!(f, "alpha-beta AI"),
        }
    }
}

/// Settings used by [`Player::create`]. Each kind reads the ones it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Search depth for alpha-beta players
    pub depth: u32,
    /// Seed for random players; `None` seeds from the system
    pub seed: Option<u64>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
        }
    }
}

pub enum Player {
    Human(HumanPlayer),
    RandomAi(RandomAiPlayer),
    AlphaBetaAi(AlphaBetaAiPlayer),
}

impl Player {
    /// A player of the given kind.
    pub fn create(turn: PlayerTurn, kind: PlayerKind, options: PlayerOptions) -> Player {
        match kind {
            PlayerKind::Human => Player::Human(HumanPlayer::new(turn)),
            PlayerKind::RandomAi => Player::RandomAi(match options.seed {
                Some(seed) => RandomAiPlayer::with_seed(turn, seed),
                None => RandomAiPlayer::new(turn),
            }),
            PlayerKind::AlphaBetaAi => {
                Player::AlphaBetaAi(AlphaBetaAiPlayer::with_depth(turn, options.depth))
            }
        }
    }

    pub fn turn(&self) -> PlayerTurn {
        match self {
            Player::Human(p) => p.turn,
            Player::RandomAi(p) => p.turn,
            Player::AlphaBetaAi(p) => p.turn(),
        }
    }

    pub fn kind(&self) -> PlayerKind {
        match self {
            Player::Human(_) => PlayerKind::Human,
            Player::RandomAi(_) => PlayerKind::RandomAi,
            Player::AlphaBetaAi(_) => PlayerKind::AlphaBetaAi,
        }
    }

    /// Choose a movement for this player's turn. The board is left as it was.
    pub fn get_movement(&mut self, board: &mut Board) -> anyhow::Result<Movement> {
        match self {
            Player::Human(p) => p.get_movement(board),
            Player::RandomAi(p) => Ok(p.get_movement(board)?),
            Player::AlphaBetaAi(p) => Ok(p.get_movement(board)?),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.turn(), self.kind())
    }
}

/// Reads moves such as `C5 D4` or `C5->D4` from a line-based source.
pub struct HumanPlayer {
    turn: PlayerTurn,
    /// `None` reads from standard input, locking it for one line at a time
    input: Option<Box<dyn BufRead>>,
}

impl HumanPlayer {
    /// Human reading from standard input.
    pub fn new(turn: PlayerTurn) -> Self {
        Self { turn, input: None }
    }

    pub fn with_input(turn: PlayerTurn, input: impl BufRead + 'static) -> Self {
        Self {
            turn,
            input: Some(Box::new(input)),
        }
    }

    fn read_line(&mut self, line: &mut String) -> io::Result<usize> {
        match &mut self.input {
            Some(input) => input.read_line(line),
            None => io::stdin().read_line(line),
        }
    }

    /// Prompt until a legal movement is entered.
    ///
    /// The destination may be either the first landing square or the final
    /// square of a capture chain.
    pub fn get_movement(&mut self, board: &Board) -> anyhow::Result<Movement> {
        let legal = Movement::legal_movements(board, self.turn);
        if legal.is_empty() {
            return Err(MoveError::NoLegalMove.into());
        }
        let hint = legal
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut stdout = io::stdout();
        loop {
            write!(stdout, "{} to move [{hint}]: ", self.turn)?;
            stdout.flush()?;

            let mut line = String::new();
            let read = self
                .read_line(&mut line)
                .context("failed to read move")?;
            if read == 0 {
                bail!("input closed before {} chose a move", self.turn);
            }

            match self.parse_movement(board, &legal, &line) {
                Ok(movement) => return Ok(movement),
                Err(err) => {
                    warn!("rejected move '{}': {err}", line.trim());
                    writeln!(stdout, "{err}")?;
                }
            }
        }
    }

    fn parse_movement(
        &self,
        board: &Board,
        legal: &[Movement],
        line: &str,
    ) -> anyhow::Result<Movement> {
        let mut squares = line
            .split(|c: char| c.is_whitespace() || c == '-' || c == '>')
            .filter(|s| !s.is_empty());
        let (Some(from), Some(to), None) = (squares.next(), squares.next(), squares.next()) else {
            bail!("expected two squares, e.g. 'C5 D4'");
        };
        let origin: Position = from.parse()?;
        let destiny: Position = to.parse()?;

        let chosen = legal.iter().find(|m| {
            m.origin() == origin && (m.destiny() == destiny || m.real_destiny() == destiny)
        });
        match chosen {
            Some(movement) => Ok(movement.clone()),
            // Let validation say what is wrong with it.
            None => Ok(Movement::new(board, self.turn, origin, destiny)?),
        }
    }
}

/// Picks uniformly among the legal movements.
pub struct RandomAiPlayer {
    turn: PlayerTurn,
    rng: fastrand::Rng,
}

impl RandomAiPlayer {
    pub fn new(turn: PlayerTurn) -> Self {
        Self {
            turn,
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible random player.
    pub fn with_seed(turn: PlayerTurn, seed: u64) -> Self {
        Self {
            turn,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn get_movement(&mut self, board: &Board) -> Result<Movement, MoveError> {
        let mut legal = Movement::legal_movements(board, self.turn);
        if legal.is_empty() {
            return Err(MoveError::NoLegalMove);
        }
        let pick = self.rng.usize(..legal.len());
        Ok(legal.swap_remove(pick))
    }
}
