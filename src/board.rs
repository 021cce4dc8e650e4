//! The 8x8 draughts board and its derived queries.
//!
//! Squares are stored as a plain 2D array of [`Piece`] values. Every query
//! below expects positions that passed [`Position::within_bounds`]; feeding an
//! off-board position is a logic error and trips a debug assertion.
//!
//! Only the dark squares ((row + column) odd) are ever occupied in play.
//! PLAYER2 starts on rows 0-2 and moves down the board, PLAYER1 starts on
//! rows 5-7 and moves up.

use std::fmt;

use crate::constants::{NUM_COLS, NUM_ROWS, STARTING_ROWS};
use crate::movement::Movement;
use crate::position::{Col, ParseError, Position};

/// Side owning a piece. `Unknown` only ever marks empty squares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerTurn {
    Player1,
    Player2,
    Unknown,
}

impl PlayerTurn {
    pub fn opponent(self) -> PlayerTurn {
        match self {
            PlayerTurn::Player1 => PlayerTurn::Player2,
            PlayerTurn::Player2 => PlayerTurn::Player1,
            PlayerTurn::Unknown => PlayerTurn::Unknown,
        }
    }

    /// Row delta of a forward step for this player's men.
    pub fn forward(self) -> i32 {
        match self {
            PlayerTurn::Player1 => -1,
            PlayerTurn::Player2 => 1,
            PlayerTurn::Unknown => 0,
        }
    }

    /// Row on which this player's men are promoted.
    pub fn promotion_row(self) -> i32 {
        match self {
            PlayerTurn::Player1 => 0,
            PlayerTurn::Player2 => NUM_ROWS as i32 - 1,
            PlayerTurn::Unknown => -1,
        }
    }
}

impl fmt::Display for PlayerTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerTurn::Player1 => write!(f, "Player 1"),
            PlayerTurn::Player2 => write!(f, "Player 2"),
            PlayerTurn::Unknown => write!(f, "nobody"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Empty,
    Man,
    King,
}

/// Contents of a square.
///
/// The fields are private so that `kind == Empty` holds exactly when
/// `owner == Unknown`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceType,
    owner: PlayerTurn,
}

impl Default for Piece {
    fn default() -> Self {
        Piece::EMPTY
    }
}

impl Piece {
    pub const EMPTY: Piece = Piece {
        kind: PieceType::Empty,
        owner: PlayerTurn::Unknown,
    };

    pub fn man(owner: PlayerTurn) -> Piece {
        debug_assert_ne!(owner, PlayerTurn::Unknown);
        Piece {
            kind: PieceType::Man,
            owner,
        }
    }

    pub fn king(owner: PlayerTurn) -> Piece {
        debug_assert_ne!(owner, PlayerTurn::Unknown);
        Piece {
            kind: PieceType::King,
            owner,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    #[inline]
    pub fn owner(&self) -> PlayerTurn {
        self.owner
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == PieceType::Empty
    }

    #[inline]
    pub fn is_man(&self) -> bool {
        self.kind == PieceType::Man
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceType::King
    }

    /// The same piece crowned.
    pub fn crowned(&self) -> Piece {
        Piece::king(self.owner)
    }

    pub fn symbol(&self) -> char {
        match (self.kind, self.owner) {
            (PieceType::Man, PlayerTurn::Player1) => 'o',
            (PieceType::King, PlayerTurn::Player1) => 'O',
            (PieceType::Man, PlayerTurn::Player2) => 'x',
            (PieceType::King, PlayerTurn::Player2) => 'X',
            _ => '.',
        }
    }

    pub fn from_symbol(c: char) -> Result<Piece, ParseError> {
        match c {
            '.' => Ok(Piece::EMPTY),
            'o' => Ok(Piece::man(PlayerTurn::Player1)),
            'O' => Ok(Piece::king(PlayerTurn::Player1)),
            'x' => Ok(Piece::man(PlayerTurn::Player2)),
            'X' => Ok(Piece::king(PlayerTurn::Player2)),
            other => Err(ParseError::Symbol(other)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Piece; NUM_COLS]; NUM_ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for pos in Position::all().filter(is_dark_square) {
            let row = pos.row() as usize;
            let owner = if row < STARTING_ROWS {
                PlayerTurn::Player2
            } else if row >= NUM_ROWS - STARTING_ROWS {
                PlayerTurn::Player1
            } else {
                continue;
            };
            *board.cell_mut(pos.row() as usize, pos.col().index()) = Piece::man(owner);
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[Piece::EMPTY; NUM_COLS]; NUM_ROWS],
        }
    }

    /// Build a board from eight rows of piece symbols, top row (row 0) first.
    ///
    /// Symbols: `.` empty, `o`/`O` PLAYER1 man/king, `x`/`X` PLAYER2
    /// man/king. Whitespace inside a row is ignored.
    pub fn from_rows(rows: [&str; NUM_ROWS]) -> Result<Self, ParseError> {
        let mut board = Board::empty();
        for (r, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != NUM_COLS {
                return Err(ParseError::RowLength {
                    row: r,
                    len: symbols.len(),
                });
            }
            for (c, &symbol) in symbols.iter().enumerate() {
                board.cells[r][c] = Piece::from_symbol(symbol)?;
            }
        }
        Ok(board)
    }

    /// Copy of this board with `piece` placed at `pos`. Meant for setting up
    /// positions; play goes through [`Movement`].
    pub fn with_piece(mut self, pos: Position, piece: Piece) -> Self {
        *self.cell_mut(pos.row() as usize, pos.col().index()) = piece;
        self
    }

    #[inline]
    pub fn get_at(&self, pos: Position) -> Piece {
        debug_assert!(pos.within_bounds(), "off-board position {pos:?}");
        self.cells[pos.row() as usize][pos.col().index()]
    }

    /// Mutable access to a square, used by movements to apply and undo hops.
    #[inline]
    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Piece {
        &mut self.cells[row][col]
    }

    pub fn get_owner(&self, pos: Position) -> PlayerTurn {
        self.get_at(pos).owner()
    }

    /// True if `pos` is on the board and empty.
    #[inline]
    pub fn is_free(&self, pos: Position) -> bool {
        pos.within_bounds() && self.get_at(pos).is_empty()
    }

    /// Positions of every piece owned by `player`, row-major.
    pub fn pieces_of(&self, player: PlayerTurn) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&pos| {
            let piece = self.get_at(pos);
            !piece.is_empty() && piece.owner() == player
        })
    }

    /// Empty squares one non-capturing step away, in probe order. Men only
    /// step forward.
    pub fn simple_steps(&self, origin: Position) -> Vec<Position> {
        let piece = self.get_at(origin);
        if piece.is_empty() {
            return Vec::new();
        }
        origin
            .diagonal_neighbors()
            .into_iter()
            .filter(|target| {
                piece.is_king() || target.row() - origin.row() == piece.owner().forward()
            })
            .filter(|&target| self.is_free(target))
            .collect()
    }

    /// Landing squares of single captures from `origin`, in probe order.
    /// Men and kings both capture in all four directions.
    pub fn capture_landings(&self, origin: Position) -> Vec<Position> {
        let piece = self.get_at(origin);
        if piece.is_empty() {
            return Vec::new();
        }
        let enemy = piece.owner().opponent();
        origin
            .diagonal_neighbors()
            .into_iter()
            .filter(|&over| over.within_bounds() && self.get_owner(over) == enemy)
            .map(|over| {
                let (dr, dc) = origin.direction_to(&over);
                over.offset(dr, dc)
            })
            .filter(|&landing| self.is_free(landing))
            .collect()
    }

    pub fn can_capture_from(&self, origin: Position) -> bool {
        !self.capture_landings(origin).is_empty()
    }

    pub fn piece_has_freedom(&self, pos: Position) -> bool {
        !self.simple_steps(pos).is_empty() || self.can_capture_from(pos)
    }

    /// True if an opposing piece could jump the piece at `pos` right now.
    pub fn piece_can_be_eaten(&self, pos: Position) -> bool {
        let piece = self.get_at(pos);
        if piece.is_empty() {
            return false;
        }
        let enemy = piece.owner().opponent();
        pos.diagonal_neighbors().into_iter().any(|attacker| {
            if !attacker.within_bounds() || self.get_owner(attacker) != enemy {
                return false;
            }
            let (dr, dc) = attacker.direction_to(&pos);
            self.is_free(pos.offset(dr, dc))
        })
    }

    /// True if `player` has at least one capture available anywhere.
    pub fn player_can_eat(&self, player: PlayerTurn) -> bool {
        self.pieces_of(player).any(|pos| self.can_capture_from(pos))
    }

    /// Pieces of `player` with at least one legal move. When a capture is
    /// available only the pieces able to capture qualify.
    pub fn pieces_with_freedom_of(&self, player: PlayerTurn) -> Vec<Position> {
        let must_eat = self.player_can_eat(player);
        self.pieces_of(player)
            .filter(|&pos| {
                if must_eat {
                    self.can_capture_from(pos)
                } else {
                    self.piece_has_freedom(pos)
                }
            })
            .collect()
    }

    /// Final squares of every legal movement starting at `origin`.
    pub fn possible_destinies_for(&self, origin: Position) -> Vec<Position> {
        Movement::legal_from(self, origin)
            .iter()
            .map(Movement::real_destiny)
            .collect()
    }

    pub fn player_can_move(&self, player: PlayerTurn) -> bool {
        self.pieces_of(player).any(|pos| self.piece_has_freedom(pos))
    }

    pub fn get_pieces_for(&self, player: PlayerTurn, kind: PieceType) -> usize {
        self.pieces_of(player)
            .filter(|&pos| self.get_at(pos).kind() == kind)
            .count()
    }

    /// Pieces of the given kind that no opposing piece can currently jump.
    pub fn num_invincible_pieces_for(&self, player: PlayerTurn, kind: PieceType) -> usize {
        self.pieces_of(player)
            .filter(|&pos| self.get_at(pos).kind() == kind && !self.piece_can_be_eaten(pos))
            .count()
    }

    /// Pieces of the given kind with nowhere to go.
    pub fn num_unusable_pieces_for(&self, player: PlayerTurn, kind: PieceType) -> usize {
        self.pieces_of(player)
            .filter(|&pos| self.get_at(pos).kind() == kind && !self.piece_has_freedom(pos))
            .count()
    }

    /// Advancement score: a piece on its own back row is worth 1, one on the
    /// promotion row is worth 8.
    pub fn score_by_distance_to_kings(&self, player: PlayerTurn) -> i32 {
        let target = player.promotion_row();
        self.pieces_of(player)
            .map(|pos| NUM_ROWS as i32 - (pos.row() - target).abs())
            .sum()
    }
}

fn is_dark_square(pos: &Position) -> bool {
    (pos.row() + pos.col().index() as i32) % 2 == 1
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in Col::ALL {
            write!(f, " {}", col.letter())?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{r}")?;
            for piece in row {
                write!(f, " {}", piece.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
