//! Board coordinates.
//!
//! A [`Position`] is a (row, column) pair. Rows are numbered 0 to 7 from
//! PLAYER2's back row down to PLAYER1's back row, columns are lettered `A`
//! to `H`. Positions can be offset past the edge of the board; such positions
//! report `within_bounds() == false` and must never be handed to a
//! [`Board`](crate::board::Board).
//!
//! The text notation is the column letter followed by the row digit, e.g.
//! `"C5"` is row 5, column C.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DIAGONALS, NUM_COLS, NUM_ROWS};

/// Errors produced while parsing coordinates or board layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid coordinate '{0}', expected a column A-H followed by a row 0-7")]
    Coordinate(String),
    #[error("row {row} has {len} squares, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unknown piece symbol '{0}'")]
    Symbol(char),
}

/// Board column. `NotValid` stands for any column off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Col {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    NotValid,
}

impl Col {
    /// All on-board columns, left to right.
    pub const ALL: [Col; NUM_COLS] = [
        Col::A,
        Col::B,
        Col::C,
        Col::D,
        Col::E,
        Col::F,
        Col::G,
        Col::H,
    ];

    /// Column for a zero-based index; anything outside 0..8 is `NotValid`.
    pub fn from_index(index: i32) -> Col {
        if (0..NUM_COLS as i32).contains(&index) {
            Col::ALL[index as usize]
        } else {
            Col::NotValid
        }
    }

    /// Column for a letter, case-insensitive.
    pub fn from_char(c: char) -> Col {
        let c = c.to_ascii_uppercase();
        if c.is_ascii_uppercase() {
            Col::from_index(c as i32 - 'A' as i32)
        } else {
            Col::NotValid
        }
    }

    /// Zero-based index (8 for `NotValid`).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Col::NotValid => '?',
            c => (b'A' + c as u8) as char,
        }
    }
}

/// A square on the board, possibly out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: i32,
    col: Col,
}

impl Position {
    pub fn new(row: i32, col: Col) -> Self {
        Self { row, col }
    }

    /// Position from zero-based row and column indices.
    pub fn at(row: i32, col: i32) -> Self {
        Self::new(row, Col::from_index(col))
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.row
    }

    #[inline]
    pub fn col(&self) -> Col {
        self.col
    }

    #[inline]
    pub fn within_bounds(&self) -> bool {
        (0..NUM_ROWS as i32).contains(&self.row) && self.col != Col::NotValid
    }

    /// Shift by a (row, column) delta. Leaving the board yields an
    /// out-of-bounds position rather than wrapping.
    pub fn offset(&self, drow: i32, dcol: i32) -> Position {
        let col = match self.col {
            Col::NotValid => Col::NotValid,
            c => Col::from_index(c.index() as i32 + dcol),
        };
        Position::new(self.row + drow, col)
    }

    /// The four diagonal neighbours in probe order (up-left, up-right,
    /// down-left, down-right). Some may be out of bounds.
    pub fn diagonal_neighbors(&self) -> [Position; 4] {
        DIAGONALS.map(|(dr, dc)| self.offset(dr, dc))
    }

    /// Unit step (row, column) from `self` towards `other`.
    pub(crate) fn direction_to(&self, other: &Position) -> (i32, i32) {
        (
            (other.row - self.row).signum(),
            (other.col.index() as i32 - self.col.index() as i32).signum(),
        )
    }

    /// Row and column distance to `other`, as absolute values.
    pub(crate) fn distance_to(&self, other: &Position) -> (i32, i32) {
        (
            (other.row - self.row).abs(),
            (other.col.index() as i32 - self.col.index() as i32).abs(),
        )
    }

    /// Every on-board position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_ROWS as i32)
            .flat_map(|row| Col::ALL.into_iter().map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.letter(), self.row)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseError::Coordinate(s.to_string()));
        };
        let row = digit
            .to_digit(10)
            .ok_or_else(|| ParseError::Coordinate(s.to_string()))?;
        let pos = Position::new(row as i32, Col::from_char(letter));
        if pos.within_bounds() {
            Ok(pos)
        } else {
            Err(ParseError::Coordinate(s.to_string()))
        }
    }
}
