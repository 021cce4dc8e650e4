//! Move validation, capture-chain resolution, execution and undo.
//!
//! A [`Movement`] is built from an origin and a requested destiny. The
//! destiny is either a one-square step or the landing square of a first
//! jump. When the first hop is a capture the movement keeps jumping: every
//! continuation is explored depth-first and the longest one is kept, ties
//! going to the first found in probe order (up-left, up-right, down-left,
//! down-right).
//!
//! Validation always happens before the board is touched. Once built, a
//! movement can be executed and undone any number of times as long as the
//! calls are paired; [`Movement::apply`] returns a guard that undoes on drop.

use std::fmt;
use std::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::board::{Board, Piece, PlayerTurn};
use crate::position::Position;

/// Reasons a movement is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Illegal move: no piece of yours at the origin")]
    InvalidOrigin,
    #[error("Illegal move: destination is not an empty square reachable diagonally")]
    InvalidDestiny,
    #[error("Illegal move: a capture is available and must be taken")]
    IllegalSimpleMoveWhileCaptureAvailable,
    #[error("No legal move available")]
    NoLegalMove,
}

/// One step of a movement: a simple move or a single jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    origin: Position,
    destiny: Position,
    /// Piece as it stood on `origin` before the hop
    moved: Piece,
    /// Jumped square and the piece that stood there
    captured: Option<(Position, Piece)>,
    /// Whether the hop crowned a man
    promoted: bool,
}

impl Hop {
    /// Describe the hop from `origin` to `destiny` on the current board.
    /// Geometry must already be validated.
    fn plan(board: &Board, origin: Position, destiny: Position) -> Hop {
        let moved = board.get_at(origin);
        let captured = if origin.distance_to(&destiny).0 == 2 {
            let (dr, dc) = origin.direction_to(&destiny);
            let over = origin.offset(dr, dc);
            Some((over, board.get_at(over)))
        } else {
            None
        };
        Hop {
            origin,
            destiny,
            moved,
            captured,
            promoted: moved.is_man() && destiny.row() == moved.owner().promotion_row(),
        }
    }

    fn apply(&self, board: &mut Board) {
        *cell(board, self.origin) = Piece::EMPTY;
        if let Some((square, _)) = self.captured {
            *cell(board, square) = Piece::EMPTY;
        }
        *cell(board, self.destiny) = if self.promoted {
            self.moved.crowned()
        } else {
            self.moved
        };
    }

    fn revert(&self, board: &mut Board) {
        *cell(board, self.destiny) = Piece::EMPTY;
        if let Some((square, piece)) = self.captured {
            *cell(board, square) = piece;
        }
        *cell(board, self.origin) = self.moved;
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn destiny(&self) -> Position {
        self.destiny
    }

    pub fn captured(&self) -> Option<Position> {
        self.captured.map(|(square, _)| square)
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn promoted(&self) -> bool {
        self.promoted
    }
}

#[inline]
fn cell(board: &mut Board, pos: Position) -> &mut Piece {
    board.cell_mut(pos.row() as usize, pos.col().index())
}

/// A validated move, possibly a chain of jumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    origin: Position,
    destiny: Position,
    real_destiny: Position,
    original_piece: Piece,
    destiny_piece: Piece,
    hops: Vec<Hop>,
}

impl Movement {
    /// Validate a move for `player` and resolve its full capture chain.
    pub fn new(
        board: &Board,
        player: PlayerTurn,
        origin: Position,
        destiny: Position,
    ) -> Result<Self, MoveError> {
        Self::resolve(board, player, origin, destiny, true)
    }

    /// Validate a move for `player`. With `expand` false a capture stops
    /// after its first jump.
    ///
    /// # Errors
    /// - [`MoveError::InvalidOrigin`] - origin does not hold a piece of `player`
    /// - [`MoveError::InvalidDestiny`] - destiny is off the board, occupied,
    ///   not diagonal, too far, or a backward step for a man
    /// - [`MoveError::IllegalSimpleMoveWhileCaptureAvailable`] - a simple move
    ///   while `player` can capture somewhere
    pub fn resolve(
        board: &Board,
        player: PlayerTurn,
        origin: Position,
        destiny: Position,
        expand: bool,
    ) -> Result<Self, MoveError> {
        if !has_valid_origin(board, player, origin) {
            return Err(MoveError::InvalidOrigin);
        }
        if !has_valid_destiny(board, origin, destiny) {
            return Err(MoveError::InvalidDestiny);
        }

        let capturing = can_eat(board, origin, destiny);
        if !capturing {
            if !is_simple_step(board, origin, destiny) {
                return Err(MoveError::InvalidDestiny);
            }
            if board.player_can_eat(player) {
                return Err(MoveError::IllegalSimpleMoveWhileCaptureAvailable);
            }
        }

        let first = Hop::plan(board, origin, destiny);
        let mut hops = vec![first];
        if capturing && expand {
            let mut scratch = *board;
            first.apply(&mut scratch);
            hops.extend(find_longest_path(&mut scratch, destiny));
        }

        let real_destiny = hops[hops.len() - 1].destiny;
        Ok(Movement {
            origin,
            destiny,
            real_destiny,
            original_piece: board.get_at(origin),
            destiny_piece: board.get_at(real_destiny),
            hops,
        })
    }

    /// Every legal movement for `player`, origins scanned row-major and
    /// destinations in probe order. Only captures are listed when one is
    /// available.
    pub fn legal_movements(board: &Board, player: PlayerTurn) -> Vec<Movement> {
        let must_eat = board.player_can_eat(player);
        let mut movements = Vec::new();
        for origin in board.pieces_of(player) {
            collect_from(board, player, origin, must_eat, &mut movements);
        }
        movements
    }

    /// Legal movements of whichever piece stands on `origin`.
    pub fn legal_from(board: &Board, origin: Position) -> Vec<Movement> {
        let player = board.get_owner(origin);
        let mut movements = Vec::new();
        if player != PlayerTurn::Unknown {
            let must_eat = board.player_can_eat(player);
            collect_from(board, player, origin, must_eat, &mut movements);
        }
        movements
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Destination as requested.
    pub fn destiny(&self) -> Position {
        self.destiny
    }

    /// Square the piece ends on once the whole chain is played.
    pub fn real_destiny(&self) -> Position {
        self.real_destiny
    }

    pub fn original_piece(&self) -> Piece {
        self.original_piece
    }

    pub fn destiny_piece(&self) -> Piece {
        self.destiny_piece
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Squares jumped over, in order.
    pub fn captured(&self) -> Vec<Position> {
        self.hops.iter().filter_map(Hop::captured).collect()
    }

    pub fn is_diagonal(&self) -> bool {
        is_diagonal(self.origin, self.destiny)
    }

    pub fn trying_to_eat(&self) -> bool {
        self.hops[0].is_capture()
    }

    /// Squares covered by the first hop.
    pub fn length(&self) -> i32 {
        let (rows, cols) = self.origin.distance_to(&self.destiny);
        rows.max(cols)
    }

    /// Number of hops in the chain.
    pub fn path_length(&self) -> usize {
        self.hops.len()
    }

    /// True if no hop passes over an occupied square other than the piece it
    /// captures. Hops built by validation are one or two squares long, so this
    /// holds for every resolved movement; it is a consistency check for
    /// movements replayed on a board other than the one they were built on.
    pub fn clear_path(&self, board: &Board) -> bool {
        let captured = self.captured();
        self.hops.iter().all(|hop| {
            let (dr, dc) = hop.origin.direction_to(&hop.destiny);
            let (steps, _) = hop.origin.distance_to(&hop.destiny);
            (1..steps).all(|i| {
                let square = hop.origin.offset(i * dr, i * dc);
                board.get_at(square).is_empty() || captured.contains(&square)
            })
        })
    }

    /// Play every hop on `board`.
    pub fn execute(&self, board: &mut Board) {
        debug_assert_eq!(board.get_at(self.origin), self.original_piece);
        for hop in &self.hops {
            hop.apply(board);
        }
    }

    /// Take back every hop, last first. Must follow a matching `execute`.
    pub fn undo(&self, board: &mut Board) {
        for hop in self.hops.iter().rev() {
            hop.revert(board);
        }
    }

    /// Execute now and undo when the returned guard is dropped.
    pub fn apply<'a>(&'a self, board: &'a mut Board) -> Applied<'a> {
        self.execute(board);
        Applied {
            board,
            movement: self,
        }
    }
}

/// A board with a movement played on it. Dropping the guard undoes the
/// movement, so early returns cannot leak the change.
pub struct Applied<'a> {
    board: &'a mut Board,
    movement: &'a Movement,
}

impl Deref for Applied<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Applied<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        self.movement.undo(self.board);
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        for hop in &self.hops {
            write!(f, "->{}", hop.destiny)?;
        }
        Ok(())
    }
}

pub fn is_diagonal(origin: Position, destiny: Position) -> bool {
    let (rows, cols) = origin.distance_to(&destiny);
    rows == cols
}

/// True if moving from `origin` to `destiny` jumps exactly one opposing piece
/// onto an empty square.
pub fn can_eat(board: &Board, origin: Position, destiny: Position) -> bool {
    if !origin.within_bounds() || !board.is_free(destiny) {
        return false;
    }
    let piece = board.get_at(origin);
    if piece.is_empty() || origin.distance_to(&destiny) != (2, 2) {
        return false;
    }
    let (dr, dc) = origin.direction_to(&destiny);
    board.get_owner(origin.offset(dr, dc)) == piece.owner().opponent()
}

fn has_valid_origin(board: &Board, player: PlayerTurn, origin: Position) -> bool {
    player != PlayerTurn::Unknown && origin.within_bounds() && board.get_owner(origin) == player
}

fn has_valid_destiny(board: &Board, origin: Position, destiny: Position) -> bool {
    board.is_free(destiny) && is_diagonal(origin, destiny)
}

fn is_simple_step(board: &Board, origin: Position, destiny: Position) -> bool {
    let piece = board.get_at(origin);
    origin.distance_to(&destiny) == (1, 1)
        && (piece.is_king() || destiny.row() - origin.row() == piece.owner().forward())
}

/// Longest sequence of further jumps available to the piece on `from`.
/// The board is modified while exploring and restored before returning.
fn find_longest_path(board: &mut Board, from: Position) -> Vec<Hop> {
    let mut longest = Vec::new();
    for landing in board.capture_landings(from) {
        let hop = Hop::plan(board, from, landing);
        hop.apply(board);
        let mut path = vec![hop];
        path.extend(find_longest_path(board, landing));
        hop.revert(board);
        if path.len() > longest.len() {
            longest = path;
        }
    }
    longest
}

fn collect_from(
    board: &Board,
    player: PlayerTurn,
    origin: Position,
    must_eat: bool,
    out: &mut Vec<Movement>,
) {
    let targets = if must_eat {
        board.capture_landings(origin)
    } else {
        board.simple_steps(origin)
    };
    for destiny in targets {
        if let Ok(movement) = Movement::new(board, player, origin, destiny) {
            let seen = out
                .iter()
                .any(|m| m.origin == origin && m.real_destiny == movement.real_destiny);
            if !seen {
                out.push(movement);
            }
        }
    }
}
