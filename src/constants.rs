//! Constants for board geometry, move probing, and search parameters.
//!
//! Draughts is played on a fixed 8x8 board, so unlike engines for games with
//! several board sizes there is nothing to select at compile time here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows on the board.
pub const NUM_ROWS: usize = 8;

/// Number of columns on the board.
pub const NUM_COLS: usize = 8;

/// Rows filled with men at the start, counted from each player's back row.
pub const STARTING_ROWS: usize = 3;

/// Diagonal probe order as (row delta, column delta).
/// Order: up-left, up-right, down-left, down-right.
///
/// Every enumeration of steps and captures follows this order, which makes
/// tie-breaking between equal capture chains and equal search scores
/// reproducible.
pub const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies for the alpha-beta player.
pub const DEFAULT_SEARCH_DEPTH: u32 = 6;

/// Deepest search accepted. Deeper requests are clamped to this.
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Score of a won position. Terminal scores add the remaining depth so that
/// faster wins are preferred.
pub const WIN_SCORE: i32 = 100_000;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Weight of the difference in men.
pub const W_MEN: i32 = 100;

/// Weight of the difference in kings.
pub const W_KING: i32 = 250;

/// Weight of the difference in advancement towards the promotion row.
pub const W_DISTANCE: i32 = 3;

/// Penalty per unusable piece (no move available).
pub const W_UNUSABLE: i32 = 10;

/// Bonus per invincible piece (cannot currently be captured).
pub const W_INVINCIBLE: i32 = 5;
