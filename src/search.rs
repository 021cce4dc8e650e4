//! Minimax search with alpha-beta pruning.
//!
//! The search explores the game tree depth-first on a single board. Each
//! candidate movement is played through [`Movement::apply`], whose guard
//! undoes it when the child evaluation returns, pruned or not, so the board
//! is exactly as the caller left it at every return point.
//!
//! Scores are always from the point of view of the player the searcher plays
//! for: positive is good for it.

use log::debug;

use crate::board::{Board, PieceType, PlayerTurn};
use crate::constants::{
    DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH, W_DISTANCE, W_INVINCIBLE, W_KING, W_MEN, W_UNUSABLE,
    WIN_SCORE,
};
use crate::movement::{MoveError, Movement};

/// Computer player driven by a fixed-depth alpha-beta search.
#[derive(Debug, Clone)]
pub struct AlphaBetaAiPlayer {
    turn: PlayerTurn,
    /// Plies searched, counting the player's own move
    depth: u32,
}

impl AlphaBetaAiPlayer {
    pub fn new(turn: PlayerTurn) -> Self {
        Self::with_depth(turn, DEFAULT_SEARCH_DEPTH)
    }

    /// Depths beyond [`MAX_SEARCH_DEPTH`] are clamped.
    pub fn with_depth(turn: PlayerTurn, depth: u32) -> Self {
        Self {
            turn,
            depth: depth.min(MAX_SEARCH_DEPTH),
        }
    }

    pub fn turn(&self) -> PlayerTurn {
        self.turn
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Pick the best movement for this player.
    ///
    /// Candidates are tried in [`Movement::legal_movements`] order and the
    /// first of equally scored ones is kept. The board is left unchanged.
    ///
    /// # Errors
    /// [`MoveError::NoLegalMove`] if the player cannot move, i.e. has lost.
    pub fn get_movement(&self, board: &mut Board) -> Result<Movement, MoveError> {
        let mut candidates = Movement::legal_movements(board, self.turn);
        if candidates.is_empty() {
            return Err(MoveError::NoLegalMove);
        }

        let child_depth = self.depth.saturating_sub(1);
        let mut alpha = i32::MIN;
        let mut best = 0;
        let mut best_score = i32::MIN;
        for (i, movement) in candidates.iter().enumerate() {
            let score = {
                let mut applied = movement.apply(board);
                self.search(&mut applied, child_depth, alpha, i32::MAX, false)
            };
            if score > best_score {
                best_score = score;
                best = i;
            }
            alpha = alpha.max(best_score);
        }

        debug!(
            "{} plays {} (score {best_score}, {} candidates, depth {})",
            self.turn,
            candidates[best],
            candidates.len(),
            self.depth
        );
        Ok(candidates.swap_remove(best))
    }

    /// Alpha-beta value of `board` searched `depth` plies deep.
    ///
    /// The side to move is this player when `maximizing`, the opponent
    /// otherwise. A side without a legal movement has lost; that is scored
    /// before the depth cut-off so it is recognised at any depth.
    pub fn search(
        &self,
        board: &mut Board,
        depth: u32,
        mut a: i32,
        mut b: i32,
        maximizing: bool,
    ) -> i32 {
        let side = if maximizing {
            self.turn
        } else {
            self.turn.opponent()
        };
        let movements = Movement::legal_movements(board, side);
        if movements.is_empty() {
            let score = WIN_SCORE + depth.min(MAX_SEARCH_DEPTH) as i32;
            return if maximizing { -score } else { score };
        }
        if depth == 0 {
            return self.heuristic(board);
        }

        if maximizing {
            let mut value = i32::MIN;
            for movement in &movements {
                let child = {
                    let mut applied = movement.apply(board);
                    self.search(&mut applied, depth - 1, a, b, false)
                };
                value = value.max(child);
                a = a.max(value);
                if a >= b {
                    break;
                }
            }
            value
        } else {
            let mut value = i32::MAX;
            for movement in &movements {
                let child = {
                    let mut applied = movement.apply(board);
                    self.search(&mut applied, depth - 1, a, b, true)
                };
                value = value.min(child);
                b = b.min(value);
                if a >= b {
                    break;
                }
            }
            value
        }
    }

    /// Static evaluation for this player.
    pub fn heuristic(&self, board: &Board) -> i32 {
        evaluate(board, self.turn)
    }
}

/// Weighted positional score of `board` for `player`: every term is the
/// player's count minus the opponent's, so swapping the player negates the
/// score.
pub fn evaluate(board: &Board, player: PlayerTurn) -> i32 {
    side_score(board, player) - side_score(board, player.opponent())
}

fn side_score(board: &Board, player: PlayerTurn) -> i32 {
    let men = board.get_pieces_for(player, PieceType::Man) as i32;
    let kings = board.get_pieces_for(player, PieceType::King) as i32;
    let unusable = (board.num_unusable_pieces_for(player, PieceType::Man)
        + board.num_unusable_pieces_for(player, PieceType::King)) as i32;
    let invincible = (board.num_invincible_pieces_for(player, PieceType::Man)
        + board.num_invincible_pieces_for(player, PieceType::King)) as i32;

    men * W_MEN + kings * W_KING + board.score_by_distance_to_kings(player) * W_DISTANCE
        - unusable * W_UNUSABLE
        + invincible * W_INVINCIBLE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::position::Position;

    const P1: PlayerTurn = PlayerTurn::Player1;
    const P2: PlayerTurn = PlayerTurn::Player2;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    /// Plain minimax over the same tree, no pruning.
    fn minimax(ai: &AlphaBetaAiPlayer, board: &mut Board, depth: u32, maximizing: bool) -> i32 {
        let side = if maximizing { ai.turn } else { ai.turn.opponent() };
        let movements = Movement::legal_movements(board, side);
        if movements.is_empty() {
            let score = WIN_SCORE + depth as i32;
            return if maximizing { -score } else { score };
        }
        if depth == 0 {
            return ai.heuristic(board);
        }
        let scores = movements.iter().map(|m| {
            let mut applied = m.apply(board);
            minimax(ai, &mut applied, depth - 1, !maximizing)
        });
        if maximizing {
            scores.fold(i32::MIN, i32::max)
        } else {
            scores.fold(i32::MAX, i32::min)
        }
    }

    fn minimax_choice(ai: &AlphaBetaAiPlayer, board: &mut Board) -> Movement {
        let candidates = Movement::legal_movements(board, ai.turn);
        let mut best = 0;
        let mut best_score = i32::MIN;
        for (i, m) in candidates.iter().enumerate() {
            let score = {
                let mut applied = m.apply(board);
                minimax(ai, &mut applied, ai.depth - 1, false)
            };
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        candidates[best].clone()
    }

    /// Reach a middle-game position by playing seeded random moves.
    fn random_position(seed: u64, plies: usize) -> (Board, PlayerTurn) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut board = Board::new();
        let mut turn = P1;
        for _ in 0..plies {
            let moves = Movement::legal_movements(&board, turn);
            if moves.is_empty() {
                break;
            }
            moves[rng.usize(..moves.len())].execute(&mut board);
            turn = turn.opponent();
        }
        (board, turn)
    }

    #[test]
    fn test_depth_is_clamped() {
        let ai = AlphaBetaAiPlayer::with_depth(P1, u32::MAX);
        assert_eq!(ai.depth(), MAX_SEARCH_DEPTH);

        let board = Board::empty().with_piece(pos("C5"), Piece::man(P1));
        let mut scratch = board;
        let score = ai.search(&mut scratch, u32::MAX, i32::MIN, i32::MAX, false);
        assert_eq!(score, WIN_SCORE + MAX_SEARCH_DEPTH as i32);
    }

    #[test]
    fn test_heuristic_symmetric_start() {
        let board = Board::new();
        assert_eq!(evaluate(&board, P1), 0);
        assert_eq!(evaluate(&board, P2), 0);
    }

    #[test]
    fn test_heuristic_antisymmetric() {
        for seed in 0..20 {
            let (board, _) = random_position(seed, 15);
            assert_eq!(evaluate(&board, P1), -evaluate(&board, P2), "seed {seed}");
        }
    }

    #[test]
    fn test_heuristic_counts_material() {
        let board = Board::new().with_piece(pos("D4"), Piece::king(P1));
        assert!(evaluate(&board, P1) > W_MEN);
        assert!(evaluate(&board, P2) < 0);
    }

    #[test]
    fn test_no_opponent_pieces_is_a_win_at_any_depth() {
        let board = Board::empty().with_piece(pos("C5"), Piece::man(P1));
        assert!(!board.player_can_move(P2));
        let ai = AlphaBetaAiPlayer::with_depth(P1, 4);
        for depth in 0..5 {
            let mut scratch = board;
            let score = ai.search(&mut scratch, depth, i32::MIN, i32::MAX, false);
            assert!(score >= WIN_SCORE, "depth {depth}: {score}");
            assert_eq!(scratch, board);
        }
    }

    #[test]
    fn test_no_legal_move() {
        let mut board = Board::empty().with_piece(pos("C5"), Piece::man(P1));
        let ai = AlphaBetaAiPlayer::new(P2);
        assert_eq!(ai.get_movement(&mut board), Err(MoveError::NoLegalMove));
    }

    #[test]
    fn test_takes_winning_capture() {
        let mut board = Board::empty()
            .with_piece(pos("C5"), Piece::man(P1))
            .with_piece(pos("D4"), Piece::man(P2));
        let ai = AlphaBetaAiPlayer::with_depth(P1, 3);
        let m = ai.get_movement(&mut board).unwrap();
        assert_eq!(m.to_string(), "C5->E3");
    }

    #[test]
    fn test_avoids_losing_a_man() {
        // A5->B4 walks into a forced capture by C3.
        let mut board = Board::empty()
            .with_piece(pos("A5"), Piece::man(P1))
            .with_piece(pos("G5"), Piece::man(P1))
            .with_piece(pos("C3"), Piece::man(P2));
        let ai = AlphaBetaAiPlayer::with_depth(P1, 2);
        let m = ai.get_movement(&mut board).unwrap();
        assert_ne!(m.origin(), pos("A5"));
    }

    #[test]
    fn test_get_movement_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board;
        let ai = AlphaBetaAiPlayer::with_depth(P2, 4);
        let m = ai.get_movement(&mut board).unwrap();
        assert_eq!(board, before);
        assert!(Movement::legal_movements(&board, P2).contains(&m));
    }

    #[test]
    fn test_alpha_beta_matches_minimax_from_start() {
        let ai = AlphaBetaAiPlayer::with_depth(P1, 4);
        let mut board = Board::new();
        let expected = minimax_choice(&ai, &mut board);
        assert_eq!(ai.get_movement(&mut board).unwrap(), expected);
    }

    #[test]
    fn test_alpha_beta_matches_minimax_midgame() {
        for seed in 0..8 {
            let (mut board, turn) = random_position(seed, 20);
            if !board.player_can_move(turn) {
                continue;
            }
            let ai = AlphaBetaAiPlayer::with_depth(turn, 3);
            let expected = minimax_choice(&ai, &mut board);
            let before = board;
            assert_eq!(ai.get_movement(&mut board).unwrap(), expected, "seed {seed}");
            assert_eq!(board, before);

            // Root values agree as well.
            let pruned = ai.search(&mut board, 3, i32::MIN, i32::MAX, true);
            assert_eq!(pruned, minimax(&ai, &mut board, 3, true), "seed {seed}");
        }
    }
}
