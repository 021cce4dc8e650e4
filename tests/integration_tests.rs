//! Integration tests for draughts-rust
//!
//! These exercise the public API end to end: setting up positions, resolving
//! movements, and letting the players and the search drive the board.

use draughts_rust::board::{Board, Piece, PieceType, PlayerTurn};
use draughts_rust::constants::WIN_SCORE;
use draughts_rust::game::{Match, Outcome};
use draughts_rust::movement::{MoveError, Movement};
use draughts_rust::player::{HumanPlayer, Player, RandomAiPlayer};
use draughts_rust::position::{Col, Position};
use draughts_rust::search::{AlphaBetaAiPlayer, evaluate};

const P1: PlayerTurn = PlayerTurn::Player1;
const P2: PlayerTurn = PlayerTurn::Player2;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn pos(s: &str) -> Position {
    s.parse().unwrap()
}

/// Play `plies` seeded random movements from the start, alternating sides.
fn play_random(seed: u64, plies: usize) -> (Board, PlayerTurn) {
    let mut p1 = RandomAiPlayer::with_seed(P1, seed);
    let mut p2 = RandomAiPlayer::with_seed(P2, seed ^ 0x5eed);
    let mut board = Board::new();
    let mut turn = P1;
    for _ in 0..plies {
        let player = if turn == P1 { &mut p1 } else { &mut p2 };
        match player.get_movement(&board) {
            Ok(m) => m.execute(&mut board),
            Err(MoveError::NoLegalMove) => break,
            Err(e) => panic!("unexpected error {e}"),
        }
        turn = turn.opponent();
    }
    (board, turn)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_single_capture_scenario() {
    // PLAYER1 man at (5, A) with a PLAYER2 man at (4, B) and (3, C) empty.
    let origin = Position::new(5, Col::A);
    let enemy = Position::new(4, Col::B);
    let landing = Position::new(3, Col::C);
    let board = Board::new().with_piece(enemy, Piece::man(P2));
    assert!(board.get_at(landing).is_empty());

    let m = Movement::new(&board, P1, origin, landing).unwrap();
    assert_eq!(m.path_length(), 1);
    assert!(m.trying_to_eat());

    let mut played = board;
    m.execute(&mut played);
    assert!(played.get_at(enemy).is_empty());
    assert_eq!(played.get_at(landing), Piece::man(P1));
    assert_eq!(played.get_pieces_for(P2, PieceType::Man), 12);
}

#[test]
fn test_no_pieces_left_scenario() {
    let board = Board::from_rows([
        "........",
        "........",
        "........",
        "...O....",
        "........",
        "o.o.....",
        "........",
        "........",
    ])
    .unwrap();
    assert!(!board.player_can_move(P2));

    let ai = AlphaBetaAiPlayer::with_depth(P1, 5);
    for depth in 0..=5 {
        let mut scratch = board;
        assert!(ai.search(&mut scratch, depth, i32::MIN, i32::MAX, false) >= WIN_SCORE);
    }

    let mut scratch = board;
    let loser = AlphaBetaAiPlayer::new(P2);
    assert_eq!(loser.get_movement(&mut scratch), Err(MoveError::NoLegalMove));
}

#[test]
fn test_triple_jump_with_promotion() {
    let board = Board::from_rows([
        "........",
        "......x.",
        "........",
        "....x.x.",
        "........",
        "....x...",
        "...o....",
        "........",
    ])
    .unwrap();

    let destinies = board.possible_destinies_for(pos("D6"));
    assert_eq!(destinies, vec![pos("F0")]);

    let m = Movement::new(&board, P1, pos("D6"), pos("F4")).unwrap();
    assert_eq!(m.to_string(), "D6->F4->H2->F0");
    assert!(m.hops()[2].promoted());
}

#[test]
fn test_search_prefers_double_capture() {
    // A5 can take one man, E7 can take two. A5 comes first in scan order.
    let mut board = Board::from_rows([
        "........",
        "........",
        "........",
        "........",
        ".x...x..",
        "o.......",
        ".....x..",
        "....o...",
    ])
    .unwrap();
    let legal = Movement::legal_movements(&board, P1);
    assert_eq!(legal.len(), 2);
    assert_eq!(legal[0].origin(), pos("A5"));

    let ai = AlphaBetaAiPlayer::with_depth(P1, 1);
    let m = ai.get_movement(&mut board).unwrap();
    assert_eq!(m.to_string(), "E7->G5->E3");
}

// =============================================================================
// Properties over reachable positions
// =============================================================================

#[test]
fn test_execute_undo_restores_board() {
    for seed in 0..30 {
        let (board, turn) = play_random(seed, (seed as usize * 3) % 40);
        for m in Movement::legal_movements(&board, turn) {
            let mut scratch = board;
            m.execute(&mut scratch);
            assert_ne!(scratch, board);
            m.undo(&mut scratch);
            assert_eq!(scratch, board, "seed {seed}, movement {m}");
        }
    }
}

#[test]
fn test_mandatory_capture_everywhere() {
    for seed in 0..30 {
        let (board, turn) = play_random(seed, 25);
        let legal = Movement::legal_movements(&board, turn);
        if board.player_can_eat(turn) {
            assert!(legal.iter().all(Movement::trying_to_eat), "seed {seed}");
        } else {
            assert!(legal.iter().all(|m| !m.trying_to_eat()), "seed {seed}");
        }
    }
}

#[test]
fn test_legal_movements_agree_with_board_queries() {
    for seed in 0..20 {
        let (board, turn) = play_random(seed, 18);
        let legal = Movement::legal_movements(&board, turn);
        let mut origins: Vec<Position> = legal.iter().map(Movement::origin).collect();
        origins.dedup();
        assert_eq!(origins, board.pieces_with_freedom_of(turn), "seed {seed}");
        assert_eq!(board.player_can_move(turn), !legal.is_empty());
    }
}

#[test]
fn test_evaluation_is_antisymmetric() {
    for seed in 0..30 {
        let (board, _) = play_random(seed, 30);
        assert_eq!(evaluate(&board, P1), -evaluate(&board, P2));
    }
}

// =============================================================================
// Players and matches
// =============================================================================

#[test]
fn test_human_against_search() {
    // The human opens C5->D4; the match stops on the turn limit.
    let human = HumanPlayer::with_input(P1, std::io::Cursor::new("C5 D4\n".to_string()));
    let mut game = Match::new(
        Player::Human(human),
        Player::AlphaBetaAi(AlphaBetaAiPlayer::with_depth(P2, 2)),
    )
    .with_turn_limit(1)
    .show_board(false);

    // Whoever starts, exactly one movement is made.
    assert_eq!(game.start().unwrap(), Outcome::Draw);
    assert_ne!(game.board(), &Board::new());
}

#[test]
fn test_random_matches_end_in_a_valid_state() {
    for seed in 0..10 {
        let mut game = Match::new(
            Player::RandomAi(RandomAiPlayer::with_seed(P1, seed)),
            Player::RandomAi(RandomAiPlayer::with_seed(P2, seed + 100)),
        )
        .with_seed(seed)
        .with_turn_limit(500)
        .show_board(false);

        let outcome = game.start().unwrap();
        let board = game.board();
        for p in Position::all() {
            let piece = board.get_at(p);
            assert_eq!(piece.is_empty(), piece.owner() == PlayerTurn::Unknown);
        }
        if let Outcome::Winner(winner) = outcome {
            assert!(!board.player_can_move(winner.opponent()));
        }
    }
}
