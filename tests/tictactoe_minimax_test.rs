//! Search and computer-opponent properties.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tictactoe::{
    Board, DRAW_SCORE, Difficulty, GameMode, GameSession, GameStatus, MoveOutcome, Player,
    WIN_PATTERNS, WIN_SCORE, minimax, select_computer_move,
};

/// Every board reachable by alternating play from the empty board,
/// stopping at wins.
fn reachable_boards() -> Vec<Board> {
    fn walk(board: Board, to_move: Player, seen: &mut HashSet<Board>) {
        if !seen.insert(board) || board.winner().is_some() {
            return;
        }
        for index in board.empty_indices() {
            let mut next = board;
            next.place(index, to_move).unwrap();
            walk(next, to_move.opponent(), seen);
        }
    }
    let mut seen = HashSet::new();
    walk(Board::new(), Player::X, &mut seen);
    seen.into_iter().collect()
}

#[test]
fn test_winner_iff_pattern_covered() {
    for board in reachable_boards() {
        for player in [Player::X, Player::O] {
            let covered = WIN_PATTERNS.iter().any(|pattern| {
                pattern
                    .iter()
                    .all(|&i| board.get(i).and_then(|sq| sq.player()) == Some(player))
            });
            assert_eq!(board.winner() == Some(player), covered, "{board:?}");
        }
    }
}

#[test]
fn test_full_board_without_winner_is_draw() {
    for board in reachable_boards() {
        if board.is_full() && board.winner().is_none() {
            assert_eq!(board.status(), GameStatus::Draw);
        }
        let (x, o) = (board.count(Player::X), board.count(Player::O));
        assert!(x == o || x == o + 1);
    }
}

#[test]
fn test_perfect_play_from_empty_board_draws() {
    assert_eq!(minimax(&Board::new(), Player::O).score, DRAW_SCORE);
    assert_eq!(minimax(&Board::new(), Player::X).score, DRAW_SCORE);
}

#[test]
fn test_hard_reply_to_corner_leaves_no_forced_win() {
    let mut board = Board::new();
    board.place(0, Player::X).unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    let reply = select_computer_move(&board, Difficulty::Hard, &mut rng).unwrap();
    board.place(reply, Player::O).unwrap();

    assert_ne!(minimax(&board, Player::X).score, -WIN_SCORE);
}

#[test]
fn test_hard_computer_never_loses() {
    // Try every X strategy against the hard computer.
    fn explore(session: &GameSession, rng: &mut StdRng, games: &mut usize) {
        for index in session.board().empty_indices() {
            let mut branch = session.clone();
            match branch.request_move(index).unwrap() {
                MoveOutcome::GameOver(outcome) => {
                    assert_ne!(outcome.winner(), Some(Player::X), "{:?}", branch.history());
                    *games += 1;
                }
                MoveOutcome::Continue {
                    computer_turn: Some(turn),
                    ..
                } => match branch.play_computer_move(turn, rng).unwrap() {
                    MoveOutcome::GameOver(_) => *games += 1,
                    MoveOutcome::Continue { .. } => explore(&branch, rng, games),
                },
                MoveOutcome::Continue { .. } => panic!("hard computer must be due"),
            }
        }
    }

    let session = GameSession::new(GameMode::ComputerHard);
    let mut rng = StdRng::seed_from_u64(0);
    let mut games = 0;
    explore(&session, &mut rng, &mut games);
    assert!(games > 0);
}

#[test]
fn test_easy_selects_each_of_three_squares() {
    // X O X / O X O / _ _ _ has squares 6, 7, 8 open.
    let board: Board = "XOX OXO ...".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut hits = [0usize; 9];
    for _ in 0..1000 {
        hits[select_computer_move(&board, Difficulty::Easy, &mut rng).unwrap()] += 1;
    }
    assert!(hits[6] > 0 && hits[7] > 0 && hits[8] > 0, "{hits:?}");
    assert_eq!(hits[..6].iter().sum::<usize>(), 0);
}
