//! Tests for session rules and scoreboard through the public API.

use tictactoe::{
    Board, GameMode, GameSession, GameStatus, MoveError, MoveOutcome, Outcome, Phase, Player,
    Position, Square,
};

fn play(session: &mut GameSession, moves: &[usize]) {
    for &index in moves {
        session.request_move(index).expect("legal move");
    }
}

#[test]
fn test_completing_top_row_wins_for_x() {
    // X X _ / O O _ / _ _ _ with X to move at index 2
    let mut session = GameSession::new(GameMode::PlayerVsPlayer);
    play(&mut session, &[0, 3, 1, 4]);
    let outcome = session.request_move(2).unwrap();

    assert_eq!(outcome, MoveOutcome::GameOver(Outcome::Winner(Player::X)));
    assert_eq!(session.board().winner(), Some(Player::X));
    assert_eq!(*session.phase(), Phase::Over(GameStatus::Won(Player::X)));
}

#[test]
fn test_full_board_without_line_is_draw_and_counted() {
    let mut session = GameSession::new(GameMode::PlayerVsPlayer);
    assert_eq!(*session.scoreboard().draws(), 0);

    // X O X / O X X / O X O
    play(&mut session, &[0, 1, 2, 3, 4, 6, 5, 8, 7]);

    assert!(session.board().is_full());
    assert_eq!(session.board().winner(), None);
    assert_eq!(session.status(), GameStatus::Draw);
    assert_eq!(session.snapshot().status_text(), "It's a draw!");
    assert_eq!(*session.scoreboard().draws(), 1);
}

#[test]
fn test_restart_twice_is_idempotent() {
    let mut session = GameSession::new(GameMode::PlayerVsPlayer);
    play(&mut session, &[0, 3, 1, 4, 2]);
    let score = *session.scoreboard();

    session.request_restart();
    let once = session.snapshot();
    session.request_restart();
    let twice = session.snapshot();

    assert_eq!(once, twice);
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.to_move(), Some(Player::X));
    assert_eq!(*session.scoreboard(), score);
}

#[test]
fn test_mode_change_mid_game_starts_fresh() {
    let mut session = GameSession::new(GameMode::PlayerVsPlayer);
    play(&mut session, &[4, 0, 8]);

    session.request_mode_change(GameMode::ComputerHard);

    assert_eq!(*session.mode(), GameMode::ComputerHard);
    assert_eq!(session.board(), &Board::new());
    assert_eq!(*session.phase(), Phase::AwaitingMove(Player::X));
    assert!(session.history().is_empty());
}

#[test]
fn test_illegal_moves_change_nothing() {
    let mut session = GameSession::new(GameMode::PlayerVsPlayer);
    play(&mut session, &[4]);
    let before = session.snapshot();

    assert_eq!(
        session.request_move(4),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert_eq!(session.request_move(11), Err(MoveError::OutOfBounds(11)));
    assert_eq!(session.snapshot(), before);

    play(&mut session, &[0, 3, 1, 5]);
    assert_eq!(session.status(), GameStatus::Won(Player::X));
    let finished = session.snapshot();
    assert_eq!(session.request_move(2), Err(MoveError::GameOver));
    assert_eq!(session.snapshot(), finished);
}

#[test]
fn test_scores_accumulate_across_games() {
    let mut session = GameSession::new(GameMode::PlayerVsPlayer);
    play(&mut session, &[0, 3, 1, 4, 2]); // X wins
    session.request_restart();
    play(&mut session, &[0, 3, 1, 4, 8, 5]); // O wins
    session.request_restart();
    play(&mut session, &[0, 1, 2, 3, 4, 6, 5, 8, 7]); // draw

    let score = session.scoreboard();
    assert_eq!((*score.x_wins(), *score.o_wins(), *score.draws()), (1, 1, 1));
}

#[test]
fn test_snapshot_cells_follow_board() {
    let mut session = GameSession::new(GameMode::PlayerVsPlayer);
    play(&mut session, &[0, 8]);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.cells()[0], "X");
    assert_eq!(snapshot.cells()[8], "O");
    assert_eq!(snapshot.cells()[4], "");
    assert_eq!(session.board().get(8), Some(Square::Occupied(Player::O)));
    assert_eq!(snapshot.status_text(), "Current Player: X");
}
