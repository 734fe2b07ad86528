//! Game session: the live board, turn order, mode and scoreboard.
//!
//! The session is synchronous. It decides *that* a computer move is due and
//! hands out a [`ComputerTurn`] ticket; the async controller decides *when*
//! to cash it in. Tickets from a game that has since been reset are refused.

use crate::games::tictactoe::invariants::{GameView, InvariantSet, TicTacToeInvariants};
use crate::games::tictactoe::{
    Board, GameStatus, Move, MoveError, Outcome, Player, Position, select_computer_move,
};
use crate::mode::GameMode;
use crate::scoreboard::Scoreboard;
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `player` to move.
    AwaitingMove(Player),
    /// Game finished; the board is read-only until the next reset.
    Over(GameStatus),
}

/// Permission for the computer to play one move in one specific game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputerTurn {
    game: u64,
}

impl ComputerTurn {
    /// Game number this ticket belongs to.
    pub fn game(&self) -> u64 {
        self.game
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on.
    Continue {
        /// Player to move next.
        next: Player,
        /// Set when the next move belongs to the computer.
        computer_turn: Option<ComputerTurn>,
    },
    /// The move ended the game.
    GameOver(Outcome),
}

/// One tic-tac-toe session spanning any number of games.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// The live board.
    board: Board,
    /// Current phase.
    phase: Phase,
    /// Who plays O.
    mode: GameMode,
    /// Results so far in this session.
    scoreboard: Scoreboard,
    /// Moves of the current game, in order.
    history: Vec<Move>,
    /// Incremented on every reset; invalidates older computer turns.
    game_number: u64,
    /// Computer move waiting to be played, if any.
    pending: Option<ComputerTurn>,
}

impl GameSession {
    /// Creates a session with an empty board and X to move.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!(%mode, "Creating new game session");
        Self {
            board: Board::new(),
            phase: Phase::AwaitingMove(Player::X),
            mode,
            scoreboard: Scoreboard::new(),
            history: Vec::new(),
            game_number: 0,
            pending: None,
        }
    }

    /// Status derived from the phase.
    pub fn status(&self) -> GameStatus {
        match self.phase {
            Phase::AwaitingMove(_) => GameStatus::InProgress,
            Phase::Over(status) => status,
        }
    }

    /// Player to move, `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        match self.phase {
            Phase::AwaitingMove(player) => Some(player),
            Phase::Over(_) => None,
        }
    }

    /// True while a computer move is scheduled and human input is locked.
    pub fn is_computer_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True when `player` is played by the computer in the current mode.
    pub fn is_computer(&self, player: Player) -> bool {
        player == Player::O && self.mode.has_computer()
    }

    /// Human move request for square `index` by the player whose turn it is.
    ///
    /// # Errors
    ///
    /// Rejects the move, leaving the session untouched, if the game is over,
    /// the computer is to move, the index is out of range, or the square is
    /// taken.
    #[instrument(skip(self), fields(game = self.game_number))]
    pub fn request_move(&mut self, index: usize) -> Result<MoveOutcome, MoveError> {
        let player = match self.phase {
            Phase::Over(_) => return Err(self.reject(MoveError::GameOver)),
            Phase::AwaitingMove(player) => player,
        };
        if self.pending.is_some() || self.is_computer(player) {
            return Err(self.reject(MoveError::ComputerToMove));
        }
        let position = Position::from_index(index)
            .ok_or_else(|| self.reject(MoveError::OutOfBounds(index)))?;
        if !self.board.is_empty(index) {
            return Err(self.reject(MoveError::SquareOccupied(position)));
        }

        self.apply(Move::new(player, position))
    }

    /// Plays the computer's move for a ticket handed out by this game.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoPendingComputerMove`] for a stale or unknown
    /// ticket; the session is untouched.
    #[instrument(skip(self, rng), fields(game = self.game_number))]
    pub fn play_computer_move<R: Rng + ?Sized>(
        &mut self,
        turn: ComputerTurn,
        rng: &mut R,
    ) -> Result<MoveOutcome, MoveError> {
        if self.pending != Some(turn) {
            debug!(ticket_game = turn.game, "Discarding stale computer turn");
            return Err(MoveError::NoPendingComputerMove);
        }
        let difficulty = self
            .mode
            .difficulty()
            .ok_or(MoveError::NoPendingComputerMove)?;

        let index = select_computer_move(&self.board, difficulty, rng)?;
        let position = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.pending = None;

        self.apply(Move::new(Player::O, position))
    }

    /// Clears the board for a new game. The scoreboard is kept and any
    /// pending computer move is cancelled.
    #[instrument(skip(self), fields(game = self.game_number))]
    pub fn request_restart(&mut self) {
        self.board = Board::new();
        self.phase = Phase::AwaitingMove(Player::X);
        self.history.clear();
        self.pending = None;
        self.game_number += 1;
        info!(game = self.game_number, mode = %self.mode, "New game");
    }

    /// Switches mode, which always starts a new game.
    #[instrument(skip(self))]
    pub fn request_mode_change(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Changing game mode");
        self.mode = mode;
        self.request_restart();
    }

    /// Everything a presentation layer needs to draw the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: self.board.marks().map(str::to_string).to_vec(),
            status: self.status(),
            to_move: self.to_move(),
            computer_pending: self.is_computer_pending(),
            mode: self.mode,
            score: self.scoreboard,
            history: self.history.clone(),
        }
    }

    fn apply(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        self.board.place(mv.position.to_index(), mv.player)?;
        self.history.push(mv);
        debug!(%mv, "Move applied");

        let status = self.board.status();
        let outcome = match status.outcome() {
            Some(outcome) => {
                self.phase = Phase::Over(status);
                self.scoreboard.record(outcome);
                info!(%outcome, game = self.game_number, "Game over");
                MoveOutcome::GameOver(outcome)
            }
            None => {
                let next = mv.player.opponent();
                self.phase = Phase::AwaitingMove(next);
                let computer_turn = self.is_computer(next).then_some(ComputerTurn {
                    game: self.game_number,
                });
                self.pending = computer_turn;
                MoveOutcome::Continue {
                    next,
                    computer_turn,
                }
            }
        };

        debug_assert!(
            TicTacToeInvariants::check_all(&*self).is_ok(),
            "session invariants broken after {mv}"
        );
        Ok(outcome)
    }

    fn reject(&self, error: MoveError) -> MoveError {
        warn!(%error, game = self.game_number, "Move rejected");
        error
    }
}

impl GameView for GameSession {
    fn board(&self) -> &Board {
        &self.board
    }

    fn moves(&self) -> &[Move] {
        &self.history
    }

    fn to_move(&self) -> Option<Player> {
        GameSession::to_move(self)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

/// Observable state after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Nine marks in row-major order: `"X"`, `"O"` or `""`.
    cells: Vec<String>,
    /// Game status.
    status: GameStatus,
    /// Player to move while in progress.
    to_move: Option<Player>,
    /// A computer move is scheduled.
    computer_pending: bool,
    /// Current mode.
    mode: GameMode,
    /// Session tallies.
    score: Scoreboard,
    /// Moves of the current game.
    history: Vec<Move>,
}

impl SessionSnapshot {
    /// Status line: whose turn it is, or how the game ended.
    pub fn status_text(&self) -> String {
        match (self.status.outcome(), self.to_move) {
            (Some(outcome), _) => outcome.to_string(),
            (None, Some(player)) => format!("Current Player: {}", player),
            (None, None) => "Game over".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Square;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn play(session: &mut GameSession, moves: &[usize]) {
        for &index in moves {
            session.request_move(index).unwrap();
        }
    }

    #[test]
    fn test_new_session_awaits_x() {
        let session = GameSession::new(GameMode::PlayerVsPlayer);
        assert_eq!(*session.phase(), Phase::AwaitingMove(Player::X));
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.snapshot().status_text(), "Current Player: X");
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = GameSession::default();
        let outcome = session.request_move(4).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Continue {
                next: Player::O,
                computer_turn: None
            }
        );
        assert_eq!(session.to_move(), Some(Player::O));
        session.request_move(0).unwrap();
        assert_eq!(session.board().get(0), Some(Square::Occupied(Player::O)));
        assert_eq!(session.to_move(), Some(Player::X));
    }

    #[test]
    fn test_occupied_square_is_rejected_without_change() {
        let mut session = GameSession::default();
        session.request_move(4).unwrap();
        let before = session.snapshot();
        assert_eq!(
            session.request_move(4),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut session = GameSession::default();
        assert_eq!(session.request_move(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(session.history().len(), 0);
    }

    #[test]
    fn test_win_records_once_and_locks_board() {
        let mut session = GameSession::default();
        play(&mut session, &[0, 3, 1, 4]);
        assert_eq!(
            session.request_move(2),
            Ok(MoveOutcome::GameOver(Outcome::Winner(Player::X)))
        );
        assert_eq!(session.status(), GameStatus::Won(Player::X));
        assert_eq!(*session.scoreboard().x_wins(), 1);
        assert_eq!(session.request_move(8), Err(MoveError::GameOver));
        assert_eq!(*session.scoreboard().x_wins(), 1);
        assert_eq!(session.snapshot().status_text(), "Player X wins!");
    }

    #[test]
    fn test_draw_is_recorded() {
        let mut session = GameSession::default();
        // X O X / O X X / O X O
        play(&mut session, &[0, 1, 2, 3, 4, 6, 5, 8]);
        assert_eq!(session.request_move(7), Ok(MoveOutcome::GameOver(Outcome::Draw)));
        assert_eq!(*session.scoreboard().draws(), 1);
        assert_eq!(session.snapshot().status_text(), "It's a draw!");
    }

    #[test]
    fn test_restart_keeps_score() {
        let mut session = GameSession::default();
        play(&mut session, &[0, 3, 1, 4, 2]);
        session.request_restart();
        let first = session.snapshot();
        session.request_restart();
        assert_eq!(session.snapshot(), first);
        assert_eq!(session.board(), &Board::new());
        assert_eq!(*session.scoreboard().x_wins(), 1);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_computer_turn_locks_human_input() {
        let mut session = GameSession::new(GameMode::ComputerHard);
        let outcome = session.request_move(0).unwrap();
        let MoveOutcome::Continue {
            computer_turn: Some(turn),
            ..
        } = outcome
        else {
            panic!("computer should be due, got {outcome:?}");
        };
        assert!(session.is_computer_pending());
        assert_eq!(session.request_move(1), Err(MoveError::ComputerToMove));

        let mut rng = StdRng::seed_from_u64(3);
        session.play_computer_move(turn, &mut rng).unwrap();
        assert_eq!(session.board().get(4), Some(Square::Occupied(Player::O)));
        assert!(!session.is_computer_pending());
        assert_eq!(session.to_move(), Some(Player::X));
    }

    #[test]
    fn test_stale_computer_turn_is_refused() {
        let mut session = GameSession::new(GameMode::ComputerEasy);
        let MoveOutcome::Continue {
            computer_turn: Some(turn),
            ..
        } = session.request_move(0).unwrap()
        else {
            panic!("computer should be due");
        };
        session.request_restart();

        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            session.play_computer_move(turn, &mut rng),
            Err(MoveError::NoPendingComputerMove)
        );
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_mode_change_resets_mid_game() {
        let mut session = GameSession::new(GameMode::PlayerVsPlayer);
        play(&mut session, &[0, 4, 8]);
        session.request_mode_change(GameMode::ComputerHard);
        assert_eq!(*session.mode(), GameMode::ComputerHard);
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.to_move(), Some(Player::X));
        assert!(!session.is_computer_pending());
    }
}
