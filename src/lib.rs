//! Tic-tac-toe game core with a computer opponent.
//!
//! # Architecture
//!
//! - **Games**: board model, win/draw rules, minimax search and the
//!   difficulty policies that pick the computer's move
//! - **Session**: one live game plus the scoreboard, with no globals
//! - **Controller**: async event queue that owns the session and plays the
//!   computer's move after a short display delay
//!
//! # Example
//!
//! ```
//! use tictactoe::{GameMode, GameSession, GameStatus, Player};
//!
//! let mut session = GameSession::new(GameMode::PlayerVsPlayer);
//! for index in [0, 3, 1, 4, 2] {
//!     session.request_move(index).unwrap();
//! }
//! assert_eq!(session.status(), GameStatus::Won(Player::X));
//! assert_eq!(*session.scoreboard().x_wins(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod games;
mod mode;
mod scoreboard;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_COMPUTER_DELAY_MS, GameConfig};

// Crate-level exports - Controller
pub use controller::{ControllerClosed, ControllerHandle, GameController, GameEvent, Request};

// Crate-level exports - Mode and scoreboard
pub use mode::{GameMode, ModeParseError};
pub use scoreboard::Scoreboard;

// Crate-level exports - Session management
pub use session::{ComputerTurn, GameSession, MoveOutcome, Phase, SessionSnapshot};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    BOARD_SIZE, Board, BoardParseError, DRAW_SCORE, Difficulty, Evaluation, GameStatus,
    MEDIUM_RANDOM_CHANCE, Move, MoveError, Outcome, PlaceError, Player, Position, SelectError,
    Square, WIN_PATTERNS, WIN_SCORE, WinPattern, check_winner, has_won, is_full, minimax,
    select_computer_move, status,
};

/// Invariant checks over any [`invariants::GameView`].
pub use games::tictactoe::invariants;
