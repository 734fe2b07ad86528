//! Tic-tac-toe rules, search and computer policies.

mod action;
pub mod invariants;
mod minimax;
mod position;
mod rules;
mod selector;
mod types;

pub use action::{Move, MoveError};
pub use minimax::{DRAW_SCORE, Evaluation, WIN_SCORE, minimax};
pub use position::Position;
pub use rules::{WIN_PATTERNS, WinPattern, check_winner, has_won, is_full, status};
pub use selector::{Difficulty, MEDIUM_RANDOM_CHANCE, SelectError, select_computer_move};
pub use types::{BOARD_SIZE, Board, BoardParseError, GameStatus, Outcome, PlaceError, Player, Square};
