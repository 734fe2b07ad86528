//! Win and draw rules for tic-tac-toe.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WIN_PATTERNS, WinPattern, check_winner, has_won};

use super::types::{Board, GameStatus};
use tracing::instrument;

/// Derives the game status from the board.
///
/// A win is checked before a full board, so a move that completes a line
/// on the last empty square is a win rather than a draw.
#[instrument(level = "trace")]
pub fn status(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
