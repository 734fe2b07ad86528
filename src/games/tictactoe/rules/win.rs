//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Square};
use tracing::instrument;

/// Three square indices forming a line.
pub type WinPattern = [usize; 3];

/// Every line on the board: rows, then columns, then diagonals.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns true if `player` covers any line.
pub fn has_won(board: &Board, player: Player) -> bool {
    WIN_PATTERNS.iter().any(|pattern| {
        pattern
            .iter()
            .all(|&i| board.get(i) == Some(Square::Occupied(player)))
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise. X is checked first; both players holding a line at
/// once cannot happen under alternating play.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| has_won(board, player))
}
