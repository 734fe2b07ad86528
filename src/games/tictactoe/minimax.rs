//! Exhaustive minimax search for the computer player.
//!
//! O is the maximising side and X the minimising side. Scores are not
//! discounted by depth, so a quick win and a slow win look the same; the
//! chosen move is still optimal.

use super::rules::has_won;
use super::{BOARD_SIZE, Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a board where O holds a line. X wins score the negation.
pub const WIN_SCORE: i32 = 10;

/// Score of a full board with no line.
pub const DRAW_SCORE: i32 = 0;

/// Result of a search: the best move for the side to move and the value
/// of the position under optimal play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Best square, `None` when the board is already terminal.
    pub best_index: Option<usize>,
    /// `+10` O wins, `-10` X wins, `0` draw.
    pub score: i32,
}

impl Evaluation {
    fn terminal(score: i32) -> Self {
        Self {
            best_index: None,
            score,
        }
    }

    /// Best square as a named position.
    pub fn best_position(&self) -> Option<Position> {
        self.best_index.and_then(Position::from_index)
    }
}

/// Evaluates `board` with `to_move` about to play.
///
/// The whole remaining game tree is walked on private copies of the board;
/// the caller's board is never touched. Ties keep the lowest index.
#[instrument(level = "debug", skip(board), fields(empty = board.empty_indices().len()))]
pub fn minimax(board: &Board, to_move: Player) -> Evaluation {
    let evaluation = search(*board, to_move);
    debug!(
        best_index = ?evaluation.best_index,
        score = evaluation.score,
        "Search complete"
    );
    evaluation
}

fn search(board: Board, to_move: Player) -> Evaluation {
    if has_won(&board, Player::X) {
        return Evaluation::terminal(-WIN_SCORE);
    }
    if has_won(&board, Player::O) {
        return Evaluation::terminal(WIN_SCORE);
    }

    let mut best: Option<(usize, i32)> = None;
    for index in (0..BOARD_SIZE).filter(|&i| board.squares()[i] == Square::Empty) {
        let score = search(board.with_mark(index, to_move), to_move.opponent()).score;
        let improves = match best {
            None => true,
            Some((_, best_score)) => match to_move {
                Player::O => score > best_score,
                Player::X => score < best_score,
            },
        };
        if improves {
            best = Some((index, score));
        }
    }

    match best {
        Some((index, score)) => Evaluation {
            best_index: Some(index),
            score,
        },
        None => Evaluation::terminal(DRAW_SCORE),
    }
}
