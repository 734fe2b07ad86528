//! Difficulty policies for choosing the computer's move.

use super::minimax::minimax;
use super::{Board, Player};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Chance that a medium computer plays randomly instead of optimally.
pub const MEDIUM_RANDOM_CHANCE: f64 = 0.5;

/// How often the computer deviates from optimal play.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random among the empty squares.
    Easy,
    /// A coin flip between Easy and Hard on every move.
    Medium,
    /// Always the minimax move.
    Hard,
}

/// The computer was asked to move on a board with no empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SelectError {
    /// Every square is taken.
    #[display("No valid moves available")]
    NoMovesAvailable,
}

/// Picks the computer's square (playing O) for the given difficulty.
///
/// # Errors
///
/// Returns [`SelectError::NoMovesAvailable`] on a full board.
#[instrument(skip(board, rng))]
pub fn select_computer_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, SelectError> {
    let empty = board.empty_indices();
    if empty.is_empty() {
        return Err(SelectError::NoMovesAvailable);
    }

    let index = match difficulty {
        Difficulty::Easy => random_move(&empty, rng)?,
        Difficulty::Medium => {
            if rng.gen_bool(MEDIUM_RANDOM_CHANCE) {
                debug!("Medium computer playing randomly");
                random_move(&empty, rng)?
            } else {
                debug!("Medium computer playing optimally");
                optimal_move(board)?
            }
        }
        Difficulty::Hard => optimal_move(board)?,
    };

    debug!(index, "Computer chose square");
    Ok(index)
}

fn random_move<R: Rng + ?Sized>(empty: &[usize], rng: &mut R) -> Result<usize, SelectError> {
    empty
        .choose(rng)
        .copied()
        .ok_or(SelectError::NoMovesAvailable)
}

fn optimal_move(board: &Board) -> Result<usize, SelectError> {
    minimax(board, Player::O)
        .best_index
        .ok_or(SelectError::NoMovesAvailable)
}
