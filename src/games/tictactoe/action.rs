//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{PlaceError, Player, Position, SelectError};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Error that can occur when requesting a move.
///
/// A rejected move never changes the session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// Index outside `0..9`.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The computer is about to move; human input is locked out.
    #[display("Waiting for the computer to move")]
    ComputerToMove,

    /// No computer move is pending, or it belongs to an earlier game.
    #[display("No computer move is pending for this game")]
    NoPendingComputerMove,

    /// The computer could not pick a square.
    #[display("{}", _0)]
    Select(SelectError),
}

impl std::error::Error for MoveError {}

impl From<PlaceError> for MoveError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::OutOfBounds(index) => MoveError::OutOfBounds(index),
            PlaceError::SquareOccupied(index) => Position::from_index(index)
                .map_or(MoveError::OutOfBounds(index), MoveError::SquareOccupied),
        }
    }
}

impl From<SelectError> for MoveError {
    fn from(err: SelectError) -> Self {
        MoveError::Select(err)
    }
}
