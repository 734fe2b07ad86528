//! Core domain types for tic-tac-toe.

use super::rules;
use serde::{Deserialize, Serialize};

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, the computer side when one is playing).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }

    /// Mark shown for this square, empty string when unoccupied.
    pub fn mark(self) -> &'static str {
        match self {
            Square::Empty => "",
            Square::Occupied(Player::X) => "X",
            Square::Occupied(Player::O) => "O",
        }
    }
}

/// Reasons a mark cannot be written to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    /// Index is not in `0..9`.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),
    /// Square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] usize),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty. Out-of-range positions are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Writes `player`'s mark at `pos`.
    ///
    /// # Errors
    ///
    /// Fails without touching the board if `pos` is out of range or
    /// already occupied.
    pub fn place(&mut self, pos: usize, player: Player) -> Result<(), PlaceError> {
        match self.squares.get_mut(pos) {
            None => Err(PlaceError::OutOfBounds(pos)),
            Some(Square::Occupied(_)) => Err(PlaceError::SquareOccupied(pos)),
            Some(square) => {
                *square = Square::Occupied(player);
                Ok(())
            }
        }
    }

    /// Returns a copy of this board with `player`'s mark at `pos`.
    ///
    /// Used by search, which never touches the caller's board.
    pub(crate) fn with_mark(mut self, pos: usize, player: Player) -> Self {
        self.squares[pos] = Square::Occupied(player);
        self
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Empty square indices in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|sq| **sq == Square::Occupied(player))
            .count()
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Checks for a winner on the board.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Status derived from the marks on the board.
    pub fn status(&self) -> GameStatus {
        rules::status(self)
    }

    /// The 9 marks as strings, `""` for empty squares.
    pub fn marks(&self) -> [&'static str; BOARD_SIZE] {
        self.squares.map(Square::mark)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    /// Wrong number of cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// Unrecognised cell character.
    #[display("Invalid cell character '{}'", _0)]
    InvalidCell(#[error(not(source))] char),
}

impl std::str::FromStr for Board {
    type Err = BoardParseError;

    /// Parses 9 cells in row-major order: `X`, `O`, and `.`/`-`/`_` for
    /// empty. Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if cells.len() != BOARD_SIZE {
            return Err(BoardParseError::WrongLength(cells.len()));
        }
        let mut squares = [Square::Empty; BOARD_SIZE];
        for (square, c) in squares.iter_mut().zip(cells) {
            *square = match c {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '-' | '_' => Square::Empty,
                other => return Err(BoardParseError::InvalidCell(other)),
            };
        }
        Ok(Self { squares })
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True once the game has left `InProgress`.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Final outcome, if the game is over.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(Outcome::Winner(player)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins!", player),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}
