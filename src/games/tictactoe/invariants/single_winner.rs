//! Single winner invariant: both sides never hold a line at once.

use super::super::Player;
use super::super::rules::has_won;
use super::{GameView, Invariant};

/// Invariant: At most one player covers a win pattern.
///
/// Alternating play stops at the first line, so a board where X and O
/// both own a line means a move was applied after the game ended.
pub struct SingleWinnerInvariant;

impl<G: GameView> Invariant<G> for SingleWinnerInvariant {
    fn holds(game: &G) -> bool {
        !(has_won(game.board(), Player::X) && has_won(game.board(), Player::O))
    }

    fn description() -> &'static str {
        "At most one player holds a line"
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::FakeGame;
    use super::*;

    #[test]
    fn test_single_line_holds() {
        let game = FakeGame::played(&[0, 3, 1, 4, 2]);
        assert!(SingleWinnerInvariant::holds(&game));
    }

    #[test]
    fn test_double_line_violates() {
        let mut game = FakeGame::played(&[0, 3, 1, 4, 2]);
        game.board.place(5, Player::O).unwrap();
        assert!(!SingleWinnerInvariant::holds(&game));
    }
}
