//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::Player;
use super::{GameView, Invariant};

/// Invariant: Players alternate turns.
///
/// Move history must show X, O, X, O, ... pattern.
/// First move is always X. Consequently X has as many marks as O, or one
/// more.
pub struct AlternatingTurnInvariant;

impl<G: GameView> Invariant<G> for AlternatingTurnInvariant {
    fn holds(game: &G) -> bool {
        let history = game.moves();

        if history.first().is_some_and(|m| m.player != Player::X) {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        let (x, o) = (game.board().count(Player::X), game.board().count(Player::O));
        if x != o && x != o + 1 {
            return false;
        }

        // Current to_move must be correct
        let expected_next = if history.len() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };

        game.to_move().is_none_or(|p| p == expected_next)
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::FakeGame;
    use super::*;
    use crate::games::tictactoe::{Move, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&FakeGame::played(&[])));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let game = FakeGame::played(&[0, 4, 2, 6, 8]);
        assert!(AlternatingTurnInvariant::holds(&game));
        assert_eq!(game.to_move, Some(Player::O));
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut game = FakeGame::played(&[0]);
        game.board.place(4, Player::X).unwrap();
        game.moves.push(Move::new(Player::X, Position::Center));
        game.to_move = Some(Player::O);
        assert!(!AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_wrong_player_to_move_violates() {
        let mut game = FakeGame::played(&[0]);
        game.to_move = Some(Player::X);
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
