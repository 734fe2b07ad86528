//! History consistency invariant: the board is exactly the replayed history.

use super::super::Board;
use super::{GameView, Invariant};

/// Invariant: Replaying the move history onto an empty board reproduces
/// the current board.
///
/// No moves are missing, no squares are filled without a move.
pub struct HistoryConsistentInvariant;

impl<G: GameView> Invariant<G> for HistoryConsistentInvariant {
    fn holds(game: &G) -> bool {
        let mut replay = Board::new();
        for mv in game.moves() {
            if replay.place(mv.position.to_index(), mv.player).is_err() {
                return false;
            }
        }
        &replay == game.board()
    }

    fn description() -> &'static str {
        "Board matches the replayed move history"
    }
}
