//! Running tally of results across the games of a session.

use crate::games::tictactoe::{Outcome, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Wins per side and draws. Counters only ever go up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by X.
    x_wins: u32,
    /// Games won by O.
    o_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished game.
    #[instrument(skip(self))]
    pub(crate) fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Winner(Player::X) => &mut self.x_wins,
            Outcome::Winner(Player::O) => &mut self.o_wins,
            Outcome::Draw => &mut self.draws,
        };
        *counter += 1;
        info!(
            x_wins = self.x_wins,
            o_wins = self.o_wins,
            draws = self.draws,
            "Scoreboard updated"
        );
    }

    /// Total games recorded.
    pub fn games_played(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X: {}  O: {}  Draws: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}
