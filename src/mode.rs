//! Game mode selection.

use crate::games::tictactoe::Difficulty;
use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use tracing::{instrument, warn};

/// Game mode - who plays O, and how well?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, strum::EnumIter)]
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    /// Computer plays O at random.
    #[serde(rename = "easy")]
    ComputerEasy,
    /// Computer plays O, optimal half of the time.
    #[serde(rename = "medium")]
    ComputerMedium,
    /// Computer plays O with full minimax.
    #[serde(rename = "hard")]
    ComputerHard,
}

impl GameMode {
    /// Token used on the command line and in config files.
    pub fn token(self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "pvp",
            GameMode::ComputerEasy => "easy",
            GameMode::ComputerMedium => "medium",
            GameMode::ComputerHard => "hard",
        }
    }

    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "Player vs Player",
            GameMode::ComputerEasy => "Computer (Easy)",
            GameMode::ComputerMedium => "Computer (Medium)",
            GameMode::ComputerHard => "Computer (Hard)",
        }
    }

    /// Difficulty of the computer opponent, `None` in player-vs-player.
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            GameMode::PlayerVsPlayer => None,
            GameMode::ComputerEasy => Some(Difficulty::Easy),
            GameMode::ComputerMedium => Some(Difficulty::Medium),
            GameMode::ComputerHard => Some(Difficulty::Hard),
        }
    }

    /// True when the computer plays O.
    pub fn has_computer(self) -> bool {
        self.difficulty().is_some()
    }

    /// Parses a mode token, falling back to player-vs-player.
    #[instrument]
    pub fn parse_or_default(token: &str) -> Self {
        token.parse().unwrap_or_else(|e: ModeParseError| {
            warn!(error = %e, "Falling back to player-vs-player");
            Self::default()
        })
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Unknown game mode token.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown game mode '{}' (expected pvp, easy, medium or hard)", token)]
pub struct ModeParseError {
    /// The rejected token.
    pub token: String,
}

impl FromStr for GameMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        <GameMode as strum::IntoEnumIterator>::iter()
            .find(|mode| mode.token() == wanted)
            .ok_or_else(|| ModeParseError {
                token: s.to_string(),
            })
    }
}

impl<'de> Deserialize<'de> for GameMode {
    /// Unknown tokens deserialize to player-vs-player rather than failing.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&token))
    }
}
