//! Game configuration loaded from TOML.

use crate::mode::GameMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Pause before the computer's move is shown, matching the browser game.
pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 400;

/// Settings for a play session.
///
/// ```toml
/// mode = "hard"
/// computer_delay_ms = 250
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Initial mode. Unknown tokens fall back to `pvp`.
    #[serde(default)]
    mode: GameMode,

    /// Delay before a computer move is applied.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Seed for the computer's random choices; entropy when absent.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,
}

fn default_computer_delay_ms() -> u64 {
    DEFAULT_COMPUTER_DELAY_MS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            computer_delay_ms: default_computer_delay_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, delay_ms = config.computer_delay_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Delay before a computer move as a [`Duration`].
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.computer_delay(), Duration::from_millis(400));
    }

    #[test]
    fn test_full_toml() {
        let config =
            GameConfig::from_toml("mode = \"hard\"\ncomputer_delay_ms = 5\nseed = 42\n").unwrap();
        assert_eq!(*config.mode(), GameMode::ComputerHard);
        assert_eq!(*config.computer_delay_ms(), 5);
        assert_eq!(*config.seed(), Some(42));
    }

    #[test]
    fn test_unknown_mode_defaults_to_pvp() {
        let config = GameConfig::from_toml("mode = \"nightmare\"").unwrap();
        assert_eq!(*config.mode(), GameMode::PlayerVsPlayer);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let err = GameConfig::from_toml("computer_delay_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_from_file_and_setters() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"easy\"").unwrap();

        let config = GameConfig::from_file(file.path())
            .unwrap()
            .with_computer_delay_ms(0)
            .with_seed(7);
        assert_eq!(*config.mode(), GameMode::ComputerEasy);
        assert_eq!(config.computer_delay(), Duration::ZERO);
        assert_eq!(*config.seed(), Some(7));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = GameConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }
}
