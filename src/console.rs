//! Line commands for the terminal driver.

use tictactoe::{GameMode, Position};

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Place a mark (board index 0-8).
    Move(usize),
    /// Start a new game.
    Restart,
    /// Switch mode.
    Mode(GameMode),
    /// Leave the program.
    Quit,
    /// Show the command list.
    Help,
}

/// Help text printed for `help` and unknown input.
pub const HELP: &str = "Commands: 1-9 or a square name (e.g. center), restart, mode <pvp|easy|medium|hard>, quit";

impl ConsoleCommand {
    /// Parses a line; `None` for unrecognised input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => None,
            "r" | "restart" => Some(Self::Restart),
            "q" | "quit" | "exit" => Some(Self::Quit),
            "h" | "help" | "?" => Some(Self::Help),
            "m" | "mode" => Some(Self::Mode(GameMode::parse_or_default(rest))),
            _ => Position::from_label_or_number(line).map(|pos| Self::Move(pos.to_index())),
        }
    }
}
