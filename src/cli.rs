//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe::Player;

/// Tic-tac-toe against a friend or a minimax computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with an optional computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal, one command per line
    Play {
        /// Game mode: pvp, easy, medium or hard (unknown values mean pvp)
        #[arg(short, long)]
        mode: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Delay before the computer's move, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Print each state as a JSON line instead of a drawn board
        #[arg(long)]
        json: bool,
    },

    /// Print the minimax evaluation of a position
    Evaluate {
        /// Nine cells, row-major: X, O, and . for empty (e.g. "XX.OO....")
        board: String,

        /// Side to move
        #[arg(long, value_enum, default_value_t = Side::O)]
        to_move: Side,
    },
}

/// Side to move on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Player X
    X,
    /// Player O
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}
