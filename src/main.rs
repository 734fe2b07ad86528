//! Tictactoe - terminal driver
//!
//! Plays a session on stdin/stdout, or evaluates a single position.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use console::{ConsoleCommand, HELP};
use tictactoe::{
    Board, ControllerHandle, GameConfig, GameController, GameEvent, GameMode, Player,
    SessionSnapshot, minimax,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            config,
            delay_ms,
            seed,
            json,
        } => {
            let config = load_config(config, mode, delay_ms, seed)?;
            run_play(config, json).await
        }
        Command::Evaluate { board, to_move } => run_evaluate(&board, to_move.into()),
    }
}

/// Logs go to stderr so they never interleave with the board.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Builds the config: file first, then command-line overrides.
#[instrument]
fn load_config(
    path: Option<std::path::PathBuf>,
    mode: Option<String>,
    delay_ms: Option<u64>,
    seed: Option<u64>,
) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::new(),
    };
    if let Some(mode) = mode {
        config = config.with_mode(GameMode::parse_or_default(&mode));
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_computer_delay_ms(delay_ms);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    debug!(?config, "Configuration resolved");
    Ok(config)
}

/// Plays until `quit` or end of input.
async fn run_play(config: GameConfig, json: bool) -> Result<()> {
    info!(mode = %config.mode(), "Starting game");
    let (controller, handle, events) = GameController::new(&config);
    let controller_task = tokio::spawn(controller.run());
    let printer = tokio::spawn(print_events(events, json));

    println!("{}", HELP);
    read_commands(handle).await?;

    // Handle dropped: controller drains and stops, then the printer ends.
    controller_task.await.context("Controller task failed")?;
    printer.await.context("Printer task failed")??;
    Ok(())
}

async fn read_commands(handle: ControllerHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let sent = match ConsoleCommand::parse(&line) {
            Some(ConsoleCommand::Move(index)) => handle.request_move(index),
            Some(ConsoleCommand::Restart) => handle.request_restart(),
            Some(ConsoleCommand::Mode(mode)) => handle.request_mode_change(mode),
            Some(ConsoleCommand::Quit) => break,
            Some(ConsoleCommand::Help) | None => {
                println!("{}", HELP);
                Ok(())
            }
        };
        sent.context("Game controller stopped")?;
    }
    Ok(())
}

async fn print_events(mut events: mpsc::UnboundedReceiver<GameEvent>, json: bool) -> Result<()> {
    while let Some(event) = events.recv().await {
        match event {
            GameEvent::StateChanged(snapshot) if json => {
                println!("{}", serde_json::to_string(&snapshot)?);
            }
            GameEvent::StateChanged(snapshot) => print_snapshot(&snapshot),
            GameEvent::ComputerThinking if !json => println!("Computer is thinking..."),
            GameEvent::MoveRejected(err) if !json => println!("Move rejected: {}", err),
            GameEvent::GameOver(_) if !json => println!("Type 'restart' to play again."),
            _ => {}
        }
    }
    Ok(())
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    // Empty squares show the number to type.
    let cells: Vec<String> = snapshot
        .cells()
        .iter()
        .enumerate()
        .map(|(i, mark)| {
            if mark.is_empty() {
                (i + 1).to_string()
            } else {
                mark.clone()
            }
        })
        .collect();
    println!();
    for row in cells.chunks(3) {
        println!(" {}", row.join(" | "));
    }
    println!();
    println!("[{}] {}", snapshot.mode().name(), snapshot.status_text());
    println!("{}", snapshot.score());
}

/// Prints the search result for one position.
fn run_evaluate(board: &str, to_move: Player) -> Result<()> {
    let board: Board = board.parse().context("Invalid board")?;
    let evaluation = minimax(&board, to_move);
    println!("{}", board.display());
    println!();
    match evaluation.best_position() {
        Some(position) => println!(
            "{} to move: best {} (square {}), score {}",
            to_move,
            position,
            position.to_index() + 1,
            evaluation.score
        ),
        None => println!("Game already decided, score {}", evaluation.score),
    }
    Ok(())
}
