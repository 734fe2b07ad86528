//! Async game controller: a single event queue in front of a [`GameSession`].
//!
//! Input arrives through a [`ControllerHandle`]; state changes leave as
//! [`GameEvent`]s. The computer's move is a timer task that posts a
//! [`ComputerTurn`] back onto the queue after the configured delay, so all
//! mutations happen one at a time on the controller task.

use crate::config::GameConfig;
use crate::games::tictactoe::{MoveError, Outcome};
use crate::mode::GameMode;
use crate::session::{ComputerTurn, GameSession, MoveOutcome, SessionSnapshot};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Requests from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Place the current player's mark.
    Move(usize),
    /// Start a new game.
    Restart,
    /// Switch mode and start a new game.
    ChangeMode(GameMode),
}

/// Messages sent from the controller to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Session state after a mutation (and once at start-up).
    StateChanged(SessionSnapshot),
    /// The computer will move after the display delay.
    ComputerThinking,
    /// A request was refused; nothing changed.
    MoveRejected(MoveError),
    /// A game just finished.
    GameOver(Outcome),
}

/// The controller has stopped and no longer accepts requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Game controller has shut down")]
pub struct ControllerClosed;

/// Cloneable sender for controller requests.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    requests: mpsc::UnboundedSender<Request>,
}

impl ControllerHandle {
    /// Asks to place a mark at `index`.
    pub fn request_move(&self, index: usize) -> Result<(), ControllerClosed> {
        self.send(Request::Move(index))
    }

    /// Asks for a new game.
    pub fn request_restart(&self) -> Result<(), ControllerClosed> {
        self.send(Request::Restart)
    }

    /// Asks for a mode change, which also starts a new game.
    pub fn request_mode_change(&self, mode: GameMode) -> Result<(), ControllerClosed> {
        self.send(Request::ChangeMode(mode))
    }

    fn send(&self, request: Request) -> Result<(), ControllerClosed> {
        self.requests.send(request).map_err(|_| ControllerClosed)
    }
}

/// Owns the session and serialises every mutation.
#[derive(Debug)]
pub struct GameController {
    session: GameSession,
    rng: StdRng,
    delay: Duration,
    requests: mpsc::UnboundedReceiver<Request>,
    turns_tx: mpsc::UnboundedSender<ComputerTurn>,
    turns_rx: mpsc::UnboundedReceiver<ComputerTurn>,
    events: mpsc::UnboundedSender<GameEvent>,
    timer: Option<JoinHandle<()>>,
}

impl GameController {
    /// Creates a controller plus the handle that drives it and the stream
    /// of events it publishes.
    #[instrument(skip(config), fields(mode = %config.mode(), delay_ms = config.computer_delay_ms()))]
    pub fn new(
        config: &GameConfig,
    ) -> (Self, ControllerHandle, mpsc::UnboundedReceiver<GameEvent>) {
        let (requests_tx, requests) = mpsc::unbounded_channel();
        let (turns_tx, turns_rx) = mpsc::unbounded_channel();
        let (events, events_rx) = mpsc::unbounded_channel();

        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };

        let controller = Self {
            session: GameSession::new(*config.mode()),
            rng,
            delay: config.computer_delay(),
            requests,
            turns_tx,
            turns_rx,
            events,
            timer: None,
        };
        let handle = ControllerHandle {
            requests: requests_tx,
        };
        (controller, handle, events_rx)
    }

    /// Current session state.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Runs the event loop until every [`ControllerHandle`] is dropped or
    /// the event receiver goes away.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Starting game controller");
        if self.publish_state().is_err() {
            return;
        }

        loop {
            let step = tokio::select! {
                request = self.requests.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => {
                        debug!("All handles dropped");
                        break;
                    }
                },
                Some(turn) = self.turns_rx.recv() => self.handle_computer_turn(turn),
            };
            if step.is_err() {
                debug!("Event receiver dropped");
                break;
            }
        }

        self.cancel_timer();
        info!("Game controller stopped");
    }

    #[instrument(skip(self))]
    fn handle_request(&mut self, request: Request) -> Result<(), ControllerClosed> {
        match request {
            Request::Move(index) => match self.session.request_move(index) {
                Ok(outcome) => self.after_move(outcome),
                Err(err) => self.emit(GameEvent::MoveRejected(err)),
            },
            Request::Restart => {
                self.cancel_timer();
                self.session.request_restart();
                self.publish_state()
            }
            Request::ChangeMode(mode) => {
                self.cancel_timer();
                self.session.request_mode_change(mode);
                self.publish_state()
            }
        }
    }

    #[instrument(skip(self))]
    fn handle_computer_turn(&mut self, turn: ComputerTurn) -> Result<(), ControllerClosed> {
        self.timer = None;
        match self.session.play_computer_move(turn, &mut self.rng) {
            Ok(outcome) => self.after_move(outcome),
            Err(MoveError::NoPendingComputerMove) => {
                debug!("Ignoring computer turn from an earlier game");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Computer could not move");
                self.emit(GameEvent::MoveRejected(err))
            }
        }
    }

    fn after_move(&mut self, outcome: MoveOutcome) -> Result<(), ControllerClosed> {
        self.publish_state()?;
        match outcome {
            MoveOutcome::GameOver(outcome) => self.emit(GameEvent::GameOver(outcome)),
            MoveOutcome::Continue {
                computer_turn: Some(turn),
                ..
            } => {
                self.schedule(turn);
                self.emit(GameEvent::ComputerThinking)
            }
            MoveOutcome::Continue { .. } => Ok(()),
        }
    }

    fn schedule(&mut self, turn: ComputerTurn) {
        self.cancel_timer();
        let delay = self.delay;
        let turns = self.turns_tx.clone();
        debug!(game = turn.game(), ?delay, "Scheduling computer move");
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The controller may already be gone; nothing to deliver then.
            let _ = turns.send(turn);
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("Cancelling pending computer move");
            timer.abort();
        }
    }

    fn publish_state(&self) -> Result<(), ControllerClosed> {
        self.emit(GameEvent::StateChanged(self.session.snapshot()))
    }

    fn emit(&self, event: GameEvent) -> Result<(), ControllerClosed> {
        self.events.send(event).map_err(|_| ControllerClosed)
    }
}
