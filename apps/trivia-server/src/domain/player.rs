//! Player capability consumed by game sessions, plus the transport-backed
//! implementation used by the websocket layer.

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::question::{Question, QuestionId};
use crate::domain::signal::{signal, Signal, SignalError, SignalTrigger};
use crate::errors::domain::{ConflictKind, DomainError};

/// What a game session needs from a player.
///
/// `connected` and `question_answered` hand out one-shot signals that the
/// session awaits; `send_question` must not block.
pub trait Player: Send + Sync {
    fn name(&self) -> &str;

    /// Resolves once the player's transport is ready.
    fn connected(&self) -> Signal;

    /// Resolves once the player answered the question most recently sent.
    fn question_answered(&self) -> Signal;

    fn send_question(&self, question: &Question);
}

/// How a session ended, as reported to players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Completed,
    Aborted(String),
}

/// Outbound events for a player's transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Question(Question),
    GameOver(GameOutcome),
}

struct Round {
    question_id: QuestionId,
    answered: SignalTrigger,
}

#[derive(Default)]
struct PlayerInner {
    outbox: Option<mpsc::UnboundedSender<PlayerEvent>>,
    round: Option<Round>,
}

pub struct TriviaPlayer {
    name: String,
    connected: SignalTrigger,
    inner: Mutex<PlayerInner>,
}

impl TriviaPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        let (connected, _) = signal();
        Self {
            name: name.into(),
            connected,
            inner: Mutex::new(PlayerInner::default()),
        }
    }

    /// Bind a live transport and resolve the connection signal.
    ///
    /// A player joins once; a second attach (or an attach after the
    /// connection failed) is a conflict.
    pub fn attach(&self, outbox: mpsc::UnboundedSender<PlayerEvent>) -> Result<(), DomainError> {
        let mut inner = self.inner.lock();
        if inner.outbox.is_some() || self.connected.is_settled() {
            return Err(DomainError::conflict(
                ConflictKind::PlayerAlreadyConnected,
                format!("player {} already joined this game", self.name),
            ));
        }
        inner.outbox = Some(outbox);
        drop(inner);

        self.connected.resolve();
        info!(player = %self.name, "Player connected");
        Ok(())
    }

    /// Drop the transport. Pending signals fail with `Disconnected`.
    pub fn detach(&self) {
        let mut inner = self.inner.lock();
        inner.outbox = None;
        if let Some(round) = &inner.round {
            round.answered.fail(SignalError::Disconnected);
        }
        drop(inner);

        self.connected.fail(SignalError::Disconnected);
        info!(player = %self.name, "Player disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().outbox.is_some()
    }

    /// Mark the current question as answered. The answer itself is only logged.
    pub fn record_answer(&self, question_id: QuestionId, answer: &str) -> Result<(), DomainError> {
        let inner = self.inner.lock();
        let Some(round) = inner.round.as_ref() else {
            return Err(DomainError::validation(format!(
                "player {} has no question outstanding",
                self.name
            )));
        };
        if round.question_id != question_id {
            return Err(DomainError::validation(format!(
                "question {question_id} is not the current question ({})",
                round.question_id
            )));
        }

        if round.answered.resolve() {
            info!(player = %self.name, %question_id, answer, "Answer received");
        } else {
            debug!(player = %self.name, %question_id, "Repeated answer ignored");
        }
        Ok(())
    }

    /// Tell the transport the game is over.
    pub fn finish(&self, outcome: GameOutcome) {
        if let Some(outbox) = &self.inner.lock().outbox {
            let _ = outbox.send(PlayerEvent::GameOver(outcome));
        }
    }
}

impl Player for TriviaPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn connected(&self) -> Signal {
        self.connected.signal()
    }

    fn question_answered(&self) -> Signal {
        match &self.inner.lock().round {
            Some(round) => round.answered.signal(),
            None => {
                let (trigger, signal) = signal();
                trigger.fail(SignalError::Failed(format!(
                    "no question was sent to {}",
                    self.name
                )));
                signal
            }
        }
    }

    fn send_question(&self, question: &Question) {
        let (answered, _) = signal();
        let mut inner = self.inner.lock();

        let delivered = inner
            .outbox
            .as_ref()
            .is_some_and(|outbox| outbox.send(PlayerEvent::Question(question.clone())).is_ok());
        if !delivered {
            warn!(
                player = %self.name,
                question_id = %question.id,
                "Player has no live connection; question not delivered"
            );
            answered.fail(SignalError::Disconnected);
        }

        inner.round = Some(Round {
            question_id: question.id,
            answered,
        });
    }
}
