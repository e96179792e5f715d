//! Game session coordinator.
//!
//! A session waits for every player to connect, then walks the question
//! bank in order: each question goes out to every player and the session
//! waits for all answers before sending the next one.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::domain::player::{Player, TriviaPlayer};
use crate::domain::question::{QuestionBank, QuestionId};
use crate::errors::domain::{BarrierPhase, ConflictKind, DomainError, NotFoundKind};
use crate::services::barrier;

/// Session over websocket-backed players, as run by the server.
pub type TriviaSession = GameSession<TriviaPlayer>;

/// Observable progress of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionPhase {
    AwaitingPlayers,
    Question { round: usize, question_id: QuestionId },
    Completed,
    Aborted { reason: String },
}

pub struct GameSession<P: ?Sized = TriviaPlayer> {
    id: Uuid,
    players: Vec<Arc<P>>,
    bank: Arc<QuestionBank>,
    phase: RwLock<SessionPhase>,
    span: Span,
}

impl<P: Player + ?Sized> GameSession<P> {
    pub fn new(players: Vec<Arc<P>>, bank: Arc<QuestionBank>) -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("trivia_game", game_id = %id);
        Self {
            id,
            players,
            bank,
            phase: RwLock::new(SessionPhase::AwaitingPlayers),
            span,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn players(&self) -> &[Arc<P>] {
        &self.players
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.read().clone()
    }

    /// The single player called `name`.
    pub fn get_player(&self, name: &str) -> Result<Arc<P>, DomainError> {
        let mut matches = self.players.iter().filter(|p| p.name() == name);
        match (matches.next(), matches.next()) {
            (Some(player), None) => Ok(Arc::clone(player)),
            (None, _) => Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("no player named {name} in game {}", self.id),
            )),
            (Some(_), Some(_)) => Err(DomainError::conflict(
                ConflictKind::DuplicatePlayerName,
                format!("more than one player named {name} in game {}", self.id),
            )),
        }
    }

    /// Play every question in the bank.
    ///
    /// Any player signal failing ends the game with that error; a signal
    /// that never settles blocks the game.
    pub async fn run_game(&self) -> Result<(), DomainError> {
        let outcome = self.play().instrument(self.span.clone()).await;
        match &outcome {
            Ok(()) => self.set_phase(SessionPhase::Completed),
            Err(err) => self.set_phase(SessionPhase::Aborted {
                reason: err.to_string(),
            }),
        }
        outcome
    }

    async fn play(&self) -> Result<(), DomainError> {
        info!(
            players = self.players.len(),
            questions = self.bank.len(),
            "Starting trivia game"
        );

        barrier::wait_all(
            BarrierPhase::Connection,
            self.players.iter().map(|p| (p.name(), p.connected())),
        )
        .await?;

        for (index, question) in self.bank.iter().enumerate() {
            info!(question_id = %question.id, "Sending question");
            self.set_phase(SessionPhase::Question {
                round: index + 1,
                question_id: question.id,
            });

            for player in &self.players {
                player.send_question(question);
            }

            barrier::wait_all(
                BarrierPhase::Answers(question.id),
                self.players
                    .iter()
                    .map(|p| (p.name(), p.question_answered())),
            )
            .await?;
        }

        info!("Trivia questions completed");
        Ok(())
    }

    fn set_phase(&self, phase: SessionPhase) {
        let _entered = self.span.enter();
        debug!(?phase, "Session phase changed");
        *self.phase.write() = phase;
    }
}
