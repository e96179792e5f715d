use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::player::{GameOutcome, TriviaPlayer};
use crate::domain::question::QuestionBank;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::services::game_session::{GameSession, TriviaSession};

/// Live games allowed at once unless configured otherwise.
pub const DEFAULT_MAX_GAMES: usize = 1024;

/// Live sessions by id. A session is dropped once its game ends.
///
/// A game that never gets all its players stays live, so the number of
/// sessions is capped.
pub struct GameRegistry {
    bank: Arc<QuestionBank>,
    sessions: DashMap<Uuid, Arc<TriviaSession>>,
    max_games: usize,
}

impl GameRegistry {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self::with_max_games(bank, DEFAULT_MAX_GAMES)
    }

    pub fn with_max_games(bank: Arc<QuestionBank>, max_games: usize) -> Self {
        Self {
            bank,
            sessions: DashMap::new(),
            max_games,
        }
    }

    pub fn max_games(&self) -> usize {
        self.max_games
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    /// Build a session for the named players and store it.
    pub fn create<S: AsRef<str>>(&self, names: &[S]) -> Result<Arc<TriviaSession>, DomainError> {
        if names.is_empty() {
            return Err(DomainError::validation("a game needs at least one player"));
        }
        // Checked before insert; concurrent creates may overshoot by a few.
        if self.sessions.len() >= self.max_games {
            warn!(live = self.sessions.len(), max = self.max_games, "Game limit reached");
            return Err(DomainError::conflict(
                ConflictKind::TooManyGames,
                format!("{} games are already live", self.max_games),
            ));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(DomainError::validation("player names must not be blank"));
            }
            if !seen.insert(name) {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicatePlayerName,
                    format!("player name {name} is listed twice"),
                ));
            }
        }

        let players = names
            .iter()
            .map(|name| Arc::new(TriviaPlayer::new(name.as_ref())))
            .collect();
        let session = Arc::new(GameSession::new(players, Arc::clone(&self.bank)));
        self.sessions.insert(session.id(), Arc::clone(&session));

        info!(game_id = %session.id(), players = names.len(), "Game created");
        Ok(session)
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<TriviaSession>, DomainError> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("no game {id}")))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Run the session in the background. When it ends every player hears
    /// the outcome and the session leaves the registry.
    pub fn launch(self: &Arc<Self>, session: Arc<TriviaSession>) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let game_id = session.id();
            let outcome = match session.run_game().await {
                Ok(()) => {
                    info!(%game_id, "Game finished");
                    GameOutcome::Completed
                }
                Err(err) => {
                    warn!(%game_id, error = %err, "Game aborted");
                    GameOutcome::Aborted(err.to_string())
                }
            };

            for player in session.players() {
                player.finish(outcome.clone());
            }
            registry.sessions.remove(&game_id);
        })
    }
}
