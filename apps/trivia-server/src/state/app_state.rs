use std::sync::Arc;

use crate::domain::question::QuestionBank;
use crate::services::registry::GameRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Live game sessions, backed by the shared question bank
    pub registry: Arc<GameRegistry>,
}

impl AppState {
    pub fn new(bank: Arc<QuestionBank>, max_games: usize) -> Self {
        Self {
            registry: Arc::new(GameRegistry::with_max_games(bank, max_games)),
        }
    }

    pub fn registry(&self) -> Arc<GameRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        self.registry.bank()
    }
}
