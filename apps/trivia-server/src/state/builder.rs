use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::server::ServerConfig;
use crate::domain::question::QuestionBank;
use crate::error::AppError;
use crate::services::registry::DEFAULT_MAX_GAMES;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    bank: Option<QuestionBank>,
    bank_path: Option<PathBuf>,
    max_games: usize,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            bank: None,
            bank_path: None,
            max_games: DEFAULT_MAX_GAMES,
        }
    }

    /// Use an in-memory bank. Takes precedence over a configured path.
    pub fn with_bank(mut self, bank: QuestionBank) -> Self {
        self.bank = Some(bank);
        self
    }

    pub fn with_config(mut self, config: &ServerConfig) -> Self {
        self.bank_path = config.question_bank.clone();
        self.max_games = config.max_games;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let bank = match (self.bank, self.bank_path) {
            (Some(bank), _) => bank,
            (None, Some(path)) => {
                let bank = QuestionBank::load(&path).map_err(|e| AppError::config(e.to_string()))?;
                info!(path = %path.display(), questions = bank.len(), "Question bank loaded");
                bank
            }
            (None, None) => QuestionBank::builtin(),
        };
        Ok(AppState::new(Arc::new(bank), self.max_games))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
