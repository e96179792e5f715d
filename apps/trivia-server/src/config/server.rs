use std::env;
use std::path::PathBuf;

use crate::error::AppError;
use crate::services::registry::DEFAULT_MAX_GAMES;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON question bank; `None` means the built-in bank.
    pub question_bank: Option<PathBuf>,
    /// Cap on games live at the same time.
    pub max_games: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            question_bank: None,
            max_games: DEFAULT_MAX_GAMES,
        }
    }
}

impl ServerConfig {
    /// Reads `TRIVIA_HOST`, `TRIVIA_PORT`, `TRIVIA_QUESTION_BANK` and
    /// `TRIVIA_MAX_GAMES`.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("TRIVIA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("TRIVIA_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("TRIVIA_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };
        let question_bank = env::var("TRIVIA_QUESTION_BANK")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let max_games = match env::var("TRIVIA_MAX_GAMES") {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "TRIVIA_MAX_GAMES must be a positive integer, got '{raw}'"
                    )))
                }
            },
            Err(_) => DEFAULT_MAX_GAMES,
        };

        Ok(Self {
            host,
            port,
            question_bank,
            max_games,
        })
    }
}
