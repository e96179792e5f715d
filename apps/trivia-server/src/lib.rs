#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;

// Re-exports for public API
pub use config::server::ServerConfig;
pub use domain::player::{GameOutcome, Player, PlayerEvent, TriviaPlayer};
pub use domain::question::{Question, QuestionBank, QuestionId};
pub use domain::signal::{Signal, SignalError, SignalTrigger};
pub use error::AppError;
pub use errors::domain::DomainError;
pub use errors::ErrorCode;
pub use services::game_session::{GameSession, SessionPhase, TriviaSession};
pub use services::registry::GameRegistry;
pub use state::app_state::AppState;
pub use state::builder::build_state;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    trivia_test_support::logging::init();
}
