//! Trivia domain types: questions, players and the signals that pace a game.

pub mod player;
pub mod question;
pub mod signal;

pub use player::{GameOutcome, Player, PlayerEvent, TriviaPlayer};
pub use question::{Question, QuestionBank, QuestionId};
pub use signal::{Signal, SignalError, SignalTrigger};
