pub mod barrier;
pub mod game_session;
pub mod registry;

pub use game_session::{GameSession, SessionPhase, TriviaSession};
pub use registry::GameRegistry;
