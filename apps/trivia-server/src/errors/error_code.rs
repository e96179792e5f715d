//! Error codes for the trivia server API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the trivia server API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Player not found in the game
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// More than one player shares the requested name
    DuplicatePlayerName,
    /// Two questions in a bank share an id
    DuplicateQuestionId,
    /// Player already has a live connection
    PlayerAlreadyConnected,
    /// The server is at its live game limit
    TooManyGames,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// A player signal failed while the game waited on it
    PlayerSignalFailed,
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicatePlayerName => "DUPLICATE_PLAYER_NAME",
            Self::DuplicateQuestionId => "DUPLICATE_QUESTION_ID",
            Self::PlayerAlreadyConnected => "PLAYER_ALREADY_CONNECTED",
            Self::TooManyGames => "TOO_MANY_GAMES",
            Self::Conflict => "CONFLICT",

            Self::PlayerSignalFailed => "PLAYER_SIGNAL_FAILED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
