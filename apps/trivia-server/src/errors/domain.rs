//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::question::QuestionId;
use crate::domain::signal::SignalError;

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicatePlayerName,
    DuplicateQuestionId,
    PlayerAlreadyConnected,
    TooManyGames,
    Other(String),
}

/// Which barrier a session was waiting on when a player signal failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierPhase {
    Connection,
    Answers(QuestionId),
}

impl Display for BarrierPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BarrierPhase::Connection => write!(f, "connection"),
            BarrierPhase::Answers(id) => write!(f, "answers to question {id}"),
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or rule violation
    Validation(String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// A player's signal failed while the session waited on a barrier
    Barrier {
        phase: BarrierPhase,
        player: String,
        cause: SignalError,
    },
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Barrier {
                phase,
                player,
                cause,
            } => write!(f, "barrier on {phase} failed for player {player}: {cause}"),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DomainError::Barrier { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn barrier(phase: BarrierPhase, player: impl Into<String>, cause: SignalError) -> Self {
        Self::Barrier {
            phase,
            player: player.into(),
            cause,
        }
    }
}
