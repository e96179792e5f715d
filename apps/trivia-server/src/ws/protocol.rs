use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::player::GameOutcome;
use crate::domain::question::{Question, QuestionId};

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    Answer {
        question_id: QuestionId,
        answer: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        game_id: Uuid,
        player: String,
    },

    Question {
        question_id: QuestionId,
        prompt: String,
        choices: Vec<String>,
    },

    Ack {
        message: String,
    },

    GameOver {
        completed: bool,
        reason: Option<String>,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

impl From<Question> for ServerMsg {
    fn from(question: Question) -> Self {
        ServerMsg::Question {
            question_id: question.id,
            prompt: question.prompt,
            choices: question.choices,
        }
    }
}

impl From<GameOutcome> for ServerMsg {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Completed => ServerMsg::GameOver {
                completed: true,
                reason: None,
            },
            GameOutcome::Aborted(reason) => ServerMsg::GameOver {
                completed: false,
                reason: Some(reason),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadProtocol,
    BadRequest,
    BadAnswer,
    AlreadyConnected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadProtocol => "bad_protocol",
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::BadAnswer => "bad_answer",
            ErrorCode::AlreadyConnected => "already_connected",
        }
    }
}
