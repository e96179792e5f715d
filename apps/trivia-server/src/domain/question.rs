//! Questions and the ordered question bank shared by every session.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    #[serde(default)]
    pub choices: Vec<String>,
}

impl Question {
    pub fn new(id: u32, prompt: impl Into<String>, choices: &[&str]) -> Self {
        Self {
            id: QuestionId(id),
            prompt: prompt.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Immutable, insertion-ordered mapping of question id to question.
///
/// Built once at startup and handed to sessions behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting duplicate ids. Order is preserved.
    pub fn new(questions: Vec<Question>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicateQuestionId,
                    format!("question id {} appears more than once", question.id),
                ));
            }
        }
        Ok(Self { questions })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let questions: Vec<Question> = serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("malformed question bank: {e}")))?;
        Self::new(questions)
    }

    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::validation(format!(
                "cannot read question bank {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Default bank used when no file is configured.
    pub fn builtin() -> Self {
        Self {
            questions: vec![
                Question::new(
                    1,
                    "Which planet is known as the Red Planet?",
                    &["Venus", "Mars", "Jupiter", "Mercury"],
                ),
                Question::new(
                    2,
                    "What is the largest ocean on Earth?",
                    &["Atlantic", "Indian", "Arctic", "Pacific"],
                ),
                Question::new(
                    3,
                    "How many sides does a hexagon have?",
                    &["Five", "Six", "Seven", "Eight"],
                ),
                Question::new(
                    4,
                    "Which element has the chemical symbol O?",
                    &["Gold", "Osmium", "Oxygen", "Iron"],
                ),
                Question::new(
                    5,
                    "In which year did the first crewed Moon landing take place?",
                    &["1965", "1969", "1972", "1958"],
                ),
            ],
        }
    }

    /// Questions in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
