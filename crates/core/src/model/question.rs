use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(u8),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty rating from 1 (easiest) to 5 (hardest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `QuestionError::InvalidDifficulty` outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, QuestionError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuestionError::InvalidDifficulty(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = QuestionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// User input for a new question, not yet checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub answer: String,
    pub category_id: CategoryId,
    pub difficulty: u8,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Returns `QuestionError` if text or answer are blank or difficulty is out of range.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        let difficulty = Difficulty::new(self.difficulty)?;

        Ok(ValidatedQuestion {
            text: self.text,
            answer: self.answer,
            category_id: self.category_id,
            difficulty,
        })
    }
}

/// A question that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub text: String,
    pub answer: String,
    pub category_id: CategoryId,
    pub difficulty: Difficulty,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            answer: self.answer,
            category_id: self.category_id,
            difficulty: self.difficulty,
        }
    }
}

/// A trivia question as served by the question source.
///
/// Text and answer are taken as-is; only the difficulty range is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    answer: String,
    category_id: CategoryId,
    difficulty: Difficulty,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        answer: impl Into<String>,
        category_id: CategoryId,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            answer: answer.into(),
            category_id,
            difficulty,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
