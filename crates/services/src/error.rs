//! Shared error types for the services crate.

use thiserror::Error;

use api::TransportError;
use trivia_core::model::QuestionError;
use trivia_core::quiz::QuizError;

/// Message shown to users for any failure they can retry.
pub const RETRY_MESSAGE: &str = "Please try your request again.";

/// Errors emitted by `QuizController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl QuizServiceError {
    /// True for failures the user can retry; false for caller contract violations.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Quiz(QuizError::RepeatedQuestion(_)) => true,
            Self::Quiz(_) => false,
        }
    }
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("page must be at least 1")]
    InvalidPage,
    #[error("questions per page must be between 1 and {max}")]
    InvalidPerPage { max: u32 },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl QuestionServiceError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(err) if !err.is_rejection())
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Transport(#[from] TransportError),
}
