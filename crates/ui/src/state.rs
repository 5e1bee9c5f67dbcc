use std::fmt;

use services::{QuestionServiceError, QuizServiceError, RETRY_MESSAGE};
use trivia_core::model::QuestionError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Something the user can try again.
    Retry,
    /// Input the user has to fix first.
    Invalid(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Retry => RETRY_MESSAGE,
            Self::Invalid(reason) => reason,
            Self::Unknown => "Something went wrong.",
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ViewError {}

impl From<&QuizServiceError> for ViewError {
    fn from(err: &QuizServiceError) -> Self {
        if err.is_retryable() {
            Self::Retry
        } else {
            Self::Unknown
        }
    }
}

impl From<&QuestionServiceError> for ViewError {
    fn from(err: &QuestionServiceError) -> Self {
        match err {
            QuestionServiceError::Question(reason) => Self::Invalid(invalid_question(reason)),
            QuestionServiceError::InvalidPage | QuestionServiceError::InvalidPerPage { .. } => {
                Self::Invalid(err.to_string())
            }
            QuestionServiceError::Transport(transport) if transport.is_rejection() => {
                Self::Invalid(transport.to_string())
            }
            _ if err.is_retryable() => Self::Retry,
            _ => Self::Unknown,
        }
    }
}

fn invalid_question(err: &QuestionError) -> String {
    match err {
        QuestionError::EmptyText => "Please enter the question text.".into(),
        QuestionError::EmptyAnswer => "Please enter an answer.".into(),
        QuestionError::InvalidDifficulty(_) => "Difficulty must be between 1 and 5.".into(),
        other => other.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    /// Collapse a finished request into a state, mapping the error with `map_err`.
    pub fn from_result<E>(result: Result<T, E>, map_err: impl FnOnce(&E) -> ViewError) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(map_err(&err)),
        }
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}
