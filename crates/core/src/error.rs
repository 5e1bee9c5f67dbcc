use thiserror::Error;

use crate::model::{CategoryError, QuestionError};
use crate::quiz::QuizError;

/// Any domain rule violation raised by this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
