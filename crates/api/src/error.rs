//! Errors surfaced by trivia API clients.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the question source. Callers treat every variant as
/// "please try your request again"; nothing is retried automatically.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response violates domain rules: {0}")]
    InvalidPayload(#[from] trivia_core::Error),

    #[error("invalid api url: {0}")]
    Url(#[from] url::ParseError),

    #[error("question source unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    pub(crate) fn status(status: StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
        Self::Status { status, message }
    }

    /// HTTP status reported by the server, if the request got that far.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the caller's input was refused (404/422) rather than the transport failing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.status_code(),
            Some(StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY)
        )
    }
}
