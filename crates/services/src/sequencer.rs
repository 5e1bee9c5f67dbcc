use std::sync::Arc;

use api::{TransportError, TriviaApi};
use trivia_core::model::{QuestionId, QuizCategoryFilter};
use trivia_core::quiz::{FetchRequest, NextQuestion};

/// Asks the question source for the next unseen question.
///
/// Holds no state of its own: exclusion is entirely driven by the seen ids
/// passed in, and the source decides the order.
#[derive(Clone)]
pub struct QuestionSequencer {
    source: Arc<dyn TriviaApi>,
}

impl QuestionSequencer {
    #[must_use]
    pub fn new(source: Arc<dyn TriviaApi>) -> Self {
        Self { source }
    }

    /// # Errors
    ///
    /// Returns `TransportError` if the source cannot be reached.
    pub async fn next_question(
        &self,
        filter: QuizCategoryFilter,
        seen_ids: &[QuestionId],
    ) -> Result<NextQuestion, TransportError> {
        match self.source.fetch_next_quiz_question(filter, seen_ids).await {
            Ok(NextQuestion::Exhausted) => {
                tracing::debug!(%filter, seen = seen_ids.len(), "question source exhausted");
                Ok(NextQuestion::Exhausted)
            }
            Ok(next) => Ok(next),
            Err(err) => {
                tracing::warn!(%filter, error = %err, "failed to fetch quiz question");
                Err(err)
            }
        }
    }

    /// Serve a fetch handed out by `QuizSession`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the source cannot be reached.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<NextQuestion, TransportError> {
        self.next_question(request.filter, &request.seen_ids).await
    }
}
