use async_trait::async_trait;
use trivia_core::model::{
    Category, CategoryDirectory, CategoryId, Question, QuestionId, QuizCategoryFilter,
    ValidatedQuestion,
};
use trivia_core::quiz::NextQuestion;

use crate::error::TransportError;

/// One screenful of questions as returned by listing, search and category browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    /// Matches across all pages, not just this one.
    pub total_questions: usize,
    /// Only populated by paged listings.
    pub categories: Option<CategoryDirectory>,
    pub current_category: Option<Category>,
}

/// Contract for the remote trivia service.
///
/// Every call is independent; implementations own retry and timeout policy.
#[async_trait]
pub trait TriviaApi: Send + Sync {
    /// Fetch every category.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on network or HTTP failure.
    async fn fetch_categories(&self) -> Result<CategoryDirectory, TransportError>;

    /// Fetch a page of questions (1-based `page`).
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on network or HTTP failure, or a 422 status for
    /// `page < 1` / `per_page > 100`.
    async fn fetch_questions_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<QuestionListing, TransportError>;

    /// Questions whose text contains `term`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on network or HTTP failure.
    async fn search_questions(&self, term: &str) -> Result<QuestionListing, TransportError>;

    /// All questions of one category.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on failure, or a 422 status for an unknown category.
    async fn fetch_category_questions(
        &self,
        category_id: CategoryId,
    ) -> Result<QuestionListing, TransportError>;

    /// # Errors
    ///
    /// Returns `TransportError` on network or HTTP failure.
    async fn create_question(&self, question: &ValidatedQuestion) -> Result<(), TransportError>;

    /// # Errors
    ///
    /// Returns `TransportError` on failure, or a 404 status for an unknown id.
    async fn delete_question(&self, id: QuestionId) -> Result<(), TransportError>;

    /// Pick a question under `filter` whose id is not in `seen_ids`.
    ///
    /// Selection order is up to the source.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on network or HTTP failure.
    async fn fetch_next_quiz_question(
        &self,
        filter: QuizCategoryFilter,
        seen_ids: &[QuestionId],
    ) -> Result<NextQuestion, TransportError>;
}
