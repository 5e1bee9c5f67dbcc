use std::sync::Arc;

use api::{QuestionListing, TriviaApi};
use trivia_core::model::{CategoryId, QuestionDraft, QuestionId};

use crate::error::QuestionServiceError;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Browsing and editing of the question bank.
#[derive(Clone)]
pub struct QuestionService {
    api: Arc<dyn TriviaApi>,
    per_page: u32,
}

impl QuestionService {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>) -> Self {
        Self {
            api,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::InvalidPerPage` outside `1..=100`.
    pub fn with_per_page(mut self, per_page: u32) -> Result<Self, QuestionServiceError> {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(QuestionServiceError::InvalidPerPage { max: MAX_PER_PAGE });
        }
        self.per_page = per_page;
        Ok(self)
    }

    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Fetch one page of questions (1-based).
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::InvalidPage` for page 0, or transport failures.
    pub async fn list_page(&self, page: u32) -> Result<QuestionListing, QuestionServiceError> {
        if page == 0 {
            return Err(QuestionServiceError::InvalidPage);
        }
        Ok(self.api.fetch_questions_page(page, self.per_page).await?)
    }

    /// Questions whose text contains `term`. An empty term matches everything.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Transport` on failure.
    pub async fn search(&self, term: &str) -> Result<QuestionListing, QuestionServiceError> {
        Ok(self.api.search_questions(term.trim()).await?)
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Transport` on failure or for an unknown category.
    pub async fn by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<QuestionListing, QuestionServiceError> {
        Ok(self.api.fetch_category_questions(category_id).await?)
    }

    /// Validate and submit a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` if the draft is invalid; nothing is sent then.
    pub async fn create(&self, draft: QuestionDraft) -> Result<(), QuestionServiceError> {
        let question = draft.validate()?;
        self.api.create_question(&question).await?;
        tracing::info!(category = %question.category_id, "question created");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Transport` on failure or for an unknown id.
    pub async fn delete(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        self.api.delete_question(id).await?;
        tracing::info!(question = %id, "question deleted");
        Ok(())
    }
}
