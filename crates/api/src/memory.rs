use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rand::rng;
use rand::seq::IndexedRandom;
use reqwest::StatusCode;
use trivia_core::model::{
    Category, CategoryDirectory, CategoryId, Question, QuestionId, QuizCategoryFilter,
    ValidatedQuestion,
};
use trivia_core::quiz::NextQuestion;

use crate::client::{QuestionListing, TriviaApi};
use crate::error::TransportError;

pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Default)]
struct Inner {
    categories: CategoryDirectory,
    questions: BTreeMap<QuestionId, Question>,
    next_id: u64,
}

/// Process-local question source with the same rules as the HTTP service.
///
/// Useful for tests and offline demos. Quiz questions are picked at random
/// among the unseen ones.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTriviaApi {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTriviaApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source pre-filled with `categories` and `questions`.
    #[must_use]
    pub fn with_data(categories: CategoryDirectory, questions: Vec<Question>) -> Self {
        let next_id = questions
            .iter()
            .map(|question| question.id().value())
            .max()
            .unwrap_or(0);
        let questions = questions
            .into_iter()
            .map(|question| (question.id(), question))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                categories,
                questions,
                next_id,
            })),
        }
    }

    /// Register a category so questions can be filed under it.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Unavailable` if the store lock is poisoned.
    pub fn add_category(&self, category: Category) -> Result<(), TransportError> {
        self.lock()?.categories.insert(category);
        Ok(())
    }

    /// Number of stored questions.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Unavailable` if the store lock is poisoned.
    pub fn question_count(&self) -> Result<usize, TransportError> {
        Ok(self.lock()?.questions.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, TransportError> {
        self.inner
            .lock()
            .map_err(|e| TransportError::Unavailable(e.to_string()))
    }
}

fn rejected(status: StatusCode) -> TransportError {
    TransportError::status(status, None)
}

#[async_trait]
impl TriviaApi for InMemoryTriviaApi {
    async fn fetch_categories(&self) -> Result<CategoryDirectory, TransportError> {
        Ok(self.lock()?.categories.clone())
    }

    async fn fetch_questions_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<QuestionListing, TransportError> {
        if page < 1 || per_page > MAX_PER_PAGE {
            return Err(rejected(StatusCode::UNPROCESSABLE_ENTITY));
        }
        let guard = self.lock()?;
        let skip = (page as usize - 1).saturating_mul(per_page as usize);
        let questions = guard
            .questions
            .values()
            .skip(skip)
            .take(per_page as usize)
            .cloned()
            .collect();

        Ok(QuestionListing {
            questions,
            total_questions: guard.questions.len(),
            categories: Some(guard.categories.clone()),
            current_category: None,
        })
    }

    async fn search_questions(&self, term: &str) -> Result<QuestionListing, TransportError> {
        let needle = term.to_lowercase();
        let guard = self.lock()?;
        let questions: Vec<Question> = guard
            .questions
            .values()
            .filter(|question| question.text().to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(QuestionListing {
            total_questions: questions.len(),
            questions,
            categories: None,
            current_category: None,
        })
    }

    async fn fetch_category_questions(
        &self,
        category_id: CategoryId,
    ) -> Result<QuestionListing, TransportError> {
        let guard = self.lock()?;
        let category = guard
            .categories
            .get(category_id)
            .ok_or_else(|| rejected(StatusCode::UNPROCESSABLE_ENTITY))?;
        let questions: Vec<Question> = guard
            .questions
            .values()
            .filter(|question| question.category_id() == category_id)
            .cloned()
            .collect();

        Ok(QuestionListing {
            total_questions: questions.len(),
            questions,
            categories: None,
            current_category: Some(category),
        })
    }

    async fn create_question(&self, question: &ValidatedQuestion) -> Result<(), TransportError> {
        let mut guard = self.lock()?;
        guard.next_id += 1;
        let id = QuestionId::new(guard.next_id);
        guard.questions.insert(id, question.clone().assign_id(id));
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), TransportError> {
        self.lock()?
            .questions
            .remove(&id)
            .map(drop)
            .ok_or_else(|| rejected(StatusCode::NOT_FOUND))
    }

    async fn fetch_next_quiz_question(
        &self,
        filter: QuizCategoryFilter,
        seen_ids: &[QuestionId],
    ) -> Result<NextQuestion, TransportError> {
        let guard = self.lock()?;
        let eligible: Vec<&Question> = guard
            .questions
            .values()
            .filter(|question| filter.admits(question.category_id()))
            .filter(|question| !seen_ids.contains(&question.id()))
            .collect();

        Ok(match eligible.choose(&mut rng()) {
            Some(question) => NextQuestion::Question((*question).clone()),
            None => NextQuestion::Exhausted,
        })
    }
}
