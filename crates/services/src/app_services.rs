use std::sync::Arc;

use api::{ApiConfig, HttpTriviaApi, TriviaApi};

use crate::Clock;
use crate::category_service::CategoryService;
use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::quiz::QuizController;
use crate::sequencer::QuestionSequencer;

/// Assembles app-facing services over one question source.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    sequencer: QuestionSequencer,
    questions: Arc<QuestionService>,
    categories: Arc<CategoryService>,
}

impl AppServices {
    /// Build services backed by the HTTP API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be created.
    pub fn new_http(config: ApiConfig, clock: Clock) -> Result<Self, AppServicesError> {
        tracing::debug!(base_url = %config.base_url(), "using http trivia api");
        let api: Arc<dyn TriviaApi> = Arc::new(HttpTriviaApi::new(config)?);
        Ok(Self::with_api(api, clock))
    }

    /// Build services over any `TriviaApi` implementation.
    #[must_use]
    pub fn with_api(api: Arc<dyn TriviaApi>, clock: Clock) -> Self {
        Self {
            clock,
            sequencer: QuestionSequencer::new(Arc::clone(&api)),
            questions: Arc::new(QuestionService::new(Arc::clone(&api))),
            categories: Arc::new(CategoryService::new(api)),
        }
    }

    /// Replace the question service, e.g. to change the page size.
    #[must_use]
    pub fn with_questions(mut self, questions: QuestionService) -> Self {
        self.questions = Arc::new(questions);
        self
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn categories(&self) -> Arc<CategoryService> {
        Arc::clone(&self.categories)
    }

    /// A fresh quiz controller in the idle state.
    #[must_use]
    pub fn quiz_controller(&self) -> QuizController {
        QuizController::new(self.sequencer.clone(), self.clock)
    }
}
