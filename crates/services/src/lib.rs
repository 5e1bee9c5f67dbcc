#![forbid(unsafe_code)]

pub mod app_services;
pub mod category_service;
pub mod error;
pub mod question_service;
pub mod quiz;
pub mod sequencer;

pub use trivia_core::Clock;

pub use app_services::AppServices;
pub use category_service::CategoryService;
pub use error::{AppServicesError, QuestionServiceError, QuizServiceError, RETRY_MESSAGE};
pub use question_service::{DEFAULT_PER_PAGE, MAX_PER_PAGE, QuestionService};
pub use quiz::{QuizController, QuizObserver};
pub use sequencer::QuestionSequencer;
