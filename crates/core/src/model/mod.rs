mod category;
mod filter;
mod ids;
mod question;

pub use ids::{CategoryId, ParseIdError, QuestionId};

pub use category::{Category, CategoryDirectory, CategoryError};
pub use filter::QuizCategoryFilter;
pub use question::{Difficulty, Question, QuestionDraft, QuestionError, ValidatedQuestion};
