pub mod answer;
mod session;

pub use answer::{is_correct, normalize};
pub use session::{
    Advance, FetchRequest, FetchTicket, GuessResult, NextQuestion, QuizError, QuizPhase,
    QuizProgress, QuizScore, QuizSession, ROUND_LENGTH,
};
