mod controller;
mod observer;

pub use controller::QuizController;
pub use observer::QuizObserver;
