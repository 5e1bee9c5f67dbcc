//! Framework-independent view models for the trivia front-ends.

pub mod state;
pub mod vm;

pub use state::{ViewError, ViewState};
