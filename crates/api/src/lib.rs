#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;
mod wire;

pub use client::{QuestionListing, TriviaApi};
pub use config::ApiConfig;
pub use error::TransportError;
pub use http::HttpTriviaApi;
pub use memory::InMemoryTriviaApi;
