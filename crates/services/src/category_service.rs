use std::sync::Arc;

use api::{TransportError, TriviaApi};
use trivia_core::model::CategoryDirectory;

/// Loads the category directory used by quiz selection and browsing.
#[derive(Clone)]
pub struct CategoryService {
    api: Arc<dyn TriviaApi>,
}

impl CategoryService {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `TransportError` if categories cannot be loaded.
    pub async fn list(&self) -> Result<CategoryDirectory, TransportError> {
        let categories = self.api.fetch_categories().await?;
        tracing::debug!(count = categories.len(), "categories loaded");
        Ok(categories)
    }
}
