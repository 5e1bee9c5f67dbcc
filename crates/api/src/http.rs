use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use trivia_core::model::{
    CategoryDirectory, CategoryId, QuestionId, QuizCategoryFilter, ValidatedQuestion,
};
use trivia_core::quiz::NextQuestion;

use crate::client::{QuestionListing, TriviaApi};
use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::wire::{
    CategoriesResponse, CreateQuestionRequest, ErrorResponse, ListingResponse, QuizRequest,
    QuizResponse, SearchRequest,
};

/// `TriviaApi` over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpTriviaApi {
    client: Client,
    config: ApiConfig,
}

impl HttpTriviaApi {
    /// # Errors
    ///
    /// Returns `TransportError::Http` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message);
            tracing::warn!(%status, ?message, "trivia api refused request");
            return Err(TransportError::status(status, message));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn expect_success(response: Response) -> Result<(), TransportError> {
        Self::read::<serde_json::Value>(response).await.map(drop)
    }
}

#[async_trait]
impl TriviaApi for HttpTriviaApi {
    async fn fetch_categories(&self) -> Result<CategoryDirectory, TransportError> {
        let url = self.config.endpoint("categories");
        tracing::debug!(%url, "fetching categories");
        let response = self.client.get(url).send().await?;
        Self::read::<CategoriesResponse>(response)
            .await?
            .into_directory()
    }

    async fn fetch_questions_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<QuestionListing, TransportError> {
        let url = self.config.endpoint("questions");
        tracing::debug!(%url, page, per_page, "fetching question page");
        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::read::<ListingResponse>(response).await?.into_listing()
    }

    async fn search_questions(&self, term: &str) -> Result<QuestionListing, TransportError> {
        let url = self.config.endpoint("questions/searches");
        tracing::debug!(%url, term, "searching questions");
        let response = self
            .client
            .post(url)
            .json(&SearchRequest { search_term: term })
            .send()
            .await?;
        Self::read::<ListingResponse>(response).await?.into_listing()
    }

    async fn fetch_category_questions(
        &self,
        category_id: CategoryId,
    ) -> Result<QuestionListing, TransportError> {
        let url = self
            .config
            .endpoint(&format!("categories/{category_id}/questions"));
        tracing::debug!(%url, "fetching category questions");
        let response = self.client.get(url).send().await?;
        Self::read::<ListingResponse>(response).await?.into_listing()
    }

    async fn create_question(&self, question: &ValidatedQuestion) -> Result<(), TransportError> {
        let url = self.config.endpoint("questions");
        tracing::debug!(%url, category = %question.category_id, "creating question");
        let response = self
            .client
            .post(url)
            .json(&CreateQuestionRequest::from(question))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), TransportError> {
        let url = self.config.endpoint(&format!("questions/{id}"));
        tracing::debug!(%url, "deleting question");
        let response = self.client.delete(url).send().await?;
        Self::expect_success(response).await
    }

    async fn fetch_next_quiz_question(
        &self,
        filter: QuizCategoryFilter,
        seen_ids: &[QuestionId],
    ) -> Result<NextQuestion, TransportError> {
        let url = self.config.endpoint("quizzes");
        tracing::debug!(%url, %filter, seen = seen_ids.len(), "fetching quiz question");
        let response = self
            .client
            .post(url)
            .json(&QuizRequest::new(filter, seen_ids))
            .send()
            .await?;
        Self::read::<QuizResponse>(response).await?.into_next()
    }
}
