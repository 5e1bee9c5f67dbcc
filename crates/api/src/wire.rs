//! JSON shapes exchanged with the trivia HTTP API and their mapping to domain types.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use trivia_core::model::{
    Category, CategoryDirectory, CategoryId, Difficulty, Question, QuestionId, QuizCategoryFilter,
    ValidatedQuestion,
};
use trivia_core::quiz::NextQuestion;

use crate::client::QuestionListing;
use crate::error::TransportError;

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub search_term: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateQuestionRequest<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub difficulty: u8,
    pub category: u64,
}

impl<'a> From<&'a ValidatedQuestion> for CreateQuestionRequest<'a> {
    fn from(value: &'a ValidatedQuestion) -> Self {
        Self {
            question: &value.text,
            answer: &value.answer,
            difficulty: value.difficulty.value(),
            category: value.category_id.value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizRequest {
    pub previous_questions: Vec<u64>,
    /// `null` plays across every category.
    pub quiz_category: Option<QuizCategoryRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizCategoryRecord {
    pub id: u64,
}

impl QuizRequest {
    pub(crate) fn new(filter: QuizCategoryFilter, seen_ids: &[QuestionId]) -> Self {
        Self {
            previous_questions: seen_ids.iter().copied().map(QuestionId::value).collect(),
            quiz_category: filter
                .category_id()
                .map(|id| QuizCategoryRecord { id: id.value() }),
        }
    }
}

//
// ─── RESPONSES ─────────────────────────────────────────────────────────────────
//

/// Category ids arrive as numbers or numeric strings depending on the endpoint.
fn lenient_category_id<'de, D>(deserializer: D) -> Result<CategoryId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(id) => Ok(CategoryId::new(id)),
        Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRecord {
    pub id: u64,
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "lenient_category_id")]
    pub category: CategoryId,
    pub difficulty: u8,
}

impl QuestionRecord {
    pub(crate) fn into_question(self) -> Result<Question, TransportError> {
        let difficulty = Difficulty::new(self.difficulty).map_err(trivia_core::Error::from)?;
        Ok(Question::new(
            QuestionId::new(self.id),
            self.question,
            self.answer,
            self.category,
            difficulty,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRecord {
    #[serde(deserialize_with = "lenient_category_id")]
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    pub categories: BTreeMap<CategoryId, String>,
}

impl CategoriesResponse {
    pub(crate) fn into_directory(self) -> Result<CategoryDirectory, TransportError> {
        directory(self.categories)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingResponse {
    pub questions: Vec<QuestionRecord>,
    pub total_questions: usize,
    #[serde(default)]
    pub categories: Option<BTreeMap<CategoryId, String>>,
    /// `null`, a `{id, type}` object, or occasionally a bare name we cannot use.
    #[serde(default)]
    pub current_category: Value,
}

impl ListingResponse {
    pub(crate) fn into_listing(self) -> Result<QuestionListing, TransportError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        let categories = self.categories.map(directory).transpose()?;
        let current_category = match self.current_category {
            Value::Object(_) => {
                let record: CategoryRecord = serde_json::from_value(self.current_category)?;
                Some(Category::new(record.id, record.name).map_err(trivia_core::Error::from)?)
            }
            _ => None,
        };

        Ok(QuestionListing {
            questions,
            total_questions: self.total_questions,
            categories,
            current_category,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizResponse {
    #[serde(default)]
    pub question: Value,
}

impl QuizResponse {
    /// Anything other than a question object means the source has run dry.
    pub(crate) fn into_next(self) -> Result<NextQuestion, TransportError> {
        match self.question {
            Value::Object(_) => {
                let record: QuestionRecord = serde_json::from_value(self.question)?;
                Ok(NextQuestion::Question(record.into_question()?))
            }
            _ => Ok(NextQuestion::Exhausted),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

fn directory(map: BTreeMap<CategoryId, String>) -> Result<CategoryDirectory, TransportError> {
    Ok(CategoryDirectory::from_pairs(map).map_err(trivia_core::Error::from)?)
}
