use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ids::CategoryId;

/// Category restriction for a quiz, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuizCategoryFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl QuizCategoryFilter {
    #[must_use]
    pub fn category_id(self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(id),
        }
    }

    /// Whether a question in `category_id` is eligible under this filter.
    #[must_use]
    pub fn admits(self, category_id: CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => id == category_id,
        }
    }
}

impl From<Option<CategoryId>> for QuizCategoryFilter {
    fn from(value: Option<CategoryId>) -> Self {
        value.map_or(Self::All, Self::Category)
    }
}

impl fmt::Display for QuizCategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(id) => write!(f, "category {id}"),
        }
    }
}
