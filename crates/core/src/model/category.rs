use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CategoryId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// A question category such as "Science" or "History".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is blank.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self { id, name })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

//
// ─── DIRECTORY ─────────────────────────────────────────────────────────────────
//

/// All known categories, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDirectory {
    entries: BTreeMap<CategoryId, String>,
}

impl CategoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from `(id, name)` pairs. Later duplicates win.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if any name is blank.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = (CategoryId, S)>,
        S: Into<String>,
    {
        let mut directory = Self::new();
        for (id, name) in pairs {
            directory.insert(Category::new(id, name)?);
        }
        Ok(directory)
    }

    pub fn insert(&mut self, category: Category) {
        self.entries.insert(category.id, category.name);
    }

    #[must_use]
    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<Category> {
        self.entries.get(&id).map(|name| Category {
            id,
            name: name.clone(),
        })
    }

    #[must_use]
    pub fn contains(&self, id: CategoryId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.entries.iter().map(|(id, name)| (*id, name.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
