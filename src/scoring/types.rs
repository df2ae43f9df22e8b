use std::collections::BTreeSet;

use crate::corpus::normalize_ingredient;
use crate::error::ValidationError;

/// Query ingredients after normalization: trimmed, lower-cased, de-duplicated,
/// sorted, with blank entries removed. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedQuery {
    ingredients: Vec<String>,
}

impl NormalizedQuery {
    /// Normalizes raw caller input.
    ///
    /// Returns [`ValidationError::EmptyIngredients`] when nothing is left after
    /// dropping blank entries, since the score divides by the query size.
    pub fn new<S: AsRef<str>>(raw: &[S]) -> Result<Self, ValidationError> {
        let set: BTreeSet<String> = raw
            .iter()
            .map(|s| normalize_ingredient(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();

        if set.is_empty() {
            return Err(ValidationError::EmptyIngredients);
        }

        Ok(Self {
            ingredients: set.into_iter().collect(),
        })
    }

    #[inline]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Always `false`; construction rejects empty queries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Score of one corpus entry, identified by its corpus index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecipe {
    pub index: usize,
    pub score: f64,
}

impl ScoredRecipe {
    pub fn new(index: usize, score: f64) -> Self {
        Self { index, score }
    }
}
