use serde::{Deserialize, Serialize};

use crate::corpus::{Nutrition, RecipeRecord};

/// What a search returns for each ranked recipe.
///
/// This is also the shape written to the cache, so a cached result is exactly
/// what a fresh search produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub minutes: u32,
    pub nutrition: Nutrition,
    /// Ingredient score in `[0, 1]`.
    pub score: f64,
}

impl RecipeSummary {
    pub fn from_record(record: &RecipeRecord, score: f64) -> Self {
        let recipe = record.recipe();
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            minutes: recipe.minutes,
            nutrition: recipe.nutrition,
            score,
        }
    }
}
