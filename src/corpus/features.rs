//! Load-time feature derivation for recipes.

use std::collections::BTreeSet;

use crate::constants::{
    DIFFICULTY_EQUIPMENT_WEIGHT, DIFFICULTY_STEP_WEIGHT, DIFFICULTY_TIME_WEIGHT,
    EQUIPMENT_KEYWORDS, MAX_TIME_FACTOR_HOURS,
};

use super::model::Recipe;

/// Trims surrounding whitespace and lower-cases an ingredient string.
///
/// Queries and stored recipes go through this same function so comparisons agree.
#[inline]
pub fn normalize_ingredient(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns the distinct equipment keywords mentioned anywhere in the steps.
///
/// Matching is by substring on the lower-cased step text.
pub fn extract_equipment(steps: &[String]) -> BTreeSet<&'static str> {
    let mut required = BTreeSet::new();
    for step in steps {
        let step = step.to_lowercase();
        for keyword in EQUIPMENT_KEYWORDS {
            if step.contains(keyword) {
                required.insert(keyword);
            }
        }
    }
    required
}

/// Weighted combination of step count, capped cook time and equipment count.
pub fn difficulty(steps: &[String], minutes: u32) -> f64 {
    let steps_count = steps.len() as f64;
    let time_factor = (f64::from(minutes) / 60.0).min(MAX_TIME_FACTOR_HOURS);
    let equipment_factor = extract_equipment(steps).len() as f64;

    (steps_count * DIFFICULTY_STEP_WEIGHT
        + time_factor * DIFFICULTY_TIME_WEIGHT
        + equipment_factor * DIFFICULTY_EQUIPMENT_WEIGHT)
        / 3.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFeatures {
    pub ingredient_count: usize,
    pub minutes: u32,
    pub difficulty: f64,
    pub nutrition: [f64; 4],
    /// Recipe ingredients after [`normalize_ingredient`].
    pub normalized_ingredients: Vec<String>,
}

impl RecipeFeatures {
    pub fn compute(recipe: &Recipe) -> Self {
        Self {
            ingredient_count: recipe.ingredients.len(),
            minutes: recipe.minutes,
            difficulty: difficulty(&recipe.steps, recipe.minutes),
            nutrition: recipe.nutrition.feature_vector(),
            normalized_ingredients: recipe
                .ingredients
                .iter()
                .map(|i| normalize_ingredient(i))
                .collect(),
        }
    }

    /// `[ingredient_count, minutes, difficulty, calories, protein, total_fat, carbohydrates]`.
    pub fn vector(&self) -> [f64; 7] {
        [
            self.ingredient_count as f64,
            f64::from(self.minutes),
            self.difficulty,
            self.nutrition[0],
            self.nutrition[1],
            self.nutrition[2],
            self.nutrition[3],
        ]
    }
}
