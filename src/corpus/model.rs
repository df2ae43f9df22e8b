use serde::{Deserialize, Serialize};

use crate::constants::{CALORIES_SCALE, DAILY_VALUE_SCALE, NUTRITION_FIELDS};

use super::features::RecipeFeatures;

/// Nutrition figures for one serving.
///
/// Field order matches the raw seven-element nutrition rows of the source data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub total_fat: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub protein: f64,
    pub saturated_fat: f64,
    pub carbohydrates: f64,
}

impl Nutrition {
    /// Builds a record from a raw row of exactly seven non-negative finite figures.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() != NUTRITION_FIELDS {
            return None;
        }
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return None;
        }

        Some(Self {
            calories: values[0],
            total_fat: values[1],
            sugar: values[2],
            sodium: values[3],
            protein: values[4],
            saturated_fat: values[5],
            carbohydrates: values[6],
        })
    }

    /// Returns `[calories, protein, total_fat, carbohydrates]` divided by their scale constants.
    pub fn feature_vector(&self) -> [f64; 4] {
        [
            self.calories / CALORIES_SCALE,
            self.protein / DAILY_VALUE_SCALE,
            self.total_fat / DAILY_VALUE_SCALE,
            self.carbohydrates / DAILY_VALUE_SCALE,
        ]
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub minutes: u32,
    pub nutrition: Nutrition,
}

/// A recipe paired with the features derived from it at load time.
#[derive(Debug, Clone)]
pub struct RecipeRecord {
    recipe: Recipe,
    features: RecipeFeatures,
}

impl RecipeRecord {
    pub fn new(recipe: Recipe) -> Self {
        let features = RecipeFeatures::compute(&recipe);
        Self { recipe, features }
    }

    #[inline]
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    #[inline]
    pub fn features(&self) -> &RecipeFeatures {
        &self.features
    }
}
