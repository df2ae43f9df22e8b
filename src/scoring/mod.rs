//! Ingredient-overlap scoring and ranking.
//!
//! Scores are asymmetric on purpose: they measure how much of the *query* a
//! recipe covers, not how much of the recipe the query covers. A pantry of two
//! items should surface every recipe that uses both, however long its shopping
//! list is.

pub mod error;
pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use scorer::{IngredientScorer, RecipeScorer, ingredient_score, rank};
pub use types::{NormalizedQuery, ScoredRecipe};
