use std::cmp::Ordering;

use tracing::debug;

use crate::corpus::RecipeCorpus;

use super::error::ScoringError;
use super::types::{NormalizedQuery, ScoredRecipe};

/// Scores every recipe in a corpus against a query.
///
/// The orchestrator only depends on this trait, so instrumented scorers can be
/// injected in place of [`IngredientScorer`].
pub trait RecipeScorer: Send + Sync {
    /// Returns one score per corpus entry, in corpus order.
    fn score(
        &self,
        query: &NormalizedQuery,
        corpus: &RecipeCorpus,
    ) -> Result<Vec<ScoredRecipe>, ScoringError>;
}

/// Fraction of query ingredients found (by substring) in a recipe's ingredients.
///
/// A query ingredient counts as matched when it is contained in *any* recipe
/// ingredient, so "tomato" matches "diced tomatoes". Extra recipe ingredients
/// are not penalized.
pub fn ingredient_score(query: &NormalizedQuery, recipe_ingredients: &[String]) -> f64 {
    let matches = query
        .ingredients()
        .iter()
        .filter(|q| recipe_ingredients.iter().any(|r| r.contains(q.as_str())))
        .count();

    matches as f64 / query.len() as f64
}

/// Sorts by score descending and keeps the first `top_k`.
///
/// Equal scores keep ascending corpus index order.
pub fn rank(mut scored: Vec<ScoredRecipe>, top_k: usize) -> Vec<ScoredRecipe> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    scored.truncate(top_k);
    scored
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IngredientScorer;

impl IngredientScorer {
    pub fn new() -> Self {
        Self
    }
}

impl RecipeScorer for IngredientScorer {
    fn score(
        &self,
        query: &NormalizedQuery,
        corpus: &RecipeCorpus,
    ) -> Result<Vec<ScoredRecipe>, ScoringError> {
        debug!(
            query_len = query.len(),
            corpus_len = corpus.len(),
            "Scoring corpus"
        );

        Ok(corpus
            .iter()
            .enumerate()
            .map(|(index, record)| {
                ScoredRecipe::new(
                    index,
                    ingredient_score(query, &record.features().normalized_ingredients),
                )
            })
            .collect())
    }
}
