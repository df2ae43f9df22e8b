use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::types::RecipeSummary;
use crate::cache::{CacheKey, CacheLayer, CacheStore, CachedValue};
use crate::corpus::RecipeCorpus;
use crate::error::PantryResult;
use crate::filter::CollaborativeFilter;
use crate::scoring::{IngredientScorer, NormalizedQuery, RecipeScorer, rank};

/// Splits comma-joined detector output into ingredient names.
///
/// Blank entries are dropped; normalization happens later, in the search.
pub fn parse_detected_ingredients(detected: &str) -> Vec<String> {
    detected
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Truncates or zero-pads filter predictions to the corpus length.
pub fn align_scores(mut predictions: Vec<f32>, len: usize) -> Vec<f32> {
    predictions.resize(len, 0.0);
    predictions
}

/// Cache-first recipe search over a shared corpus.
pub struct RecommendationEngine<S: CacheStore, R: RecipeScorer = IngredientScorer> {
    corpus: Arc<RecipeCorpus>,
    cache: Arc<CacheLayer<S>>,
    filter: Arc<CollaborativeFilter>,
    scorer: R,
}

impl<S: CacheStore, R: RecipeScorer> std::fmt::Debug for RecommendationEngine<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("corpus_len", &self.corpus.len())
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<S: CacheStore> RecommendationEngine<S, IngredientScorer> {
    pub fn new(
        corpus: Arc<RecipeCorpus>,
        cache: Arc<CacheLayer<S>>,
        filter: Arc<CollaborativeFilter>,
    ) -> Self {
        Self::with_scorer(corpus, cache, filter, IngredientScorer)
    }
}

impl<S: CacheStore, R: RecipeScorer> RecommendationEngine<S, R> {
    pub fn with_scorer(
        corpus: Arc<RecipeCorpus>,
        cache: Arc<CacheLayer<S>>,
        filter: Arc<CollaborativeFilter>,
        scorer: R,
    ) -> Self {
        Self {
            corpus,
            cache,
            filter,
            scorer,
        }
    }

    pub fn corpus(&self) -> &RecipeCorpus {
        &self.corpus
    }

    pub fn cache(&self) -> &CacheLayer<S> {
        &self.cache
    }

    pub fn scorer(&self) -> &R {
        &self.scorer
    }

    /// Returns up to `top_k` recipes covering the most of `ingredients`, best first.
    ///
    /// Results are cached per normalized ingredient set. A scorer error degrades
    /// to an empty list; only invalid input is an error.
    #[instrument(skip(self, ingredients), fields(user_id = user_id.unwrap_or("-")))]
    pub async fn search_recipes<I: AsRef<str>>(
        &self,
        ingredients: &[I],
        user_id: Option<&str>,
        top_k: usize,
    ) -> PantryResult<Vec<RecipeSummary>> {
        let query = NormalizedQuery::new(ingredients)?;
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let key = CacheKey::recipe_search(&query);
        let wanted = top_k.min(self.corpus.len());
        if let Some(mut cached) = self
            .cache
            .get(&key)
            .await
            .and_then(CachedValue::into_recipe_summaries)
        {
            // Entries are shared across top_k values; a shorter one cannot serve this call.
            if cached.len() >= wanted {
                cached.truncate(top_k);
                debug!(key = %key, results = cached.len(), "Serving search from cache");
                return Ok(cached);
            }
            debug!(key = %key, cached = cached.len(), wanted, "Cached result too short");
        }

        let scored = match self.scorer.score(&query, &self.corpus) {
            Ok(scored) => scored,
            Err(e) => {
                error!(error = %e, "Scoring failed, returning no results");
                return Ok(Vec::new());
            }
        };

        if let Some(user_id) = user_id {
            let affinity = align_scores(self.filter.predict(user_id), self.corpus.len());
            let peak = affinity.iter().copied().fold(0.0_f32, f32::max);
            debug!(user_id = %user_id, peak_affinity = peak, "Computed filter affinity");
        }

        let results: Vec<RecipeSummary> = rank(scored, top_k)
            .into_iter()
            .filter_map(|s| {
                self.corpus
                    .get(s.index)
                    .map(|record| RecipeSummary::from_record(record, s.score))
            })
            .collect();

        self.cache
            .set(&key, &CachedValue::RecipeSummaries(results.clone()), None)
            .await;

        info!(
            query_len = query.len(),
            results = results.len(),
            "Recipe search complete"
        );
        Ok(results)
    }
}
