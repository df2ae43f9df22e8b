//! Read-only, preprocessed recipe collection.
//!
//! The corpus is built once at startup and never mutated, so it is shared by
//! `Arc` and read without locking.

pub mod error;
pub mod features;
pub mod loader;
pub mod model;


pub use error::{CorpusError, CorpusResult};
pub use features::{RecipeFeatures, difficulty, extract_equipment, normalize_ingredient};
pub use loader::LoadStats;
pub use model::{Nutrition, Recipe, RecipeRecord};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct RecipeCorpus {
    records: Vec<RecipeRecord>,
    stats: LoadStats,
}

impl RecipeCorpus {
    /// Builds a corpus from already-parsed recipes.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let records: Vec<RecipeRecord> = recipes.into_iter().map(RecipeRecord::new).collect();
        let stats = LoadStats {
            loaded: records.len(),
            ..LoadStats::default()
        };
        Self { records, stats }
    }

    /// Parses JSON Lines rows from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> CorpusResult<Self> {
        let (recipes, stats) = loader::read_rows(reader)?;
        let records = recipes.into_iter().map(RecipeRecord::new).collect();
        Ok(Self { records, stats })
    }

    /// Loads a JSON Lines file.
    pub fn load(path: impl AsRef<Path>) -> CorpusResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CorpusError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let corpus = Self::from_reader(BufReader::new(file))?;

        info!(
            path = %path.display(),
            loaded = corpus.stats.loaded,
            dropped = corpus.stats.dropped,
            defaulted_nutrition = corpus.stats.defaulted_nutrition,
            "Recipe corpus loaded"
        );

        Ok(corpus)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&RecipeRecord> {
        self.records.get(index)
    }

    #[inline]
    pub fn records(&self) -> &[RecipeRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeRecord> {
        self.records.iter()
    }

    /// Row fault counts from the load that produced this corpus.
    #[inline]
    pub fn load_stats(&self) -> LoadStats {
        self.stats
    }

    /// Feature matrix, one row per recipe in corpus order.
    pub fn feature_matrix(&self) -> Vec<[f64; 7]> {
        self.records.iter().map(|r| r.features().vector()).collect()
    }
}
