//! Collaborative-filtering predictions from pre-trained latent factors.
//!
//! No training happens here. Factors arrive through [`CollaborativeFilter::install`]
//! or [`CollaborativeFilter::load_snapshot`] and are swapped in whole.

pub mod error;
pub mod model;

#[cfg(test)]
mod tests;

pub use error::{FilterError, FilterResult};
pub use model::{FactorModel, FactorSnapshot, ItemFactor, LatentFactor};

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::constants::{FactorDims, MAX_RATING, MIN_RATING, NORMALIZATION_EPSILON};
use model::dot;

pub struct CollaborativeFilter {
    dims: FactorDims,
    model: RwLock<Option<Arc<FactorModel>>>,
}

impl std::fmt::Debug for CollaborativeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollaborativeFilter")
            .field("dims", &self.dims)
            .field("trained", &self.is_trained())
            .finish()
    }
}

impl Default for CollaborativeFilter {
    fn default() -> Self {
        Self {
            dims: FactorDims::default(),
            model: RwLock::new(None),
        }
    }
}

impl CollaborativeFilter {
    /// Creates an untrained filter. Fails if `dims.n_factors` is zero.
    pub fn new(dims: FactorDims) -> FilterResult<Self> {
        dims.validate()?;
        Ok(Self {
            dims,
            model: RwLock::new(None),
        })
    }

    #[inline]
    pub fn dims(&self) -> FactorDims {
        self.dims
    }

    pub fn is_trained(&self) -> bool {
        self.model.read().is_some()
    }

    /// Replaces the current factors with `model`.
    pub fn install(&self, model: FactorModel) -> FilterResult<()> {
        if model.n_factors() != self.dims.n_factors {
            return Err(FilterError::VectorLength {
                kind: "model",
                id: "factors".to_string(),
                expected: self.dims.n_factors,
                actual: model.n_factors(),
            });
        }
        info!(
            users = model.user_count(),
            items = model.item_count(),
            "Installed latent factors"
        );
        *self.model.write() = Some(Arc::new(model));
        Ok(())
    }

    /// Validates and installs `snapshot`.
    pub fn install_snapshot(&self, snapshot: FactorSnapshot) -> FilterResult<()> {
        self.install(FactorModel::from_snapshot(snapshot, self.dims.n_factors)?)
    }

    /// Reads a JSON factor snapshot from `path` and installs it.
    pub fn load_snapshot(&self, path: impl AsRef<Path>) -> FilterResult<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| FilterError::SnapshotIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let snapshot: FactorSnapshot = serde_json::from_slice(&bytes)?;
        self.install_snapshot(snapshot)
    }

    fn current(&self) -> Option<Arc<FactorModel>> {
        self.model.read().clone()
    }

    /// Predicted affinity of `user_id` for every item, in item order, scaled to `[0, 1]`.
    ///
    /// Unknown users (or an untrained filter) get `fallback_len` zeros.
    pub fn predict(&self, user_id: &str) -> Vec<f32> {
        let Some(model) = self.current() else {
            warn!(user_id = %user_id, "No latent factors loaded, returning zero predictions");
            return vec![0.0; self.dims.fallback_len];
        };
        let Some(user) = model.user(user_id) else {
            warn!(user_id = %user_id, "User not found, returning zero predictions");
            return vec![0.0; self.dims.fallback_len];
        };

        let raw: Vec<f64> = model
            .items()
            .iter()
            .map(|item| f64::from(model.global_mean()) + dot(&user.vector, &item.vector))
            .collect();

        min_max_normalize(raw)
    }

    /// Biased point estimate of the rating `user_id` would give `item_id`, clamped
    /// to the rating scale. `None` if either id is unknown.
    pub fn predict_rating(&self, user_id: &str, item_id: &str) -> Option<f64> {
        let model = self.current()?;
        let user = model.user(user_id)?;
        let item = model.item(item_id)?;
        let biases = f64::from(model.global_mean()) + f64::from(user.bias) + f64::from(item.bias);
        let estimate = biases + dot(&user.vector, &item.vector);
        Some(estimate.clamp(MIN_RATING, MAX_RATING))
    }
}

/// `(v - min) / (max - min + eps)`; all-equal input maps to zeros.
///
/// Non-finite inputs count as zero so every output stays within `[0, 1]`.
pub(crate) fn min_max_normalize(values: Vec<f64>) -> Vec<f32> {
    let values: Vec<f64> = values
        .into_iter()
        .map(|v| if v.is_finite() { v } else { 0.0 })
        .collect();
    let Some((min, max)) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) else {
        return Vec::new();
    };
    let range = max - min + f64::from(NORMALIZATION_EPSILON);
    values
        .into_iter()
        .map(|v| ((v - min) / range).clamp(0.0, 1.0) as f32)
        .collect()
}
