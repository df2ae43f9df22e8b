//! Pre-trained latent factors.
//!
//! [`FactorSnapshot`] is the on-disk shape; [`FactorModel`] is the validated,
//! indexed form the filter predicts from.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};
use crate::constants::validate_factor_dim;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatentFactor {
    pub vector: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFactor {
    pub id: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
}

/// Serialized factor file. `items` order defines the prediction index space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorSnapshot {
    pub global_mean: f32,
    #[serde(default)]
    pub users: BTreeMap<String, LatentFactor>,
    #[serde(default)]
    pub items: Vec<ItemFactor>,
}

#[derive(Debug, Clone)]
pub struct FactorModel {
    n_factors: usize,
    global_mean: f32,
    users: HashMap<String, LatentFactor>,
    items: Vec<ItemFactor>,
    item_index: HashMap<String, usize>,
}

impl FactorModel {
    /// Validates `snapshot` against `n_factors`.
    ///
    /// Every user and item vector must be exactly `n_factors` long and finite,
    /// and item ids must be unique.
    pub fn from_snapshot(snapshot: FactorSnapshot, n_factors: usize) -> FilterResult<Self> {
        if !snapshot.global_mean.is_finite() {
            return Err(FilterError::NonFinite {
                id: "global_mean".to_string(),
            });
        }

        for (id, user) in &snapshot.users {
            check_vector("user", id, &user.vector, user.bias, n_factors)?;
        }

        let mut item_index = HashMap::with_capacity(snapshot.items.len());
        for (idx, item) in snapshot.items.iter().enumerate() {
            check_vector("item", &item.id, &item.vector, item.bias, n_factors)?;
            if item_index.insert(item.id.clone(), idx).is_some() {
                return Err(FilterError::DuplicateItem {
                    id: item.id.clone(),
                });
            }
        }

        Ok(Self {
            n_factors,
            global_mean: snapshot.global_mean,
            users: snapshot.users.into_iter().collect(),
            items: snapshot.items,
            item_index,
        })
    }

    #[inline]
    pub fn n_factors(&self) -> usize {
        self.n_factors
    }

    #[inline]
    pub fn global_mean(&self) -> f32 {
        self.global_mean
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn user(&self, user_id: &str) -> Option<&LatentFactor> {
        self.users.get(user_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&ItemFactor> {
        self.item_index.get(item_id).map(|&idx| &self.items[idx])
    }

    pub fn items(&self) -> &[ItemFactor] {
        &self.items
    }
}

fn check_vector(
    kind: &'static str,
    id: &str,
    vector: &[f32],
    bias: f32,
    n_factors: usize,
) -> FilterResult<()> {
    validate_factor_dim(vector.len(), n_factors).map_err(|_| FilterError::VectorLength {
        kind,
        id: id.to_string(),
        expected: n_factors,
        actual: vector.len(),
    })?;
    if !bias.is_finite() || vector.iter().any(|v| !v.is_finite()) {
        return Err(FilterError::NonFinite { id: id.to_string() });
    }
    Ok(())
}

/// Accumulates in `f64`; finite `f32` factors cannot overflow it.
#[inline]
pub(crate) fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}
