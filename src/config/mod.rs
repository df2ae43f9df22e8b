//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `PANTRY_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TIMEOUT_MS, DEFAULT_CACHE_TTL_SECS, DEFAULT_FACTORS,
    DEFAULT_PREDICTION_LEN, DEFAULT_TOP_K, FactorDims,
};

/// Engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PANTRY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Recipe corpus (JSON Lines). Default: `./data/recipes.jsonl`.
    pub recipes_path: PathBuf,

    /// User preference file. Default: `./data/user_profiles.json`.
    pub profile_path: PathBuf,

    /// User interaction file. Default: `./data/user_interactions.json`.
    pub interactions_path: PathBuf,

    /// Pre-trained latent factor snapshot (JSON).
    pub factors_path: Option<PathBuf>,

    /// Redis endpoint. The in-process store is used when unset.
    pub redis_url: Option<String>,

    /// Default cache entry lifetime in seconds. Default: `3600`.
    pub cache_ttl_secs: u64,

    /// Per-call cache timeout in milliseconds. Default: `250`.
    pub cache_timeout_ms: u64,

    /// Max entries in the in-process cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// Latent factor count. Default: `50`.
    pub factors: usize,

    /// Length of the zero prediction for unknown users. Default: `100`.
    pub prediction_len: usize,

    /// Default number of search results. Default: `5`.
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipes_path: PathBuf::from("./data/recipes.jsonl"),
            profile_path: PathBuf::from("./data/user_profiles.json"),
            interactions_path: PathBuf::from("./data/user_interactions.json"),
            factors_path: None,
            redis_url: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_timeout_ms: DEFAULT_CACHE_TIMEOUT_MS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            factors: DEFAULT_FACTORS,
            prediction_len: DEFAULT_PREDICTION_LEN,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    const ENV_RECIPES_PATH: &'static str = "PANTRY_RECIPES_PATH";
    const ENV_PROFILE_PATH: &'static str = "PANTRY_PROFILE_PATH";
    const ENV_INTERACTIONS_PATH: &'static str = "PANTRY_INTERACTIONS_PATH";
    const ENV_FACTORS_PATH: &'static str = "PANTRY_FACTORS_PATH";
    const ENV_REDIS_URL: &'static str = "PANTRY_REDIS_URL";
    const ENV_CACHE_TTL_SECS: &'static str = "PANTRY_CACHE_TTL_SECS";
    const ENV_CACHE_TIMEOUT_MS: &'static str = "PANTRY_CACHE_TIMEOUT_MS";
    const ENV_CACHE_CAPACITY: &'static str = "PANTRY_CACHE_CAPACITY";
    const ENV_FACTORS: &'static str = "PANTRY_FACTORS";
    const ENV_PREDICTION_LEN: &'static str = "PANTRY_PREDICTION_LEN";
    const ENV_TOP_K: &'static str = "PANTRY_TOP_K";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            recipes_path: Self::parse_path_from_env(Self::ENV_RECIPES_PATH, defaults.recipes_path),
            profile_path: Self::parse_path_from_env(Self::ENV_PROFILE_PATH, defaults.profile_path),
            interactions_path: Self::parse_path_from_env(
                Self::ENV_INTERACTIONS_PATH,
                defaults.interactions_path,
            ),
            factors_path: Self::parse_optional_path_from_env(Self::ENV_FACTORS_PATH),
            redis_url: Self::parse_optional_string_from_env(Self::ENV_REDIS_URL),
            cache_ttl_secs: Self::parse_positive_from_env(
                Self::ENV_CACHE_TTL_SECS,
                defaults.cache_ttl_secs,
            )?,
            cache_timeout_ms: Self::parse_positive_from_env(
                Self::ENV_CACHE_TIMEOUT_MS,
                defaults.cache_timeout_ms,
            )?,
            cache_capacity: Self::parse_positive_from_env(
                Self::ENV_CACHE_CAPACITY,
                defaults.cache_capacity,
            )?,
            factors: Self::parse_positive_from_env(Self::ENV_FACTORS, defaults.factors as u64)?
                as usize,
            prediction_len: Self::parse_positive_from_env(
                Self::ENV_PREDICTION_LEN,
                defaults.prediction_len as u64,
            )? as usize,
            top_k: Self::parse_positive_from_env(Self::ENV_TOP_K, defaults.top_k as u64)? as usize,
        })
    }

    /// Validates paths and basic invariants (does not create files).
    ///
    /// The profile and interaction files may be missing; they are created on load.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.recipes_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.recipes_path.clone(),
            });
        }
        if !self.recipes_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.recipes_path.clone(),
            });
        }

        if let Some(ref path) = self.factors_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if let Some(ref url) = self.redis_url
            && !(url.starts_with("redis://") || url.starts_with("rediss://"))
        {
            return Err(ConfigError::InvalidRedisUrl { value: url.clone() });
        }

        for (name, value) in [
            (Self::ENV_CACHE_TTL_SECS, self.cache_ttl_secs),
            (Self::ENV_CACHE_TIMEOUT_MS, self.cache_timeout_ms),
            (Self::ENV_CACHE_CAPACITY, self.cache_capacity),
            (Self::ENV_FACTORS, self.factors as u64),
            (Self::ENV_PREDICTION_LEN, self.prediction_len as u64),
            (Self::ENV_TOP_K, self.top_k as u64),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroValue { name });
            }
        }

        Ok(())
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::default()
            .default_ttl(Duration::from_secs(self.cache_ttl_secs))
            .op_timeout(Duration::from_millis(self.cache_timeout_ms))
            .capacity(self.cache_capacity)
    }

    pub fn factor_dims(&self) -> FactorDims {
        FactorDims::new(self.factors, self.prediction_len)
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_positive_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let parsed: u64 = value.trim().parse().map_err(|e| ConfigError::ParseError {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                })?;

                if parsed == 0 {
                    return Err(ConfigError::ZeroValue { name: var_name });
                }

                Ok(parsed)
            }
            Err(_) => Ok(default),
        }
    }
}
