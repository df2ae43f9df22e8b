use super::*;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_pantry_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("PANTRY_RECIPES_PATH");
        env::remove_var("PANTRY_PROFILE_PATH");
        env::remove_var("PANTRY_INTERACTIONS_PATH");
        env::remove_var("PANTRY_FACTORS_PATH");
        env::remove_var("PANTRY_REDIS_URL");
        env::remove_var("PANTRY_CACHE_TTL_SECS");
        env::remove_var("PANTRY_CACHE_TIMEOUT_MS");
        env::remove_var("PANTRY_CACHE_CAPACITY");
        env::remove_var("PANTRY_FACTORS");
        env::remove_var("PANTRY_PREDICTION_LEN");
        env::remove_var("PANTRY_TOP_K");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.recipes_path, PathBuf::from("./data/recipes.jsonl"));
    assert_eq!(config.profile_path, PathBuf::from("./data/user_profiles.json"));
    assert!(config.factors_path.is_none());
    assert!(config.redis_url.is_none());
    assert_eq!(config.cache_ttl_secs, 3600);
    assert_eq!(config.cache_timeout_ms, 250);
    assert_eq!(config.factors, 50);
    assert_eq!(config.prediction_len, 100);
    assert_eq!(config.top_k, 5);
}

#[test]
fn test_derived_cache_config_and_dims() {
    let config = Config {
        cache_ttl_secs: 10,
        cache_timeout_ms: 40,
        cache_capacity: 7,
        factors: 8,
        prediction_len: 12,
        ..Default::default()
    };

    let cache = config.cache_config();
    assert_eq!(cache.default_ttl, Duration::from_secs(10));
    assert_eq!(cache.op_timeout, Duration::from_millis(40));
    assert_eq!(cache.capacity, 7);
    assert_eq!(config.factor_dims(), FactorDims::new(8, 12));
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_pantry_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.top_k, 5);
    assert!(config.redis_url.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_pantry_env();

    let config = with_env_vars(
        &[
            ("PANTRY_RECIPES_PATH", "/srv/recipes.jsonl"),
            ("PANTRY_REDIS_URL", "redis://localhost:6379"),
            ("PANTRY_CACHE_TTL_SECS", "60"),
            ("PANTRY_FACTORS", "16"),
            ("PANTRY_TOP_K", "3"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.recipes_path, PathBuf::from("/srv/recipes.jsonl"));
    assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
    assert_eq!(config.cache_ttl_secs, 60);
    assert_eq!(config.factors, 16);
    assert_eq!(config.top_k, 3);
}

#[test]
#[serial]
fn test_from_env_blank_optionals_are_none() {
    clear_pantry_env();

    let config = with_env_vars(
        &[("PANTRY_REDIS_URL", "  "), ("PANTRY_FACTORS_PATH", "")],
        Config::from_env,
    )
    .unwrap();

    assert!(config.redis_url.is_none());
    assert!(config.factors_path.is_none());
}

#[test]
#[serial]
fn test_from_env_rejects_garbage_number() {
    clear_pantry_env();

    let result = with_env_vars(&[("PANTRY_CACHE_TIMEOUT_MS", "fast")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::ParseError {
            name: "PANTRY_CACHE_TIMEOUT_MS",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_from_env_rejects_zero() {
    clear_pantry_env();

    let result = with_env_vars(&[("PANTRY_FACTORS", "0")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::ZeroValue {
            name: "PANTRY_FACTORS"
        })
    ));
}

#[test]
fn test_validate_missing_recipes() {
    let config = Config {
        recipes_path: PathBuf::from("/nonexistent/recipes.jsonl"),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_recipes_must_be_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        recipes_path: dir.path().to_path_buf(),
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_ok_and_redis_scheme() {
    let mut recipes = tempfile::NamedTempFile::new().unwrap();
    writeln!(recipes, "{{}}").unwrap();

    let mut config = Config {
        recipes_path: recipes.path().to_path_buf(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    config.redis_url = Some("http://localhost".to_string());
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRedisUrl { .. })
    ));
}

#[test]
fn test_validate_zero_top_k() {
    let recipes = tempfile::NamedTempFile::new().unwrap();
    let config = Config {
        recipes_path: recipes.path().to_path_buf(),
        top_k: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue {
            name: "PANTRY_TOP_K"
        })
    ));
}
