use std::collections::BTreeMap;
use std::io::Write;

use super::*;
use crate::constants::{DEFAULT_PREDICTION_LEN, FactorDims};

fn snapshot() -> FactorSnapshot {
    let mut users = BTreeMap::new();
    users.insert(
        "alice".to_string(),
        LatentFactor {
            vector: vec![1.0, 0.0],
            bias: 0.5,
        },
    );
    users.insert(
        "flat".to_string(),
        LatentFactor {
            vector: vec![0.0, 0.0],
            bias: 0.0,
        },
    );

    FactorSnapshot {
        global_mean: 3.0,
        users,
        items: vec![
            ItemFactor {
                id: "r1".to_string(),
                vector: vec![2.0, 1.0],
                bias: 0.0,
            },
            ItemFactor {
                id: "r2".to_string(),
                vector: vec![0.0, 1.0],
                bias: -0.5,
            },
            ItemFactor {
                id: "r3".to_string(),
                vector: vec![1.0, 1.0],
                bias: 0.0,
            },
        ],
    }
}

fn trained() -> CollaborativeFilter {
    let filter = CollaborativeFilter::new(FactorDims::new(2, 4)).unwrap();
    filter.install_snapshot(snapshot()).unwrap();
    filter
}

#[test]
fn test_untrained_predict_returns_default_zeros() {
    let filter = CollaborativeFilter::default();
    assert!(!filter.is_trained());
    let p = filter.predict("anyone");
    assert_eq!(p.len(), DEFAULT_PREDICTION_LEN);
    assert!(p.iter().all(|&v| v == 0.0));
}

#[test]
fn test_unknown_user_returns_fallback_zeros() {
    let p = trained().predict("bob");
    assert_eq!(p, vec![0.0; 4]);
}

#[test]
fn test_known_user_predictions_in_unit_range() {
    let p = trained().predict("alice");
    assert_eq!(p.len(), 3);
    assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
    // raw: 5.0, 3.0, 4.0
    assert!(p[0] > p[2] && p[2] > p[1]);
    assert_eq!(p[1], 0.0);
}

#[test]
fn test_all_equal_predictions_are_zero() {
    let p = trained().predict("flat");
    assert_eq!(p, vec![0.0; 3]);
}

#[test]
fn test_known_user_with_no_items_yields_empty() {
    let filter = CollaborativeFilter::new(FactorDims::new(2, 4)).unwrap();
    let mut snap = snapshot();
    snap.items.clear();
    filter.install_snapshot(snap).unwrap();
    assert!(filter.predict("alice").is_empty());
}

#[test]
fn test_dimension_mismatch_is_rejected() {
    let filter = CollaborativeFilter::new(FactorDims::new(3, 4)).unwrap();
    let err = filter.install_snapshot(snapshot()).unwrap_err();
    assert!(matches!(err, FilterError::VectorLength { expected: 3, actual: 2, .. }));
    assert!(!filter.is_trained());
}

#[test]
fn test_duplicate_items_are_rejected() {
    let mut snap = snapshot();
    let dup = snap.items[0].clone();
    snap.items.push(dup);
    assert!(matches!(
        FactorModel::from_snapshot(snap, 2),
        Err(FilterError::DuplicateItem { .. })
    ));
}

#[test]
fn test_zero_factors_rejected_at_construction() {
    assert!(CollaborativeFilter::new(FactorDims::new(0, 4)).is_err());
}

#[test]
fn test_predict_rating_is_biased_and_clamped() {
    let filter = trained();
    // 3.0 + 0.5 + 0.0 + 2.0 = 5.5, clamped
    assert_eq!(filter.predict_rating("alice", "r1"), Some(5.0));
    // 3.0 + 0.5 - 0.5 + 0.0 = 3.0
    assert_eq!(filter.predict_rating("alice", "r2"), Some(3.0));
    assert_eq!(filter.predict_rating("bob", "r1"), None);
    assert_eq!(filter.predict_rating("alice", "missing"), None);
}

#[test]
fn test_load_snapshot_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&serde_json::to_vec(&snapshot()).unwrap()).unwrap();

    let filter = CollaborativeFilter::new(FactorDims::new(2, 4)).unwrap();
    filter.load_snapshot(file.path()).unwrap();
    assert!(filter.is_trained());
    assert_eq!(filter.predict("alice").len(), 3);
}

#[test]
fn test_load_snapshot_missing_file() {
    let filter = CollaborativeFilter::default();
    let err = filter.load_snapshot("/nonexistent/factors.json").unwrap_err();
    assert!(matches!(err, FilterError::SnapshotIo { .. }));
}

#[test]
fn test_min_max_normalize_empty() {
    assert!(min_max_normalize(Vec::new()).is_empty());
}

#[test]
fn test_min_max_normalize_maps_non_finite_to_zero() {
    let scaled = min_max_normalize(vec![f64::INFINITY, 1.0, f64::NAN, 2.0]);
    assert_eq!(scaled.len(), 4);
    assert!(scaled.iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(scaled[0], 0.0);
    assert!(scaled[3] > 0.99);
}

#[test]
fn test_predict_stays_bounded_for_large_factors() {
    let mut users = BTreeMap::new();
    users.insert(
        "big".to_string(),
        LatentFactor {
            vector: vec![f32::MAX, f32::MAX],
            bias: 0.0,
        },
    );
    let item = |id: &str, v: f32| ItemFactor {
        id: id.to_string(),
        vector: vec![v, v],
        bias: 0.0,
    };
    let filter = CollaborativeFilter::new(FactorDims::new(2, 4)).unwrap();
    filter
        .install_snapshot(FactorSnapshot {
            global_mean: 3.0,
            users,
            items: vec![item("a", f32::MAX), item("b", 1.0), item("c", -f32::MAX)],
        })
        .unwrap();

    let scaled = filter.predict("big");
    assert_eq!(scaled.len(), 3);
    assert!(scaled.iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v)));
    assert!(scaled[0] > scaled[1]);
    assert!(scaled[1] > scaled[2]);
    assert_eq!(filter.predict_rating("big", "a"), Some(MAX_RATING));
}
