//! End-to-end checks: preset configs in, recommendations and matrices out.

use proximity_compute::algorithms::covariance::covariance_matrix;
use proximity_compute::algorithms::distance::mahalanobis_distance;
use proximity_compute::algorithms::matrix::invert;
use proximity_compute::deck::similar_items_below_threshold;
use proximity_compute::extract::{preset_identity, profile_from_record};
use proximity_compute::{
    analyze_profiles, pairwise_distance_matrix, recommend_shared_preset, AttributeRecord,
    FSRS6_DIM, SHARE_THRESHOLD,
};
use proximity_core::{Profile, ProfileStatus, ShareRecommendation};
use serde_json::json;

/// FSRS-6 default parameters.
const FSRS6_DEFAULTS: [f64; FSRS6_DIM] = [
    0.212, 1.2931, 2.3065, 8.2956, 6.4133, 0.8334, 3.0194, 0.001, 1.8722, 0.1666, 0.796,
    1.4835, 0.0614, 0.2629, 1.6483, 0.6014, 1.8729, 0.5425, 0.0912, 0.0658, 0.1542,
];

fn scaled(factor: f64) -> Vec<f64> {
    FSRS6_DEFAULTS.iter().map(|w| w * factor).collect()
}

fn load(configs: &serde_json::Value) -> Vec<Profile> {
    configs
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|config| {
            let (id, name) = preset_identity(config, None)?;
            profile_from_record(id, &name, config)
        })
        .collect()
}

#[test]
fn presets_from_mixed_schemas() {
    let configs = json!([
        {"id": 1, "name": "Default", "fsrsParams6": FSRS6_DEFAULTS.to_vec()},
        {"id": 2, "name": "Vocab", "fsrsParams6": [], "fsrsParams5": scaled(1.0)},
        {"id": 3, "name": "Legacy", "fsrsWeights": vec![0.5; 17]},
        {"id": 4, "name": "No FSRS", "weights": vec![1.0; 21]},
        {"id": 5, "name": "Broken", "fsrsParams6": [1, "x"]},
    ]);

    let profiles = load(&configs);
    let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Default", "Vocab", "Legacy"]);

    let results = analyze_profiles(&profiles).unwrap();
    assert_eq!(results.len(), 3);

    let default = results.iter().find(|r| r.profile.name == "Default").unwrap();
    let vocab = results.iter().find(|r| r.profile.name == "Vocab").unwrap();
    let legacy = results.iter().find(|r| r.profile.name == "Legacy").unwrap();

    // Identical parameters: zero distance, share.
    assert_eq!(default.nearest_name.as_deref(), Some("Vocab"));
    assert_eq!(default.nearest_distance, Some(0.0));
    assert_eq!(default.should_share, ShareRecommendation::Yes);
    assert_eq!(vocab.nearest_name.as_deref(), Some("Default"));

    assert_eq!(legacy.status, Some(ProfileStatus::NotCanonicalParams));
    assert_eq!(legacy.should_share, ShareRecommendation::NotApplicable);
}

#[test]
fn attribute_and_mapping_records_agree() {
    let mapping = json!({"fsrs": {"params": scaled(1.2)}});
    let attributes = AttributeRecord::new()
        .with("fsrs", AttributeRecord::new().with("params", scaled(1.2)));

    let a = profile_from_record(1, "Map", &mapping).unwrap();
    let b = profile_from_record(2, "Attr", &attributes).unwrap();
    assert_eq!(a.weights, b.weights);
}

#[test]
fn recommendation_is_consistent_with_distance() {
    let profiles = vec![
        Profile::new(1, "A", vec![1.0; FSRS6_DIM]),
        Profile::new(2, "B", vec![1.1; FSRS6_DIM]),
        Profile::new(3, "C", vec![9.0; FSRS6_DIM]),
    ];
    let results = analyze_profiles(&profiles).unwrap();

    for result in &results {
        let distance = result.nearest_distance.unwrap();
        assert!(distance >= 0.0);
        let expected = if distance < SHARE_THRESHOLD {
            ShareRecommendation::Yes
        } else {
            ShareRecommendation::No
        };
        assert_eq!(result.should_share, expected);
    }
}

#[test]
fn non_finite_preset_does_not_become_nearest() {
    let mut garbage = vec![json!(1.0); FSRS6_DIM];
    garbage[10] = json!("NaN");
    let configs = json!([
        {"id": 1, "name": "Good", "fsrsParams6": vec![1.0; FSRS6_DIM]},
        {"id": 2, "name": "Far", "fsrsParams6": vec![50.0; FSRS6_DIM]},
        {"id": 3, "name": "Garbage", "fsrsParams6": garbage},
    ]);

    let profiles = load(&configs);
    let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Good", "Far"]);

    let results = analyze_profiles(&profiles).unwrap();
    for result in &results {
        assert_ne!(result.nearest_name.as_deref(), Some("Garbage"));
        assert!(result.nearest_distance.unwrap() > SHARE_THRESHOLD);
        assert_eq!(result.should_share, ShareRecommendation::No);
    }
}

#[test]
fn decision_rule_boundaries() {
    assert_eq!(recommend_shared_preset(21, Some(3.79)).as_bool(), Some(true));
    assert_eq!(recommend_shared_preset(21, Some(3.8)).as_bool(), Some(false));
    assert_eq!(recommend_shared_preset(20, Some(2.0)).as_bool(), None);
    assert_eq!(recommend_shared_preset(21, None).as_bool(), None);
}

#[test]
fn matrix_rows_feed_similar_listing() {
    let profiles = vec![
        Profile::new(1, "Base", scaled(1.0)),
        Profile::new(2, "Close", scaled(1.0005)),
        Profile::new(3, "Far", scaled(3.0)),
        Profile::new(4, "Old", vec![1.0; 19]),
    ];
    let pairwise = pairwise_distance_matrix(&profiles).unwrap();
    let names = pairwise.names();
    let base = pairwise.position("Base").unwrap();

    let similar =
        similar_items_below_threshold(&names, &pairwise.distances[base], base, SHARE_THRESHOLD);

    assert_eq!(similar.len(), 1);
    assert!(similar[0].starts_with("Close ("));

    let old = pairwise.position("Old").unwrap();
    assert!(pairwise.distances[old].iter().all(Option::is_none));
}

#[test]
fn sample_covariance_distance_properties() {
    let rows = vec![
        vec![1.0, 2.0, 0.5],
        vec![2.0, 2.5, 0.1],
        vec![3.0, 4.0, 0.9],
        vec![4.0, 5.0, 0.3],
        vec![2.5, 3.0, 0.6],
    ];
    let cov = covariance_matrix(&rows, 1e-6).unwrap();
    let inv = invert(&cov).unwrap();

    let back = invert(&inv).unwrap();
    for (r1, r2) in back.iter().zip(&cov) {
        for (x, y) in r1.iter().zip(r2) {
            assert!((x - y).abs() < 1e-8);
        }
    }

    for a in &rows {
        assert_eq!(mahalanobis_distance(a, a, &inv).unwrap(), 0.0);
        for b in &rows {
            let ab = mahalanobis_distance(a, b, &inv).unwrap();
            let ba = mahalanobis_distance(b, a, &inv).unwrap();
            assert!((ab - ba).abs() < 1e-12);
        }
    }
}
