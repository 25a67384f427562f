use super::common::*;
use crate::rating::{RatingConfig, RatingConfigError, StarBoundary};

#[test]
fn boundary_edges_follow_published_cut_points() {
    let engine = engine();

    assert_eq!(engine.classify_by_boundary(0.0), 1);
    assert_eq!(engine.classify_by_boundary(3.49), 1);
    assert_eq!(engine.classify_by_boundary(3.5), 2);
    assert_eq!(engine.classify_by_boundary(5.49), 2);
    assert_eq!(engine.classify_by_boundary(5.5), 3);
    assert_eq!(engine.classify_by_boundary(7.5), 4);
    assert_eq!(engine.classify_by_boundary(8.99), 4);
    assert_eq!(engine.classify_by_boundary(9.0), 5);
    assert_eq!(engine.classify_by_boundary(10.0), 5);
}

#[test]
fn out_of_range_composites_clamp_to_the_table_edges() {
    let engine = engine();

    assert_eq!(engine.classify_by_boundary(-1.0), 1);
    assert_eq!(engine.classify_by_boundary(10.1), 5);
    assert_eq!(engine.classify_by_boundary(11.0), 5);
    assert_eq!(engine.classify_by_boundary(f64::NAN), 1);
}

#[test]
fn standard_boundaries_are_contiguous() {
    let config = RatingConfig::standard();
    let boundaries = config.boundaries();

    assert_eq!(boundaries.first().map(|b| b.min), Some(0.0));
    assert_eq!(boundaries.last().map(|b| b.max), Some(10.1));
    for pair in boundaries.windows(2) {
        assert_eq!(pair[0].max, pair[1].min);
        assert_eq!(pair[0].star + 1, pair[1].star);
    }
}

#[test]
fn config_rejects_gapped_boundaries() {
    let mut boundaries = RatingConfig::standard().boundaries().to_vec();
    boundaries[2] = StarBoundary {
        star: 3,
        min: 5.6,
        max: 7.5,
    };

    match RatingConfig::new(RatingConfig::standard().weights().to_vec(), boundaries) {
        Err(RatingConfigError::BoundaryGap { star, .. }) => assert_eq!(star, 3),
        other => panic!("expected boundary gap, got {other:?}"),
    }
}

#[test]
fn config_rejects_table_ending_below_the_top_of_the_scale() {
    let mut boundaries = RatingConfig::standard().boundaries().to_vec();
    boundaries[4] = StarBoundary {
        star: 5,
        min: 9.0,
        max: 9.5,
    };

    match RatingConfig::new(RatingConfig::standard().weights().to_vec(), boundaries) {
        Err(RatingConfigError::BoundaryEnd { expected, found }) => {
            assert_eq!(expected, 10.1);
            assert_eq!(found, 9.5);
        }
        other => panic!("expected boundary end error, got {other:?}"),
    }
}

#[test]
fn config_rejects_boundaries_out_of_star_order() {
    let mut boundaries = RatingConfig::standard().boundaries().to_vec();
    boundaries.swap(0, 1);

    match RatingConfig::new(RatingConfig::standard().weights().to_vec(), boundaries) {
        Err(RatingConfigError::BoundaryOrder {
            position, found, ..
        }) => {
            assert_eq!(position, 0);
            assert_eq!(found, 2);
        }
        other => panic!("expected boundary order error, got {other:?}"),
    }
}

#[test]
fn config_rejects_weights_not_summing_to_one() {
    let mut weights = RatingConfig::standard().weights().to_vec();
    weights[0].weight = 0.5;

    match RatingConfig::new(weights, RatingConfig::standard().boundaries().to_vec()) {
        Err(RatingConfigError::WeightSum(total)) => assert!((total - 1.25).abs() < 1e-9),
        other => panic!("expected weight sum error, got {other:?}"),
    }
}

#[test]
fn config_round_trips_through_json() {
    let raw = serde_json::to_string(&RatingConfig::standard()).expect("serialize config");
    let parsed = RatingConfig::from_json_str(&raw).expect("parse config");

    assert_eq!(parsed, RatingConfig::standard());
}

#[test]
fn config_json_is_validated_on_load() {
    let raw = r#"{
        "weights": [{ "category": "dining", "weight": 0.4 }],
        "boundaries": []
    }"#;

    assert!(matches!(
        RatingConfig::from_json_str(raw),
        Err(RatingConfigError::WeightSum(_))
    ));
}
