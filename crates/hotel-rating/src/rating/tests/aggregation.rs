use super::common::*;
use crate::rating::{Category, CategoryScores, CategoryWeight, RatingConfig, RatingEngine};

#[test]
fn category_rating_of_empty_list_is_zero() {
    assert_eq!(engine().category_rating(&[]), 0.0);
}

#[test]
fn category_rating_is_arithmetic_mean() {
    assert_eq!(engine().category_rating(&[4.0, 6.0, 8.0]), 6.0);
    assert_close(engine().category_rating(&[1.0, 2.0]), 1.5);
}

#[test]
fn weighted_average_of_empty_scores_is_zero() {
    assert_eq!(engine().weighted_average(&CategoryScores::new()), 0.0);
}

#[test]
fn weighted_average_of_perfect_scores_is_ten() {
    assert_close(engine().weighted_average(&uniform_scores(10.0)), 10.0);
}

#[test]
fn weighted_average_applies_category_weights() {
    let average = engine().weighted_average(&scores(2.0, 2.0, 2.0, 9.0, 9.0));
    assert_close(average, 4.8);
}

#[test]
fn weighted_average_renormalizes_over_present_categories() {
    let partial: CategoryScores = [(Category::ServiceQuality, 2.0), (Category::Dining, 9.0)]
        .into_iter()
        .collect();

    let average = engine().weighted_average(&partial);

    assert_close(average, (2.0 * 0.25 + 9.0 * 0.20) / 0.45);
}

#[test]
fn weighted_average_ignores_unweighted_categories() {
    let config = RatingConfig::new(
        vec![
            CategoryWeight {
                category: Category::ServiceQuality,
                weight: 0.5,
            },
            CategoryWeight {
                category: Category::Location,
                weight: 0.5,
            },
        ],
        RatingConfig::standard().boundaries().to_vec(),
    )
    .expect("two-category weighting is valid");
    let engine = RatingEngine::new(config);

    let average = engine.weighted_average(&scores(8.0, 1.0, 4.0, 1.0, 1.0));
    assert_close(average, 6.0);

    let unweighted: CategoryScores = [(Category::Dining, 9.0)].into_iter().collect();
    assert_eq!(engine.weighted_average(&unweighted), 0.0);
}

#[test]
fn raw_scores_drop_unknown_category_keys() {
    let raw = CategoryScores::from_raw([("service_quality", 6.0), ("spa", 10.0), ("dining", 4.0)]);

    assert_eq!(raw.len(), 2);
    assert_close(
        engine().weighted_average(&raw),
        (6.0 * 0.25 + 4.0 * 0.20) / 0.45,
    );
}
