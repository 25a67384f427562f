use crate::rating::{Category, CategoryScores, CriteriaScores, RatingConfig, RatingEngine};

pub(super) fn engine() -> RatingEngine {
    RatingEngine::new(RatingConfig::standard())
}

/// Scores for all five categories in the standard order.
pub(super) fn scores(
    service_quality: f64,
    infrastructure: f64,
    location: f64,
    dining: f64,
    room_comfort: f64,
) -> CategoryScores {
    [
        (Category::ServiceQuality, service_quality),
        (Category::Infrastructure, infrastructure),
        (Category::Location, location),
        (Category::Dining, dining),
        (Category::RoomComfort, room_comfort),
    ]
    .into_iter()
    .collect()
}

pub(super) fn uniform_scores(value: f64) -> CategoryScores {
    scores(value, value, value, value, value)
}

pub(super) fn sample_criteria() -> CriteriaScores {
    let mut criteria = CriteriaScores::new();
    criteria.insert(Category::ServiceQuality, "Check-in speed", 6.0);
    criteria.insert(Category::ServiceQuality, "Staff courtesy", 4.0);
    criteria.insert(Category::Dining, "Taste", 5.0);
    criteria
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
