use super::common::*;
use crate::rating::{Category, CategoryScores, CriteriaScores};

const RECOMMENDATIONS_HEADING: &str = "Recommendations to raise the hotel's class:";

#[test]
fn five_star_explanation_omits_recommendations() {
    let text = engine().explain(&uniform_scores(9.0), &CriteriaScores::new(), 5);

    assert!(text.starts_with("Assessment result: 5 stars\n\nRationale:\n"));
    assert!(!text.contains(RECOMMENDATIONS_HEADING));
}

#[test]
fn low_dining_score_produces_dining_recommendation() {
    let scores = scores(5.0, 5.0, 5.0, 5.0, 9.0);
    let text = engine().explain(&scores, &CriteriaScores::new(), 2);

    assert!(text.contains(RECOMMENDATIONS_HEADING));
    assert!(text.contains(Category::Dining.recommendation()));
    assert!(!text.contains(Category::RoomComfort.recommendation()));
}

#[test]
fn high_dining_score_has_no_dining_recommendation() {
    let scores = scores(5.0, 5.0, 5.0, 9.0, 5.0);
    let text = engine().explain(&scores, &CriteriaScores::new(), 2);

    assert!(text.contains(RECOMMENDATIONS_HEADING));
    assert!(!text.contains(Category::Dining.recommendation()));
}

#[test]
fn score_of_exactly_eight_gets_no_recommendation() {
    let scores: CategoryScores = [(Category::Location, 8.0), (Category::Dining, 7.9)]
        .into_iter()
        .collect();
    let text = engine().explain(&scores, &CriteriaScores::new(), 4);

    assert!(!text.contains(Category::Location.recommendation()));
    assert!(text.contains(Category::Dining.recommendation()));
}

#[test]
fn categories_follow_insertion_order() {
    let scores: CategoryScores = [
        (Category::RoomComfort, 4.0),
        (Category::ServiceQuality, 6.0),
        (Category::Dining, 2.0),
    ]
    .into_iter()
    .collect();
    let text = engine().explain(&scores, &CriteriaScores::new(), 1);

    let room = text.find("✓ Room comfort").expect("room line");
    let service = text.find("✓ Service quality").expect("service line");
    let dining = text.find("✓ Dining and cuisine").expect("dining line");
    assert!(room < service && service < dining);

    let room_tip = text
        .find(Category::RoomComfort.recommendation())
        .expect("room tip");
    let service_tip = text
        .find(Category::ServiceQuality.recommendation())
        .expect("service tip");
    assert!(room_tip < service_tip);
}

#[test]
fn explanation_renders_categories_and_criteria() {
    let scores: CategoryScores = [(Category::ServiceQuality, 5.0), (Category::Dining, 9.0)]
        .into_iter()
        .collect();

    let text = engine().explain(&scores, &sample_criteria(), 1);

    let expected = "Assessment result: 1 star\n\n\
                    Rationale:\n\
                    ✓ Service quality: Medium (5.0/10)\n   \
                    • Check-in speed: 6/10\n   \
                    • Staff courtesy: 4/10\n\
                    ✓ Dining and cuisine: High (9.0/10)\n   \
                    • Taste: 5/10\n\
                    \n\
                    Recommendations to raise the hotel's class:\n\
                    • Improve service quality: staff training, shorter waiting times\n";
    assert_eq!(text, expected);
}

#[test]
fn criteria_without_a_category_score_are_not_rendered() {
    let scores: CategoryScores = [(Category::Location, 3.0)].into_iter().collect();
    let text = engine().explain(&scores, &sample_criteria(), 1);

    assert!(text.contains("✓ Location: Low (3.0/10)"));
    assert!(!text.contains("Check-in speed"));
}

#[test]
fn explanation_is_deterministic() {
    let engine = engine();
    let scores = scores(4.2, 6.8, 7.5, 3.3, 9.1);
    let criteria = sample_criteria();

    assert_eq!(
        engine.explain(&scores, &criteria, 3),
        engine.explain(&scores, &criteria, 3)
    );
}
