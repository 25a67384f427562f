use super::domain::{CategoryScores, CriteriaScores};
use super::rules::LinguisticLabel;

const RECOMMENDATION_THRESHOLD: f64 = 8.0;
const TOP_STAR: u8 = 5;

pub(crate) fn generate(
    category_scores: &CategoryScores,
    criteria_scores: &CriteriaScores,
    star: u8,
) -> String {
    let mut explanation = format!(
        "Assessment result: {star} star{}\n\n",
        if star == 1 { "" } else { "s" }
    );
    explanation.push_str("Rationale:\n");

    for (category, value) in category_scores.iter() {
        explanation.push_str(&format!(
            "✓ {}: {} ({value:.1}/10)\n",
            category.label(),
            LinguisticLabel::classify(value).quality()
        ));

        if let Some(criteria) = criteria_scores.criteria_for(category) {
            for (name, criterion_value) in criteria {
                explanation.push_str(&format!("   • {name}: {criterion_value}/10\n"));
            }
        }
    }

    if star < TOP_STAR {
        explanation.push_str("\nRecommendations to raise the hotel's class:\n");
        for (category, value) in category_scores.iter() {
            if value < RECOMMENDATION_THRESHOLD {
                explanation.push_str(&format!("• {}\n", category.recommendation()));
            }
        }
    }

    explanation
}
