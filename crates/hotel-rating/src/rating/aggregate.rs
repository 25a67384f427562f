use super::config::RatingConfig;
use super::domain::CategoryScores;

/// Arithmetic mean of a category's criterion scores; an empty list averages to 0.
pub(crate) fn category_rating(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Weighted mean over the categories that are both scored and weighted.
///
/// Scores for categories the weight table does not cover are ignored. With
/// every category present the standard weights sum to 1.0, so this is the
/// plain weighted sum.
pub(crate) fn weighted_average(scores: &CategoryScores, config: &RatingConfig) -> f64 {
    let (weighted_sum, total_weight) = scores
        .iter()
        .filter_map(|(category, value)| {
            config
                .weight_for(category)
                .map(|weight| (value * weight, weight))
        })
        .fold((0.0, 0.0), |(sum, total), (contribution, weight)| {
            (sum + contribution, total + weight)
        });

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}
