//! Survey intake: the criterion catalog, answer validation, and CSV import.
//!
//! Answers may be collected on any positive scale; everything handed to the
//! rating engine is normalized onto the engine's 0-10 scale first.

pub mod catalog;
mod guard;
mod import;

pub use catalog::{CategorySpec, CriterionId, CriterionSpec, SurveyCatalog};
pub use guard::{SurveyAnswer, SurveyError, SurveyGuard};
pub use import::{parse_criteria_csv, SurveyImportError};

use crate::rating::{CategoryScores, CriteriaScores, RatingEngine};
use serde::Serialize;

/// Top of the engine's scoring scale.
pub const ENGINE_SCALE_MAX: f64 = 10.0;

/// Range survey answers are collected on, `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnswerScale {
    max: f64,
}

impl AnswerScale {
    pub fn new(max: f64) -> Option<Self> {
        if max.is_finite() && max > 0.0 {
            Some(Self { max })
        } else {
            None
        }
    }

    pub const fn ten_point() -> Self {
        Self {
            max: ENGINE_SCALE_MAX,
        }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (0.0..=self.max).contains(&value)
    }

    /// Rescales an answer onto the engine's 0-10 range.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max == ENGINE_SCALE_MAX {
            value
        } else {
            value * ENGINE_SCALE_MAX / self.max
        }
    }
}

impl Default for AnswerScale {
    fn default() -> Self {
        Self::ten_point()
    }
}

/// Category means and the criterion answers they were computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSheet {
    pub category_scores: CategoryScores,
    pub criteria_scores: CriteriaScores,
}

impl ScoreSheet {
    /// Averages each criterion group into its category score, keeping group order.
    pub fn from_criteria(engine: &RatingEngine, criteria_scores: CriteriaScores) -> Self {
        let category_scores = criteria_scores
            .iter()
            .map(|(category, criteria)| {
                let values: Vec<f64> = criteria.iter().map(|(_, value)| *value).collect();
                (category, engine.category_rating(&values))
            })
            .collect();

        Self {
            category_scores,
            criteria_scores,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Category;

    #[test]
    fn scale_rejects_non_positive_maximum() {
        assert!(AnswerScale::new(0.0).is_none());
        assert!(AnswerScale::new(-5.0).is_none());
        assert!(AnswerScale::new(f64::INFINITY).is_none());
        assert_eq!(AnswerScale::new(5.0).map(|scale| scale.max()), Some(5.0));
    }

    #[test]
    fn five_point_answers_are_doubled() {
        let scale = AnswerScale::new(5.0).expect("valid scale");

        assert_eq!(scale.normalize(5.0), 10.0);
        assert_eq!(scale.normalize(2.5), 5.0);
        assert!(scale.contains(5.0));
        assert!(!scale.contains(5.5));
        assert!(!scale.contains(f64::NAN));
    }

    #[test]
    fn sheet_averages_each_criterion_group() {
        let mut criteria = CriteriaScores::new();
        criteria.insert(Category::Dining, "Taste", 8.0);
        criteria.insert(Category::ServiceQuality, "Courtesy", 4.0);
        criteria.insert(Category::Dining, "Menu variety", 6.0);

        let sheet = ScoreSheet::from_criteria(&RatingEngine::default(), criteria);

        let order: Vec<Category> = sheet
            .category_scores
            .iter()
            .map(|(category, _)| category)
            .collect();
        assert_eq!(order, vec![Category::Dining, Category::ServiceQuality]);
        assert_eq!(sheet.category_scores.get(Category::Dining), Some(7.0));
        assert_eq!(sheet.category_scores.get(Category::ServiceQuality), Some(4.0));
    }
}
