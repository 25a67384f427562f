//! Star classification for hotel assessments.
//!
//! Category scores are reduced to a weighted composite, classified against the
//! star boundary table, and then checked against the override ladder. The
//! first override rule that matches replaces the boundary result.

mod aggregate;
mod boundary;
mod config;
pub mod domain;
mod explanation;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{CategoryWeight, RatingConfig, RatingConfigError, StarBoundary};
pub use domain::{Category, CategoryScores, CriteriaScores, UnknownCategory};
pub use rules::{
    override_ladder, LabelProfile, LinguisticLabel, OverrideRule, RuleId, RuleMatch, RuleOutcome,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless classifier applying a fixed rating configuration.
#[derive(Debug, Clone)]
pub struct RatingEngine {
    config: RatingConfig,
}

impl RatingEngine {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Mean of a category's criterion scores (0 for an empty list).
    pub fn category_rating(&self, scores: &[f64]) -> f64 {
        aggregate::category_rating(scores)
    }

    pub fn weighted_average(&self, scores: &CategoryScores) -> f64 {
        aggregate::weighted_average(scores, &self.config)
    }

    pub fn classify_by_boundary(&self, weighted_avg: f64) -> u8 {
        boundary::classify(weighted_avg, self.config.boundaries())
    }

    /// First matching override rule, if any, for the given scores.
    pub fn evaluate_rules(&self, scores: &CategoryScores, weighted_avg: f64) -> Option<RuleMatch> {
        rules::evaluate(scores, self.classify_by_boundary(weighted_avg))
    }

    pub fn rate(&self, scores: &CategoryScores) -> RatingResult {
        let weighted_average = self.weighted_average(scores);
        let base_star = self.classify_by_boundary(weighted_average);
        let rule_match = rules::evaluate(scores, base_star);

        let star = match rule_match {
            Some(matched) => {
                debug!(
                    rule = matched.rule.code(),
                    base_star,
                    star = matched.star,
                    "override rule replaced boundary classification"
                );
                matched.star
            }
            None => base_star,
        };

        RatingResult {
            star,
            weighted_average,
            base_star,
            applied_rule: rule_match.map(|matched| matched.rule),
        }
    }

    pub fn explain(
        &self,
        category_scores: &CategoryScores,
        criteria_scores: &CriteriaScores,
        star: u8,
    ) -> String {
        explanation::generate(category_scores, criteria_scores, star)
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(RatingConfig::standard())
    }
}

/// Final classification of one set of category scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub star: u8,
    pub weighted_average: f64,
    /// Star level the boundary table alone produced.
    pub base_star: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_rule: Option<RuleId>,
}
