use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::{CriterionId, SurveyCatalog};
use super::{AnswerScale, ScoreSheet};
use crate::rating::{CriteriaScores, RatingEngine};

/// A single answered survey question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    pub criterion_id: CriterionId,
    pub score: f64,
}

/// Validation errors raised while turning answers into a score sheet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurveyError {
    #[error("survey contains no answers")]
    EmptySurvey,
    #[error("unknown survey criterion '{0}'")]
    UnknownCriterion(CriterionId),
    #[error("criterion '{0}' was answered more than once")]
    DuplicateAnswer(CriterionId),
    #[error("answer {value} for '{criterion}' is outside the survey scale [0, {max}]")]
    AnswerOutOfRange {
        criterion: CriterionId,
        value: f64,
        max: f64,
    },
    #[error("hotel name is required")]
    MissingHotelName,
}

/// Validates survey answers against the catalog and the configured answer scale.
#[derive(Debug, Clone, Default)]
pub struct SurveyGuard {
    scale: AnswerScale,
}

impl SurveyGuard {
    pub fn new(scale: AnswerScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> AnswerScale {
        self.scale
    }

    /// Builds a score sheet in catalog order; categories without answers are left out.
    pub fn sheet_from_answers(
        &self,
        catalog: &SurveyCatalog,
        engine: &RatingEngine,
        answers: &[SurveyAnswer],
    ) -> Result<ScoreSheet, SurveyError> {
        if answers.is_empty() {
            return Err(SurveyError::EmptySurvey);
        }

        let mut normalized: HashMap<&CriterionId, f64> = HashMap::with_capacity(answers.len());
        for answer in answers {
            if catalog.criterion(&answer.criterion_id).is_none() {
                return Err(SurveyError::UnknownCriterion(answer.criterion_id.clone()));
            }
            if !self.scale.contains(answer.score) {
                return Err(SurveyError::AnswerOutOfRange {
                    criterion: answer.criterion_id.clone(),
                    value: answer.score,
                    max: self.scale.max(),
                });
            }
            if normalized
                .insert(&answer.criterion_id, self.scale.normalize(answer.score))
                .is_some()
            {
                return Err(SurveyError::DuplicateAnswer(answer.criterion_id.clone()));
            }
        }

        let mut criteria = CriteriaScores::new();
        for spec in catalog.categories() {
            for criterion in &spec.criteria {
                if let Some(value) = normalized.get(&criterion.id) {
                    criteria.insert(spec.category, criterion.name.clone(), *value);
                }
            }
        }

        Ok(ScoreSheet::from_criteria(engine, criteria))
    }
}
