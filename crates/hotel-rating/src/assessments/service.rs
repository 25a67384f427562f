use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    AssessmentOutcome, AssessmentRecord, AssessmentView, CriterionLine, HotelDetails, HotelId,
    HotelRecord, HotelSummary, NewAssessment, NewHotel, SurveySubmission,
};
use super::repository::{AssessmentRepository, RepositoryError};
use crate::rating::RatingEngine;
use crate::survey::{AnswerScale, SurveyCatalog, SurveyError, SurveyGuard};

/// Service composing the survey catalog, answer guard, rating engine, and repository.
pub struct AssessmentService<R> {
    catalog: Arc<SurveyCatalog>,
    guard: Arc<SurveyGuard>,
    engine: Arc<RatingEngine>,
    repository: Arc<R>,
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: RatingEngine, scale: AnswerScale) -> Self {
        Self::with_catalog(SurveyCatalog::standard(), repository, engine, scale)
    }

    pub fn with_catalog(
        catalog: SurveyCatalog,
        repository: Arc<R>,
        engine: RatingEngine,
        scale: AnswerScale,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            guard: Arc::new(SurveyGuard::new(scale)),
            engine: Arc::new(engine),
            repository,
        }
    }

    pub fn catalog(&self) -> &SurveyCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    pub fn answer_scale(&self) -> AnswerScale {
        self.guard.scale()
    }

    /// Rate a survey and store it against the named hotel, creating the hotel on first use.
    pub fn submit(
        &self,
        submission: SurveySubmission,
    ) -> Result<AssessmentOutcome, AssessmentServiceError> {
        let hotel_name = submission.hotel_name.trim();
        if hotel_name.is_empty() {
            warn!("rejected survey submission without a hotel name");
            return Err(SurveyError::MissingHotelName.into());
        }

        let sheet = self
            .guard
            .sheet_from_answers(&self.catalog, &self.engine, &submission.answers)
            .map_err(|error| {
                warn!(hotel = hotel_name, %error, "rejected survey submission");
                error
            })?;

        let result = self.engine.rate(&sheet.category_scores);
        let explanation =
            self.engine
                .explain(&sheet.category_scores, &sheet.criteria_scores, result.star);

        let address = submission
            .address
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let criterion_scores: BTreeMap<_, _> = submission
            .answers
            .iter()
            .map(|answer| (answer.criterion_id.clone(), answer.score))
            .collect();

        let recorded = self.repository.record_assessment(
            NewHotel {
                name: hotel_name.to_string(),
                address,
            },
            NewAssessment {
                star: result.star,
                weighted_average: result.weighted_average,
                recorded_at: Utc::now(),
                criterion_scores,
            },
        )?;
        let hotel = recorded.hotel;
        let record = recorded.assessment;

        if recorded.hotel_created {
            info!(hotel_id = %hotel.id, name = %hotel.name, "registered hotel");
        }
        info!(
            hotel_id = %hotel.id,
            assessment_id = %record.id,
            star = result.star,
            weighted_average = result.weighted_average,
            "recorded hotel assessment"
        );

        Ok(AssessmentOutcome {
            hotel_id: hotel.id,
            assessment_id: record.id,
            result,
            category_scores: sheet.category_scores,
            explanation,
        })
    }

    /// All known hotels with their assessment statistics, ordered by name.
    pub fn hotels(&self) -> Result<Vec<HotelSummary>, AssessmentServiceError> {
        let mut summaries = self
            .repository
            .list_hotels()?
            .into_iter()
            .map(|hotel| {
                let assessments = self.repository.assessments_for(hotel.id)?;
                Ok(summarize(hotel, &assessments))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        summaries.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(summaries)
    }

    /// One hotel with its assessments, newest first.
    pub fn hotel(&self, id: HotelId) -> Result<HotelDetails, AssessmentServiceError> {
        let hotel = self
            .repository
            .fetch_hotel(id)?
            .ok_or(RepositoryError::NotFound)?;

        let mut assessments = self.repository.assessments_for(hotel.id)?;
        let summary = summarize(hotel, &assessments);

        assessments.sort_by(|left, right| {
            right
                .recorded_at
                .cmp(&left.recorded_at)
                .then(right.id.cmp(&left.id))
        });

        Ok(HotelDetails {
            hotel: summary,
            assessments: assessments
                .into_iter()
                .map(|record| self.assessment_view(record))
                .collect(),
        })
    }

    fn assessment_view(&self, record: AssessmentRecord) -> AssessmentView {
        let criteria = self
            .catalog
            .categories()
            .iter()
            .flat_map(|spec| {
                spec.criteria.iter().filter_map(|criterion| {
                    record
                        .criterion_scores
                        .get(&criterion.id)
                        .map(|value| CriterionLine {
                            category: spec.category,
                            criterion: criterion.name.clone(),
                            value: *value,
                        })
                })
            })
            .collect();

        AssessmentView {
            id: record.id,
            star: record.star,
            weighted_average: record.weighted_average,
            recorded_at: record.recorded_at,
            criteria,
        }
    }
}

fn summarize(hotel: HotelRecord, assessments: &[AssessmentRecord]) -> HotelSummary {
    let average_star = if assessments.is_empty() {
        None
    } else {
        let total: f64 = assessments.iter().map(|record| f64::from(record.star)).sum();
        Some(round_to_tenth(total / assessments.len() as f64))
    };

    HotelSummary {
        id: hotel.id,
        name: hotel.name,
        address: hotel.address,
        assessment_count: assessments.len(),
        average_star,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Survey(#[from] SurveyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
