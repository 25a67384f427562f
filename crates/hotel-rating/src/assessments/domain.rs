use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rating::{Category, CategoryScores, RatingResult};
use crate::survey::{CriterionId, SurveyAnswer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelId(pub u64);

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub u64);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inbound payload for a guest survey about one hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub hotel_name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub answers: Vec<SurveyAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub id: HotelId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotel {
    pub name: String,
    pub address: Option<String>,
}

/// Stored assessment together with the raw answers it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub hotel_id: HotelId,
    pub star: u8,
    pub weighted_average: f64,
    pub recorded_at: DateTime<Utc>,
    pub criterion_scores: BTreeMap<CriterionId, f64>,
}

/// Rated survey waiting to be stored; the repository assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub star: u8,
    pub weighted_average: f64,
    pub recorded_at: DateTime<Utc>,
    pub criterion_scores: BTreeMap<CriterionId, f64>,
}

/// Hotel and assessment written by one `record_assessment` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAssessment {
    pub hotel: HotelRecord,
    /// Set when the hotel did not exist before this call.
    pub hotel_created: bool,
    pub assessment: AssessmentRecord,
}

impl NewAssessment {
    pub fn into_record(self, id: AssessmentId, hotel_id: HotelId) -> AssessmentRecord {
        AssessmentRecord {
            id,
            hotel_id,
            star: self.star,
            weighted_average: self.weighted_average,
            recorded_at: self.recorded_at,
            criterion_scores: self.criterion_scores,
        }
    }
}

/// Returned to callers after a survey has been rated and stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentOutcome {
    pub hotel_id: HotelId,
    pub assessment_id: AssessmentId,
    pub result: RatingResult,
    pub category_scores: CategoryScores,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelSummary {
    pub id: HotelId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub assessment_count: usize,
    /// Mean star over all assessments, rounded to one decimal.
    pub average_star: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionLine {
    pub category: Category,
    pub criterion: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    pub id: AssessmentId,
    pub star: u8,
    pub weighted_average: f64,
    pub recorded_at: DateTime<Utc>,
    pub criteria: Vec<CriterionLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelDetails {
    pub hotel: HotelSummary,
    pub assessments: Vec<AssessmentView>,
}
