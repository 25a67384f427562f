//! Hotel registry and stored survey assessments.
//!
//! Each submitted survey is validated against the catalog, rated, and kept
//! with its raw answers so hotel listings can report averages and details.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, AssessmentOutcome, AssessmentRecord, AssessmentView, CriterionLine,
    HotelDetails, HotelId, HotelRecord, HotelSummary, NewAssessment, NewHotel, RecordedAssessment,
    SurveySubmission,
};
pub use repository::{AssessmentRepository, RepositoryError};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
