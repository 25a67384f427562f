use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{HotelId, SurveySubmission};
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing survey intake and hotel listings.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<R>))
        .route("/api/v1/hotels", get(hotels_handler::<R>))
        .route("/api/v1/hotels/:hotel_id", get(hotel_handler::<R>))
        .route("/api/v1/catalog", get(catalog_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(submission): axum::Json<SurveySubmission>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.submit(submission) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(AssessmentServiceError::Survey(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn hotels_handler<R>(State(service): State<Arc<AssessmentService<R>>>) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.hotels() {
        Ok(hotels) => (StatusCode::OK, axum::Json(hotels)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn hotel_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(hotel_id): Path<u64>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.hotel(HotelId(hotel_id)) {
        Ok(details) => (StatusCode::OK, axum::Json(details)).into_response(),
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("hotel {hotel_id} not found"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn catalog_handler<R>(State(service): State<Arc<AssessmentService<R>>>) -> Response
where
    R: AssessmentRepository + 'static,
{
    let payload = json!({
        "answer_scale": service.answer_scale(),
        "categories": service.catalog().categories(),
        "weights": service.engine().config().weights(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn internal_error(error: AssessmentServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
