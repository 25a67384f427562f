use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use hotel_rating::assessments::{assessment_router, AssessmentRepository, AssessmentService};
use hotel_rating::rating::{CategoryScores, CriteriaScores, RatingEngine, RuleId};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Stateless rating request; object key order is kept for the explanation.
#[derive(Debug, Deserialize)]
pub(crate) struct RatingRequest {
    pub(crate) category_scores: CategoryScores,
    #[serde(default)]
    pub(crate) criteria_scores: CriteriaScores,
}

#[derive(Debug, Serialize)]
pub(crate) struct RatingResponse {
    pub(crate) star: u8,
    pub(crate) weighted_average: f64,
    pub(crate) base_star: u8,
    pub(crate) applied_rule: Option<AppliedRuleView>,
    pub(crate) explanation: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AppliedRuleView {
    pub(crate) id: RuleId,
    pub(crate) code: &'static str,
    pub(crate) description: &'static str,
}

impl From<RuleId> for AppliedRuleView {
    fn from(rule: RuleId) -> Self {
        Self {
            id: rule,
            code: rule.code(),
            description: rule.description(),
        }
    }
}

pub(crate) fn with_service_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    assessment_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/ratings", post(rating_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rating_endpoint(
    Extension(engine): Extension<Arc<RatingEngine>>,
    Json(request): Json<RatingRequest>,
) -> Json<RatingResponse> {
    let RatingRequest {
        category_scores,
        criteria_scores,
    } = request;

    let result = engine.rate(&category_scores);
    let explanation = engine.explain(&category_scores, &criteria_scores, result.star);

    Json(RatingResponse {
        star: result.star,
        weighted_average: result.weighted_average,
        base_star: result.base_star,
        applied_rule: result.applied_rule.map(AppliedRuleView::from),
        explanation,
    })
}
