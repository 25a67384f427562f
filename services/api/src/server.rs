use crate::cli::ServeArgs;
use crate::infra::{rating_engine, AppState, InMemoryAssessmentRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hotel_rating::assessments::AssessmentService;
use hotel_rating::config::AppConfig;
use hotel_rating::error::AppError;
use hotel_rating::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = rating_engine(&config.survey)?;
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let assessment_service = Arc::new(AssessmentService::new(
        repository,
        engine.clone(),
        config.survey.answer_scale,
    ));

    let app = with_service_routes(assessment_service)
        .layer(Extension(Arc::new(engine)))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        answer_scale = config.survey.answer_scale.max(),
        "hotel rating service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
