use crate::assessments::{AssessmentServiceError, RepositoryError};
use crate::config::ConfigError;
use crate::rating::RatingConfigError;
use crate::survey::{SurveyError, SurveyImportError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    RatingConfig(RatingConfigError),
    Import(SurveyImportError),
    Survey(SurveyError),
    Assessment(AssessmentServiceError),
    InvalidInput(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Import(_) | AppError::Survey(_) | AppError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Assessment(AssessmentServiceError::Survey(_)) => StatusCode::BAD_REQUEST,
            AppError::Assessment(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::RatingConfig(_)
            | AppError::Assessment(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::RatingConfig(err) => write!(f, "rating configuration error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Survey(err) => write!(f, "survey error: {}", err),
            AppError::Assessment(err) => write!(f, "assessment error: {}", err),
            AppError::InvalidInput(message) => write!(f, "invalid input: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::RatingConfig(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Survey(err) => Some(err),
            AppError::Assessment(err) => Some(err),
            AppError::InvalidInput(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RatingConfigError> for AppError {
    fn from(value: RatingConfigError) -> Self {
        Self::RatingConfig(value)
    }
}

impl From<SurveyImportError> for AppError {
    fn from(value: SurveyImportError) -> Self {
        Self::Import(value)
    }
}

impl From<SurveyError> for AppError {
    fn from(value: SurveyError) -> Self {
        Self::Survey(value)
    }
}

impl From<AssessmentServiceError> for AppError {
    fn from(value: AssessmentServiceError) -> Self {
        Self::Assessment(value)
    }
}
