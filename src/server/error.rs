//! Error to HTTP response translation

use std::any::Any;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::{DomainError, ErrorKind};

/// Status code for a domain error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Preprocessing | ErrorKind::InvalidFeature => StatusCode::BAD_REQUEST,
        ErrorKind::ModelNotLoaded | ErrorKind::ModelPrediction => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Postprocessing => StatusCode::BAD_GATEWAY,
        ErrorKind::PredictionService => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Failure returned by a handler
#[derive(Debug)]
pub enum ApiError {
    /// Classified failure from validation or the pipeline
    Domain(DomainError),
    /// Body could not be decoded into the request schema
    InvalidRequest { status: StatusCode, message: String },
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(err) => {
                let status = status_for(err.kind());
                if status.is_client_error() {
                    tracing::warn!("Bad request: {}", err.message());
                } else {
                    tracing::error!("{}: {}", err.kind(), err.message());
                }
                (
                    status,
                    Json(ErrorResponse {
                        error: err.kind().name().to_string(),
                        message: err.message().to_string(),
                        details: err.details().map(str::to_string),
                    }),
                )
                    .into_response()
            }
            ApiError::InvalidRequest { status, message } => {
                tracing::warn!("Rejected request body: {}", message);
                (
                    status,
                    Json(ErrorResponse {
                        error: "InvalidRequest".to_string(),
                        message,
                        details: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Response for a handler that panicked
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Unexpected error: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "InternalServerError".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: Some(details),
        }),
    )
        .into_response()
}

/// Give a timed-out request the standard error body
///
/// Responses other than the timeout layer's bare 408 are returned unchanged.
pub fn timeout_response(response: Response, timeout: Duration) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::error!("Request exceeded {}s timeout", timeout.as_secs());

    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ErrorResponse {
            error: "RequestTimeout".to_string(),
            message: "Request timed out".to_string(),
            details: Some(format!("No response within {}s", timeout.as_secs())),
        }),
    )
        .into_response()
}

/// Error body shared by every failure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}
