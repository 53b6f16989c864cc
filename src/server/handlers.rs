//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::Instrument;

use super::error::ApiError;
use crate::domain::{DomainError, PredictionRequest, PredictionService};

/// Shared application state
pub struct AppState {
    pub service: Arc<dyn PredictionService>,
    pub service_name: String,
}

impl AppState {
    pub fn new(service: Arc<dyn PredictionService>, service_name: impl Into<String>) -> Self {
        Self {
            service,
            service_name: service_name.into(),
        }
    }
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: state.service_name.clone(),
        }),
    )
}

/// Prediction endpoint
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::InvalidRequest {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    if payload.features.is_empty() {
        return Err(DomainError::invalid_feature("Features dictionary cannot be empty").into());
    }

    let span = tracing::info_span!("predict", request_id = %uuid::Uuid::new_v4());
    async move {
        tracing::info!(
            feature_count = payload.features.len(),
            feature_keys = ?payload.features.keys().collect::<Vec<_>>(),
            "Received prediction request"
        );

        let request = PredictionRequest::new(payload.features)
            .map_err(|e| DomainError::invalid_feature(e.to_string()))?;

        let response = state.service.predict(request).await?;

        tracing::info!(
            confidence = response.confidence(),
            model_version = response.model_version(),
            "Prediction request completed successfully"
        );

        let (prediction, confidence, model_version) = response.into_parts();
        Ok::<_, ApiError>(Json(PredictResponse {
            prediction,
            confidence,
            model_version,
        }))
    }
    .instrument(span)
    .await
}

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Value,
    pub confidence: f64,
    pub model_version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}
