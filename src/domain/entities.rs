//! Prediction request and response value objects

use serde_json::{Map, Value};
use thiserror::Error;

/// Entity construction failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Features dictionary cannot be empty")]
    EmptyFeatures,

    #[error("Confidence must be between 0.0 and 1.0, got {0}")]
    ConfidenceOutOfRange(f64),

    #[error("Model version cannot be empty")]
    EmptyModelVersion,
}

/// Input features for a single prediction
///
/// Features are a flexible JSON object so that different model input
/// schemas can share one entry point. The map is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    features: Map<String, Value>,
}

impl PredictionRequest {
    pub fn new(features: Map<String, Value>) -> Result<Self, ValidationError> {
        if features.is_empty() {
            return Err(ValidationError::EmptyFeatures);
        }
        Ok(Self { features })
    }

    pub fn features(&self) -> &Map<String, Value> {
        &self.features
    }

    /// Number of features supplied
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no features were supplied
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn into_features(self) -> Map<String, Value> {
        self.features
    }
}

/// Result of a prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    prediction: Value,
    confidence: f64,
    model_version: String,
}

impl PredictionResponse {
    /// Build a response, checking `0.0 <= confidence <= 1.0` and a non-empty version.
    pub fn new(
        prediction: Value,
        confidence: f64,
        model_version: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        // NaN fails `contains` as well
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(confidence));
        }
        let model_version = model_version.into();
        if model_version.is_empty() {
            return Err(ValidationError::EmptyModelVersion);
        }
        Ok(Self {
            prediction,
            confidence,
            model_version,
        })
    }

    pub fn prediction(&self) -> &Value {
        &self.prediction
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Split into `(prediction, confidence, model_version)`
    pub fn into_parts(self) -> (Value, f64, String) {
        (self.prediction, self.confidence, self.model_version)
    }
}
