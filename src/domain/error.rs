//! Domain error taxonomy
//!
//! Every failure carries a message and an optional free-text detail. The
//! [`ErrorKind`] is what callers branch on; the message is for humans.

use std::fmt;

use thiserror::Error;

/// Category of a domain failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input transformation failed (missing/invalid feature)
    Preprocessing,
    /// Inference failed
    ModelPrediction,
    /// Model artifact could not be loaded or initialized
    ModelNotLoaded,
    /// Output transformation failed or output was absent
    Postprocessing,
    /// A feature value violated a domain constraint
    InvalidFeature,
    /// Orchestration failure not otherwise classified
    PredictionService,
}

impl ErrorKind {
    /// Name exposed to clients in error responses
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Preprocessing => "PreprocessingError",
            ErrorKind::ModelPrediction => "ModelPredictionError",
            ErrorKind::ModelNotLoaded => "ModelNotLoadedError",
            ErrorKind::Postprocessing => "PostprocessingError",
            ErrorKind::InvalidFeature => "InvalidFeatureError",
            ErrorKind::PredictionService => "PredictionServiceError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified domain failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
    details: Option<String>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn preprocessing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Preprocessing, message)
    }

    pub fn model_prediction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ModelPrediction, message)
    }

    pub fn model_not_loaded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ModelNotLoaded, message)
    }

    pub fn postprocessing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Postprocessing, message)
    }

    pub fn invalid_feature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFeature, message)
    }

    pub fn prediction_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PredictionService, message)
    }

    /// Attach a detail string, typically the description of the cause
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// One-line description used when this error becomes another error's detail
    pub fn summary(&self) -> String {
        match &self.details {
            Some(details) => format!("{}: {}", self.message, details),
            None => self.message.clone(),
        }
    }
}
