//! Prediction engine
//!
//! The pipeline orchestrating preprocessing, inference and postprocessing,
//! plus confidence scoring.

mod pipeline;

pub use pipeline::{score_confidence, PredictionPipeline, DEFAULT_CONFIDENCE};
