//! mlserve - HTTP prediction server for pluggable models
//!
//! mlserve wraps a model behind a single `/predict` endpoint. A request's
//! features flow through a fixed pipeline and every failure is classified
//! by the step it came from.
//!
//! # Architecture
//!
//! - **domain**: request/response value objects, error taxonomy, capability traits
//! - **engine**: the prediction pipeline (preprocess, infer, postprocess, score)
//! - **model**, **processing**: adapters plugged into the pipeline
//! - **server**: HTTP boundary, maps error kinds to status codes
//! - **config**, **cli**: startup configuration and commands
//!
//! # Example
//!
//! ```bash
//! # Start server
//! mlserve --model-type torch --model-path ./models/forecast.pt serve --port 8000
//!
//! # One-off prediction
//! mlserve predict --features '{"product_id": "ABC123", "season": "winter"}'
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod model;
pub mod processing;
pub mod server;

// Re-export key types
pub use config::{AppConfig, ModelConfig, ProcessingConfig, ServerConfig};
pub use domain::{DomainError, ErrorKind, PredictionRequest, PredictionResponse};
pub use engine::PredictionPipeline;
