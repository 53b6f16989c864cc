//! Domain layer
//!
//! Value objects, the error taxonomy and the capability traits that the
//! pipeline and its adapters are written against. Nothing in here knows
//! about HTTP or configuration.

mod entities;
mod error;
mod traits;

pub use entities::{PredictionRequest, PredictionResponse, ValidationError};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    BoxedModel, BoxedPostprocessor, BoxedPreprocessor, Model, Postprocessor, PredictionService,
    Preprocessor,
};
