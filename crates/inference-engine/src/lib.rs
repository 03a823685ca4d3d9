//! Inference Engine
//!
//! Loads the trained regression model once and turns applicant fields into a
//! processing time estimate.

mod engine;
mod model;
mod onnx;

pub use engine::{InferenceEngine, Prediction};
pub use model::{load_model, LinearModel, Model, ModelConfig};
pub use onnx::OnnxModel;

use feature_engine::SchemaError;
use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Invalid feature schema: {0}")]
    Schema(#[from] SchemaError),
}
