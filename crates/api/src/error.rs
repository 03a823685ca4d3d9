//! API Error Responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::Serialize;
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Message shown for any model failure, whatever the cause
pub const PREDICTION_FAILED: &str = "Prediction failed. Check model compatibility.";

/// Message shown when the history file cannot be written
pub const HISTORY_SAVE_FAILED: &str = "Saving prediction history failed.";

/// Errors surfaced by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Prediction failed: {0}")]
    Prediction(#[from] InferenceError),
    #[error("History persistence failed: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// User-facing message; details stay in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Prediction(_) => PREDICTION_FAILED,
            ApiError::Storage(_) => HISTORY_SAVE_FAILED,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self);
        let body = ErrorBody {
            error: self.public_message(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
