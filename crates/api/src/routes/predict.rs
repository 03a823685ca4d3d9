//! JSON Prediction Route

use axum::{extract::State, Json};
use feature_engine::ApplicantInput;
use serde::{Deserialize, Serialize};

use crate::{ApiError, SharedState};

/// Response for the prediction endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub estimated_processing_days: i64,
}

/// Predict processing time. Only JSON typing is enforced on the body.
pub async fn predict(
    State(state): State<SharedState>,
    Json(input): Json<ApplicantInput>,
) -> Result<Json<PredictResponse>, ApiError> {
    let prediction = state.predict(&input, "api")?;

    Ok(Json(PredictResponse {
        estimated_processing_days: prediction.estimated_processing_days,
    }))
}
