//! ONNX Model Backend
//!
//! Runs an exported regressor with tract. ONNX graphs do not carry the
//! training column names, so they come from a JSON sidecar.

use crate::model::Model;
use crate::InferenceError;
use feature_engine::{FeatureSchema, FeatureVector};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::debug;

type RunnableGraph = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX regressor taking a `[1, n]` f32 input
pub struct OnnxModel {
    schema: FeatureSchema,
    plan: RunnableGraph,
}

impl OnnxModel {
    /// Load and optimize the graph at `model_path` for the schema at `names_path`
    pub fn from_path(model_path: &Path, names_path: &Path) -> Result<Self, InferenceError> {
        let names = std::fs::read_to_string(names_path).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", names_path.display(), e))
        })?;
        let schema: FeatureSchema = serde_json::from_str(&names).map_err(|e| {
            InferenceError::ModelLoadError(format!("Invalid feature names: {}", e))
        })?;

        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, schema.len()]).into())
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                InferenceError::ModelLoadError(format!("{}: {}", model_path.display(), e))
            })?;

        debug!("ONNX graph ready for {} features", schema.len());
        Ok(Self { schema, plan })
    }
}

impl Model for OnnxModel {
    fn feature_schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector<'_>) -> Result<f64, InferenceError> {
        if features.len() != self.schema.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.schema.len(),
                actual: features.len(),
            });
        }

        let row: Vec<f32> = features.values().iter().map(|&v| v as f32).collect();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, row.len()), row)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("Model produced no output".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        view.iter()
            .next()
            .map(|&value| f64::from(value))
            .ok_or_else(|| InferenceError::InferenceFailed("Empty model output".to_string()))
    }
}
