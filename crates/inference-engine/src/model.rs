//! Model Artifacts

use crate::onnx::OnnxModel;
use crate::InferenceError;
use feature_engine::{FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// A trained regression model with a fixed input schema
pub trait Model: Send + Sync {
    /// Ordered feature names the model was trained on
    fn feature_schema(&self) -> &FeatureSchema;

    /// Predict a single row
    fn predict(&self, features: &FeatureVector<'_>) -> Result<f64, InferenceError>;
}

/// Where to find the model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model file: `.json` linear model or `.onnx` graph
    pub path: PathBuf,
    /// JSON array of feature names, required for ONNX models
    pub feature_names_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/visa_processing_model.json"),
            feature_names_path: None,
        }
    }
}

/// Load the model artifact named by `config`, picking the format by extension
pub fn load_model(config: &ModelConfig) -> Result<Arc<dyn Model>, InferenceError> {
    let extension = config
        .path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let model: Arc<dyn Model> = match extension.as_deref() {
        Some("json") => Arc::new(LinearModel::from_path(&config.path)?),
        Some("onnx") => {
            let names_path = config.feature_names_path.as_deref().ok_or_else(|| {
                InferenceError::ModelLoadError(
                    "ONNX models need feature_names_path".to_string(),
                )
            })?;
            Arc::new(OnnxModel::from_path(&config.path, names_path)?)
        }
        _ => {
            return Err(InferenceError::ModelLoadError(format!(
                "Unsupported model format: {}",
                config.path.display()
            )))
        }
    };

    info!(
        "Loaded model {} with {} features",
        config.path.display(),
        model.feature_schema().len()
    );
    Ok(model)
}

/// On-disk form of a linear regression model
#[derive(Debug, Deserialize)]
struct LinearArtifact {
    feature_names: FeatureSchema,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Linear regression: `intercept + sum(coefficient * value)`
#[derive(Debug, Clone)]
pub struct LinearModel {
    schema: FeatureSchema,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Create a linear model, checking one coefficient per feature
    pub fn new(
        schema: FeatureSchema,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, InferenceError> {
        if coefficients.len() != schema.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: schema.len(),
                actual: coefficients.len(),
            });
        }

        Ok(Self {
            schema,
            coefficients,
            intercept,
        })
    }

    /// Parse a JSON artifact
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        let artifact: LinearArtifact = serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelLoadError(format!("Invalid model JSON: {}", e)))?;
        Self::new(artifact.feature_names, artifact.coefficients, artifact.intercept)
    }

    /// Read a JSON artifact from disk
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

impl Model for LinearModel {
    fn feature_schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector<'_>) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let dot: f64 = features
            .values()
            .iter()
            .zip(&self.coefficients)
            .map(|(value, weight)| value * weight)
            .sum();

        Ok(self.intercept + dot)
    }
}
