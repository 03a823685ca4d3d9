//! Prediction Service

use crate::model::Model;
use crate::InferenceError;
use feature_engine::{encode, ApplicantInput, FeatureSchema};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Processing time estimate for one applicant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Estimate rounded to whole days
    pub estimated_processing_days: i64,
    /// Unrounded model output
    pub raw_value: f64,
}

/// Encodes applicant fields against the model schema and runs the model
#[derive(Clone)]
pub struct InferenceEngine {
    model: Arc<dyn Model>,
}

impl InferenceEngine {
    /// Wrap a loaded model
    pub fn new(model: Arc<dyn Model>) -> Self {
        let missing = model.feature_schema().missing_numeric_slots();
        if !missing.is_empty() {
            warn!(
                "Model schema has no slot for {:?}; those inputs will be ignored",
                missing
            );
        }

        Self { model }
    }

    /// Feature schema of the loaded model
    pub fn schema(&self) -> &FeatureSchema {
        self.model.feature_schema()
    }

    /// Predict processing days for an applicant
    pub fn predict(&self, input: &ApplicantInput) -> Result<Prediction, InferenceError> {
        let start = std::time::Instant::now();

        let features = encode(input, self.model.feature_schema());
        let raw_value = self.model.predict(&features)?;

        if !raw_value.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "Model returned non-finite value {}",
                raw_value
            )));
        }

        let estimated_processing_days = round_days(raw_value).ok_or_else(|| {
            InferenceError::InferenceFailed(format!(
                "Model returned out of range value {}",
                raw_value
            ))
        })?;

        debug!(
            "Predicted {:.2} days in {}us",
            raw_value,
            start.elapsed().as_micros()
        );

        Ok(Prediction {
            estimated_processing_days,
            raw_value,
        })
    }
}

/// Round to the nearest whole day, ties to even. `None` when the result does
/// not fit in an `i64`.
fn round_days(value: f64) -> Option<i64> {
    let rounded = value.round_ties_even();
    // i64::MAX as f64 is 2^63, one past the largest representable value
    (rounded >= i64::MIN as f64 && rounded < i64::MAX as f64).then(|| rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearModel;
    use feature_engine::FeatureVector;

    fn engine_with_intercept(intercept: f64) -> InferenceEngine {
        let schema = FeatureSchema::new([
            "age",
            "travel_history_count",
            "application_month",
            "country_India",
            "visa_type_Tourist",
        ])
        .unwrap();
        let model = LinearModel::new(schema, vec![0.1, -0.5, 0.25, 3.0, 1.5], intercept).unwrap();
        InferenceEngine::new(Arc::new(model))
    }

    struct ConstantModel {
        schema: FeatureSchema,
        value: f64,
    }

    impl Model for ConstantModel {
        fn feature_schema(&self) -> &FeatureSchema {
            &self.schema
        }

        fn predict(&self, _features: &FeatureVector<'_>) -> Result<f64, InferenceError> {
            Ok(self.value)
        }
    }

    #[test]
    fn test_prediction_rounds_to_days() {
        let engine = engine_with_intercept(30.0);
        let input = ApplicantInput::new("India", "Tourist", 4, 30, 5);

        // 30 + 3 - 2.5 + 1 + 3 + 1.5
        let prediction = engine.predict(&input).unwrap();
        assert!((prediction.raw_value - 36.0).abs() < 1e-9);
        assert_eq!(prediction.estimated_processing_days, 36);
    }

    #[test]
    fn test_unknown_category_still_predicts() {
        let engine = engine_with_intercept(30.0);
        let input = ApplicantInput::new("Mars", "Diplomatic", 4, 30, 5);

        let prediction = engine.predict(&input).unwrap();
        assert!((prediction.raw_value - 31.5).abs() < 1e-9);
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_days(2.5), Some(2));
        assert_eq!(round_days(3.5), Some(4));
        assert_eq!(round_days(41.6), Some(42));
        assert_eq!(round_days(-0.4), Some(0));
    }

    #[test]
    fn test_round_rejects_values_beyond_i64() {
        assert_eq!(round_days(1e300), None);
        assert_eq!(round_days(-1e300), None);
        assert_eq!(round_days(i64::MAX as f64), None);
        assert_eq!(round_days(f64::NAN), None);
        assert_eq!(round_days(i64::MIN as f64), Some(i64::MIN));
    }

    #[test]
    fn test_out_of_range_output_is_error() {
        let model = ConstantModel {
            schema: FeatureSchema::new(["age"]).unwrap(),
            value: 1e300,
        };
        let engine = InferenceEngine::new(Arc::new(model));

        let result = engine.predict(&ApplicantInput::new("UK", "Work", 1, 30, 0));
        assert!(matches!(result, Err(InferenceError::InferenceFailed(_))));
    }

    #[test]
    fn test_non_finite_output_is_error() {
        let model = ConstantModel {
            schema: FeatureSchema::new(["age"]).unwrap(),
            value: f64::NAN,
        };
        let engine = InferenceEngine::new(Arc::new(model));

        let result = engine.predict(&ApplicantInput::new("UK", "Work", 1, 30, 0));
        assert!(matches!(result, Err(InferenceError::InferenceFailed(_))));
    }
}
