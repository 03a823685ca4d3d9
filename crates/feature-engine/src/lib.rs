//! Feature Engineering Engine
//!
//! Builds model-ready feature vectors from raw applicant fields, aligned to the
//! ordered feature schema the regression model was trained on.

mod applicant;
mod features;
mod schema;

pub use applicant::ApplicantInput;
pub use features::{encode, FeatureVector};
pub use schema::{FeatureSchema, SchemaError, NUMERIC_FEATURES};

/// One-hot prefix for the applicant country
pub const COUNTRY_PREFIX: &str = "country_";

/// One-hot prefix for the visa type
pub const VISA_TYPE_PREFIX: &str = "visa_type_";
