//! Applicant Input

use serde::{Deserialize, Serialize};

/// Raw applicant attributes for one prediction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantInput {
    /// Applicant country, matched literally against `country_*` slots
    pub country: String,
    /// Visa type, matched literally against `visa_type_*` slots
    pub visa_type: String,
    /// Month of application (1-12 at the form boundary)
    pub application_month: u32,
    /// Applicant age in years
    pub age: u32,
    /// Number of previous travels
    pub travel_history_count: u32,
}

impl ApplicantInput {
    /// Create a new applicant input
    pub fn new(
        country: impl Into<String>,
        visa_type: impl Into<String>,
        application_month: u32,
        age: u32,
        travel_history_count: u32,
    ) -> Self {
        Self {
            country: country.into(),
            visa_type: visa_type.into(),
            application_month,
            age,
            travel_history_count,
        }
    }
}
