//! Applicant Validator for Range Checking

use crate::error::ValidationError;
use feature_engine::ApplicantInput;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration, inclusive ranges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Application month valid range
    pub month_range: (u32, u32),
    /// Applicant age valid range (years)
    pub age_range: (u32, u32),
    /// Previous travel count valid range
    pub travel_history_range: (u32, u32),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            month_range: (1, 12),
            age_range: (0, 100),
            travel_history_range: (0, 50),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for applicant form input
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: u32,
        range: (u32, u32),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate application month
    pub fn validate_month(&self, month: u32) -> Result<(), ValidationError> {
        self.validate_range("application_month", month, self.config.month_range)
    }

    /// Validate applicant age
    pub fn validate_age(&self, age: u32) -> Result<(), ValidationError> {
        self.validate_range("age", age, self.config.age_range)
    }

    /// Validate previous travel count
    pub fn validate_travel_history(&self, count: u32) -> Result<(), ValidationError> {
        self.validate_range("travel_history_count", count, self.config.travel_history_range)
    }

    /// Validate that a categorical field is not blank
    pub fn validate_present(&self, field: &'static str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::MissingField(field))
        } else {
            Ok(())
        }
    }

    /// Validate every applicant field, collecting all violations
    pub fn validate(&self, input: &ApplicantInput) -> ValidationResult {
        let checks = [
            self.validate_present("country", &input.country),
            self.validate_present("visa_type", &input.visa_type),
            self.validate_month(input.application_month),
            self.validate_age(input.age),
            self.validate_travel_history(input.travel_history_count),
        ];
        let fields_checked = checks.len();

        let errors: Vec<_> = checks.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("Applicant input rejected: {} errors", errors.len());
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
