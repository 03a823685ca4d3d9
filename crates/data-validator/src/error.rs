//! Validation Error Types

use thiserror::Error;

/// Errors during applicant validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
