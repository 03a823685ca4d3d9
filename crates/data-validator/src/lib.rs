//! Applicant Input Validation
//!
//! Range checks applied at the form boundary. The encoder and the JSON
//! endpoint accept any well-typed input.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
