//! Form-level validation failures. These never reach the record store.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Field '{0}' cannot be empty")]
    EmptyField(&'static str),

    #[error("Field '{0}' cannot be negative")]
    NegativeAmount(&'static str),

    #[error("Conversion rate must be between 0 and 1")]
    ConversionRateOutOfRange,
}

/// Reject negative or non-finite amounts.
pub fn non_negative(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::NegativeAmount(field));
    }
    Ok(())
}
