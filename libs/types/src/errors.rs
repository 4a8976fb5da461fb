//! Validation errors for locally entered form data
//!
//! These never reach the network: they are raised before any collaborator
//! call and surface as warning notifications.

use thiserror::Error;

/// Form input that cannot be turned into a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Destination PIX key is required")]
    MissingDestinationKey,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Select the scam type")]
    MissingScamType,

    #[error("Description must have at least {min} characters (got {actual})")]
    DescriptionTooShort { min: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_display() {
        let err = ValidationError::InvalidAmount("abc".to_string());
        assert_eq!(err.to_string(), "Invalid amount: abc");
    }

    #[test]
    fn test_description_too_short_display() {
        let err = ValidationError::DescriptionTooShort { min: 20, actual: 10 };
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("10"));
    }
}
