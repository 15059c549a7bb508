//! Validation error types

use thiserror::Error;

/// Validation error for domain models
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// String doesn't match the required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 150,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 150 characters"
        );
    }
}
