//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{StoreError, ValidationError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Random source unavailable: {message}")]
    RandomSource { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DomainError {
    /// Errors caused by the caller's input rather than by the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::ValidationErr(_))
    }

    /// Errors that must be reported as an opaque internal failure
    pub fn is_internal(&self) -> bool {
        !self.is_client_error()
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let validation = DomainError::from(ValidationError::RequiredField {
            field: "user_id".to_string(),
        });
        assert!(validation.is_client_error());
        assert!(!validation.is_internal());

        let store = DomainError::from(StoreError::Timeout { seconds: 3 });
        assert!(store.is_internal());

        let random = DomainError::RandomSource {
            message: "no entropy".to_string(),
        };
        assert!(random.is_internal());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::from(StoreError::Unavailable {
            message: "connection refused".to_string(),
        });
        assert_eq!(err.to_string(), "Store error: Store unavailable: connection refused");

        let err = DomainError::from(ValidationError::RequiredField {
            field: "otp".to_string(),
        });
        assert_eq!(err.to_string(), "Required field: otp");
    }
}
