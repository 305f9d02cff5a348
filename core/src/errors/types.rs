//! Input validation and store failure types

use thiserror::Error;

/// Validation errors
///
/// Always raised before the store is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },
}

/// Failures talking to the expiring store
///
/// A missing key is not an error; stores report it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store did not respond within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Unexpected store response: {message}")]
    Protocol { message: String },
}
