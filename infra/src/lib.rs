//! # Infrastructure Layer
//!
//! Concrete implementations of the passcode store contract defined in
//! `otp_core`:
//! - **Redis**: multiplexed async client with per-command timeouts
//! - **Memory**: single-process expiring map for development and tests

use otp_core::errors::StoreError;

/// Cache module - Redis client and store adapters
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Command did not complete in time
    #[error("Cache timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(e) if e.is_io_error() || e.is_connection_dropped() => {
                StoreError::Unavailable { message: e.to_string() }
            }
            InfrastructureError::Cache(e) => StoreError::Protocol { message: e.to_string() },
            InfrastructureError::Timeout { seconds } => StoreError::Timeout { seconds },
            InfrastructureError::Config(message) => StoreError::Unavailable { message },
        }
    }
}
