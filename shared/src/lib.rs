//! Shared configuration and response types for the OtpGate server
//!
//! This crate provides the pieces every other workspace member needs:
//! - Configuration structs loaded from the environment
//! - The JSON error body returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, Environment, LogFormat, LoggingConfig, OtpConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
