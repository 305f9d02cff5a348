//! # OtpGate Core
//!
//! Passcode lifecycle for the OtpGate backend: code generation, the
//! expiring-store contract, and single-use validation. Transport and store
//! implementations live in the `api` and `infra` crates.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
