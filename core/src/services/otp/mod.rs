//! One-time passcode service module
//!
//! This module provides the passcode lifecycle:
//! - Uniform code generation from the operating system CSPRNG
//! - Storage under `prefix + user id` with a fixed TTL
//! - Constant-time validation with delete-on-success consumption

mod config;
mod generator;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use generator::OtpGenerator;
pub use service::{mask_identifier, OtpService};
pub use traits::OtpStore;
pub use types::{GenerateResult, ValidateResult};
