//! Configuration for the passcode service

use crate::domain::entities::otp_code::{
    DEFAULT_CODE_LENGTH, DEFAULT_KEY_PREFIX, DEFAULT_TTL_SECONDS, MAX_TTL_SECONDS,
};
use crate::errors::{DomainError, DomainResult};

use super::generator::MAX_DIGITS;

/// Configuration for the passcode service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of digits per code
    pub code_length: u32,
    /// Seconds a code stays in the store
    pub ttl_seconds: u64,
    /// Prefix of every store key
    pub key_prefix: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl OtpServiceConfig {
    pub fn new(code_length: u32, ttl_seconds: u64, key_prefix: impl Into<String>) -> Self {
        Self {
            code_length,
            ttl_seconds,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.code_length == 0 || self.code_length > MAX_DIGITS {
            return Err(DomainError::Config {
                message: format!(
                    "code length must be between 1 and {}, got {}",
                    MAX_DIGITS, self.code_length
                ),
            });
        }
        if self.ttl_seconds == 0 || self.ttl_seconds > MAX_TTL_SECONDS {
            return Err(DomainError::Config {
                message: format!(
                    "ttl must be between 1 and {} seconds, got {}",
                    MAX_TTL_SECONDS, self.ttl_seconds
                ),
            });
        }
        Ok(())
    }
}
