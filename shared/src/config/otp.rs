//! Passcode configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Passcode length, lifetime and key namespace
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: u32,

    /// Seconds before the store evicts a code
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Prefix prepended to the user identifier to form the store key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            ttl_seconds: default_ttl_seconds(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_length: env_parse("OTP_LENGTH", default_code_length()),
            ttl_seconds: env_parse("OTP_TTL_SECONDS", default_ttl_seconds()),
            key_prefix: env_string("OTP_KEY_PREFIX").unwrap_or_else(default_key_prefix),
        }
    }
}

fn default_code_length() -> u32 {
    6
}

fn default_ttl_seconds() -> u64 {
    300 // 5 minutes
}

fn default_key_prefix() -> String {
    String::from("otp:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_default() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.ttl_seconds, 300);
        assert_eq!(config.key_prefix, "otp:");
    }
}
