//! One-time passcode entity and the outcomes of checking one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of digits in a passcode unless configured otherwise
pub const DEFAULT_CODE_LENGTH: u32 = 6;

/// Lifetime of a passcode in the store (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Longest lifetime a passcode may be configured with (one year)
pub const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Namespace prepended to user identifiers to form store keys
pub const DEFAULT_KEY_PREFIX: &str = "otp:";

/// Store key holding the live passcode for `user_id`
pub fn storage_key(prefix: &str, user_id: &str) -> String {
    format!("{}{}", prefix, user_id)
}

/// A passcode issued to a user
///
/// The record itself only lives in the expiring store; this value is what the
/// service hands back to the caller at issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Identifier the code was issued for
    pub user_id: String,

    /// Zero-padded decimal code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the store no longer holds the code
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    /// Wrap a freshly generated code issued now
    ///
    /// `ttl_seconds` is capped at `MAX_TTL_SECONDS`.
    pub fn new(user_id: impl Into<String>, code: impl Into<String>, ttl_seconds: u64) -> Self {
        let issued_at = Utc::now();
        let ttl = ttl_seconds.min(MAX_TTL_SECONDS) as i64;
        Self {
            user_id: user_id.into(),
            code: code.into(),
            issued_at,
            expires_at: issued_at + Duration::seconds(ttl),
        }
    }
}

/// Result of presenting a candidate code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Code matched and has been consumed
    Valid,
    /// A code exists but the candidate does not match it
    Mismatch,
    /// No live code: never issued, expired, or already consumed
    NotFound,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Message reported to the caller
    pub fn message(&self) -> &'static str {
        match self {
            ValidationOutcome::Valid => "otp valid",
            ValidationOutcome::Mismatch => "invalid otp",
            ValidationOutcome::NotFound => "otp not found or expired",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_concatenates_prefix() {
        assert_eq!(storage_key(DEFAULT_KEY_PREFIX, "u1"), "otp:u1");
        assert_eq!(storage_key("", "u1"), "u1");
    }

    #[test]
    fn test_otp_code_expiry() {
        let code = OtpCode::new("u1", "012345", DEFAULT_TTL_SECONDS);
        assert_eq!((code.expires_at - code.issued_at).num_seconds(), 300);
    }

    #[test]
    fn test_otp_code_caps_huge_ttl() {
        let code = OtpCode::new("u1", "012345", 10_000_000_000_000);
        assert_eq!(
            (code.expires_at - code.issued_at).num_seconds(),
            MAX_TTL_SECONDS as i64
        );
    }

    #[test]
    fn test_outcome_messages() {
        assert!(ValidationOutcome::Valid.is_valid());
        assert!(!ValidationOutcome::Mismatch.is_valid());
        assert!(!ValidationOutcome::NotFound.is_valid());
        assert_eq!(ValidationOutcome::Mismatch.message(), "invalid otp");
        assert_eq!(ValidationOutcome::NotFound.message(), "otp not found or expired");
    }
}
