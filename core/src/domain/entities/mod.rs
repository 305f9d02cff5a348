//! Domain entities representing core business objects.

pub mod otp_code;

// Re-export commonly used types
pub use otp_code::{
    storage_key, OtpCode, ValidationOutcome, DEFAULT_CODE_LENGTH, DEFAULT_KEY_PREFIX,
    DEFAULT_TTL_SECONDS, MAX_TTL_SECONDS,
};
