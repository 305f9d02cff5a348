//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    mask_identifier, GenerateResult, OtpGenerator, OtpService, OtpServiceConfig, OtpStore,
    ValidateResult,
};
