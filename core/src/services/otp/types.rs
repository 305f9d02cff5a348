//! Types for passcode service results

use crate::domain::entities::otp_code::{OtpCode, ValidationOutcome};

/// Result of issuing a passcode
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The passcode that was stored
    pub otp_code: OtpCode,
    /// Seconds the code stays valid, counted from issuance
    pub expires_in_seconds: u64,
}

/// Result of checking a passcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateResult {
    /// What the check concluded
    pub outcome: ValidationOutcome,
    /// Whether the code was accepted (and consumed)
    pub valid: bool,
    /// Human-readable explanation
    pub message: String,
}

impl From<ValidationOutcome> for ValidateResult {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            outcome,
            valid: outcome.is_valid(),
            message: outcome.message().to_string(),
        }
    }
}
