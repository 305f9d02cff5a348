use serde::{Deserialize, Serialize};
use validator::Validate;

use otp_core::services::{GenerateResult, ValidateResult};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateRequest {
    /// Identifier the passcode is issued for
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidateRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_id: String,

    /// Candidate passcode
    #[serde(default)]
    #[validate(length(min = 1))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub user_id: String,
    pub otp: String,
    pub expires_in_seconds: u64,
}

impl From<GenerateResult> for GenerateResponse {
    fn from(result: GenerateResult) -> Self {
        Self {
            user_id: result.otp_code.user_id,
            otp: result.otp_code.code,
            expires_in_seconds: result.expires_in_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl From<ValidateResult> for ValidateResponse {
    fn from(result: ValidateResult) -> Self {
        Self {
            valid: result.valid,
            message: result.message,
        }
    }
}
