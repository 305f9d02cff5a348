//! Main passcode service implementation

use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use crate::domain::entities::otp_code::{storage_key, OtpCode, ValidationOutcome};
use crate::errors::{DomainError, DomainResult, ValidationError};

use super::config::OtpServiceConfig;
use super::generator::OtpGenerator;
use super::traits::OtpStore;
use super::types::{GenerateResult, ValidateResult};

/// Issues and checks one-time passcodes against an expiring store
///
/// The service keeps no state of its own; every record lives in the store,
/// so one instance can be shared by all request handlers.
///
/// Validation reads, compares and deletes in separate store calls. Two
/// concurrent validations carrying the correct code can both observe the
/// record before either deletes it, and both succeed.
pub struct OtpService<C: OtpStore> {
    /// Store holding the live codes
    store: Arc<C>,
    /// Code generator sized from the configuration
    generator: OtpGenerator,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<C: OtpStore> OtpService<C> {
    /// Create a new passcode service
    ///
    /// # Arguments
    ///
    /// * `store` - Long-lived store handle shared with other services
    /// * `config` - Code length, TTL and key prefix
    ///
    /// # Errors
    ///
    /// `DomainError::Config` when the code length or TTL is unusable.
    pub fn new(store: Arc<C>, config: OtpServiceConfig) -> DomainResult<Self> {
        config.validate()?;
        let generator = OtpGenerator::new(config.code_length)?;
        Ok(Self {
            store,
            generator,
            config,
        })
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Store key for a user's passcode
    pub fn storage_key(&self, user_id: &str) -> String {
        storage_key(&self.config.key_prefix, user_id)
    }

    /// Issue a new passcode for `user_id`
    ///
    /// Any previous code for the same identifier is overwritten and stops
    /// working immediately.
    ///
    /// # Returns
    ///
    /// * `Ok(GenerateResult)` - The code and its lifetime in seconds
    /// * `Err(DomainError)` - Empty identifier, entropy failure, or store failure
    pub async fn generate(&self, user_id: &str) -> DomainResult<GenerateResult> {
        require("user_id", user_id)?;

        let code = self.generator.generate()?;
        let otp_code = OtpCode::new(user_id, code, self.config.ttl_seconds);
        let key = self.storage_key(user_id);

        self.store
            .set_with_expiry(&key, &otp_code.code, self.config.ttl_seconds)
            .await
            .map_err(|e| {
                tracing::error!(
                    user = %mask_identifier(user_id),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store passcode"
                );
                DomainError::Store(e)
            })?;

        tracing::info!(
            user = %mask_identifier(user_id),
            expires_at = %otp_code.expires_at,
            event = "otp_generated",
            "Issued new passcode"
        );

        Ok(GenerateResult {
            expires_in_seconds: self.config.ttl_seconds,
            otp_code,
        })
    }

    /// Check `otp` against the live passcode for `user_id`
    ///
    /// A match consumes the code. A mismatch leaves it in place so the user
    /// can retry until it expires. A missing code is a normal outcome, not an
    /// error.
    ///
    /// # Returns
    ///
    /// * `Ok(ValidateResult)` - Validity flag and message
    /// * `Err(DomainError)` - Empty input, or the store could not be read
    pub async fn validate(&self, user_id: &str, otp: &str) -> DomainResult<ValidateResult> {
        require("user_id", user_id)?;
        require("otp", otp)?;

        let key = self.storage_key(user_id);
        let stored = self.store.get(&key).await.map_err(|e| {
            tracing::error!(
                user = %mask_identifier(user_id),
                error = %e,
                event = "otp_read_failed",
                "Failed to read passcode"
            );
            DomainError::Store(e)
        })?;

        let Some(stored) = stored else {
            tracing::debug!(
                user = %mask_identifier(user_id),
                event = "otp_not_found",
                "No live passcode (expired, consumed or never issued)"
            );
            return Ok(ValidationOutcome::NotFound.into());
        };

        if !Self::constant_time_compare(&stored, otp) {
            tracing::warn!(
                user = %mask_identifier(user_id),
                event = "otp_mismatch",
                "Presented passcode does not match"
            );
            return Ok(ValidationOutcome::Mismatch.into());
        }

        // The code is spent once it matched; a failed delete is left to TTL eviction
        if let Err(e) = self.store.delete(&key).await {
            tracing::warn!(
                user = %mask_identifier(user_id),
                error = %e,
                event = "otp_consume_delete_failed",
                "Matched passcode could not be deleted"
            );
        }

        tracing::info!(
            user = %mask_identifier(user_id),
            event = "otp_consumed",
            "Passcode validated and consumed"
        );

        Ok(ValidationOutcome::Valid.into())
    }

    /// Compare two codes without short-circuiting on the first differing byte
    pub fn constant_time_compare(stored: &str, candidate: &str) -> bool {
        constant_time_eq(stored.as_bytes(), candidate.as_bytes())
    }
}

/// Mask an identifier for logging, keeping only the last four characters
pub fn mask_identifier(user_id: &str) -> String {
    let chars: Vec<char> = user_id.chars().collect();
    let visible = chars.len().saturating_sub(4);
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { *c })
        .collect()
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_identifier() {
        assert_eq!(mask_identifier("user-12345"), "******2345");
        assert_eq!(mask_identifier("abc"), "abc");
        assert_eq!(mask_identifier(""), "");
    }
}
