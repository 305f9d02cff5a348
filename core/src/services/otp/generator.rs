//! Passcode generator

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::errors::{DomainError, DomainResult};

/// Longest code whose range `10^digits` fits a single `u64` draw
pub const MAX_DIGITS: u32 = 18;

/// Produces fixed-length numeric codes from a cryptographically secure source
///
/// Codes are drawn uniformly from `[0, 10^digits)` by rejection sampling, so
/// every code is equally likely, and are zero-padded to exactly `digits`
/// characters. A failing entropy source is reported, never replaced.
#[derive(Debug, Clone, Copy)]
pub struct OtpGenerator {
    digits: u32,
    /// `10^digits`
    modulus: u64,
    /// Largest multiple of `modulus` representable; draws at or above are rejected
    zone: u64,
}

impl OtpGenerator {
    pub fn new(digits: u32) -> DomainResult<Self> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(DomainError::Config {
                message: format!("code length must be between 1 and {}, got {}", MAX_DIGITS, digits),
            });
        }
        let modulus = 10u64.pow(digits);
        Ok(Self {
            digits,
            modulus,
            zone: u64::MAX - (u64::MAX % modulus),
        })
    }

    /// Generate a code from the operating system CSPRNG
    pub fn generate(&self) -> DomainResult<String> {
        self.generate_with(&mut OsRng)
    }

    /// Generate a code from the given cryptographically secure source
    pub fn generate_with<R: RngCore + CryptoRng>(&self, rng: &mut R) -> DomainResult<String> {
        let mut bytes = [0u8; 8];
        loop {
            rng.try_fill_bytes(&mut bytes).map_err(|e| {
                tracing::error!(error = %e, event = "otp_entropy_unavailable", "Secure random source failed");
                DomainError::RandomSource { message: e.to_string() }
            })?;
            let draw = u64::from_le_bytes(bytes);
            if draw < self.zone {
                return Ok(format!(
                    "{:0width$}",
                    draw % self.modulus,
                    width = self.digits as usize
                ));
            }
        }
    }
}
