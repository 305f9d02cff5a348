//! Expiring key-value store contract

use async_trait::async_trait;

use crate::errors::StoreError;

/// Store the passcodes live in
///
/// Implementations enforce expiry themselves; the service never sweeps.
/// Every call is a single command so a write either lands whole or not at all.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Write `value` under `key`, replacing any previous value and TTL
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError>;
    /// Read the live value, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Remove the key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}
