//! Redis-backed passcode store
//!
//! Keys are written by the service as `{prefix}{user id}`; Redis enforces the
//! TTL server-side, so nothing here tracks expiry.

use async_trait::async_trait;

use otp_core::errors::StoreError;
use otp_core::services::OtpStore;

use crate::cache::RedisClient;

#[async_trait]
impl OtpStore for RedisClient {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        RedisClient::set_with_expiry(self, key, value, ttl_seconds)
            .await
            .map_err(StoreError::from)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        RedisClient::get(self, key).await.map_err(StoreError::from)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        RedisClient::delete(self, key).await.map_err(StoreError::from)
    }
}
