//! In-process expiring passcode store
//!
//! Used for local development (`CACHE_BACKEND=memory`) and in tests in place
//! of a Redis server. Expiry uses `tokio::time::Instant`, so tests can move
//! the clock with `tokio::time::advance`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::debug;

use otp_core::errors::StoreError;
use otp_core::services::OtpStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Expiring key-value map guarded by a mutex
///
/// Expired entries are never returned; they are dropped lazily on access and
/// in bulk by `purge_expired`.
#[derive(Debug, Default)]
pub struct MemoryOtpStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> Result<usize, StoreError> {
        let now = Instant::now();
        Ok(self.lock()?.values().filter(|entry| entry.is_live(now)).count())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        Ok(before - entries.len())
    }

    /// Purge expired entries every `interval` until the handle is aborted
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match store.purge_expired() {
                    Ok(0) => {}
                    Ok(removed) => debug!("Purged {} expired passcodes", removed),
                    Err(e) => {
                        tracing::error!("Stopping passcode sweeper: {}", e);
                        return;
                    }
                }
            }
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.entries.lock().map_err(|_| StoreError::Unavailable {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        let expires_at = Instant::now()
            .checked_add(Duration::from_secs(ttl_seconds))
            .ok_or_else(|| StoreError::Protocol {
                message: format!("ttl of {}s is out of range", ttl_seconds),
            })?;
        let entry = Entry {
            value: value.to_string(),
            expires_at,
        };
        self.lock()?.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        Ok(self
            .lock()?
            .remove(key)
            .map_or(false, |entry| entry.is_live(now)))
    }
}
