//! Cache module for the expiring passcode store
//!
//! Two implementations of `otp_core::OtpStore`:
//! - `RedisClient` - shared Redis server, TTL enforced by Redis
//! - `MemoryOtpStore` - in-process map, TTL enforced on read and by an optional sweeper

pub mod memory_store;
pub mod otp_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use memory_store::MemoryOtpStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use otp_shared::config::CacheConfig;
