//! Unit tests for Redis client

use redis::ConnectionAddr;

use crate::cache::redis_client::{connection_info, RedisClient};
use otp_shared::config::CacheConfig;

#[test]
fn test_connection_info_keeps_reserved_characters_in_password() {
    let config = CacheConfig::new("cache:6380")
        .with_password("p@ss/word:#%")
        .with_database(2);

    let info = connection_info(&config).unwrap();
    assert_eq!(info.addr, ConnectionAddr::Tcp("cache".to_string(), 6380));
    assert_eq!(info.redis.password.as_deref(), Some("p@ss/word:#%"));
    assert_eq!(info.redis.db, 2);
}

#[test]
fn test_connection_info_parses_full_url() {
    let config = CacheConfig::new("redis://:s3cret@cache:6379/4").with_database(1);

    let info = connection_info(&config).unwrap();
    assert_eq!(info.addr, ConnectionAddr::Tcp("cache".to_string(), 6379));
    assert_eq!(info.redis.password.as_deref(), Some("s3cret"));
    assert_eq!(info.redis.db, 4);
}

#[test]
fn test_connection_info_rejects_bad_port() {
    assert!(connection_info(&CacheConfig::new("cache:notaport")).is_err());
}

#[tokio::test]
async fn test_client_creation_with_invalid_url() {
    let config = CacheConfig::new("invalid://url");

    let result = RedisClient::new(&config).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_client_creation_fails_when_server_unreachable() {
    // Port 1 is reserved and refuses connections on test hosts
    let mut config = CacheConfig::new("127.0.0.1:1");
    config.connect_retries = 1;
    config.connection_timeout = 1;

    let result = RedisClient::new(&config).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_basic_operations() {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );

    let client = RedisClient::new(&config).await.unwrap();

    let key = "test:otp:unit";
    client.set_with_expiry(key, "123456", 60).await.unwrap();
    assert_eq!(client.get(key).await.unwrap(), Some("123456".to_string()));

    assert!(client.delete(key).await.unwrap());
    assert!(!client.delete(key).await.unwrap());
    assert_eq!(client.get(key).await.unwrap(), None);
}
