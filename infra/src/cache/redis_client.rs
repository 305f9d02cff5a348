//! Redis cache client implementation
//!
//! A single multiplexed connection is opened at startup and cloned into every
//! request. Each command is bounded by the configured response timeout and is
//! never retried; only the initial connection is attempted more than once.

use redis::{
    aio::MultiplexedConnection, AsyncCommands, Client, ConnectionAddr, ConnectionInfo,
    IntoConnectionInfo, RedisConnectionInfo, RedisResult,
};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use otp_core::services::mask_identifier;
use otp_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Base delay between startup connection attempts
const CONNECT_RETRY_DELAY_MS: u64 = 100;

/// Upper bound for the startup backoff
const CONNECT_RETRY_MAX_DELAY_MS: u64 = 5000;

/// Redis cache client
///
/// Cheap to clone; clones share the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Deadline applied to every command
    response_timeout: Duration,
}

impl RedisClient {
    /// Connect to Redis and verify the server answers PING
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    ///
    /// # Example
    /// ```no_run
    /// use otp_infra::cache::RedisClient;
    /// use otp_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("localhost:6379").with_database(0);
    ///     let client = RedisClient::new(&config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let info = connection_info(config)?;
        info!("Creating Redis client for {:?} (db {})", info.addr, info.redis.db);

        let client = Client::open(info).map_err(|e| {
            error!("Failed to create Redis client: {}", e);
            InfrastructureError::Config(format!("Invalid Redis configuration: {}", e))
        })?;

        let connect_timeout = Duration::from_secs(config.connection_timeout.max(1));
        let connection = Self::create_connection_with_retry(
            client,
            config.connect_retries.max(1),
            connect_timeout,
        )
        .await?;

        let redis_client = Self {
            connection,
            response_timeout: Duration::from_secs(config.response_timeout.max(1)),
        };

        if !redis_client.health_check().await? {
            return Err(InfrastructureError::Config(
                "Redis did not answer PING with PONG".to_string(),
            ));
        }

        info!("Redis client created successfully");
        Ok(redis_client)
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = CONNECT_RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::Timeout {
                    seconds: connect_timeout.as_secs(),
                }),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(CONNECT_RETRY_MAX_DELAY_MS);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// Set a value with expiration time, replacing any existing value
    ///
    /// Issued as a single `SET key value EX seconds`, so the write is atomic.
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", mask_identifier(key), expiry_seconds);

        let mut conn = self.connection.clone();
        self.execute("SET", key, conn.set_ex::<_, _, ()>(key, value, expiry_seconds))
            .await?;

        debug!("Successfully set key '{}'", mask_identifier(key));
        Ok(())
    }

    /// Get a value from cache
    ///
    /// # Returns
    /// * `Result<Option<String>, InfrastructureError>` - Cached value or None if not found
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", mask_identifier(key));

        let mut conn = self.connection.clone();
        let value = self
            .execute("GET", key, conn.get::<_, Option<String>>(key))
            .await?;

        if value.is_some() {
            debug!("Successfully retrieved key '{}'", mask_identifier(key));
        } else {
            debug!("Key '{}' not found", mask_identifier(key));
        }
        Ok(value)
    }

    /// Delete a key from cache
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if key was deleted, false if not found
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", mask_identifier(key));

        let mut conn = self.connection.clone();
        let deleted_count = self.execute("DEL", key, conn.del::<_, u32>(key)).await?;

        let deleted = deleted_count > 0;
        if deleted {
            debug!("Successfully deleted key '{}'", mask_identifier(key));
        } else {
            debug!("Key '{}' was not found", mask_identifier(key));
        }
        Ok(deleted)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let mut conn = self.connection.clone();
        let ping = redis::cmd("PING");
        let response = self
            .execute("PING", "-", ping.query_async::<_, String>(&mut conn))
            .await?;

        if response == "PONG" {
            debug!("Redis health check passed");
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Run one command under the response timeout
    ///
    /// Dropping the returned future (for example when the HTTP request is
    /// cancelled) abandons the command.
    async fn execute<T, F>(&self, command: &str, key: &str, operation: F) -> Result<T, InfrastructureError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.response_timeout, operation).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("Redis {} failed for key '{}': {}", command, mask_identifier(key), e);
                Err(InfrastructureError::Cache(e))
            }
            Err(_) => {
                error!(
                    "Redis {} timed out for key '{}' after {:?}",
                    command,
                    mask_identifier(key),
                    self.response_timeout
                );
                Err(InfrastructureError::Timeout {
                    seconds: self.response_timeout.as_secs(),
                })
            }
        }
    }
}

/// Connection parameters for `config`
///
/// A full URL is parsed as-is. A bare address is combined with the password
/// and database number as separate fields, so the password is never embedded
/// in a URL and needs no escaping.
pub(crate) fn connection_info(config: &CacheConfig) -> Result<ConnectionInfo, InfrastructureError> {
    if config.is_url() {
        return config
            .url
            .as_str()
            .into_connection_info()
            .map_err(|e| InfrastructureError::Config(format!("Invalid Redis URL: {}", e)));
    }

    let (host, port) = config.host_port().ok_or_else(|| {
        InfrastructureError::Config(format!("Invalid Redis address: {}", config.url))
    })?;

    Ok(ConnectionInfo {
        addr: ConnectionAddr::Tcp(host, port),
        redis: RedisConnectionInfo {
            db: config.database,
            password: config.password.clone(),
            ..Default::default()
        },
    })
}
