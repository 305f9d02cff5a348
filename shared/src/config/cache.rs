//! Store configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Which expiring store backs the passcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    Memory, // single-process development store
}

impl Default for CacheBackend {
    fn default() -> Self {
        CacheBackend::Redis
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "mem" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Redis connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL or bare `host:port` address
    pub url: String,

    /// Password sent on connect, if any
    #[serde(default)]
    pub password: Option<String>,

    /// Redis database number
    #[serde(default)]
    pub database: i64,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds, applied to every command
    pub response_timeout: u64,

    /// Connection attempts made at startup before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Store implementation
    #[serde(default)]
    pub backend: CacheBackend,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("localhost:6379"),
            password: None,
            database: 0,
            connection_timeout: 3,
            response_timeout: 3,
            connect_retries: default_connect_retries(),
            backend: CacheBackend::default(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    ///
    /// `REDIS_URL` wins over `REDIS_ADDR`; `REDIS_PASSWORD` and `REDIS_DB`
    /// apply to bare addresses only.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let url = env_string("REDIS_URL")
            .or_else(|| env_string("REDIS_ADDR"))
            .unwrap_or(defaults.url);

        Self {
            url,
            password: env_string("REDIS_PASSWORD"),
            database: env_parse("REDIS_DB", defaults.database),
            connection_timeout: env_parse("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            response_timeout: env_parse("REDIS_RESPONSE_TIMEOUT", defaults.response_timeout),
            connect_retries: env_parse("REDIS_CONNECT_RETRIES", defaults.connect_retries),
            backend: env_parse("CACHE_BACKEND", defaults.backend),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: i64) -> Self {
        self.database = db.max(0);
        self
    }

    /// Whether `url` is a full `redis://` style URL rather than a bare address
    pub fn is_url(&self) -> bool {
        self.url.contains("://")
    }

    /// Host and port of a bare address
    ///
    /// Accepts `host`, `host:port`, `:port` and `[v6]:port`. A missing port
    /// means 6379, a missing host means `localhost`. Returns `None` for full
    /// URLs and unparseable ports.
    pub fn host_port(&self) -> Option<(String, u16)> {
        let addr = self.url.trim();
        if self.is_url() {
            return None;
        }

        let (host, port) = if let Some(rest) = addr.strip_prefix('[') {
            let (host, tail) = rest.split_once(']')?;
            match tail {
                "" => (host, DEFAULT_REDIS_PORT),
                _ => (host, tail.strip_prefix(':')?.parse().ok()?),
            }
        } else {
            match addr.rsplit_once(':') {
                Some((host, port)) => (host, port.parse().ok()?),
                None => (addr, DEFAULT_REDIS_PORT),
            }
        };

        let host = if host.is_empty() { "localhost" } else { host };
        Some((host.to_string(), port))
    }
}

const DEFAULT_REDIS_PORT: u16 = 6379;

fn default_connect_retries() -> u32 {
    3
}
