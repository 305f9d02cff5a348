//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Seconds a client has to send the complete request head
    ///
    /// Does not bound handler execution; store calls carry their own
    /// response timeout.
    #[serde(default = "default_client_request_timeout")]
    pub client_request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0, // Use all CPU cores
            client_request_timeout: default_client_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// `ADDR` accepts `host:port`, `:port` and `[v6]:port`. Without it,
    /// `SERVER_HOST` and `SERVER_PORT` are read individually.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let (host, port) = match env_string("ADDR").and_then(|addr| parse_addr(&addr)) {
            Some(parsed) => parsed,
            None => (
                env_string("SERVER_HOST").unwrap_or(defaults.host),
                env_parse("SERVER_PORT", defaults.port),
            ),
        };

        Self {
            host,
            port,
            workers: env_parse("SERVER_WORKERS", defaults.workers),
            client_request_timeout: env_parse(
                "SERVER_CLIENT_REQUEST_TIMEOUT",
                defaults.client_request_timeout,
            ),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", bracket_v6(&self.host), self.port)
    }

    /// Base URL a human can paste into a browser
    ///
    /// Wildcard and unspecified hosts are shown as `localhost`.
    pub fn public_base_url(&self) -> String {
        let host = match self.host.trim().to_lowercase().as_str() {
            "" | "0.0.0.0" | "::" | "[::]" => String::from("localhost"),
            _ => bracket_v6(self.host.trim()),
        };
        format!("http://{}:{}", host, self.port)
    }
}

/// Split an `ADDR` value into host and port
fn parse_addr(addr: &str) -> Option<(String, u16)> {
    let (host, port) = addr.trim().rsplit_once(':')?;
    let port = port.parse().ok()?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let host = if host.is_empty() { "0.0.0.0" } else { host };
    Some((host.to_string(), port))
}

fn bracket_v6(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

fn default_client_request_timeout() -> u64 {
    5 // actix-web's own default
}
