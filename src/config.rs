//! Server configuration module
//! Handles dynamic configuration parameters for the WebSocket server

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{PresenceError, Result};
use std::env;
use std::net::SocketAddr;

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables if available
    pub fn from_env() -> Result<Self> {
        let host = env::var("PRESENCE_SOCKS_HOST").unwrap_or(DEFAULT_HOST.to_string());

        let port = match env::var("PRESENCE_SOCKS_PORT") {
            Ok(p) => p.parse().map_err(|_| {
                PresenceError::ConfigError(format!("Invalid PRESENCE_SOCKS_PORT value: {}", p))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    /// Resolve the configured bind address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                PresenceError::ConfigError(format!(
                    "Failed to parse server address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}
