use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum PresenceError {
    // Connection errors
    ConnectionClosed(String),

    // Identity errors
    IdentityResolution(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for PresenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionClosed(key) => {
                write!(f, "Connection closed for session: {}", key)
            }
            Self::IdentityResolution(id) => {
                write!(f, "No principal associated with connection: {}", id)
            }
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for PresenceError {}

// Generic result type for Presence Socks
pub type Result<T> = std::result::Result<T, PresenceError>;
