//! Presence Socks - a minimal real-time presence registry over WebSocket
//!
//! Each client opens one long-lived connection identified by a session key;
//! the server tracks which keys are currently connected and answers aggregate
//! counts (online, offline-but-known, total-ever-seen).

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod handlers;

// Re-export main components
pub use config::*;
pub use constants::*;
