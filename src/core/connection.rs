//! WebSocket connection handles
//! The live send channel for one open connection, owned by the transport layer

use log::warn;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;
use warp::ws::Message;

use crate::error::{PresenceError, Result};

/// Represents the live handle for a single WebSocket connection
#[derive(Clone)]
pub struct Connection {
    pub id: String,
    pub session_key: String,
    pub sender: mpsc::UnboundedSender<Message>,
    pub principal: Option<String>,
    pub connected_at: Instant,
}

impl Connection {
    /// Create a new connection handle for a session key
    pub fn new(session_key: String, sender: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_key,
            sender,
            principal: None,
            connected_at: Instant::now(),
        }
    }

    /// Attach an authenticated principal to this connection
    pub fn with_principal(mut self, principal: String) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Resolve the remote party behind this connection
    ///
    /// Fails when the handle carries no authenticated principal; callers
    /// recover locally with a placeholder identity.
    pub fn principal(&self) -> Result<&str> {
        self.principal
            .as_deref()
            .ok_or_else(|| PresenceError::IdentityResolution(self.id.clone()))
    }

    /// Send a text message through this connection
    pub fn send_text(&self, text: &str) -> bool {
        match self.sender.send(Message::text(text)) {
            Ok(_) => true,
            Err(_) => {
                warn!("Failed to send message to session {}", self.session_key);
                false
            }
        }
    }

    /// Calculate the connection duration
    pub fn connection_duration(&self) -> Duration {
        self.connected_at.elapsed()
    }
}
