use serde::{Deserialize, Serialize};

/// Aggregate presence counts at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    pub online: usize,
    pub offline: usize,
    pub total: usize,
}

/// Frames the server sends to a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SocketMessage {
    Connected {
        session_key: String,
        presence: PresenceSnapshot,
    },
}
