//! Observability events emitted by the registry hooks
//!
//! Hooks never log synchronously: they push events into an unbounded channel
//! drained by a spawned logger task, so a slow sink cannot block connection
//! handling. Emission with no receiver is a silent no-op.

use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresenceEvent {
    Opened {
        session_key: String,
        online: usize,
        timestamp: DateTime<Utc>,
    },
    Closed {
        session_key: String,
        online: usize,
        timestamp: DateTime<Utc>,
    },
    Failed {
        principal: String,
        cause: String,
        timestamp: DateTime<Utc>,
    },
}

impl PresenceEvent {
    pub fn opened(session_key: String, online: usize) -> Self {
        Self::Opened {
            session_key,
            online,
            timestamp: Utc::now(),
        }
    }

    pub fn closed(session_key: String, online: usize) -> Self {
        Self::Closed {
            session_key,
            online,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(principal: String, cause: String) -> Self {
        Self::Failed {
            principal,
            cause,
            timestamp: Utc::now(),
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<PresenceEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<PresenceEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Drain presence events into the log facade on a dedicated task
pub fn spawn_event_logger(mut events: EventReceiver) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                PresenceEvent::Opened {
                    session_key,
                    online,
                    ..
                } => {
                    info!(
                        "New connection: {} joined, currently online: {}",
                        session_key, online
                    );
                }
                PresenceEvent::Closed {
                    session_key,
                    online,
                    ..
                } => {
                    info!(
                        "Connection {} closed, currently online: {}",
                        session_key, online
                    );
                }
                PresenceEvent::Failed {
                    principal, cause, ..
                } => {
                    error!("Connection error for {}: {}", principal, cause);
                }
            }
        }
    });
}
