//! Presence registry coordinating both tables across concurrent hook calls
//!
//! The transport layer dispatches one hook invocation per connection event;
//! invocations for the same or different session keys may run concurrently on
//! independent tasks. The registry owns the locking, so callers never need any
//! locking of their own. No transaction spans multiple keys: counts scan a live
//! table and may be stale by the time the caller acts on them.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::constants::UNKNOWN_PRINCIPAL;
use crate::core::connection::Connection;
use crate::core::events::{event_channel, spawn_event_logger, EventReceiver, EventSender, PresenceEvent};
use crate::core::message::PresenceSnapshot;
use crate::core::presence::PresenceTable;
use crate::core::session::ConnectionTable;

/// Process-wide presence registry, shared by reference with every hook call
pub struct Registry {
    presence: RwLock<PresenceTable>,
    connections: RwLock<ConnectionTable>,
    events: EventSender,
}

impl Registry {
    /// Create a registry together with the receiving end of its event channel.
    /// Callers decide what drains the events; tests inspect them directly.
    pub fn new() -> (Arc<Self>, EventReceiver) {
        let (events, rx) = event_channel();
        let registry = Arc::new(Self {
            presence: RwLock::new(PresenceTable::new()),
            connections: RwLock::new(ConnectionTable::new()),
            events,
        });
        (registry, rx)
    }

    /// Connection opened: record presence, store the handle, report the count.
    /// A reopen for a key replaces the previous handle; dropping the superseded
    /// sender lets the old connection's forward task wind down (close-and-replace).
    pub async fn on_open(&self, key: &str, connection: Connection) {
        {
            let mut presence = self.presence.write().await;
            presence.mark_online(key);
        }
        let superseded = {
            let mut connections = self.connections.write().await;
            connections.register(key.to_string(), connection)
        };
        if let Some(old) = superseded {
            log::debug!(
                "Session {} reopened, replacing connection {}",
                key,
                old.id
            );
        }
        let online = self.count_online().await;
        let _ = self
            .events
            .send(PresenceEvent::opened(key.to_string(), online));
    }

    /// Connection closed: flip presence to offline, drop the handle, report the
    /// count. Closing a key that was never opened changes nothing.
    pub async fn on_close(&self, key: &str) {
        {
            let mut presence = self.presence.write().await;
            presence.mark_offline(key);
        }
        {
            let mut connections = self.connections.write().await;
            connections.unregister(key);
        }
        let online = self.count_online().await;
        let _ = self
            .events
            .send(PresenceEvent::closed(key.to_string(), online));
    }

    /// Incoming payloads are discarded. Reserved for broadcast features.
    pub async fn on_message(&self, _payload: &str) {}

    /// Connection error: resolve the remote party from the handle and report
    /// the failure. Substitutes a placeholder identity when the handle carries
    /// no principal; never mutates either table, cleanup arrives with the
    /// subsequent close event.
    pub async fn on_error(&self, connection: &Connection, cause: &str) {
        let principal = connection
            .principal()
            .unwrap_or(UNKNOWN_PRINCIPAL)
            .to_string();
        let _ = self
            .events
            .send(PresenceEvent::failed(principal, cause.to_string()));
    }

    /// Count of currently connected keys
    pub async fn count_online(&self) -> usize {
        self.presence.read().await.count_online()
    }

    /// Count of known keys that have disconnected
    pub async fn count_offline(&self) -> usize {
        self.presence.read().await.count_offline()
    }

    /// Count of every distinct key ever seen
    pub async fn count_total(&self) -> usize {
        self.presence.read().await.count_total()
    }

    /// Whether a session key currently holds a live handle
    pub async fn is_connected(&self, key: &str) -> bool {
        self.connections.read().await.lookup(key).is_some()
    }

    /// Internal id of the live handle for a key, if any
    pub async fn connection_id(&self, key: &str) -> Option<String> {
        self.connections
            .read()
            .await
            .lookup(key)
            .map(|c| c.id.clone())
    }

    /// Send a text frame to one connected session
    pub async fn send_to_session(&self, key: &str, text: &str) -> bool {
        match self.connections.read().await.lookup(key) {
            Some(connection) => connection.send_text(text),
            None => false,
        }
    }

    /// Aggregate counts at one point in time (advisory, may be stale)
    pub async fn snapshot(&self) -> PresenceSnapshot {
        let presence = self.presence.read().await;
        PresenceSnapshot {
            online: presence.count_online(),
            offline: presence.count_offline(),
            total: presence.count_total(),
        }
    }
}

// Shared reference to the registry
pub type SharedRegistry = Arc<Registry>;

// Create a registry with its events drained into the log facade
pub fn create_registry() -> SharedRegistry {
    let (registry, rx) = Registry::new();
    spawn_event_logger(rx);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn connection(key: &str) -> Connection {
        let (tx, _rx) = mpsc::unbounded_channel();
        Connection::new(key.to_string(), tx)
    }

    #[tokio::test]
    async fn test_open_registers_presence_and_handle() {
        let (registry, mut events) = Registry::new();
        registry.on_open("u1", connection("u1")).await;

        assert_eq!(registry.count_online().await, 1);
        assert!(registry.is_connected("u1").await);
        match events.recv().await.unwrap() {
            PresenceEvent::Opened {
                session_key,
                online,
                ..
            } => {
                assert_eq!(session_key, "u1");
                assert_eq!(online, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_close_flips_presence_and_drops_handle() {
        let (registry, mut events) = Registry::new();
        registry.on_open("u1", connection("u1")).await;
        registry.on_close("u1").await;

        assert_eq!(registry.count_online().await, 0);
        assert_eq!(registry.count_offline().await, 1);
        assert_eq!(registry.count_total().await, 1);
        assert!(!registry.is_connected("u1").await);

        events.recv().await.unwrap(); // Opened
        match events.recv().await.unwrap() {
            PresenceEvent::Closed { online, .. } => assert_eq!(online, 0),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_close_unknown_key_creates_no_ledger_entry() {
        let (registry, _events) = Registry::new();
        registry.on_close("ghost").await;
        assert_eq!(registry.count_total().await, 0);
        assert_eq!(registry.count_offline().await, 0);
    }

    #[tokio::test]
    async fn test_reopen_replaces_handle() {
        let (registry, _events) = Registry::new();
        registry.on_open("u1", connection("u1")).await;
        let first_id = registry.connection_id("u1").await.unwrap();

        registry.on_open("u1", connection("u1")).await;
        let second_id = registry.connection_id("u1").await.unwrap();

        assert_ne!(first_id, second_id);
        assert_eq!(registry.count_online().await, 1);
        assert_eq!(registry.count_total().await, 1);
    }

    #[tokio::test]
    async fn test_error_without_principal_reports_unknown() {
        let (registry, mut events) = Registry::new();
        let conn = connection("u1");
        registry.on_error(&conn, "broken pipe").await;

        match events.recv().await.unwrap() {
            PresenceEvent::Failed {
                principal, cause, ..
            } => {
                assert_eq!(principal, UNKNOWN_PRINCIPAL);
                assert_eq!(cause, "broken pipe");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        // Errors never mutate the tables
        assert_eq!(registry.count_total().await, 0);
    }

    #[tokio::test]
    async fn test_error_with_principal_reports_it() {
        let (registry, mut events) = Registry::new();
        let conn = connection("u1").with_principal("alice".to_string());
        registry.on_error(&conn, "timeout").await;

        match events.recv().await.unwrap() {
            PresenceEvent::Failed { principal, .. } => assert_eq!(principal, "alice"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_message_hook_is_noop() {
        let (registry, _events) = Registry::new();
        registry.on_open("u1", connection("u1")).await;
        registry.on_message("{\"whatever\": true}").await;
        assert_eq!(registry.count_online().await, 1);
        assert_eq!(registry.count_total().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_partitions_counts() {
        let (registry, _events) = Registry::new();
        registry.on_open("u1", connection("u1")).await;
        registry.on_open("u2", connection("u2")).await;
        registry.on_close("u1").await;

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.online, 1);
        assert_eq!(snapshot.offline, 1);
        assert_eq!(snapshot.total, 2);
    }
}
