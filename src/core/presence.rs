//! Presence accounting
//!
//! An append-only ledger mapping session keys to a "currently connected" flag.
//! Entries are never removed, only flipped to offline, so the table also
//! records every key ever seen.

use std::collections::HashMap;

/// Which population a count covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    Online,
    Offline,
    Total,
}

/// Ledger of every session key ever seen and its last-known status
pub struct PresenceTable {
    entries: HashMap<String, bool>,
}

impl PresenceTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record a session key as connected, creating its ledger entry on first use.
    /// Idempotent.
    pub fn mark_online(&mut self, key: &str) {
        self.entries.insert(key.to_string(), true);
    }

    /// Record a session key as disconnected. A key that was never opened is a
    /// no-op: disconnects never fabricate ledger entries.
    pub fn mark_offline(&mut self, key: &str) {
        if let Some(connected) = self.entries.get_mut(key) {
            *connected = false;
        }
    }

    /// Whether a key's last-known status is connected
    pub fn is_online(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Count entries matching the requested population. O(n) scan over every
    /// key ever seen; presence queries are infrequent relative to table size.
    pub fn count(&self, kind: CountKind) -> usize {
        self.entries
            .values()
            .filter(|&&connected| match kind {
                CountKind::Online => connected,
                CountKind::Offline => !connected,
                CountKind::Total => true,
            })
            .count()
    }

    /// Currently connected keys
    pub fn count_online(&self) -> usize {
        self.count(CountKind::Online)
    }

    /// Known keys that have disconnected
    pub fn count_offline(&self) -> usize {
        self.count(CountKind::Offline)
    }

    /// Every distinct key ever seen
    pub fn count_total(&self) -> usize {
        self.count(CountKind::Total)
    }
}

impl Default for PresenceTable {
    fn default() -> Self {
        Self::new()
    }
}
