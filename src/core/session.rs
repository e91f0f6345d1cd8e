use std::collections::HashMap;

use crate::core::connection::Connection;

// Manages the live connection handles keyed by session key
pub struct ConnectionTable {
    connections: HashMap<String, Connection>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    // Store the handle for a session key. A second open for the same key
    // replaces the old handle; the superseded one is handed back to the caller.
    pub fn register(&mut self, key: String, connection: Connection) -> Option<Connection> {
        self.connections.insert(key, connection)
    }

    // Remove the handle for a session key; absent keys are a no-op
    pub fn unregister(&mut self, key: &str) -> Option<Connection> {
        self.connections.remove(key)
    }

    // Look up the live handle for a session key
    pub fn lookup(&self, key: &str) -> Option<&Connection> {
        self.connections.get(key)
    }

    // Get current clients count
    pub fn client_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new()
    }
}
