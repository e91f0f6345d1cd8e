//! Core functionality for the presence registry

pub mod connection;
pub mod events;
pub mod message;
pub mod presence;
pub mod registry;
pub mod session;

// Re-export main components for convenience
pub use connection::Connection;
pub use events::{spawn_event_logger, PresenceEvent};
pub use message::{PresenceSnapshot, SocketMessage};
pub use presence::{CountKind, PresenceTable};
pub use registry::{create_registry, Registry, SharedRegistry};
pub use session::ConnectionTable;
