// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3030;
pub const WS_PATH: &str = "ws";

// Placeholder identity used when a handle carries no resolvable principal
pub const UNKNOWN_PRINCIPAL: &str = "unknown";
