use log::{error, info, warn};
use std::convert::Infallible;
use warp::{self, Filter};

use presence_socks::config::ServerConfig;
use presence_socks::constants::WS_PATH;
use presence_socks::core::registry::{create_registry, SharedRegistry};
use presence_socks::handlers::websocket::handle_ws_client;

#[tokio::main]
async fn main() {
    // Initialize env
    match dotenvy::dotenv() {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Initialize logging
    env_logger::init();

    // Load config from .env
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create the presence registry and its event logger
    let registry = create_registry();

    // Create WebSocket route: /ws/{sid}, the path parameter is the session key
    let ws_route = warp::path(WS_PATH)
        .and(warp::path::param::<String>())
        .and(warp::ws())
        .and(with_registry(registry.clone()))
        .map(|session_key: String, ws: warp::ws::Ws, registry| {
            info!("New websocket connection for session {}", session_key);
            ws.on_upgrade(move |socket| handle_ws_client(socket, session_key, registry))
        });

    // Create health check route
    let health_route = warp::path("health").map(|| "OK");

    // Combine routes
    let routes = ws_route.or(health_route);

    // Build the server address
    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Starting Presence Socks server on {}", addr);

    warp::serve(routes).run(addr).await;
}

// Helper function to include the registry state in requests
fn with_registry(
    registry: SharedRegistry,
) -> impl Filter<Extract = (SharedRegistry,), Error = Infallible> + Clone {
    warp::any().map(move || registry.clone())
}
