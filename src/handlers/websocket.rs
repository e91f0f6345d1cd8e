use futures_util::sink::SinkExt;
use futures_util::stream::StreamExt;
use log::error;
use tokio::sync::mpsc;
use warp::ws::WebSocket;

use crate::core::connection::Connection;
use crate::core::message::SocketMessage;
use crate::core::registry::SharedRegistry;

// Handle one WebSocket connection identified by its session key
pub async fn handle_ws_client(ws: WebSocket, session_key: String, registry: SharedRegistry) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Forward messages from our channel to the WebSocket; the task ends when
    // every sender is dropped, which is how a superseded handle gets torn down
    tokio::task::spawn(async move {
        let mut rx = rx;
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_tx.send(message).await {
                error!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    let connection = Connection::new(session_key.clone(), tx);
    // The handler keeps a handle of its own for error reporting
    let local = connection.clone();

    registry.on_open(&session_key, connection).await;

    // Acknowledge the connection with a presence snapshot
    let ack = SocketMessage::Connected {
        session_key: session_key.clone(),
        presence: registry.snapshot().await,
    };
    match serde_json::to_string(&ack) {
        Ok(msg_str) => {
            registry.send_to_session(&session_key, &msg_str).await;
        }
        Err(e) => {
            error!("Failed to serialize connection ack: {}", e);
        }
    }

    // Handle incoming frames until the stream ends
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(msg) => {
                if let Ok(text) = msg.to_str() {
                    registry.on_message(text).await;
                }
            }
            Err(e) => {
                registry.on_error(&local, &e.to_string()).await;
                break;
            }
        }
    }

    // Client disconnected; the close event clears presence and the handle
    registry.on_close(&session_key).await;
}
