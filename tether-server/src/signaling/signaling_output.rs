use async_trait::async_trait;
use tether_core::{ConnectionId, SignalMessage};
use tracing::error;

/// Outbound side of the signaling sockets, as seen by the relay.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Queue a text frame for `conn` exactly as given.
    async fn send_text(&self, conn: ConnectionId, text: String);

    /// Serialize and queue a server message for `conn`.
    async fn send_message(&self, conn: ConnectionId, msg: SignalMessage) {
        match msg.to_json() {
            Ok(json) => self.send_text(conn, json).await,
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}
