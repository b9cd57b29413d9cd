use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tether_core::ConnectionId;
use tether_server::SignalingOutput;
use tokio::sync::{Mutex, mpsc};

/// One frame the relay queued for a connection.
#[derive(Debug, Clone)]
pub struct SentFrame {
    pub conn: ConnectionId,
    pub text: String,
}

impl SentFrame {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("relay sent invalid JSON")
    }

    pub fn kind(&self) -> String {
        self.json()["type"].as_str().unwrap_or_default().to_owned()
    }
}

/// Mock SignalingOutput that captures every outgoing frame.
#[derive(Clone)]
pub struct MockSignalingOutput {
    tx: mpsc::UnboundedSender<SentFrame>,
    frames: Arc<Mutex<Vec<SentFrame>>>,
}

impl MockSignalingOutput {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SentFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            frames: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// Frames captured since the last call, in send order.
    pub async fn take(&self) -> Vec<SentFrame> {
        std::mem::take(&mut *self.frames.lock().await)
    }

    /// Frames captured since the last call that were addressed to `conn`.
    pub async fn take_for(&self, conn: ConnectionId) -> Vec<SentFrame> {
        self.take()
            .await
            .into_iter()
            .filter(|frame| frame.conn == conn)
            .collect()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send_text(&self, conn: ConnectionId, text: String) {
        tracing::debug!("[MockSignaling] frame to {}: {}", conn, text);

        let frame = SentFrame { conn, text };
        self.frames.lock().await.push(frame.clone());
        let _ = self.tx.send(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::SignalMessage;

    #[tokio::test]
    async fn test_mock_signaling_captures_text() {
        let (signaling, mut rx) = MockSignalingOutput::new();
        let conn = ConnectionId::new();

        signaling.send_text(conn, "{\"type\":\"x\"}".into()).await;

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame.conn, conn);
        assert_eq!(frame.kind(), "x");
        assert_eq!(signaling.take().await.len(), 1);
        assert!(signaling.take().await.is_empty());
    }

    #[tokio::test]
    async fn test_mock_signaling_serializes_messages() {
        let (signaling, _rx) = MockSignalingOutput::new();
        let conn = ConnectionId::new();

        signaling
            .send_message(conn, SignalMessage::PlayerJoined)
            .await;

        let frames = signaling.take_for(conn).await;
        assert_eq!(frames[0].text, r#"{"type":"player_joined"}"#);
    }
}
