use anyhow::{Context, Result, bail};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Timeout for a single signaling frame (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 5000;

/// Browser-side stand-in for one signaling socket.
pub struct TestSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestSocket {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (stream, _) = connect_async(format!("ws://{addr}/ws"))
            .await
            .context("Failed to open signaling socket")?;
        Ok(Self { stream })
    }

    pub async fn send_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.stream
            .send(Message::text(text.into()))
            .await
            .context("Failed to send frame")
    }

    pub async fn send_json(&mut self, value: Value) -> Result<()> {
        self.send_text(value.to_string()).await
    }

    /// Next text frame within [`SIGNAL_TIMEOUT_MS`].
    pub async fn recv_text(&mut self) -> Result<String> {
        tokio::time::timeout(Duration::from_millis(SIGNAL_TIMEOUT_MS), self.next_text())
            .await
            .context("Timeout waiting for signaling frame")?
    }

    /// Next text frame, however long it takes; control frames are skipped.
    pub async fn next_text(&mut self) -> Result<String> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text.as_str().to_owned()),
                Some(Ok(Message::Close(_))) | None => bail!("Signaling socket closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e).context("Signaling socket error"),
            }
        }
    }

    pub async fn recv_json(&mut self) -> Result<Value> {
        let text = self.recv_text().await?;
        serde_json::from_str(&text).context("Server sent invalid JSON")
    }

    /// Assert nothing arrives within `ms`.
    pub async fn expect_silence(&mut self, ms: u64) -> Result<()> {
        match tokio::time::timeout(Duration::from_millis(ms), self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => bail!("Unexpected frame: {}", text.as_str()),
            Ok(other) => bail!("Unexpected socket event: {:?}", other),
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await.context("Failed to close socket")
    }
}
