use crate::relay::RelayCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tether_core::ConnectionId;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Registry of open sockets plus the command queue into the relay.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) relay_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
            relay_tx,
        }
    }

    pub fn add_peer(&self, conn: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(conn, tx);
    }

    pub fn remove_peer(&self, conn: &ConnectionId) {
        self.inner.peers.remove(conn);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.peers.len()
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_text(&self, conn: ConnectionId, text: String) {
        if let Some(peer) = self.inner.peers.get(&conn) {
            if let Err(e) = peer.send(Message::Text(text.into())) {
                error!("Failed to send WS message to {}: {:?}", conn, e);
            }
        } else {
            warn!("Attempted to send signal to disconnected connection {}", conn);
        }
    }
}
