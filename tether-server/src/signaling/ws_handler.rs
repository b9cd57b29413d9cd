use crate::relay::RelayCommand;
use crate::signaling::SignalingService;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tether_core::ConnectionId;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let conn = ConnectionId::new();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(conn, tx);
    info!(
        "New WebSocket connection: {} ({} open)",
        conn,
        service.connection_count()
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay_tx = service.relay_tx.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        let cmd = RelayCommand::Inbound {
                            conn,
                            text: text.as_str().to_owned(),
                        };
                        if let Err(e) = relay_tx.send(cmd).await {
                            error!("Relay died: {}", e);
                            break;
                        }
                    }
                    Message::Binary(_) => debug!("Ignoring binary frame from {}", conn),
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    let _ = service
        .relay_tx
        .send(RelayCommand::Disconnect { conn })
        .await;

    service.remove_peer(&conn);
    info!(
        "WebSocket disconnected: {} ({} open)",
        conn,
        service.connection_count()
    );
}
