use serde_json::json;
use std::sync::Arc;
use tether_core::ConnectionId;
use tether_server::{RelayCommand, RelayOptions, RoomRegistry, SignalingRelay};
use tokio::sync::mpsc;

use crate::integration::{TestRelay, init_tracing};
use crate::utils::MockSignalingOutput;

#[tokio::test]
async fn test_host_leaving_frees_room_id() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (host, guest) = relay.pair("abc123").await;

    relay.disconnect(host).await;

    assert!(relay.take().await.is_empty(), "peer_left is off by default");
    assert!(relay.relay.registry().is_empty());
    assert!(relay.relay.room_of(guest).is_none());

    // Survivor is unassigned and may create the same id again.
    relay
        .send(guest, json!({"type": "create_room", "roomId": "abc123"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(frames[0].json(), json!({"type": "room_created", "roomId": "abc123"}));
}

#[tokio::test]
async fn test_survivor_frames_are_dropped_after_teardown() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (host, guest) = relay.pair("abc123").await;

    relay.disconnect(guest).await;
    relay
        .send_raw(host, r#"{"type":"candidate","candidate":{"candidate":"late"}}"#)
        .await;

    assert!(relay.take().await.is_empty());
}

#[tokio::test]
async fn test_peer_left_when_enabled() {
    init_tracing();
    let mut relay = TestRelay::with(
        RoomRegistry::default(),
        RelayOptions {
            notify_peer_left: true,
        },
    );
    let (host, guest) = relay.pair("abc123").await;

    relay.disconnect(guest).await;

    let frames = relay.take().await;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].conn, host);
    assert_eq!(frames[0].json(), json!({"type": "peer_left"}));
}

#[tokio::test]
async fn test_unassigned_disconnect_is_noop() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (_host, _guest) = relay.pair("abc123").await;

    relay.disconnect(ConnectionId::new()).await;

    assert!(relay.take().await.is_empty());
    assert_eq!(relay.relay.registry().len(), 1);
}

#[tokio::test]
async fn test_run_loop_processes_queue_and_stops() {
    init_tracing();
    let (cmd_tx, cmd_rx) = mpsc::channel::<RelayCommand>(16);
    let (output, mut sent_rx) = MockSignalingOutput::new();
    let relay = SignalingRelay::new(
        RoomRegistry::default(),
        cmd_rx,
        Arc::new(output),
        RelayOptions::default(),
    );
    let handle = tokio::spawn(relay.run());

    let host = ConnectionId::new();
    cmd_tx
        .send(RelayCommand::Inbound {
            conn: host,
            text: json!({"type": "create_room", "roomId": "loop"}).to_string(),
        })
        .await
        .unwrap();

    let frame = sent_rx.recv().await.unwrap();
    assert_eq!(frame.conn, host);
    assert_eq!(frame.kind(), "room_created");

    cmd_tx.send(RelayCommand::Shutdown).await.unwrap();
    tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("relay did not stop")
        .unwrap();
}
