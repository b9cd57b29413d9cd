use serde_json::json;
use tether_core::ConnectionId;

use crate::integration::{TestRelay, init_tracing};

#[tokio::test]
async fn test_member_cannot_open_second_room() {
    init_tracing();
    let mut relay = TestRelay::new();
    let host = ConnectionId::new();

    relay
        .send(host, json!({"type": "create_room", "roomId": "first"}))
        .await;
    relay
        .send(host, json!({"type": "create_room", "roomId": "second"}))
        .await;

    let frames = relay.take().await;
    assert_eq!(frames.len(), 2);
    assert_eq!(
        frames[1].json(),
        json!({"type": "error", "message": "Already in room first"})
    );
    assert!(!relay.relay.registry().contains(&"second".into()));
    assert_eq!(relay.relay.registry().len(), 1);
}

#[tokio::test]
async fn test_member_cannot_join_other_room() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (host, guest) = relay.pair("first").await;
    let other = ConnectionId::new();

    relay
        .send(other, json!({"type": "create_room", "roomId": "second"}))
        .await;
    relay.take().await;

    relay
        .send(host, json!({"type": "join_room", "roomId": "second"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].conn, host);
    assert_eq!(frames[0].json()["message"], "Already in room first");
    assert_eq!(frames[1].conn, guest);
    assert_eq!(frames[1].kind(), "join_room");

    let second = relay.relay.registry().get(&"second".into()).unwrap();
    assert!(second.guest.is_none());
}

#[tokio::test]
async fn test_paired_room_request_is_answered_then_relayed() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (host, guest) = relay.pair("abc123").await;

    let text = r#"{"type":"create_room","roomId":"abc123", "note":"again"}"#;
    relay.send_raw(guest, text).await;

    let frames = relay.take().await;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].conn, guest);
    assert_eq!(
        frames[0].json(),
        json!({"type": "error", "message": "Room already exists"})
    );
    assert_eq!(frames[1].conn, host);
    assert_eq!(frames[1].text, text);

    relay
        .send_raw(guest, r#"{"type":"join_or_create_room","roomId":"elsewhere"}"#)
        .await;
    let frames = relay.take().await;
    assert_eq!(frames[0].json()["message"], "Already in room abc123");
    assert_eq!(frames[1].conn, host);
    assert!(!relay.relay.registry().contains(&"elsewhere".into()));
}

#[tokio::test]
async fn test_recreating_own_room_reports_existing() {
    init_tracing();
    let mut relay = TestRelay::new();
    let host = ConnectionId::new();

    relay
        .send(host, json!({"type": "create_room", "roomId": "same"}))
        .await;
    relay
        .send(host, json!({"type": "create_room", "roomId": "same"}))
        .await;

    let frames = relay.take().await;
    assert_eq!(frames[1].json()["message"], "Room already exists");
}
