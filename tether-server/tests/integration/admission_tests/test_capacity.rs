use serde_json::json;
use tether_core::ConnectionId;
use tether_server::{DEFAULT_MAX_ROOMS, RelayOptions, RoomRegistry};

use crate::integration::{TestRelay, init_tracing};

#[tokio::test]
async fn test_fifty_first_room_is_refused() {
    init_tracing();
    let mut relay = TestRelay::new();

    for i in 0..DEFAULT_MAX_ROOMS {
        relay
            .send(
                ConnectionId::new(),
                json!({"type": "create_room", "roomId": format!("room-{i}")}),
            )
            .await;
    }
    let frames = relay.take().await;
    assert_eq!(frames.len(), DEFAULT_MAX_ROOMS);
    assert!(frames.iter().all(|f| f.kind() == "room_created"));

    let late = ConnectionId::new();
    relay
        .send(late, json!({"type": "create_room", "roomId": "one-more"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(
        frames[0].json(),
        json!({"type": "error", "message": "Too many ongoing rooms"})
    );
    assert_eq!(relay.relay.registry().len(), DEFAULT_MAX_ROOMS);
    assert!(relay.relay.room_of(late).is_none());
}

#[tokio::test]
async fn test_capacity_frees_after_disconnect() {
    init_tracing();
    let mut relay = TestRelay::with(RoomRegistry::new(1), RelayOptions::default());
    let first = ConnectionId::new();

    relay
        .send(first, json!({"type": "create_room", "roomId": "a"}))
        .await;
    relay
        .send(ConnectionId::new(), json!({"type": "create_room", "roomId": "b"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(frames[1].json()["message"], "Too many ongoing rooms");

    relay.disconnect(first).await;
    relay
        .send(ConnectionId::new(), json!({"type": "create_room", "roomId": "b"}))
        .await;
    assert_eq!(relay.take().await[0].kind(), "room_created");
}

#[tokio::test]
async fn test_existing_id_wins_over_capacity() {
    init_tracing();
    let mut relay = TestRelay::with(RoomRegistry::new(1), RelayOptions::default());

    relay
        .send(ConnectionId::new(), json!({"type": "create_room", "roomId": "a"}))
        .await;
    relay
        .send(ConnectionId::new(), json!({"type": "create_room", "roomId": "a"}))
        .await;

    let frames = relay.take().await;
    assert_eq!(frames[1].json()["message"], "Room already exists");
}
