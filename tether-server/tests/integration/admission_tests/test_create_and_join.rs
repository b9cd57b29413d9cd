use serde_json::json;
use tether_core::ConnectionId;

use crate::integration::{TestRelay, init_tracing};

#[tokio::test]
async fn test_create_then_join_pairs_both_members() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (host, guest) = (ConnectionId::new(), ConnectionId::new());

    relay
        .send(host, json!({"type": "create_room", "roomId": "abc123"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].conn, host);
    assert_eq!(frames[0].json(), json!({"type": "room_created", "roomId": "abc123"}));

    relay
        .send(guest, json!({"type": "join_room", "roomId": "abc123"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].conn, host);
    assert_eq!(frames[0].json(), json!({"type": "player_joined"}));
    assert_eq!(frames[1].conn, guest);
    assert_eq!(frames[1].json(), json!({"type": "room_joined", "roomId": "abc123"}));

    assert_eq!(relay.relay.room_of(host).map(|r| r.as_str()), Some("abc123"));
    assert_eq!(relay.relay.room_of(guest).map(|r| r.as_str()), Some("abc123"));
}

#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (a, c) = (ConnectionId::new(), ConnectionId::new());

    relay
        .send(a, json!({"type": "create_room", "roomId": "abc123"}))
        .await;
    relay.take().await;

    relay
        .send(c, json!({"type": "create_room", "roomId": "abc123"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].conn, c);
    assert_eq!(
        frames[0].json(),
        json!({"type": "error", "message": "Room already exists"})
    );

    // Original room untouched and the loser stays unassigned.
    assert_eq!(relay.relay.registry().get(&"abc123".into()).unwrap().host, a);
    assert!(relay.relay.room_of(c).is_none());
}

#[tokio::test]
async fn test_join_missing_room() {
    init_tracing();
    let mut relay = TestRelay::new();
    let b = ConnectionId::new();

    relay
        .send(b, json!({"type": "join_room", "roomId": "zzz"}))
        .await;

    let frames = relay.take().await;
    assert_eq!(frames.len(), 1);
    assert_eq!(
        frames[0].json(),
        json!({"type": "error", "message": "Room zzz is full or does not exist"})
    );
    assert!(relay.relay.registry().is_empty());
}

#[tokio::test]
async fn test_third_member_is_rejected() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (host, guest) = relay.pair("abc123").await;
    let third = ConnectionId::new();

    relay
        .send(third, json!({"type": "join_room", "roomId": "abc123"}))
        .await;

    let frames = relay.take().await;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].conn, third);
    assert_eq!(
        frames[0].json()["message"],
        "Room abc123 is full or does not exist"
    );

    let room = relay.relay.registry().get(&"abc123".into()).unwrap();
    assert_eq!((room.host, room.guest), (host, Some(guest)));
}

#[tokio::test]
async fn test_join_or_create_creates_then_joins() {
    init_tracing();
    let mut relay = TestRelay::new();
    let (a, b) = (ConnectionId::new(), ConnectionId::new());

    relay
        .send(a, json!({"type": "join_or_create_room", "roomId": "deep"}))
        .await;
    let frames = relay.take().await;
    assert_eq!(frames[0].json(), json!({"type": "room_created", "roomId": "deep"}));

    relay
        .send(b, json!({"type": "join_or_create_room", "roomId": "deep"}))
        .await;
    let frames = relay.take().await;
    let kinds: Vec<_> = frames.iter().map(|f| (f.conn, f.kind())).collect();
    assert_eq!(
        kinds,
        vec![(a, "player_joined".to_owned()), (b, "room_joined".to_owned())]
    );

    relay
        .send(
            ConnectionId::new(),
            json!({"type": "join_or_create_room", "roomId": "deep"}),
        )
        .await;
    let frames = relay.take().await;
    assert_eq!(frames[0].kind(), "error");
}
