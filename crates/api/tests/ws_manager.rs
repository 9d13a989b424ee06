//! Tests for `WsManager` and the change broadcaster that feeds it.
//!
//! No HTTP upgrades are performed; connections are registered directly.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use caseboard_api::notifications::ChangeBroadcaster;
use caseboard_api::ws::WsManager;
use caseboard_events::{ChangeEvent, EventBus};

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();

    let _rx1 = manager.add("conn-1".to_string(), 1).await;
    let _rx2 = manager.add("conn-2".to_string(), 2).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 1);

    // Unknown ids are ignored.
    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), 1).await;
    let mut rx2 = manager.add("conn-2".to_string(), 1).await;

    manager.shutdown_all().await;
    assert_eq!(manager.connection_count().await, 0);

    let msg1 = rx1.recv().await.expect("rx1 should receive Close");
    assert!(matches!(msg1, Message::Close(None)), "got: {msg1:?}");
    let msg2 = rx2.recv().await.expect("rx2 should receive Close");
    assert!(matches!(msg2, Message::Close(None)), "got: {msg2:?}");

    assert!(rx1.recv().await.is_none(), "Channel should be closed after shutdown");
}

#[tokio::test]
async fn broadcast_skips_closed_channels() {
    let manager = WsManager::new();

    let rx1 = manager.add("conn-1".to_string(), 1).await;
    let mut rx2 = manager.add("conn-2".to_string(), 2).await;
    drop(rx1);

    manager.broadcast(Message::Text("still alive".into())).await;

    let msg = rx2.recv().await.expect("rx2 should receive broadcast");
    assert!(matches!(&msg, Message::Text(t) if *t == "still alive"));
}

#[tokio::test]
async fn ping_all_sends_ping_frames() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string(), 1).await;

    manager.ping_all().await;

    let msg = rx.recv().await.expect("should receive Ping");
    assert!(matches!(msg, Message::Ping(_)), "got: {msg:?}");
}

#[tokio::test]
async fn broadcaster_forwards_change_events_to_every_client() {
    let manager = Arc::new(WsManager::new());
    let mut rx1 = manager.add("conn-1".to_string(), 1).await;
    let mut rx2 = manager.add("conn-2".to_string(), 2).await;

    let bus = EventBus::default();
    let handle = tokio::spawn(ChangeBroadcaster::new(Arc::clone(&manager)).run(bus.subscribe()));

    bus.publish(ChangeEvent::created("case", 5).with_actor(1));

    for rx in [&mut rx1, &mut rx2] {
        let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("broadcast should arrive")
            .expect("channel open");
        let Message::Text(text) = msg else {
            panic!("expected a text frame, got: {msg:?}");
        };
        let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(json["type"], "change");
        assert_eq!(json["event"]["action"], "CREATE");
        assert_eq!(json["event"]["entity_id"], 5);
    }

    // Dropping the bus closes the channel and stops the broadcaster.
    drop(bus);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("broadcaster should stop")
        .unwrap();
}
