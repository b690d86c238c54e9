use crossline_core::{RoomId, Symbol};
use crossline_peer::Notice;
use crossline_store::MemoryStore;

use crate::integration::{connect_pair, create_test_session, init_tracing};
use crate::utils::{MOVE_TIMEOUT_MS, STORE_TIMEOUT_MS, cell, wait_for_cell, wait_for_path};

#[tokio::test]
async fn test_room_removed_on_shutdown() {
    init_tracing();

    let store = MemoryStore::new();
    let (host, host_view) = create_test_session(Some(&store));

    host.host(Some(RoomId::parse("ab12cd").unwrap()))
        .await
        .unwrap();
    host_view.wait_for_room(STORE_TIMEOUT_MS).await.unwrap();
    assert!(wait_for_path(&store, "rooms/ab12cd/offer", true).await);

    host.shutdown().await.unwrap();

    assert!(wait_for_path(&store, "rooms/ab12cd", false).await);
    assert_eq!(store.get("rooms").await.unwrap(), None);
}

#[tokio::test]
async fn test_going_offline_releases_room() {
    init_tracing();

    let store = MemoryStore::new();
    let pair = connect_pair(&store, "ab12cd").await;

    pair.host.play_offline().await.unwrap();

    assert!(
        pair.host_view
            .wait_for_notice(&Notice::Offline, MOVE_TIMEOUT_MS)
            .await
    );
    assert!(wait_for_path(&store, "rooms/ab12cd", false).await);

    // Hot-seat again: the host plays both sides.
    pair.host.local_move(cell(0)).await.unwrap();
    pair.host.local_move(cell(1)).await.unwrap();
    assert!(wait_for_cell(&pair.host_view, 1, Symbol::O).await);

    pair.joiner.shutdown().await.unwrap();
    pair.host.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_hosting_again_replaces_room() {
    init_tracing();

    let store = MemoryStore::new();
    let (host, host_view) = create_test_session(Some(&store));

    host.host(Some(RoomId::parse("ab12cd").unwrap()))
        .await
        .unwrap();
    assert!(wait_for_path(&store, "rooms/ab12cd/offer", true).await);

    host.host(Some(RoomId::parse("ef34gh").unwrap()))
        .await
        .unwrap();
    assert!(wait_for_path(&store, "rooms/ef34gh/offer", true).await);
    assert!(wait_for_path(&store, "rooms/ab12cd", false).await);

    assert!(
        host_view
            .wait_for_notice(&Notice::CreatingRoom, MOVE_TIMEOUT_MS)
            .await
    );

    host.shutdown().await.unwrap();
    assert!(wait_for_path(&store, "rooms/ef34gh", false).await);
}
