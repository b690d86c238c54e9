use crossline_core::{Scoreboard, Symbol};
use crossline_peer::Notice;
use crossline_store::MemoryStore;

use crate::integration::{LINK_BASE, connect_pair, create_test_session, init_tracing};
use crate::utils::{CONNECTION_TIMEOUT_MS, STORE_TIMEOUT_MS};

#[tokio::test]
async fn test_host_and_join_connect() {
    init_tracing();

    let store = MemoryStore::new();
    let pair = connect_pair(&store, "ab12cd").await;

    let (room, link) = pair.host_view.wait_for_room(0).await.unwrap();
    assert_eq!(room.as_str(), "ab12cd");
    assert_eq!(link, Some(format!("{}?room=ab12cd", LINK_BASE)));

    assert_eq!(pair.host_view.connections().await, vec![Symbol::X]);
    assert_eq!(pair.joiner_view.connections().await, vec![Symbol::O]);
    assert!(
        pair.joiner_view
            .wait_for_notice(&Notice::Connected(Symbol::O), 1000)
            .await
    );

    // Connecting starts a fresh game with fresh scores.
    assert_eq!(
        pair.host_view.last_scores().await,
        Some(Scoreboard::default())
    );
    let (board, turn, _) = pair.joiner_view.last_state().await.unwrap();
    assert_eq!(board.filled(), 0);
    assert_eq!(turn, Symbol::X);

    let record = store.get("rooms/ab12cd").await.unwrap().unwrap();
    assert_eq!(record["offer"]["type"], "offer");
    assert_eq!(record["answer"]["type"], "answer");
    assert!(
        record["offerCandidates"]
            .as_object()
            .is_some_and(|c| !c.is_empty())
    );

    pair.host.shutdown().await.unwrap();
    pair.joiner.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_join_with_bare_room_id() {
    init_tracing();

    let store = MemoryStore::new();
    let (host, host_view) = create_test_session(Some(&store));
    let (joiner, joiner_view) = create_test_session(Some(&store));

    host.host(None).await.unwrap();
    let (room, _) = host_view.wait_for_room(STORE_TIMEOUT_MS).await.unwrap();
    assert_eq!(room.as_str().len(), 8);

    joiner.join(room).await.unwrap();

    assert!(host_view.wait_for_connection(CONNECTION_TIMEOUT_MS).await);
    assert!(joiner_view.wait_for_connection(CONNECTION_TIMEOUT_MS).await);

    host.shutdown().await.unwrap();
    joiner.shutdown().await.unwrap();
}
