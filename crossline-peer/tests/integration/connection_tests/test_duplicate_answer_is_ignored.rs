use crossline_core::Symbol;
use crossline_store::{MemoryStore, SignalingStore};

use crate::integration::{connect_pair, init_tracing};
use crate::utils::{QUIET_PERIOD_MS, cell, wait_for_cell};

#[tokio::test]
async fn test_duplicate_answer_is_ignored() {
    init_tracing();

    let store = MemoryStore::new();
    let pair = connect_pair(&store, "ab12cd").await;

    // Re-announce the answer; the host already applied it once.
    let answer = store.get("rooms/ab12cd/answer").await.unwrap().unwrap();
    store.set("rooms/ab12cd/answer", answer).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(QUIET_PERIOD_MS)).await;

    assert_eq!(pair.host_view.connections().await, vec![Symbol::X]);

    // The link still carries moves.
    pair.host.local_move(cell(4)).await.unwrap();
    assert!(wait_for_cell(&pair.joiner_view, 4, Symbol::X).await);

    pair.host.shutdown().await.unwrap();
    pair.joiner.shutdown().await.unwrap();
}
