use crossline_core::{GameStatus, Symbol};
use crossline_peer::Notice;
use crossline_store::MemoryStore;

use crate::integration::{connect_pair, init_tracing};
use crate::utils::{MOVE_TIMEOUT_MS, PresenterEvent, cell, wait_for_cell};

#[tokio::test]
async fn test_move_reaches_peer() {
    init_tracing();

    let store = MemoryStore::new();
    let pair = connect_pair(&store, "ab12cd").await;

    pair.host.local_move(cell(4)).await.unwrap();

    assert!(wait_for_cell(&pair.host_view, 4, Symbol::X).await);
    assert!(wait_for_cell(&pair.joiner_view, 4, Symbol::X).await);
    assert!(
        pair.joiner_view
            .wait_for_notice(&Notice::Turn(Symbol::O), MOVE_TIMEOUT_MS)
            .await
    );

    pair.joiner.local_move(cell(0)).await.unwrap();
    assert!(wait_for_cell(&pair.host_view, 0, Symbol::O).await);

    pair.host.shutdown().await.unwrap();
    pair.joiner.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_online_game_scores_on_both_sides() {
    init_tracing();

    let store = MemoryStore::new();
    let pair = connect_pair(&store, "ab12cd").await;

    // X takes the left column.
    let script = [(true, 0), (false, 1), (true, 3), (false, 4), (true, 6)];
    for (host_moves, i) in script {
        let (mover, peer_view) = if host_moves {
            (&pair.host, &pair.joiner_view)
        } else {
            (&pair.joiner, &pair.host_view)
        };
        let symbol = if host_moves { Symbol::X } else { Symbol::O };
        mover.local_move(cell(i)).await.unwrap();
        assert!(wait_for_cell(peer_view, i, symbol).await);
    }

    for view in [&pair.host_view, &pair.joiner_view] {
        assert!(
            view.wait_until(MOVE_TIMEOUT_MS, |events| events.iter().any(|e| matches!(
                e,
                PresenterEvent::Notice(Notice::Outcome(GameStatus::Won {
                    winner: Symbol::X,
                    ..
                }))
            )))
            .await
        );
        assert_eq!(view.last_scores().await.map(|s| s.x_wins), Some(1));
    }

    pair.host.shutdown().await.unwrap();
    pair.joiner.shutdown().await.unwrap();
}
