use crossline_core::Symbol;
use crossline_store::MemoryStore;

use crate::integration::{connect_pair, init_tracing};
use crate::utils::{QUIET_PERIOD_MS, cell, wait_for_cell};

#[tokio::test]
async fn test_out_of_turn_move_not_sent() {
    init_tracing();

    let store = MemoryStore::new();
    let pair = connect_pair(&store, "ab12cd").await;

    // O tries to open the game.
    pair.joiner.local_move(cell(4)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(QUIET_PERIOD_MS)).await;

    let (joiner_board, _, _) = pair.joiner_view.last_state().await.unwrap();
    let (host_board, turn, _) = pair.host_view.last_state().await.unwrap();
    assert_eq!(joiner_board.filled(), 0);
    assert_eq!(host_board.filled(), 0);
    assert_eq!(turn, Symbol::X);

    // X moving onto the same cell still works, so nothing was applied anywhere.
    pair.host.local_move(cell(4)).await.unwrap();
    assert!(wait_for_cell(&pair.joiner_view, 4, Symbol::X).await);

    // A second move on an occupied cell is ignored on both ends.
    pair.joiner.local_move(cell(4)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(QUIET_PERIOD_MS)).await;
    let (host_board, turn, _) = pair.host_view.last_state().await.unwrap();
    assert_eq!(host_board.get(cell(4)), Some(Symbol::X));
    assert_eq!(host_board.filled(), 1);
    assert_eq!(turn, Symbol::O);

    pair.host.shutdown().await.unwrap();
    pair.joiner.shutdown().await.unwrap();
}
