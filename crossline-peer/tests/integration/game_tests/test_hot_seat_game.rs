use crossline_core::{GameStatus, Symbol};
use crossline_peer::Notice;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MOVE_TIMEOUT_MS, PresenterEvent, cell};

#[tokio::test]
async fn test_hot_seat_game_to_a_win() {
    init_tracing();

    let (handle, view) = create_test_session(None);

    for i in [0, 3, 1, 4, 2] {
        handle.local_move(cell(i)).await.unwrap();
    }

    let outcome_text = "Player X wins! Player O loses.";
    assert!(
        view.wait_until(MOVE_TIMEOUT_MS, |events| events.iter().any(|e| matches!(
            e,
            PresenterEvent::Notice(Notice::Outcome(status)) if status.to_string() == outcome_text
        )))
        .await
    );

    let (board, _, status) = view.last_state().await.unwrap();
    assert_eq!(board.filled(), 5);
    assert_eq!(status.winning_line(), Some([cell(0), cell(1), cell(2)]));
    assert_eq!(view.last_scores().await.map(|s| s.x_wins), Some(1));

    // The finished board takes no more moves.
    handle.local_move(cell(8)).await.unwrap();
    handle.restart().await.unwrap();
    assert!(
        view.wait_until(MOVE_TIMEOUT_MS, |events| matches!(
            events.last(),
            Some(PresenterEvent::Notice(Notice::Turn(Symbol::X)))
        ))
        .await
    );
    let (board, turn, status) = view.last_state().await.unwrap();
    assert_eq!((board.filled(), turn, status), (0, Symbol::X, GameStatus::Active));
    assert_eq!(view.last_scores().await.map(|s| s.x_wins), Some(1));

    handle.start_over().await.unwrap();
    assert!(
        view.wait_until(MOVE_TIMEOUT_MS, |events| events
            .iter()
            .rev()
            .find_map(|e| match e {
                PresenterEvent::Scores(s) => Some(s.x_wins == 0),
                _ => None,
            })
            .unwrap_or(false))
        .await
    );

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_hot_seat_draw() {
    init_tracing();

    let (handle, view) = create_test_session(None);

    // X O X / X O O / O X X
    for i in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        handle.local_move(cell(i)).await.unwrap();
    }

    assert!(
        view.wait_for_notice(&Notice::Outcome(GameStatus::Drawn), MOVE_TIMEOUT_MS)
            .await
    );
    assert_eq!(view.last_scores().await.map(|s| s.draws), Some(1));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_online_without_store_is_refused() {
    init_tracing();

    let (handle, view) = create_test_session(None);

    handle.host(None).await.unwrap();

    assert!(view.wait_for_notice(&Notice::NoStore, MOVE_TIMEOUT_MS).await);
    handle.local_move(cell(0)).await.unwrap();
    assert!(
        view.wait_until(MOVE_TIMEOUT_MS, |events| events.iter().any(|e| matches!(
            e,
            PresenterEvent::State { board, .. } if board.get(cell(0)) == Some(Symbol::X)
        )))
        .await,
        "session should still be playing hot-seat"
    );

    handle.shutdown().await.unwrap();
}
