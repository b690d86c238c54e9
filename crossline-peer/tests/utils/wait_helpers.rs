use crossline_core::{CellIndex, Symbol};
use crossline_store::MemoryStore;

use super::recording_presenter::{PresenterEvent, RecordingPresenter};

/// Timeout for store records to appear or vanish (ms).
pub const STORE_TIMEOUT_MS: u64 = 5000;

/// Timeout for the data channel to open between two local peers (ms).
pub const CONNECTION_TIMEOUT_MS: u64 = 15000;

/// Timeout for a move to travel over an open channel (ms).
pub const MOVE_TIMEOUT_MS: u64 = 5000;

/// How long to wait before concluding that something did not happen (ms).
pub const QUIET_PERIOD_MS: u64 = 300;

pub fn cell(i: u8) -> CellIndex {
    CellIndex::new(i).expect("cell index in range")
}

/// Polls the store until `path` exists (`present`) or is gone (`!present`).
pub async fn wait_for_path(store: &MemoryStore, path: &str, present: bool) -> bool {
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(STORE_TIMEOUT_MS);

    loop {
        let exists = matches!(store.get(path).await, Ok(Some(_)));
        if exists == present {
            return true;
        }
        if start.elapsed() > timeout {
            return false;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}

/// Waits until the presenter has rendered `symbol` at `index`.
pub async fn wait_for_cell(presenter: &RecordingPresenter, index: u8, symbol: Symbol) -> bool {
    presenter
        .wait_until(MOVE_TIMEOUT_MS, |events| {
            events.iter().rev().any(|e| match e {
                PresenterEvent::State { board, .. } => board.get(cell(index)) == Some(symbol),
                _ => false,
            })
        })
        .await
}
