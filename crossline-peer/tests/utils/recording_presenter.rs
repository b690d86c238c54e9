use async_trait::async_trait;
use crossline_core::{Board, GameStatus, RoomId, Scoreboard, Symbol};
use crossline_peer::{Notice, Presenter};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Calls a session made into its presenter, in order.
#[derive(Debug, Clone)]
pub enum PresenterEvent {
    State {
        board: Board,
        turn: Symbol,
        status: GameStatus,
    },
    Connected(Symbol),
    Scores(Scoreboard),
    Notice(Notice),
}

/// A presenter that records everything for later assertions.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls until `predicate` holds for the recorded events or the timeout passes.
    pub async fn wait_until<F>(&self, timeout_ms: u64, predicate: F) -> bool
    where
        F: Fn(&[PresenterEvent]) -> bool,
    {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if predicate(&self.events.lock().await) {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    pub async fn wait_for_connection(&self, timeout_ms: u64) -> bool {
        self.wait_until(timeout_ms, |events| {
            events
                .iter()
                .any(|e| matches!(e, PresenterEvent::Connected(_)))
        })
        .await
    }

    pub async fn wait_for_notice(&self, notice: &Notice, timeout_ms: u64) -> bool {
        self.wait_until(timeout_ms, |events| {
            events
                .iter()
                .any(|e| matches!(e, PresenterEvent::Notice(n) if n == notice))
        })
        .await
    }

    pub async fn connections(&self) -> Vec<Symbol> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Connected(symbol) => Some(*symbol),
                _ => None,
            })
            .collect()
    }

    pub async fn last_state(&self) -> Option<(Board, Symbol, GameStatus)> {
        self.events
            .lock()
            .await
            .iter()
            .rev()
            .find_map(|e| match e {
                PresenterEvent::State {
                    board,
                    turn,
                    status,
                } => Some((*board, *turn, *status)),
                _ => None,
            })
    }

    pub async fn last_scores(&self) -> Option<Scoreboard> {
        self.events
            .lock()
            .await
            .iter()
            .rev()
            .find_map(|e| match e {
                PresenterEvent::Scores(scores) => Some(*scores),
                _ => None,
            })
    }

    /// Waits for the host's room announcement and returns its room and link.
    pub async fn wait_for_room(&self, timeout_ms: u64) -> Option<(RoomId, Option<String>)> {
        let announced = self
            .wait_until(timeout_ms, |events| events.iter().any(is_room_created))
            .await;
        if !announced {
            return None;
        }
        self.events
            .lock()
            .await
            .iter()
            .find_map(|e| match e {
                PresenterEvent::Notice(Notice::RoomCreated { room, link }) => {
                    Some((room.clone(), link.clone()))
                }
                _ => None,
            })
    }
}

fn is_room_created(event: &PresenterEvent) -> bool {
    matches!(event, PresenterEvent::Notice(Notice::RoomCreated { .. }))
}

#[async_trait]
impl Presenter for RecordingPresenter {
    async fn on_state_changed(&self, board: &Board, turn: Symbol, status: &GameStatus) {
        self.events.lock().await.push(PresenterEvent::State {
            board: *board,
            turn,
            status: *status,
        });
    }

    async fn on_connection_established(&self, local: Symbol) {
        tracing::info!("[RecordingPresenter] connected as {}", local);
        self.events.lock().await.push(PresenterEvent::Connected(local));
    }

    async fn on_scores_changed(&self, scores: &Scoreboard) {
        self.events.lock().await.push(PresenterEvent::Scores(*scores));
    }

    async fn on_notice(&self, notice: &Notice) {
        tracing::info!("[RecordingPresenter] notice: {}", notice);
        self.events
            .lock()
            .await
            .push(PresenterEvent::Notice(notice.clone()));
    }
}
