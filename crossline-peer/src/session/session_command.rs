use crossline_core::{CellIndex, RoomId};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// The local player selected a cell.
    LocalMove(CellIndex),
    /// Clear the board, keep the scores.
    Restart,
    /// Clear the board and the scores.
    StartOver,
    /// Drop any peer link and play hot-seat.
    PlayOffline,
    /// Open a room and wait for a peer. A fresh id is generated when `room`
    /// is `None`.
    Host { room: Option<RoomId> },
    Join(RoomId),
    Shutdown,
}

#[derive(Debug, Error)]
#[error("session has ended")]
pub struct SessionClosed;

/// Sending half of a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) fn new(tx: mpsc::Sender<SessionCommand>) -> Self {
        Self { tx }
    }

    pub async fn send(&self, cmd: SessionCommand) -> Result<(), SessionClosed> {
        self.tx.send(cmd).await.map_err(|_| SessionClosed)
    }

    pub async fn local_move(&self, cell: CellIndex) -> Result<(), SessionClosed> {
        self.send(SessionCommand::LocalMove(cell)).await
    }

    pub async fn restart(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Restart).await
    }

    pub async fn start_over(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::StartOver).await
    }

    pub async fn play_offline(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::PlayOffline).await
    }

    pub async fn host(&self, room: Option<RoomId>) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Host { room }).await
    }

    pub async fn join(&self, room: RoomId) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Join(room)).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Shutdown).await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
