use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

/// Value currently stored at a subscribed path; `None` once it is gone.
pub type Snapshot = Option<Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store path '{0}'")]
    InvalidPath(String),

    #[error("store connection closed")]
    Closed,

    #[error("store transport error: {0}")]
    Transport(String),

    #[error("store rejected request: {0}")]
    Rejected(String),

    #[error("store payload error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stream of snapshots for one path. The current value is delivered first,
/// then a fresh snapshot after every write at, above or below the path.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Snapshot>,
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(rx: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self { rx, on_drop: None }
    }

    /// Like `new`, but runs `on_drop` once when the subscription is dropped,
    /// so the store side can release whatever feeds `rx`.
    pub fn with_cancel(
        rx: mpsc::UnboundedReceiver<Snapshot>,
        on_drop: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            rx,
            on_drop: Some(Box::new(on_drop)),
        }
    }

    /// `None` when the store side has gone away.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

/// Shared key-value space reachable by both peers before the direct channel
/// exists. Paths are `/`-separated, e.g. `rooms/ab12cd/offer`.
#[async_trait]
pub trait SignalingStore: Send + Sync {
    /// Replace the value at `path`. Writing `null` deletes it.
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Append `value` under a fresh, insertion-ordered child key of `path`
    /// and return that key.
    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError>;

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError>;

    async fn remove(&self, path: &str) -> Result<(), StoreError>;
}
