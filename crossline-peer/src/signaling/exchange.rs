use crate::signaling::signal_event::SignalEvent;
use crate::transport::LinkId;
use crossline_core::{IceCandidate, RoomId, RoomPaths, SdpKind, SessionDescription, Symbol};
use crossline_store::{SignalingStore, Snapshot, StoreError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Which side of the room this peer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Creates the room, publishes the offer, plays X.
    Host,
    /// Reads the offer, publishes the answer, plays O.
    Joiner,
}

impl Role {
    pub fn local_symbol(self) -> Symbol {
        match self {
            Role::Host => Symbol::X,
            Role::Joiner => Symbol::O,
        }
    }

    fn local_candidates(self, paths: &RoomPaths) -> String {
        match self {
            Role::Host => paths.offer_candidates(),
            Role::Joiner => paths.answer_candidates(),
        }
    }

    fn remote_candidates(self, paths: &RoomPaths) -> String {
        match self {
            Role::Host => paths.answer_candidates(),
            Role::Joiner => paths.offer_candidates(),
        }
    }

    fn remote_description(self, paths: &RoomPaths) -> (String, SdpKind) {
        match self {
            Role::Host => (paths.answer(), SdpKind::Answer),
            Role::Joiner => (paths.offer(), SdpKind::Offer),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record has not been written")]
    Missing,
    #[error("malformed signaling record: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn parse_record<T: DeserializeOwned>(snapshot: Snapshot) -> Result<T, RecordError> {
    let value = snapshot.ok_or(RecordError::Missing)?;
    Ok(serde_json::from_value(value)?)
}

/// Reads and writes one room's signaling records for one peer link.
///
/// Watchers run as background tasks feeding [`SignalEvent`]s to the session;
/// they stop when the exchange is dropped.
pub struct SignalingExchange {
    link: LinkId,
    role: Role,
    paths: RoomPaths,
    store: Arc<dyn SignalingStore>,
    event_tx: mpsc::Sender<SignalEvent>,
    watchers: Vec<JoinHandle<()>>,
}

impl SignalingExchange {
    pub fn new(
        link: LinkId,
        role: Role,
        room: &RoomId,
        store: Arc<dyn SignalingStore>,
        event_tx: mpsc::Sender<SignalEvent>,
    ) -> Self {
        Self {
            link,
            role,
            paths: room.paths(),
            store,
            event_tx,
            watchers: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub async fn publish_offer(&self, offer: &SessionDescription) -> Result<(), StoreError> {
        self.store
            .set(&self.paths.offer(), serde_json::to_value(offer)?)
            .await?;
        info!("Offer published at {}", self.paths.offer());
        Ok(())
    }

    pub async fn publish_answer(&self, answer: &SessionDescription) -> Result<(), StoreError> {
        self.store
            .set(&self.paths.answer(), serde_json::to_value(answer)?)
            .await?;
        info!("Answer published at {}", self.paths.answer());
        Ok(())
    }

    pub async fn publish_candidate(&self, candidate: &IceCandidate) -> Result<(), StoreError> {
        let path = self.role.local_candidates(&self.paths);
        let key = self
            .store
            .push(&path, serde_json::to_value(candidate)?)
            .await?;
        debug!("Local candidate stored at {}/{}", path, key);
        Ok(())
    }

    /// Emits the peer's offer (joiner) or answer (host) each time the record
    /// changes. Absent or malformed records are skipped.
    pub async fn watch_remote_description(&mut self) -> Result<(), StoreError> {
        let (path, expected) = self.role.remote_description(&self.paths);
        let mut subscription = self.store.subscribe(&path).await?;
        let tx = self.event_tx.clone();
        let link = self.link;
        let role = self.role;

        let task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.next().await {
                let desc: SessionDescription = match parse_record(snapshot) {
                    Ok(desc) => desc,
                    Err(RecordError::Missing) => continue,
                    Err(e) => {
                        debug!("Skipping record at {}: {}", path, e);
                        continue;
                    }
                };
                if desc.kind != expected {
                    debug!("Skipping {:?} description at {}", desc.kind, path);
                    continue;
                }

                let event = match role {
                    Role::Host => SignalEvent::Answer(link, desc),
                    Role::Joiner => SignalEvent::Offer(link, desc),
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });
        self.watchers.push(task);
        Ok(())
    }

    /// Emits every candidate the peer adds, each store entry exactly once.
    pub async fn watch_remote_candidates(&mut self) -> Result<(), StoreError> {
        let path = self.role.remote_candidates(&self.paths);
        let mut subscription = self.store.subscribe(&path).await?;
        let tx = self.event_tx.clone();
        let link = self.link;

        let task = tokio::spawn(async move {
            let mut seen = HashSet::new();

            while let Some(snapshot) = subscription.next().await {
                let Some(Value::Object(entries)) = snapshot else {
                    continue;
                };
                // Push keys sort in insertion order.
                for (key, value) in entries {
                    if !seen.insert(key.clone()) {
                        continue;
                    }
                    match serde_json::from_value::<IceCandidate>(value) {
                        Ok(candidate) => {
                            if tx
                                .send(SignalEvent::RemoteCandidate(link, candidate))
                                .await
                                .is_err()
                            {
                                return;
                            }
                        }
                        Err(e) => debug!("Skipping candidate {}/{}: {}", path, key, e),
                    }
                }
            }
        });
        self.watchers.push(task);
        Ok(())
    }

    pub fn stop(&mut self) {
        for task in self.watchers.drain(..) {
            task.abort();
        }
    }
}

impl Drop for SignalingExchange {
    fn drop(&mut self) {
        self.stop();
    }
}
