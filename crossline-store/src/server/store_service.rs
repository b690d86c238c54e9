use crate::memory::MemoryStore;
use crate::protocol::{StoreEvent, StoreRequest};
use crate::store::SignalingStore;
use axum::extract::ws::Message;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Shared state of the store server: one tree for every connection.
#[derive(Clone, Default)]
pub struct StoreService {
    store: MemoryStore,
}

impl StoreService {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Executes one request. Snapshot forwarders of the connection live in
    /// `forwarders`, keyed by the id of the request that opened them.
    pub(crate) async fn handle(
        &self,
        request: StoreRequest,
        out: &mpsc::UnboundedSender<Message>,
        forwarders: &mut HashMap<u64, JoinHandle<()>>,
    ) {
        let req_id = request.req_id();
        let result = match request {
            StoreRequest::Set { path, value, .. } => {
                self.store.set(&path, value).await.map(|_| None)
            }
            StoreRequest::Push { path, value, .. } => {
                self.store.push(&path, value).await.map(Some)
            }
            StoreRequest::Remove { path, .. } => self.store.remove(&path).await.map(|_| None),
            StoreRequest::Unsubscribe { sub_id, .. } => {
                // Aborting drops the store-side subscription with the task.
                if let Some(task) = forwarders.remove(&sub_id) {
                    task.abort();
                    debug!("Subscription {} cancelled", sub_id);
                }
                Ok(None)
            }
            StoreRequest::Subscribe { path, .. } => match self.store.subscribe(&path).await {
                Ok(mut subscription) => {
                    let out = out.clone();
                    let task = tokio::spawn(async move {
                        while let Some(value) = subscription.next().await {
                            let event = StoreEvent::Snapshot { req_id, value };
                            if !send_event(&out, &event) {
                                break;
                            }
                        }
                        debug!("Subscription {} forwarder finished", req_id);
                    });
                    if let Some(previous) = forwarders.insert(req_id, task) {
                        previous.abort();
                    }
                    Ok(None)
                }
                Err(e) => Err(e),
            },
        };

        let event = match result {
            Ok(key) => StoreEvent::Ack { req_id, key },
            Err(e) => StoreEvent::Rejected {
                req_id,
                reason: e.to_string(),
            },
        };
        send_event(out, &event);
    }
}

/// Returns false once the connection's writer is gone.
fn send_event(out: &mpsc::UnboundedSender<Message>, event: &StoreEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => out.send(Message::Text(json.into())).is_ok(),
        Err(e) => {
            error!("Failed to serialize store event: {}", e);
            false
        }
    }
}
