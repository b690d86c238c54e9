use crate::protocol::{StoreEvent, StoreRequest};
use crate::store::{SignalingStore, Snapshot, StoreError, Subscription};
use async_trait::async_trait;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

type Reply = Result<Option<String>, String>;

/// Where replies and snapshots coming off the socket are routed.
#[derive(Default)]
struct Routes {
    pending: DashMap<u64, oneshot::Sender<Reply>>,
    subscriptions: DashMap<u64, mpsc::UnboundedSender<Snapshot>>,
}

impl Routes {
    fn dispatch(&self, event: StoreEvent) {
        match event {
            StoreEvent::Ack { req_id, key } => self.reply(req_id, Ok(key)),
            StoreEvent::Rejected { req_id, reason } => {
                self.subscriptions.remove(&req_id);
                self.reply(req_id, Err(reason));
            }
            StoreEvent::Snapshot { req_id, value } => {
                let closed = match self.subscriptions.get(&req_id) {
                    Some(tx) => tx.send(value).is_err(),
                    None => false,
                };
                if closed {
                    self.subscriptions.remove(&req_id);
                }
            }
        }
    }

    fn reply(&self, req_id: u64, reply: Reply) {
        if let Some((_, tx)) = self.pending.remove(&req_id) {
            let _ = tx.send(reply);
        }
    }
}

/// Client for the websocket store server. Cheap to clone; the connection
/// closes when the last clone is dropped.
#[derive(Clone)]
pub struct RemoteStore {
    outgoing: mpsc::UnboundedSender<Message>,
    routes: Arc<Routes>,
    next_req: Arc<AtomicU64>,
}

impl RemoteStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        info!("Connected to signaling store at {}", url);

        let (mut sink, mut source) = stream.split();
        let (outgoing, mut rx) = mpsc::unbounded_channel::<Message>();
        let routes = Arc::new(Routes::default());

        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if sink.send(msg).await.is_err() {
                    break;
                }
            }
            let _ = sink.close().await;
        });

        let reader_routes = Arc::clone(&routes);
        tokio::spawn(async move {
            while let Some(Ok(msg)) = source.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<StoreEvent>(&text) {
                        Ok(event) => reader_routes.dispatch(event),
                        Err(e) => warn!("Invalid store event: {:?}", e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            debug!("Store connection reader finished");
            // Dropping the senders wakes every waiter with `Closed`.
            reader_routes.pending.clear();
            reader_routes.subscriptions.clear();
        });

        Ok(Self {
            outgoing,
            routes,
            next_req: Arc::new(AtomicU64::new(1)),
        })
    }

    fn next_req_id(&self) -> u64 {
        self.next_req.fetch_add(1, Ordering::Relaxed)
    }

    async fn request(&self, request: StoreRequest) -> Result<Option<String>, StoreError> {
        let req_id = request.req_id();
        let (tx, rx) = oneshot::channel();
        self.routes.pending.insert(req_id, tx);

        let json = serde_json::to_string(&request)?;
        if self.outgoing.send(Message::Text(json)).is_err() {
            self.routes.pending.remove(&req_id);
            return Err(StoreError::Closed);
        }

        match rx.await {
            Ok(Ok(key)) => Ok(key),
            Ok(Err(reason)) => Err(StoreError::Rejected(reason)),
            Err(_) => Err(StoreError::Closed),
        }
    }
}

#[async_trait]
impl SignalingStore for RemoteStore {
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let req_id = self.next_req_id();
        self.request(StoreRequest::Set {
            req_id,
            path: path.to_owned(),
            value,
        })
        .await
        .map(|_| ())
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let req_id = self.next_req_id();
        self.request(StoreRequest::Push {
            req_id,
            path: path.to_owned(),
            value,
        })
        .await?
        .ok_or_else(|| StoreError::Rejected("push acknowledged without a key".into()))
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let req_id = self.next_req_id();
        let (tx, rx) = mpsc::unbounded_channel();
        // Registered first: the initial snapshot may overtake the ack.
        self.routes.subscriptions.insert(req_id, tx);

        self.request(StoreRequest::Subscribe {
            req_id,
            path: path.to_owned(),
        })
        .await?;

        // Weak handles: a live subscription must not hold the connection open.
        let routes = Arc::downgrade(&self.routes);
        let outgoing = self.outgoing.downgrade();
        let next_req = Arc::clone(&self.next_req);
        Ok(Subscription::with_cancel(rx, move || {
            if let Some(routes) = routes.upgrade() {
                routes.subscriptions.remove(&req_id);
            }
            let Some(outgoing) = outgoing.upgrade() else {
                return;
            };
            let request = StoreRequest::Unsubscribe {
                req_id: next_req.fetch_add(1, Ordering::Relaxed),
                sub_id: req_id,
            };
            match serde_json::to_string(&request) {
                Ok(json) => {
                    let _ = outgoing.send(Message::Text(json));
                }
                Err(e) => warn!("Failed to encode unsubscribe: {}", e),
            }
        }))
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let req_id = self.next_req_id();
        self.request(StoreRequest::Remove {
            req_id,
            path: path.to_owned(),
        })
        .await
        .map(|_| ())
    }
}
