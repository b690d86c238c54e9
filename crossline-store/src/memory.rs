use crate::path::{is_prefix, segments};
use crate::store::{SignalingStore, Snapshot, StoreError, Subscription};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

struct Subscriber {
    path: Vec<String>,
    tx: mpsc::UnboundedSender<Snapshot>,
}

struct MemoryInner {
    root: Map<String, Value>,
    subscribers: Vec<Subscriber>,
    next_push: u64,
}

/// In-process JSON tree with path subscriptions. Backs the store server and
/// lets tests run both peers against one shared store.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                root: Map::new(),
                subscribers: Vec::new(),
                next_push: 0,
            })),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Snapshot, StoreError> {
        let segs = segments(path)?;
        Ok(self.inner.lock().await.read(&segs))
    }

    pub async fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.subscribers.retain(|s| !s.tx.is_closed());
        inner.subscribers.len()
    }
}

impl MemoryInner {
    fn read(&self, path: &[String]) -> Snapshot {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(first)?;
        for seg in rest {
            node = node.as_object()?.get(seg)?;
        }
        Some(node.clone())
    }

    fn write(&mut self, path: &[String], value: Value) {
        if value.is_null() {
            Self::delete(&mut self.root, path);
            return;
        }

        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut node = &mut self.root;
        for seg in parents {
            let child = node
                .entry(seg.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(map) = child else {
                return;
            };
            node = map;
        }
        node.insert(last.clone(), value);
    }

    /// Removes the leaf and prunes parents left empty. Returns whether `map`
    /// itself became empty.
    fn delete(map: &mut Map<String, Value>, path: &[String]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return map.is_empty();
        };
        let emptied = match map.get_mut(first) {
            _ if rest.is_empty() => true,
            Some(Value::Object(child)) => Self::delete(child, rest),
            _ => false,
        };
        if emptied {
            map.remove(first);
        }
        map.is_empty()
    }

    fn notify(&mut self, changed: &[String]) {
        let snapshots: Vec<(usize, Snapshot)> = self
            .subscribers
            .iter()
            .enumerate()
            .filter(|(_, s)| is_prefix(&s.path, changed) || is_prefix(changed, &s.path))
            .map(|(i, s)| (i, self.read(&s.path)))
            .collect();

        let mut dead = Vec::new();
        for (i, snapshot) in snapshots {
            if self.subscribers[i].tx.send(snapshot).is_err() {
                dead.push(i);
            }
        }
        for i in dead.into_iter().rev() {
            self.subscribers.swap_remove(i);
        }
    }
}

#[async_trait]
impl SignalingStore for MemoryStore {
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let segs = segments(path)?;
        let mut inner = self.inner.lock().await;
        inner.write(&segs, value);
        inner.notify(&segs);
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let mut segs = segments(path)?;
        let mut inner = self.inner.lock().await;
        // Zero-padded so that map order equals insertion order.
        let key = format!("{:012}", inner.next_push);
        inner.next_push += 1;
        segs.push(key.clone());
        inner.write(&segs, value);
        inner.notify(&segs);
        Ok(key)
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let segs = segments(path)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().await;
        let _ = tx.send(inner.read(&segs));
        debug!("Subscribed to '{}'", path);
        inner.subscribers.push(Subscriber { path: segs, tx });
        Ok(Subscription::new(rx))
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        self.set(path, Value::Null).await
    }
}
