use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client → store server, one JSON text frame each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum StoreRequest {
    Set {
        req_id: u64,
        path: String,
        value: Value,
    },
    Push {
        req_id: u64,
        path: String,
        value: Value,
    },
    Remove {
        req_id: u64,
        path: String,
    },
    Subscribe {
        req_id: u64,
        path: String,
    },
    /// Stops the snapshots of the subscription opened by request `sub_id`.
    Unsubscribe {
        req_id: u64,
        sub_id: u64,
    },
}

impl StoreRequest {
    pub fn req_id(&self) -> u64 {
        match self {
            StoreRequest::Set { req_id, .. }
            | StoreRequest::Push { req_id, .. }
            | StoreRequest::Remove { req_id, .. }
            | StoreRequest::Subscribe { req_id, .. }
            | StoreRequest::Unsubscribe { req_id, .. } => *req_id,
        }
    }
}

/// Store server → client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum StoreEvent {
    /// `key` is set for pushes.
    Ack { req_id: u64, key: Option<String> },
    Rejected { req_id: u64, reason: String },
    /// Snapshot for the subscription opened by request `req_id`.
    Snapshot { req_id: u64, value: Option<Value> },
}
