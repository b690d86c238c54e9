use crossline_core::RoomId;
use crossline_store::SignalingStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns a room record in the store for as long as a peer link uses it.
///
/// [`RoomLease::release`] deletes the record and waits for the store. A
/// lease dropped without release schedules the delete on the current
/// runtime instead, if there is one.
pub struct RoomLease {
    room: RoomId,
    store: Arc<dyn SignalingStore>,
    released: bool,
}

impl RoomLease {
    pub fn new(room: RoomId, store: Arc<dyn SignalingStore>) -> Self {
        Self {
            room,
            store,
            released: false,
        }
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub async fn release(mut self) {
        self.released = true;
        let paths = self.room.paths();
        match self.store.remove(paths.root()).await {
            Ok(()) => info!("Room {} removed from the store", self.room),
            Err(e) => warn!("Failed to remove room {}: {}", self.room, e),
        }
    }
}

impl Drop for RoomLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime left to remove room {}", self.room);
            return;
        };
        let store = Arc::clone(&self.store);
        let room = self.room.clone();
        handle.spawn(async move {
            let paths = room.paths();
            if let Err(e) = store.remove(paths.root()).await {
                warn!("Failed to remove room {}: {}", room, e);
            }
        });
    }
}
