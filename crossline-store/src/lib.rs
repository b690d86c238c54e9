mod memory;
mod path;
pub mod protocol;
mod remote;
pub mod server;
mod store;

pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use store::{SignalingStore, Snapshot, StoreError, Subscription};
