mod peer_channel;
mod transport_config;
mod transport_event;

pub use peer_channel::*;
pub use transport_config::*;
pub use transport_event::*;
