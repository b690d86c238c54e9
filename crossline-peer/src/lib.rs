pub mod session;
pub mod signaling;
pub mod transport;

pub use session::{
    Notice, Presenter, Session, SessionClosed, SessionCommand, SessionConfig, SessionHandle,
};
pub use signaling::{NegotiationError, NegotiationState, Role, RoomLease, SignalingExchange};
pub use transport::{ChannelError, PeerChannel, TransportConfig, TransportEvent};
