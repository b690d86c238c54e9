mod board;
mod cell;
mod room;
mod signaling;
mod symbol;
mod wire;

pub use board::Board;
pub use cell::CellIndex;
pub use room::{RoomId, RoomPaths};
pub use signaling::{IceCandidate, IceServerConfig, SdpKind, SessionDescription};
pub use symbol::Symbol;
pub use wire::MoveMessage;
