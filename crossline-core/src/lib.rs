pub mod error;
pub mod game;
pub mod model;

pub use error::{GameError, RoomIdError, WireError};
pub use game::{GameState, GameStatus, MoveApplied, MoveSynchronizer, PlayMode, Scoreboard};
pub use model::{
    Board, CellIndex, IceCandidate, IceServerConfig, MoveMessage, RoomId, RoomPaths, SdpKind,
    SessionDescription, Symbol,
};
