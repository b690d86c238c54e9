pub use crossline_core::{CellIndex, GameStatus, RoomId, Symbol};

pub mod model {
    pub use crossline_core::model::*;
}

pub mod game {
    pub use crossline_core::game::*;
}

#[cfg(feature = "store")]
pub mod store {
    pub use crossline_store::*;
}

#[cfg(feature = "peer")]
pub mod peer {
    pub use crossline_peer::*;
}
