mod engine;
mod score;
mod status;
mod sync;

pub use engine::{GameState, WINNING_LINES, evaluate};
pub use score::Scoreboard;
pub use status::GameStatus;
pub use sync::{MoveApplied, MoveSynchronizer, PlayMode};
