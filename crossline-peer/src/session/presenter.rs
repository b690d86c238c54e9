use crate::session::notice::Notice;
use async_trait::async_trait;
use crossline_core::{Board, GameStatus, Scoreboard, Symbol};

/// Display side of a session. Called from the session loop only, in order.
#[async_trait]
pub trait Presenter: Send + Sync + 'static {
    async fn on_state_changed(&self, board: &Board, turn: Symbol, status: &GameStatus);

    /// The data channel opened; `local` is the symbol this device plays.
    async fn on_connection_established(&self, local: Symbol);

    async fn on_scores_changed(&self, _scores: &Scoreboard) {}

    async fn on_notice(&self, _notice: &Notice) {}
}
