use crate::error::GameError;
use crate::game::{GameState, GameStatus};
use crate::model::{CellIndex, MoveMessage, Symbol};

/// Who may act on the local input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Both players share one device; input always acts for the side to move.
    HotSeat,
    /// The local device only ever plays `local`.
    Online { local: Symbol },
}

impl PlayMode {
    pub fn local_symbol(&self) -> Option<Symbol> {
        match self {
            PlayMode::HotSeat => None,
            PlayMode::Online { local } => Some(*local),
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveApplied {
    pub cell: CellIndex,
    pub symbol: Symbol,
    pub status: GameStatus,
    /// Present only for a local move made online; must reach the peer.
    pub outbound: Option<MoveMessage>,
}

/// Guards local and remote moves before they reach the engine.
#[derive(Debug, Clone)]
pub struct MoveSynchronizer {
    game: GameState,
    mode: PlayMode,
}

impl MoveSynchronizer {
    pub fn new(mode: PlayMode) -> Self {
        Self {
            game: GameState::new(),
            mode,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Switching mode always starts a fresh game.
    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        self.game.reset();
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Whether local input would currently be accepted on some empty cell.
    pub fn is_local_turn(&self) -> bool {
        let status = self.game.status();
        match self.mode {
            PlayMode::HotSeat => status.is_active(),
            PlayMode::Online { local } => status.is_active() && self.game.turn() == local,
        }
    }

    pub fn local_move(&mut self, cell: CellIndex) -> Result<MoveApplied, GameError> {
        if self.game.status().is_terminal() {
            return Err(GameError::GameOver);
        }
        let symbol = match self.mode {
            PlayMode::HotSeat => self.game.turn(),
            PlayMode::Online { local } if self.game.turn() == local => local,
            PlayMode::Online { .. } => return Err(GameError::NotYourTurn),
        };

        let status = self.game.apply_move(cell, symbol)?;
        let outbound = match self.mode {
            PlayMode::HotSeat => None,
            PlayMode::Online { .. } => Some(MoveMessage::new(cell, symbol)),
        };
        Ok(MoveApplied {
            cell,
            symbol,
            status,
            outbound,
        })
    }

    /// The peer keeps its own turn discipline; only stale or duplicate
    /// deliveries are filtered out, by the occupied-cell check.
    pub fn remote_move(&mut self, msg: MoveMessage) -> Result<MoveApplied, GameError> {
        let status = self.game.apply_move(msg.cell_index, msg.symbol)?;
        Ok(MoveApplied {
            cell: msg.cell_index,
            symbol: msg.symbol,
            status,
            outbound: None,
        })
    }
}
