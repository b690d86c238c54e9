use crate::model::{CellIndex, Symbol};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    /// `line` is the first completed triple in scan order, kept for highlighting.
    Won { winner: Symbol, line: [CellIndex; 3] },
    Drawn,
}

impl GameStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, GameStatus::Active)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    pub fn winning_line(&self) -> Option<[CellIndex; 3]> {
        match self {
            GameStatus::Won { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "In progress"),
            GameStatus::Won { winner, .. } => write!(
                f,
                "Player {winner} wins! Player {} loses.",
                winner.opponent()
            ),
            GameStatus::Drawn => write!(f, "It's a draw! No one wins."),
        }
    }
}
