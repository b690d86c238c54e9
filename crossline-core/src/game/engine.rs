use crate::error::GameError;
use crate::game::GameStatus;
use crate::model::{Board, CellIndex, Symbol};

const fn line(a: u8, b: u8, c: u8) -> [CellIndex; 3] {
    [CellIndex::from_raw(a), CellIndex::from_raw(b), CellIndex::from_raw(c)]
}

/// Rows, then columns, then the two diagonals.
pub const WINNING_LINES: [[CellIndex; 3]; 8] = [
    line(0, 1, 2),
    line(3, 4, 5),
    line(6, 7, 8),
    line(0, 3, 6),
    line(1, 4, 7),
    line(2, 5, 8),
    line(0, 4, 8),
    line(2, 4, 6),
];

/// Board, turn marker and status of a single game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Symbol,
    status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Symbol::X,
            status: GameStatus::Active,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Symbol {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Places `symbol`, re-evaluates and hands the turn over while the game
    /// is still running.
    pub fn apply_move(&mut self, cell: CellIndex, symbol: Symbol) -> Result<GameStatus, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.board.is_occupied(cell) {
            return Err(GameError::CellOccupied(cell.get()));
        }

        self.board.place(cell, symbol);
        self.status = self.evaluate();
        if self.status.is_active() {
            self.turn = self.turn.opponent();
        }
        Ok(self.status)
    }

    pub fn evaluate(&self) -> GameStatus {
        evaluate(&self.board)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Two lines completing at once is unreachable move by move; the first one
/// in scan order wins.
pub fn evaluate(board: &Board) -> GameStatus {
    for line in WINNING_LINES {
        let [a, b, c] = line;
        if let Some(symbol) = board.get(a)
            && board.get(b) == Some(symbol)
            && board.get(c) == Some(symbol)
        {
            return GameStatus::Won {
                winner: symbol,
                line,
            };
        }
    }

    if board.is_full() {
        GameStatus::Drawn
    } else {
        GameStatus::Active
    }
}
