use crate::game::GameStatus;
use crate::model::Symbol;

/// Running tally across games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Counts a terminal outcome; returns false for an active game.
    pub fn record(&mut self, status: &GameStatus) -> bool {
        match status {
            GameStatus::Active => return false,
            GameStatus::Won {
                winner: Symbol::X, ..
            } => self.x_wins += 1,
            GameStatus::Won {
                winner: Symbol::O, ..
            } => self.o_wins += 1,
            GameStatus::Drawn => self.draws += 1,
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
