use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a board cell, row-major, always in `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CellIndex(u8);

impl CellIndex {
    pub const COUNT: usize = 9;

    pub fn new(index: u8) -> Result<Self, GameError> {
        if (index as usize) < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(GameError::InvalidCell(index as usize))
        }
    }

    pub(crate) const fn from_raw(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT);
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..Self::COUNT as u8).map(CellIndex)
    }
}

impl TryFrom<u8> for CellIndex {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = GameError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| GameError::InvalidCell(value))
            .and_then(Self::new)
    }
}

impl From<CellIndex> for u8 {
    fn from(cell: CellIndex) -> Self {
        cell.0
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(CellIndex::new(8).is_ok());
        assert_eq!(CellIndex::new(9), Err(GameError::InvalidCell(9)));
        assert_eq!(CellIndex::try_from(300usize), Err(GameError::InvalidCell(300)));
    }

    #[test]
    fn test_all_covers_board() {
        let cells: Vec<usize> = CellIndex::all().map(CellIndex::get).collect();
        assert_eq!(cells, (0..9).collect::<Vec<_>>());
    }
}
