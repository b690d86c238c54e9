use crate::model::{CellIndex, Symbol};
use std::fmt;

/// Nine cells in row-major order. A cell, once set, is never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<Symbol>; CellIndex::COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: CellIndex) -> Option<Symbol> {
        self.cells[cell.get()]
    }

    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        self.cells[cell.get()].is_some()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn cells(&self) -> &[Option<Symbol>; CellIndex::COUNT] {
        &self.cells
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Callers check occupancy first; the engine is the only writer.
    pub(crate) fn place(&mut self, cell: CellIndex, symbol: Symbol) {
        debug_assert!(self.cells[cell.get()].is_none());
        self.cells[cell.get()] = Some(symbol);
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: [Option<Symbol>; CellIndex::COUNT]) -> Self {
        Self { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                match cell {
                    Some(symbol) => write!(f, "{symbol}")?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}
