use crate::cell::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A logical statement about the board: exactly `count` of `cells`
/// are mines.
///
/// Cells are removed from the statement as the agent resolves them
/// (known safe or known mine), so a sentence always ranges over cells
/// whose status is still open. Equality is structural over the cell
/// set and the count; the engine relies on it to de-duplicate derived
/// sentences. The cell set is a `BTreeSet`, so equal statements
/// compare equal regardless of the order cells were learned in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "sentence count {} exceeds cell set size {}",
            count,
            cells.len()
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// A sentence over no cells carries no further information.
    pub fn is_resolved(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells this sentence proves to be mines: all of them, when
    /// every remaining cell is needed to reach the count.
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if self.count > 0 && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// The cells this sentence proves to be safe: all of them, when
    /// the statement demands zero mines.
    pub fn known_safes(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Record that `cell` is a mine: remove it and account for it in
    /// the count. No-op if the cell is not in the statement.
    ///
    /// Precondition: callers only pass cells proven to be mines, so a
    /// member cell implies `count >= 1`.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(self.count >= 1, "mine {} removed from a zero-count sentence", cell);
            self.count -= 1;
        }
    }

    /// Record that `cell` is safe: remove it, count unchanged (a safe
    /// cell contributes nothing to the mine tally).
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}
