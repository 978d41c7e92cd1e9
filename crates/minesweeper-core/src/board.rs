use crate::cell::Cell;
use crate::rng::SimpleRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Classic board presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

impl Difficulty {
    /// Board shape for this preset as (height, width, mines).
    pub fn dimensions(&self) -> (usize, usize, usize) {
        match self {
            Difficulty::Beginner => (9, 9, 10),
            Difficulty::Intermediate => (16, 16, 40),
            Difficulty::Expert => (16, 30, 99),
        }
    }

    pub fn all_levels() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Expert,
        ]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Expert => write!(f, "Expert"),
        }
    }
}

/// The hidden mine field.
///
/// The board is the agent's oracle: it answers `is_mine` (asked only
/// when a probe lands) and `nearby_mines` (the count fed back after
/// every safe probe). The agent never reads the mine set directly.
#[derive(Debug, Clone)]
pub struct Board {
    height: usize,
    width: usize,
    mines: BTreeSet<Cell>,
    flagged: BTreeSet<Cell>,
}

impl Board {
    /// Place `mine_count` mines on a `height` x `width` board by
    /// rejection sampling. Deterministic for a seeded rng.
    pub fn generate(height: usize, width: usize, mine_count: usize, rng: &mut SimpleRng) -> Self {
        assert!(height > 0 && width > 0, "board must have positive dimensions");
        assert!(
            mine_count <= height * width,
            "cannot place {} mines on a {}x{} board",
            mine_count,
            height,
            width
        );
        let mut mines = BTreeSet::new();
        while mines.len() != mine_count {
            let row = rng.next_usize(height);
            let col = rng.next_usize(width);
            mines.insert(Cell::new(row, col));
        }
        Self {
            height,
            width,
            mines,
            flagged: BTreeSet::new(),
        }
    }

    pub fn with_difficulty(difficulty: Difficulty, rng: &mut SimpleRng) -> Self {
        let (height, width, mines) = difficulty.dimensions();
        Self::generate(height, width, mines, rng)
    }

    /// Build a board with a fixed mine layout (replays and tests).
    pub fn from_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Self {
        let mines: BTreeSet<Cell> = mines.into_iter().collect();
        assert!(
            mines.iter().all(|c| c.row < height && c.col < width),
            "mine outside a {}x{} board",
            height,
            width
        );
        Self {
            height,
            width,
            mines,
            flagged: BTreeSet::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Mines within one row and column of `cell`, not counting the
    /// cell itself. This is the sole numeric input the agent consumes.
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        cell.neighbors(self.height, self.width)
            .filter(|n| self.is_mine(*n))
            .count()
    }

    pub fn toggle_flag(&mut self, cell: Cell) {
        if !self.flagged.remove(&cell) {
            self.flagged.insert(cell);
        }
    }

    pub fn is_flagged(&self, cell: Cell) -> bool {
        self.flagged.contains(&cell)
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    /// True once every mine is flagged and nothing else is.
    pub fn won(&self) -> bool {
        self.flagged == self.mines
    }

    /// The true mine set, for end-of-game scoring and rendering only.
    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }
}
