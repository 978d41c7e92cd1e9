use crate::cell::Cell;
use crate::rng::SimpleRng;
use crate::sentence::Sentence;
use std::collections::BTreeSet;

/// Knowledge-based minesweeper player.
///
/// The agent holds every proven fact about the board (safe cells and
/// mine cells) plus the live sentences that are still undecided. All
/// sentences are owned by index in the single `knowledge` vector;
/// marking a cell walks that vector and reduces each sentence in
/// place. After each probe report the base is saturated: deduction
/// and subset resolution repeat until a full round learns nothing new.
pub struct Agent {
    height: usize,
    width: usize,
    moves_made: BTreeSet<Cell>,
    safes: BTreeSet<Cell>,
    mines: BTreeSet<Cell>,
    knowledge: Vec<Sentence>,
    rng: SimpleRng,
}

impl Agent {
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_rng(height, width, SimpleRng::new())
    }

    /// Agent with a seeded rng so random moves are reproducible.
    pub fn with_seed(height: usize, width: usize, seed: u64) -> Self {
        Self::with_rng(height, width, SimpleRng::with_seed(seed))
    }

    fn with_rng(height: usize, width: usize, rng: SimpleRng) -> Self {
        Self {
            height,
            width,
            moves_made: BTreeSet::new(),
            safes: BTreeSet::new(),
            mines: BTreeSet::new(),
            knowledge: Vec::new(),
            rng,
        }
    }

    /// Cells proven to be mines.
    pub fn known_mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// Cells proven to be safe (probed cells included).
    pub fn known_safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    /// Number of live sentences in the knowledge base.
    pub fn knowledge_len(&self) -> usize {
        self.knowledge.len()
    }

    /// Record the proven fact that `cell` is a mine and fold it into
    /// every live sentence. Idempotent.
    pub fn mark_mine(&mut self, cell: Cell) {
        debug_assert!(
            !self.safes.contains(&cell),
            "cell {} marked as mine but already proven safe",
            cell
        );
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Record the proven fact that `cell` is safe and fold it into
    /// every live sentence. Idempotent.
    pub fn mark_safe(&mut self, cell: Cell) {
        debug_assert!(
            !self.mines.contains(&cell),
            "cell {} marked as safe but already proven a mine",
            cell
        );
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Fold one probe report into the knowledge base: `cell` was
    /// probed without exploding and `count` of its neighbors are
    /// mines. Runs deduction to a fixed point before returning.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) {
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        // New statement over the neighbors not yet resolved either
        // way. Neighbors already proven mines are excluded from the
        // set, so the reported count drops by one for each of them.
        let mut unresolved = BTreeSet::new();
        let mut known_mine_neighbors = 0usize;
        for neighbor in cell.neighbors(self.height, self.width) {
            if self.mines.contains(&neighbor) {
                known_mine_neighbors += 1;
            } else if !self.safes.contains(&neighbor) {
                unresolved.insert(neighbor);
            }
        }
        debug_assert!(
            known_mine_neighbors <= count,
            "probe at {} reported {} nearby mines but {} neighbors are already proven mines",
            cell,
            count,
            known_mine_neighbors
        );
        let remaining = count.saturating_sub(known_mine_neighbors);

        if unresolved.is_empty() {
            // Every neighbor is already resolved; the report must
            // agree with what we know.
            debug_assert!(
                remaining == 0,
                "probe at {} reported mines among fully resolved neighbors",
                cell
            );
        } else {
            let sentence = Sentence::new(unresolved, remaining);
            if !self.knowledge.contains(&sentence) {
                self.knowledge.push(sentence);
            }
        }

        self.saturate();
    }

    /// Repeat the deduction pass and the subset-resolution pass until
    /// a full round yields no new safe cell, no new mine, and no new
    /// sentence.
    fn saturate(&mut self) {
        loop {
            let mut progressed = false;

            // Deduction: every cell some sentence now decides.
            let mut new_safes = BTreeSet::new();
            let mut new_mines = BTreeSet::new();
            for sentence in &self.knowledge {
                new_safes.extend(sentence.known_safes());
                new_mines.extend(sentence.known_mines());
            }
            for cell in new_safes {
                if !self.safes.contains(&cell) {
                    self.mark_safe(cell);
                    progressed = true;
                }
            }
            for cell in new_mines {
                if !self.mines.contains(&cell) {
                    self.mark_mine(cell);
                    progressed = true;
                }
            }

            // Fully resolved sentences carry nothing further.
            self.knowledge.retain(|s| !s.is_resolved());

            // Subset resolution: if A says "a of these cells" and a
            // superset B says "b of those plus others", the cells
            // unique to B hold exactly b - a mines.
            let mut derived: Vec<Sentence> = Vec::new();
            for a in &self.knowledge {
                for b in &self.knowledge {
                    if a.cells() == b.cells() || !a.cells().is_subset(b.cells()) {
                        continue;
                    }
                    debug_assert!(
                        b.count() >= a.count(),
                        "subset sentence {} claims more mines than its superset {}",
                        a,
                        b
                    );
                    let cells: BTreeSet<Cell> =
                        b.cells().difference(a.cells()).copied().collect();
                    let count = b.count().saturating_sub(a.count());
                    let sentence = Sentence::new(cells, count);
                    if !self.knowledge.contains(&sentence) && !derived.contains(&sentence) {
                        derived.push(sentence);
                    }
                }
            }
            if !derived.is_empty() {
                progressed = true;
                self.knowledge.append(&mut derived);
            }

            if !progressed {
                break;
            }
        }
    }

    /// A cell proven safe and not yet probed, lowest row then column.
    /// Does not mutate any state.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes
            .iter()
            .find(|c| !self.moves_made.contains(c))
            .copied()
    }

    /// A uniformly random cell that has not been probed and is not a
    /// known mine, or `None` once no such cell remains.
    pub fn make_random_move(&mut self) -> Option<Cell> {
        let choices: Vec<Cell> = Cell::all(self.height, self.width)
            .filter(|c| !self.moves_made.contains(c) && !self.mines.contains(c))
            .collect();
        self.rng.choose(&choices).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn set(coords: &[(usize, usize)]) -> BTreeSet<Cell> {
        coords.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn zero_count_probe_clears_the_neighborhood() {
        let mut agent = Agent::with_seed(3, 3, 0);
        agent.add_knowledge(Cell::new(1, 1), 0);

        // The probed cell and all eight neighbors are proven safe,
        // and the count-zero sentence resolves away entirely.
        assert_eq!(agent.known_safes().len(), 9);
        assert!(agent.known_mines().is_empty());
        assert_eq!(agent.knowledge_len(), 0);
    }

    #[test]
    fn saturated_count_probe_condemns_the_neighborhood() {
        let mut agent = Agent::with_seed(3, 3, 0);
        agent.add_knowledge(Cell::new(1, 1), 8);

        assert_eq!(agent.known_mines().len(), 8);
        assert_eq!(agent.known_safes(), &set(&[(1, 1)]));
    }

    #[test]
    fn subset_resolution_derives_the_difference() {
        let mut agent = Agent::with_seed(3, 3, 0);
        agent
            .knowledge
            .push(Sentence::new(set(&[(0, 0), (0, 1)]), 1));
        agent
            .knowledge
            .push(Sentence::new(set(&[(0, 0), (0, 1), (0, 2)]), 2));
        agent.saturate();

        // {(0,0),(0,1)}=1 subset of {(0,0),(0,1),(0,2)}=2 resolves to
        // {(0,2)}=1, which in turn proves (0,2) a mine.
        assert!(agent.known_mines().contains(&Cell::new(0, 2)));
        assert!(!agent.known_mines().contains(&Cell::new(0, 0)));
        assert!(!agent.known_mines().contains(&Cell::new(0, 1)));
    }

    #[test]
    fn saturation_chains_across_rounds() {
        // {x}=1 proves x; removing x from {x,y}=1 leaves {y}=0, which
        // only a second round can turn into "y is safe".
        let mut agent = Agent::with_seed(4, 4, 0);
        agent.knowledge.push(Sentence::new(set(&[(2, 2)]), 1));
        agent
            .knowledge
            .push(Sentence::new(set(&[(2, 2), (3, 3)]), 1));
        agent.saturate();

        assert!(agent.known_mines().contains(&Cell::new(2, 2)));
        assert!(agent.known_safes().contains(&Cell::new(3, 3)));
        assert_eq!(agent.knowledge_len(), 0);
    }

    #[test]
    fn corner_mine_is_deduced_without_probing_it() {
        // 8x8 board, single mine at (0,0). Probing three of its
        // neighbors pins it down exactly.
        let board = Board::from_mines(8, 8, [Cell::new(0, 0)]);
        let mut agent = Agent::with_seed(8, 8, 0);

        for cell in [Cell::new(1, 1), Cell::new(0, 1), Cell::new(1, 0)] {
            agent.add_knowledge(cell, board.nearby_mines(cell));
        }

        assert!(agent.known_mines().contains(&Cell::new(0, 0)));
        assert!(!agent.moves_made().contains(&Cell::new(0, 0)));
    }

    #[test]
    fn safe_move_prefers_lowest_coordinates_and_skips_probed() {
        let mut agent = Agent::with_seed(4, 4, 0);
        agent.add_knowledge(Cell::new(2, 2), 0);

        // (1,1) is the lowest unprobed safe cell after probing (2,2)
        assert_eq!(agent.make_safe_move(), Some(Cell::new(1, 1)));

        // Exhaust the safe cells; afterwards there is nothing to offer
        while let Some(cell) = agent.make_safe_move() {
            agent.moves_made.insert(cell);
        }
        assert_eq!(agent.make_safe_move(), None);
        assert!(agent
            .known_safes()
            .iter()
            .all(|c| agent.moves_made().contains(c)));
    }

    #[test]
    fn random_move_avoids_probed_cells_and_known_mines() {
        let mut agent = Agent::with_seed(2, 2, 123);
        agent.add_knowledge(Cell::new(0, 0), 3);

        // All three neighbors are mines now; nothing is left to probe.
        assert_eq!(agent.make_random_move(), None);

        let mut agent = Agent::with_seed(3, 3, 123);
        agent.add_knowledge(Cell::new(0, 0), 1);
        for _ in 0..50 {
            let cell = agent.make_random_move().unwrap();
            assert!(!agent.moves_made().contains(&cell));
            assert!(!agent.known_mines().contains(&cell));
        }
    }

    #[test]
    fn duplicate_reports_do_not_bloat_the_base() {
        let mut agent = Agent::with_seed(4, 4, 0);
        agent.add_knowledge(Cell::new(0, 0), 1);
        let len = agent.knowledge_len();
        agent.add_knowledge(Cell::new(0, 0), 1);
        assert_eq!(agent.knowledge_len(), len);
    }

    #[test]
    fn full_board_probing_identifies_every_mine() {
        // Scattered layout: every mine touches at least one safe
        // cell, so full information must pin down the exact mine set.
        let mines = set(&[
            (0, 0),
            (1, 3),
            (2, 5),
            (3, 1),
            (4, 6),
            (5, 3),
            (6, 0),
            (7, 7),
        ]);
        let board = Board::from_mines(8, 8, mines.iter().copied());
        let mut agent = Agent::with_seed(8, 8, 5);

        // Probe safe cells as the agent proves them; when it is stuck,
        // feed it the next unprobed non-mine cell (a lucky guess).
        loop {
            let next = agent.make_safe_move().or_else(|| {
                Cell::all(8, 8)
                    .find(|c| !board.is_mine(*c) && !agent.moves_made().contains(c))
            });
            let Some(cell) = next else { break };
            agent.add_knowledge(cell, board.nearby_mines(cell));
        }

        assert_eq!(agent.known_mines(), &mines);
        assert_eq!(agent.moves_made().len(), 64 - mines.len());
    }
}
