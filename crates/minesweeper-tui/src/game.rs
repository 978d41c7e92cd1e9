use minesweeper_core::{Agent, Board, Cell, SimpleRng};
use std::collections::BTreeMap;

/// Outcome state of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// How the agent picked its last probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Proven safe by the knowledge base.
    Safe,
    /// No safe cell was known; picked at random.
    Random,
}

/// One game: the hidden board plus the agent reasoning about it.
pub struct Game {
    board: Board,
    agent: Agent,
    status: Status,
    /// Probed cells with the neighbor count each probe reported.
    revealed: BTreeMap<Cell, usize>,
    /// The mine that ended the game, if it ended badly.
    exploded: Option<Cell>,
    safe_probes: usize,
    random_probes: usize,
}

impl Game {
    pub fn new(height: usize, width: usize, mines: usize, seed: u64) -> Self {
        let mut rng = SimpleRng::with_seed(seed);
        let board = Board::generate(height, width, mines, &mut rng);
        // Decorrelate the agent's guessing stream from mine placement
        let agent = Agent::with_seed(height, width, seed ^ 0x9e37_79b9_7f4a_7c15);
        Self {
            board,
            agent,
            status: Status::Playing,
            revealed: BTreeMap::new(),
            exploded: None,
            safe_probes: 0,
            random_probes: 0,
        }
    }

    /// Build a game over a fixed board (replays and tests).
    pub fn from_board(board: Board, agent_seed: u64) -> Self {
        let agent = Agent::with_seed(board.height(), board.width(), agent_seed);
        Self {
            board,
            agent,
            status: Status::Playing,
            revealed: BTreeMap::new(),
            exploded: None,
            safe_probes: 0,
            random_probes: 0,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Neighbor count shown for a probed cell, if it has been probed.
    pub fn revealed(&self, cell: Cell) -> Option<usize> {
        self.revealed.get(&cell).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn exploded(&self) -> Option<Cell> {
        self.exploded
    }

    pub fn safe_probes(&self) -> usize {
        self.safe_probes
    }

    pub fn random_probes(&self) -> usize {
        self.random_probes
    }

    /// Probe a cell. On a mine the game is lost; otherwise the
    /// neighbor count is fed to the agent and the board checked for a
    /// win (every non-mine cell probed).
    pub fn probe(&mut self, cell: Cell) -> Status {
        if self.status != Status::Playing
            || self.revealed.contains_key(&cell)
            || self.board.is_flagged(cell)
        {
            return self.status;
        }

        if self.board.is_mine(cell) {
            self.status = Status::Lost;
            self.exploded = Some(cell);
            return self.status;
        }

        let count = self.board.nearby_mines(cell);
        self.revealed.insert(cell, count);
        self.agent.add_knowledge(cell, count);

        let total = self.board.height() * self.board.width();
        if self.revealed.len() == total - self.board.mine_count() {
            self.status = Status::Won;
        }
        self.status
    }

    /// Let the agent pick and play one move: a proven-safe cell if one
    /// exists, else a random untried cell. `None` when the game is
    /// over or no cell is left to probe.
    pub fn ai_move(&mut self) -> Option<(Cell, MoveKind)> {
        if self.status != Status::Playing {
            return None;
        }
        if let Some(cell) = self.agent.make_safe_move() {
            self.safe_probes += 1;
            self.probe(cell);
            Some((cell, MoveKind::Safe))
        } else if let Some(cell) = self.agent.make_random_move() {
            self.random_probes += 1;
            self.probe(cell);
            Some((cell, MoveKind::Random))
        } else {
            None
        }
    }

    /// Toggle a flag on an unprobed cell while the game is running.
    pub fn toggle_flag(&mut self, cell: Cell) {
        if self.status == Status::Playing && !self.revealed.contains_key(&cell) {
            self.board.toggle_flag(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_mine_board() -> Board {
        Board::from_mines(4, 4, [Cell::new(0, 0)])
    }

    #[test]
    fn probing_a_mine_loses() {
        let mut game = Game::from_board(one_mine_board(), 0);
        assert_eq!(game.probe(Cell::new(0, 0)), Status::Lost);
        assert_eq!(game.exploded(), Some(Cell::new(0, 0)));

        // The game is over; further probes change nothing
        assert_eq!(game.probe(Cell::new(3, 3)), Status::Lost);
        assert_eq!(game.revealed_count(), 0);
    }

    #[test]
    fn probing_every_safe_cell_wins() {
        let mut game = Game::from_board(one_mine_board(), 0);
        for cell in Cell::all(4, 4).filter(|c| *c != Cell::new(0, 0)) {
            game.probe(cell);
        }
        assert_eq!(game.status(), Status::Won);
        assert_eq!(game.revealed_count(), 15);
    }

    #[test]
    fn probe_feeds_the_agent() {
        let mut game = Game::from_board(one_mine_board(), 0);
        game.probe(Cell::new(1, 1));
        assert_eq!(game.revealed(Cell::new(1, 1)), Some(1));
        assert!(game.agent().known_safes().contains(&Cell::new(1, 1)));
    }

    #[test]
    fn flagged_cells_cannot_be_probed() {
        let mut game = Game::from_board(one_mine_board(), 0);
        game.toggle_flag(Cell::new(2, 2));
        game.probe(Cell::new(2, 2));
        assert_eq!(game.revealed(Cell::new(2, 2)), None);

        game.toggle_flag(Cell::new(2, 2));
        game.probe(Cell::new(2, 2));
        assert_eq!(game.revealed(Cell::new(2, 2)), Some(0));
    }

    #[test]
    fn ai_plays_a_single_mine_board_to_the_end() {
        let mut game = Game::from_board(one_mine_board(), 17);
        while game.status() == Status::Playing {
            if game.ai_move().is_none() {
                break;
            }
        }
        // A win means every safe cell was probed, and with full
        // information the corner mine must have been identified. A
        // loss can only be a guess that hit the single mine.
        match game.status() {
            Status::Won => {
                assert!(game.agent().known_mines().contains(&Cell::new(0, 0)));
            }
            Status::Lost => assert_eq!(game.exploded(), Some(Cell::new(0, 0))),
            Status::Playing => panic!("game stalled with moves remaining"),
        }
        assert!(game.safe_probes() + game.random_probes() > 0);
    }
}
