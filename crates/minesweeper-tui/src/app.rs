use crate::game::{Game, MoveKind, Status};
use crossterm::event::{KeyCode, KeyEvent};
use minesweeper_core::Cell;

/// Result of handling a key press.
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state.
pub struct App {
    /// Current game
    pub game: Game,
    /// Currently selected cell
    pub cursor: Cell,
    /// Whether the agent plays by itself on every tick
    pub autoplay: bool,
    /// Message line under the board
    pub message: Option<String>,
    height: usize,
    width: usize,
    mines: usize,
}

impl App {
    pub fn new(height: usize, width: usize, mines: usize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            game: Game::new(height, width, mines, seed),
            cursor: Cell::new(0, 0),
            autoplay: false,
            message: Some(format!("seed {}", seed)),
            height,
            width,
            mines,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,

            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor.row = self.cursor.row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor.row = (self.cursor.row + 1).min(self.height - 1);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor.col = (self.cursor.col + 1).min(self.width - 1);
            }

            KeyCode::Char(' ') | KeyCode::Enter => {
                self.probe_cursor();
            }
            KeyCode::Char('f') => {
                self.game.toggle_flag(self.cursor);
            }
            KeyCode::Char('a') => {
                self.agent_step();
            }
            KeyCode::Char('p') => {
                self.autoplay = !self.autoplay;
                if self.autoplay {
                    self.message = Some("autoplay on".to_string());
                }
            }
            KeyCode::Char('n') => {
                self.new_game();
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Advance autoplay by one agent move.
    pub fn tick(&mut self) {
        if !self.autoplay {
            return;
        }
        if self.game.status() != Status::Playing {
            self.autoplay = false;
            return;
        }
        self.agent_step();
    }

    fn probe_cursor(&mut self) {
        match self.game.probe(self.cursor) {
            Status::Lost => self.message = Some("boom. press n for a new game".to_string()),
            Status::Won => self.message = Some("cleared! press n for a new game".to_string()),
            Status::Playing => self.message = None,
        }
    }

    fn agent_step(&mut self) {
        match self.game.ai_move() {
            Some((cell, kind)) => {
                self.cursor = cell;
                let kind = match kind {
                    MoveKind::Safe => "safe",
                    MoveKind::Random => "guess",
                };
                self.message = match self.game.status() {
                    Status::Lost => Some(format!("agent probed {} ({}) -- boom", cell, kind)),
                    Status::Won => Some(format!("agent probed {} ({}) -- cleared!", cell, kind)),
                    Status::Playing => Some(format!("agent probed {} ({})", cell, kind)),
                };
            }
            None => self.message = Some("no moves left".to_string()),
        }
    }

    fn new_game(&mut self) {
        let seed: u64 = rand::random();
        self.game = Game::new(self.height, self.width, self.mines, seed);
        self.cursor = Cell::new(0, 0);
        self.autoplay = false;
        self.message = Some(format!("seed {}", seed));
    }
}
