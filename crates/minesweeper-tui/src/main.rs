mod app;
mod autoplay;
mod game;
mod render;

use app::{App, AppAction};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use minesweeper_core::Difficulty;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Beginner,
    Intermediate,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

/// Minesweeper played by a knowledge-based agent.
#[derive(Parser)]
#[command(name = "minesweeper")]
struct Args {
    /// Board preset
    #[arg(long, value_enum, default_value = "beginner")]
    difficulty: DifficultyArg,

    /// Board height (overrides the preset; use with --width and --mines)
    #[arg(long)]
    height: Option<usize>,

    /// Board width
    #[arg(long)]
    width: Option<usize>,

    /// Number of mines
    #[arg(long)]
    mines: Option<usize>,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// Run the agent headlessly instead of the interactive UI
    #[arg(long)]
    solve: bool,

    /// Number of games to play with --solve
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Emit the --solve summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn board_shape(&self) -> (usize, usize, usize) {
        let (h, w, m) = Difficulty::from(self.difficulty).dimensions();
        (
            self.height.unwrap_or(h),
            self.width.unwrap_or(w),
            self.mines.unwrap_or(m),
        )
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let (height, width, mines) = args.board_shape();

    if args.solve {
        let base_seed = args.seed.unwrap_or_else(rand::random);
        let summary = autoplay::run(height, width, mines, args.games, base_seed);
        println!("{}", autoplay::report(&summary, args.json));
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, height, width, mines, args.seed);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(
    stdout: &mut io::Stdout,
    height: usize,
    width: usize,
    mines: usize,
    seed: Option<u64>,
) -> io::Result<()> {
    let mut app = App::new(height, width, mines, seed);
    let tick_rate = Duration::from_millis(120);

    loop {
        render::render(stdout, &app)?;
        stdout.flush()?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        } else {
            app.tick();
        }
    }

    Ok(())
}
