use crate::app::App;
use crate::game::Status;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use minesweeper_core::Cell;
use std::io;

const BOARD_X: u16 = 2;
const BOARD_Y: u16 = 1;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    execute!(stdout, Hide, Clear(ClearType::All))?;

    let board = app.game.board();
    for row in 0..board.height() {
        for col in 0..board.width() {
            let cell = Cell::new(row, col);
            let (glyph, color) = cell_glyph(app, cell);
            let x = BOARD_X + col as u16 * 2;
            let y = BOARD_Y + row as u16;
            execute!(
                stdout,
                MoveTo(x, y),
                SetForegroundColor(color),
                Print(glyph)
            )?;
        }
    }

    // Cursor marker brackets around the selected cell
    let cx = BOARD_X + app.cursor.col as u16 * 2;
    let cy = BOARD_Y + app.cursor.row as u16;
    execute!(
        stdout,
        MoveTo(cx.saturating_sub(1), cy),
        SetForegroundColor(Color::White),
        Print("["),
        MoveTo(cx + 1, cy),
        Print("]")
    )?;

    render_panel(stdout, app)?;
    execute!(stdout, Show)?;
    Ok(())
}

/// Glyph and color for one cell in the current view.
fn cell_glyph(app: &App, cell: Cell) -> (String, Color) {
    let game = &app.game;
    let board = game.board();

    // After a loss, expose the mine field
    if game.status() == Status::Lost && board.is_mine(cell) {
        return if game.exploded() == Some(cell) {
            ("@".to_string(), Color::Red)
        } else {
            ("*".to_string(), Color::DarkRed)
        };
    }

    if board.is_flagged(cell) {
        return ("F".to_string(), Color::Yellow);
    }

    match game.revealed(cell) {
        Some(0) => (".".to_string(), Color::DarkGrey),
        Some(n) => (n.to_string(), count_color(n)),
        None => {
            // Hint overlay: what the agent has proven about covered cells
            if game.agent().known_mines().contains(&cell) {
                ("!".to_string(), Color::Magenta)
            } else if game.agent().known_safes().contains(&cell) {
                ("-".to_string(), Color::Green)
            } else {
                ("#".to_string(), Color::Grey)
            }
        }
    }
}

fn count_color(n: usize) -> Color {
    match n {
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Red,
        4 => Color::DarkBlue,
        5 => Color::DarkRed,
        _ => Color::Cyan,
    }
}

fn render_panel(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let game = &app.game;
    let board = game.board();
    let x = BOARD_X + board.width() as u16 * 2 + 4;

    let status = match game.status() {
        Status::Playing => "playing",
        Status::Won => "won",
        Status::Lost => "lost",
    };

    let lines = [
        format!("status   {}", status),
        format!("mines    {}", board.mine_count()),
        format!("flags    {}", board.flagged_count()),
        format!("revealed {}", game.revealed_count()),
        format!(
            "agent    {} safe / {} guessed, {} sentences",
            game.safe_probes(),
            game.random_probes(),
            game.agent().knowledge_len()
        ),
        String::new(),
        "arrows/hjkl move   space probe   f flag".to_string(),
        "a agent move   p autoplay   n new   q quit".to_string(),
    ];

    execute!(stdout, SetForegroundColor(Color::White))?;
    for (i, line) in lines.iter().enumerate() {
        execute!(stdout, MoveTo(x, BOARD_Y + i as u16), Print(line))?;
    }

    if let Some(ref msg) = app.message {
        execute!(
            stdout,
            MoveTo(BOARD_X, BOARD_Y + board.height() as u16 + 1),
            SetForegroundColor(Color::Yellow),
            Print(msg)
        )?;
    }
    Ok(())
}
