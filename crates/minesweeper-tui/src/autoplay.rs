use crate::game::{Game, Status};
use serde::Serialize;

/// Aggregate results of a headless batch run. In-memory only; the
/// summary is printed once at the end of the session.
#[derive(Debug, Default, Serialize)]
pub struct SessionSummary {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub safe_probes: usize,
    pub random_probes: usize,
    /// Mines the agent had proven by the end of each game, summed.
    pub mines_identified: usize,
}

impl SessionSummary {
    pub fn win_rate(&self) -> f64 {
        if self.games > 0 {
            self.wins as f64 / self.games as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Play `games` full games with the agent and aggregate the results.
/// Game seeds derive from `base_seed` so a batch is reproducible.
pub fn run(height: usize, width: usize, mines: usize, games: usize, base_seed: u64) -> SessionSummary {
    let mut summary = SessionSummary {
        height,
        width,
        mines,
        ..SessionSummary::default()
    };

    for i in 0..games {
        let mut game = Game::new(height, width, mines, base_seed.wrapping_add(i as u64));
        while game.status() == Status::Playing {
            if game.ai_move().is_none() {
                break;
            }
        }

        summary.games += 1;
        match game.status() {
            Status::Won => summary.wins += 1,
            Status::Lost => summary.losses += 1,
            Status::Playing => {}
        }
        summary.safe_probes += game.safe_probes();
        summary.random_probes += game.random_probes();
        summary.mines_identified += game.agent().known_mines().len();
    }

    summary
}

/// Render the summary for stdout, as JSON or a short text block.
pub fn report(summary: &SessionSummary, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(summary).unwrap_or_default()
    } else {
        format!(
            "{}x{} board, {} mines\n\
             games: {}  wins: {}  losses: {}  ({:.1}% win rate)\n\
             probes: {} safe, {} guessed\n\
             mines identified: {}",
            summary.height,
            summary.width,
            summary.mines,
            summary.games,
            summary.wins,
            summary.losses,
            summary.win_rate(),
            summary.safe_probes,
            summary.random_probes,
            summary.mines_identified,
        )
    }
}
