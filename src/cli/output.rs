//! Output formatting utilities for CLI.

use labyrinth::Mode;
use labyrinth::scores::{Leaderboard, ScoreEntry};
use labyrinth::simulate::SimulationSummary;
use serde::Serialize;

/// JSON-serializable leaderboard.
#[derive(Debug, Serialize)]
pub(super) struct JsonLeaderboard<'a> {
    /// Game mode.
    pub(super) mode: Mode,
    /// Entries, best first.
    pub(super) entries: &'a [ScoreEntry],
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulation {
    /// Starting seed.
    pub(super) base_seed: u64,
    /// Aggregated counts.
    #[serde(flatten)]
    pub(super) summary: SimulationSummary,
    /// Mean final score.
    pub(super) mean_score: f64,
    /// Fraction of games won.
    pub(super) win_rate: f64,
    /// Wall-clock seconds spent.
    pub(super) duration_secs: f64,
}

impl JsonSimulation {
    /// Create from a simulation summary.
    pub(super) fn from_summary(base_seed: u64, summary: SimulationSummary, duration_secs: f64) -> Self {
        Self {
            base_seed,
            summary,
            mean_score: summary.mean_score(),
            win_rate: summary.win_rate(),
            duration_secs,
        }
    }
}

/// Format a leaderboard as human-readable text.
pub(super) fn format_leaderboard(board: &Leaderboard, mode: Mode) -> String {
    let mut output = format!("Top 5 - {mode}\n");

    if board.is_empty() {
        output.push_str("  (no scores yet)\n");
        return output;
    }

    for (rank, entry) in board.entries().iter().enumerate() {
        output.push_str(&format!("  {}. {:<12} {:>6}\n", rank + 1, entry.name, entry.score));
    }

    output
}

/// Format simulation results as human-readable text.
pub(super) fn format_simulation(summary: &SimulationSummary, base_seed: u64) -> String {
    let mut output = String::new();

    output.push_str(&format!("Simulation ({} games, seeds from {base_seed})\n", summary.games));
    output.push_str(&format!(
        "  Won: {}  Lost: {}  Timed out: {}\n",
        summary.wins, summary.losses, summary.timeouts
    ));
    output.push_str(&format!("  Win rate: {:.1}%\n", summary.win_rate() * 100.0));
    output.push_str(&format!("  Mean score: {:.1}\n", summary.mean_score()));
    if let (Some(best), Some(worst)) = (summary.best_score, summary.worst_score) {
        output.push_str(&format!("  Best: {best}  Worst: {worst}\n"));
    }
    output.push_str(&format!("  Ticks played: {}\n", summary.total_frames));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_leaderboard() {
        let text = format_leaderboard(&Leaderboard::new(), Mode::Hunter);
        assert!(text.starts_with("Top 5 - hunter"));
        assert!(text.contains("no scores yet"));
    }

    #[test]
    fn test_format_leaderboard_ranks() {
        let mut board = Leaderboard::new();
        board.insert(ScoreEntry::new("ana", 120));
        board.insert(ScoreEntry::new("bob", 300));
        let text = format_leaderboard(&board, Mode::Escape);
        let bob = text.find("1. bob").unwrap();
        let ana = text.find("2. ana").unwrap();
        assert!(bob < ana);
    }

    #[test]
    fn test_format_simulation() {
        let summary = SimulationSummary {
            games: 4,
            wins: 3,
            losses: 1,
            total_score: 2000,
            best_score: Some(900),
            worst_score: Some(0),
            ..SimulationSummary::default()
        };
        let text = format_simulation(&summary, 7);
        assert!(text.contains("Won: 3"));
        assert!(text.contains("Win rate: 75.0%"));
        assert!(text.contains("Mean score: 500.0"));
    }
}
