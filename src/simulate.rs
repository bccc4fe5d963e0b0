//! Batches of headless sessions played by the autopilot.
//!
//! Games are independent, so a batch runs them in parallel with a
//! fold/reduce: each worker accumulates its own [`SimulationSummary`] and the
//! partial summaries are merged at the end.

use rayon::prelude::*;
use serde::Serialize;

use crate::autopilot::Autopilot;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::game::{GameSession, SessionState, SessionSummary};

/// Default tick limit per game (two simulated minutes at 30 Hz).
pub const DEFAULT_MAX_TICKS: u64 = 3600;

/// Aggregated results of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// Games played.
    pub games: u64,
    /// Games won.
    pub wins: u64,
    /// Games lost.
    pub losses: u64,
    /// Games still active at the tick limit.
    pub timeouts: u64,
    /// Sum of final scores.
    pub total_score: i64,
    /// Best final score.
    pub best_score: Option<i64>,
    /// Worst final score.
    pub worst_score: Option<i64>,
    /// Ticks played across all games.
    pub total_frames: u64,
}

impl SimulationSummary {
    /// Add one finished game.
    pub fn add(&mut self, game: &SessionSummary) {
        self.games += 1;
        match game.state {
            SessionState::Won => self.wins += 1,
            SessionState::Lost => self.losses += 1,
            SessionState::Active | SessionState::Abandoned => self.timeouts += 1,
        }
        self.total_score += game.score;
        self.best_score = Some(self.best_score.map_or(game.score, |s| s.max(game.score)));
        self.worst_score = Some(self.worst_score.map_or(game.score, |s| s.min(game.score)));
        self.total_frames += game.frames;
    }

    /// Merge another partial summary into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.wins += other.wins;
        self.losses += other.losses;
        self.timeouts += other.timeouts;
        self.total_score += other.total_score;
        self.best_score = match (self.best_score, other.best_score) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.worst_score = match (self.worst_score, other.worst_score) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.total_frames += other.total_frames;
    }

    /// Mean final score, or 0 for an empty batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        }
    }

    /// Fraction of games won, or 0 for an empty batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Play one session with the autopilot until it ends or `max_ticks` pass.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn run_game(seed: u64, config: &GameConfig, max_ticks: u64) -> Result<SessionSummary, ConfigError> {
    let mut session = GameSession::new(*config, seed)?;
    let mut pilot = Autopilot::new();

    while session.frames() < max_ticks {
        let commands = pilot.decide(&session.snapshot());
        if session.tick(&commands).is_terminal() {
            break;
        }
    }

    Ok(session.summary())
}

/// Play `games` sessions seeded `base_seed`, `base_seed + 1`, ... in
/// parallel and aggregate the results.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn run_batch(
    base_seed: u64,
    games: u64,
    config: &GameConfig,
    max_ticks: u64,
) -> Result<SimulationSummary, ConfigError> {
    config.validate()?;

    let summary = (0..games)
        .into_par_iter()
        .fold(SimulationSummary::default, |mut local, i| {
            // The config was validated above, so every game starts.
            if let Ok(game) = run_game(base_seed.wrapping_add(i), config, max_ticks) {
                local.add(&game);
            }
            local
        })
        .reduce(SimulationSummary::default, |mut a, b| {
            a.merge(&b);
            a
        });

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    #[test]
    fn test_run_game_is_deterministic() {
        let config = GameConfig::default();
        let a = run_game(77, &config, 600).unwrap();
        let b = run_game(77, &config, 600).unwrap();
        assert_eq!(a, b);
        assert!(a.frames <= 600);
    }

    #[test]
    fn test_tick_limit_is_a_timeout() {
        let config = GameConfig::default();
        let game = run_game(3, &config, 0).unwrap();
        assert_eq!(game.frames, 0);
        assert_eq!(game.state, SessionState::Active);

        let mut summary = SimulationSummary::default();
        summary.add(&game);
        assert_eq!(summary.timeouts, 1);
    }

    #[test]
    fn test_batch_counts_add_up() {
        let config = GameConfig {
            mode: Mode::Hunter,
            ..GameConfig::default()
        };
        let summary = run_batch(100, 12, &config, 900).unwrap();
        assert_eq!(summary.games, 12);
        assert_eq!(summary.wins + summary.losses + summary.timeouts, 12);
        assert!(summary.best_score >= summary.worst_score);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let config = GameConfig::default();
        let parallel = run_batch(5, 8, &config, 300).unwrap();

        let mut sequential = SimulationSummary::default();
        for i in 0..8 {
            sequential.add(&run_game(5 + i, &config, 300).unwrap());
        }
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_batch_rejects_bad_config() {
        let config = GameConfig {
            frame_rate: 0,
            ..GameConfig::default()
        };
        assert!(run_batch(0, 4, &config, 10).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let summary = run_batch(0, 0, &GameConfig::default(), 10).unwrap();
        assert_eq!(summary.games, 0);
        assert!(summary.mean_score().abs() < f64::EPSILON);
        assert_eq!(summary.best_score, None);
    }

    #[test]
    fn test_merge() {
        let mut a = SimulationSummary {
            games: 2,
            wins: 1,
            losses: 1,
            total_score: 300,
            best_score: Some(250),
            worst_score: Some(50),
            ..SimulationSummary::default()
        };
        let b = SimulationSummary {
            games: 1,
            timeouts: 1,
            total_score: -10,
            best_score: Some(-10),
            worst_score: Some(-10),
            ..SimulationSummary::default()
        };
        a.merge(&b);
        assert_eq!(a.games, 3);
        assert_eq!(a.total_score, 290);
        assert_eq!(a.best_score, Some(250));
        assert_eq!(a.worst_score, Some(-10));
        assert!((a.win_rate() - 1.0 / 3.0).abs() < 1e-12);
    }
}
