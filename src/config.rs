//! Session configuration: game mode, difficulty presets and grid settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reference grid edge length.
pub const DEFAULT_GRID_SIZE: u16 = 15;

/// Reference simulation rate (ticks per second).
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Which side of the chase the player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Reach the exit while enemies chase the player.
    #[default]
    Escape,
    /// Catch fleeing enemies before they reach the exit.
    Hunter,
}

impl Mode {
    /// All modes, in menu order.
    pub const ALL: [Mode; 2] = [Mode::Escape, Mode::Hunter];

    /// Lowercase key used in file names and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Mode::Escape => "escape",
            Mode::Hunter => "hunter",
        }
    }

    /// Score a session starts with.
    ///
    /// Hunter starts with a cushion because its score decays and hitting
    /// zero loses the game.
    #[must_use]
    pub const fn starting_score(self) -> i64 {
        match self {
            Mode::Escape => 0,
            Mode::Hunter => 100,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "escape" => Ok(Mode::Escape),
            "hunter" => Ok(Mode::Hunter),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Enemy count and cadence for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyPreset {
    /// Number of enemies spawned at session start.
    pub enemy_count: usize,
    /// Enemies move once every this many ticks.
    pub frames_per_move: u32,
}

/// Difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Two slow enemies.
    Easy,
    /// Three enemies at normal pace.
    #[default]
    Medium,
    /// Four fast enemies.
    Hard,
}

impl Difficulty {
    /// All difficulties, in menu order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Lowercase key used on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Enemy count and speed for this level.
    #[must_use]
    pub const fn preset(self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                enemy_count: 2,
                frames_per_move: 12,
            },
            Difficulty::Medium => DifficultyPreset {
                enemy_count: 3,
                frames_per_move: 8,
            },
            Difficulty::Hard => DifficultyPreset {
                enemy_count: 4,
                frames_per_move: 4,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Configuration for a single session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Grid rows.
    pub rows: u16,
    /// Grid columns.
    pub cols: u16,
    /// Ticks per simulated second.
    pub frame_rate: u32,
    /// Game mode.
    pub mode: Mode,
    /// Difficulty level.
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_SIZE,
            cols: DEFAULT_GRID_SIZE,
            frame_rate: DEFAULT_FRAME_RATE,
            mode: Mode::default(),
            difficulty: Difficulty::default(),
        }
    }
}

impl GameConfig {
    /// Check that the configuration describes a playable session.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or a single cell, or if the
    /// frame rate is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows == 1 && self.cols == 1 {
            return Err(ConfigError::DegenerateGrid);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }

    /// Enemy preset for the configured difficulty.
    #[must_use]
    pub const fn preset(&self) -> DifficultyPreset {
        self.difficulty.preset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_reference_table() {
        assert_eq!(Difficulty::Easy.preset().enemy_count, 2);
        assert_eq!(Difficulty::Easy.preset().frames_per_move, 12);
        assert_eq!(Difficulty::Medium.preset().enemy_count, 3);
        assert_eq!(Difficulty::Medium.preset().frames_per_move, 8);
        assert_eq!(Difficulty::Hard.preset().enemy_count, 4);
        assert_eq!(Difficulty::Hard.preset().frames_per_move, 4);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("hunter".parse::<Mode>(), Ok(Mode::Hunter));
        assert_eq!(" Escape ".parse::<Mode>(), Ok(Mode::Escape));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!(matches!(
            "insane".parse::<Difficulty>(),
            Err(ConfigError::UnknownDifficulty(_))
        ));
        assert!(matches!("chase".parse::<Mode>(), Err(ConfigError::UnknownMode(_))));
    }

    #[test]
    fn test_key_round_trips_through_display() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_starting_score() {
        assert_eq!(Mode::Escape.starting_score(), 0);
        assert_eq!(Mode::Hunter.starting_score(), 100);
    }

    #[test]
    fn test_validate() {
        assert!(GameConfig::default().validate().is_ok());

        let config = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 15 })
        );

        let config = GameConfig {
            rows: 1,
            cols: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DegenerateGrid));

        let config = GameConfig {
            frame_rate: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameRate));

        let corridor = GameConfig {
            rows: 1,
            cols: 9,
            ..GameConfig::default()
        };
        assert!(corridor.validate().is_ok());
    }
}
