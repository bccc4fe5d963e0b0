//! Error types for configuration and leaderboard persistence.
//!
//! The simulation itself never fails: out-of-bounds moves, blocked terrain,
//! enemies with nowhere to go and an empty trap list are all defined no-ops.
//! Only the edges of the crate (user-supplied configuration and the score
//! files) can produce errors.

use std::fmt;
use std::io;

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid has a zero dimension.
    EmptyGrid {
        /// Requested row count.
        rows: u16,
        /// Requested column count.
        cols: u16,
    },
    /// Grid has a single cell, so start and exit coincide.
    DegenerateGrid,
    /// Frame rate of zero.
    ZeroFrameRate,
    /// Unrecognised game mode key.
    UnknownMode(String),
    /// Unrecognised difficulty key.
    UnknownDifficulty(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must be non-empty, got {rows}x{cols}")
            }
            Self::DegenerateGrid => write!(f, "grid needs at least two cells"),
            Self::ZeroFrameRate => write!(f, "frame rate must be positive"),
            Self::UnknownMode(key) => {
                write!(f, "unknown mode '{key}' (expected escape or hunter)")
            }
            Self::UnknownDifficulty(key) => {
                write!(f, "unknown difficulty '{key}' (expected easy, medium or hard)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure reading or writing a leaderboard file.
#[derive(Debug)]
pub enum ScoreError {
    /// Underlying file I/O failed.
    Io(io::Error),
    /// A line did not match `name,score`.
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Offending content.
        content: String,
    },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "score file I/O failed: {e}"),
            Self::Malformed { line, content } => {
                write!(f, "malformed score entry on line {line}: '{content}'")
            }
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for ScoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
