//! Per-mode top-5 leaderboards stored as plain text.
//!
//! Each mode has its own file (`top5_escape.txt`, `top5_hunter.txt`) holding
//! one `name,score` line per entry, best first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::Mode;
use crate::error::ScoreError;

/// Entries kept per leaderboard.
pub const TOP_N: usize = 5;

/// Name recorded when the player leaves it empty.
pub const DEFAULT_NAME: &str = "Player";

/// Longest name stored, in characters.
pub const MAX_NAME_LEN: usize = 12;

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name.
    pub name: String,
    /// Final score.
    pub score: i64,
}

impl ScoreEntry {
    /// Create an entry, cleaning up the name.
    #[must_use]
    pub fn new(name: &str, score: i64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
        }
    }
}

/// Best scores for one mode, sorted descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Empty leaderboard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries, best first.
    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Check if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the file format. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Lines that do not split into exactly two fields are skipped with a
    /// warning. Returns [`ScoreError::Malformed`] for a score that is not an
    /// integer.
    pub fn parse(text: &str) -> Result<Self, ScoreError> {
        let mut board = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || ScoreError::Malformed {
                line: idx + 1,
                content: line.to_string(),
            };
            let mut parts = line.split(',');
            let (Some(name), Some(score), None) = (parts.next(), parts.next(), parts.next()) else {
                warn!("skipping leaderboard line {}: {line:?}", idx + 1);
                continue;
            };
            let score = score.trim().parse().map_err(|_| malformed())?;
            board.entries.push(ScoreEntry {
                name: name.to_string(),
                score,
            });
        }
        board.normalize();
        Ok(board)
    }

    /// Render in the file format, one line per entry.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{},{}\n", e.name, e.score))
            .collect()
    }

    /// Add an entry, keeping only the best [`TOP_N`].
    ///
    /// Returns the entry's rank (0-based) if it made the cut.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        // Ties go to the entry already on the board.
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        if rank >= TOP_N {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(TOP_N);
        Some(rank)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(TOP_N);
    }
}

/// File name of a mode's leaderboard.
#[must_use]
pub fn file_name(mode: Mode) -> String {
    format!("top5_{}.txt", mode.key())
}

/// Full path of a mode's leaderboard inside `dir`.
#[must_use]
pub fn path(dir: &Path, mode: Mode) -> PathBuf {
    dir.join(file_name(mode))
}

/// Clean a player name for storage.
///
/// Commas and control characters are dropped, surrounding whitespace is
/// trimmed and the result is cut to [`MAX_NAME_LEN`] characters. An empty
/// result becomes [`DEFAULT_NAME`].
#[must_use]
pub fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_control())
        .collect();
    let name: String = cleaned.trim().chars().take(MAX_NAME_LEN).collect();
    let name = name.trim_end();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Load a mode's leaderboard. A missing file is an empty leaderboard.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(dir: &Path, mode: Mode) -> Result<Leaderboard, ScoreError> {
    match fs::read_to_string(path(dir, mode)) {
        Ok(text) => Leaderboard::parse(&text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Leaderboard::new()),
        Err(e) => Err(e.into()),
    }
}

/// Load a mode's leaderboard, treating any failure as empty.
#[must_use]
pub fn load_or_empty(dir: &Path, mode: Mode) -> Leaderboard {
    load(dir, mode).unwrap_or_else(|e| {
        warn!("ignoring {} leaderboard: {e}", mode.key());
        Leaderboard::new()
    })
}

/// Write a mode's leaderboard, replacing the file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(dir: &Path, mode: Mode, board: &Leaderboard) -> Result<(), ScoreError> {
    fs::write(path(dir, mode), board.to_text())?;
    Ok(())
}

/// Record a finished game on its mode's leaderboard.
///
/// An unreadable existing file is treated as empty and overwritten.
/// Returns the updated leaderboard.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn record(dir: &Path, mode: Mode, name: &str, score: i64) -> Result<Leaderboard, ScoreError> {
    let mut board = load_or_empty(dir, mode);
    board.insert(ScoreEntry::new(name, score));
    save(dir, mode, &board)?;
    Ok(board)
}
