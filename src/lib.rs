// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Labyrinth: a tick-driven maze game with two modes.
//!
//! In **Escape** the player crosses a randomly generated maze to the exit
//! while enemies chase them. In **Hunter** the roles flip: enemies flee,
//! the player scores by cornering them, and loses points whenever one
//! slips out through the exit.
//!
//! The simulation is deterministic for a given seed and input sequence:
//! all randomness comes from a per-session seeded generator and time is
//! counted in frames, never read from the wall clock.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │ CLI: play (TUI) · scores · simulate │
//! ├─────────────────────────────────────┤
//! │   Autopilot · Batch simulation      │
//! ├─────────────────────────────────────┤
//! │   Rules engine (GameSession)        │
//! ├─────────────────────────────────────┤
//! │   Grid · Player · Enemies · Traps   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use labyrinth::{Command, GameConfig, GameSession, SessionState};
//!
//! let mut session = GameSession::new(GameConfig::default(), 42).unwrap();
//! let state = session.tick(&[Command::MoveRight]);
//! assert!(matches!(state, SessionState::Active | SessionState::Lost));
//! ```

pub mod autopilot;
pub mod config;
pub mod error;
pub mod game;
pub mod scores;
pub mod simulate;

pub use config::{Difficulty, GameConfig, Mode};
pub use error::{ConfigError, ScoreError};

// Re-export key game types at crate root for convenience
pub use game::{
    Command, Coord, Direction, GameSession, Grid, SessionState, SessionSummary, Snapshot, TileType,
};
