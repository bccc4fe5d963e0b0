//! Game layer for Labyrinth.
//!
//! Implements the maze and the rules on top of it:
//! - Terrain with per-actor passability (vines, tunnels, walls)
//! - Maze generation with a guaranteed open corridor
//! - Player energy and running
//! - Enemy movement (seek, flee, wander)
//! - Traps with a shared cooldown
//! - The per-tick rules engine for Escape and Hunter

mod clock;
mod enemy;
mod grid;
pub mod invariants;
pub mod mazegen;
mod player;
pub mod session;
mod terrain;
mod traps;

pub use clock::FrameClock;
pub use enemy::{Behavior, Enemy, SEEK_GREEDY_PROBABILITY};
pub use grid::{Coord, Direction, Grid};
pub use player::{MAX_ENERGY, Player, REGEN, RUN_DRAIN};
pub use session::{Command, GameSession, SessionState, SessionSummary, Snapshot};
pub use terrain::TileType;
pub use traps::{MAX_TRAPS, TRAP_COOLDOWN_SECS, TrapManager};
