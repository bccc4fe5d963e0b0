//! Scripted player for headless sessions and benchmarks.
//!
//! The autopilot reads a [`Snapshot`] and answers with the commands for the
//! next tick. It steps greedily toward its target (the exit in Escape, the
//! nearest enemy in Hunter), preferring tiles it has visited least so it
//! does not pace forever in a dead end. It drops a trap whenever one is
//! available and runs while it has energy to spare.

use std::collections::HashMap;

use crate::config::Mode;
use crate::game::{Command, Coord, Direction, Snapshot};

/// Energy above which the autopilot keeps running.
pub const RUN_ABOVE_ENERGY: f64 = 50.0;

/// Greedy scripted player. Keep one per session.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// How often each tile has been stood on.
    visits: HashMap<Coord, u32>,
}

impl Autopilot {
    /// Fresh autopilot with no memory of the maze.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for the next tick.
    pub fn decide(&mut self, snapshot: &Snapshot<'_>) -> Vec<Command> {
        let mut commands = Vec::with_capacity(3);

        *self.visits.entry(snapshot.player).or_insert(0) += 1;

        if snapshot.energy > RUN_ABOVE_ENERGY {
            if !snapshot.running {
                commands.push(Command::StartRun);
            }
        } else if snapshot.running {
            commands.push(Command::StopRun);
        }

        if snapshot.trap_ready {
            commands.push(Command::PlaceTrap);
        }

        if let Some(target) = target(snapshot)
            && let Some(direction) = self.next_step(snapshot, target)
        {
            commands.push(Command::step(direction));
        }

        commands
    }

    /// Least-visited legal step, closest to `target` among equals.
    /// Ties keep the up, down, left, right order.
    fn next_step(&self, snapshot: &Snapshot<'_>, target: Coord) -> Option<Direction> {
        let grid = snapshot.grid;
        let mut best: Option<(u32, u32, Direction)> = None;

        for direction in Direction::ALL {
            let (d_row, d_col) = direction.delta();
            let Some(next) = snapshot.player.offset(d_row, d_col, grid.rows(), grid.cols()) else {
                continue;
            };
            if !grid.player_can_enter(next) {
                continue;
            }
            let visits = self.visits.get(&next).copied().unwrap_or(0);
            let distance = next.manhattan(target);
            if best.is_none_or(|(v, d, _)| (visits, distance) < (v, d)) {
                best = Some((visits, distance, direction));
            }
        }

        best.map(|(_, _, direction)| direction)
    }
}

/// Where the autopilot is heading.
fn target(snapshot: &Snapshot<'_>) -> Option<Coord> {
    match snapshot.mode {
        Mode::Escape => Some(snapshot.exit),
        Mode::Hunter => snapshot
            .enemies
            .iter()
            .copied()
            .min_by_key(|enemy| enemy.manhattan(snapshot.player)),
    }
}
