//! Enemy actors and their movement policies.
//!
//! Enemies move on a fixed cadence (once every `frames_per_move` ticks) and
//! only ever take single cardinal steps onto tiles that permit enemies. The
//! candidate moves are always enumerated up, down, left, right, and that
//! order breaks ties between equally good moves.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Coord, Grid};

/// Chance that a seeking enemy takes the greedy step instead of a random one.
pub const SEEK_GREEDY_PROBABILITY: f64 = 0.7;

/// Movement policy relative to a target (normally the player).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    /// Close the distance, with some randomness.
    Seek,
    /// Open the distance.
    Flee,
    /// Ignore the target and wander.
    Wander,
}

/// A roaming enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    /// Current position.
    position: Coord,
    /// Ticks since the last move.
    frame_counter: u32,
    /// Move once every this many ticks.
    frames_per_move: u32,
}

impl Enemy {
    /// Create an enemy that moves once every `frames_per_move` ticks.
    ///
    /// A cadence of zero is treated as one (move every tick).
    #[must_use]
    pub const fn new(position: Coord, frames_per_move: u32) -> Self {
        Self {
            position,
            frame_counter: 0,
            frames_per_move: if frames_per_move == 0 { 1 } else { frames_per_move },
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// Configured cadence.
    #[must_use]
    pub const fn frames_per_move(&self) -> u32 {
        self.frames_per_move
    }

    /// Relocate the enemy (respawn), without touching its cadence.
    pub fn place(&mut self, position: Coord) {
        self.position = position;
    }

    /// Count one tick and report whether the enemy may move on it.
    ///
    /// The counter resets each time it reaches the cadence, so an enemy with
    /// cadence `n` moves on ticks `n, 2n, 3n, ...`.
    pub fn should_move_this_tick(&mut self) -> bool {
        self.frame_counter += 1;
        if self.frame_counter >= self.frames_per_move {
            self.frame_counter = 0;
            true
        } else {
            false
        }
    }

    /// Neighbouring cells the enemy may step onto, in up/down/left/right
    /// order.
    ///
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    pub fn legal_moves(&self, grid: &Grid) -> ([Coord; 4], u8) {
        let (adjacent, count) = self.position.adjacent(grid.rows(), grid.cols());
        let mut result = [self.position; 4];
        let mut legal = 0u8;

        for &coord in &adjacent[..count as usize] {
            if grid.enemy_can_enter(coord) {
                result[legal as usize] = coord;
                legal += 1;
            }
        }

        (result, legal)
    }

    /// Run one tick of the given policy.
    ///
    /// Returns `true` if the enemy changed position.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        behavior: Behavior,
        target: Coord,
        grid: &Grid,
        rng: &mut R,
    ) -> bool {
        match behavior {
            Behavior::Seek => self.move_toward(target, grid, rng),
            Behavior::Flee => self.move_away(target, grid, rng),
            Behavior::Wander => self.wander(grid, rng),
        }
    }

    /// Chase `target`: usually the closest legal step, sometimes a random one.
    ///
    /// Stays put when boxed in.
    pub fn move_toward<R: Rng + ?Sized>(&mut self, target: Coord, grid: &Grid, rng: &mut R) -> bool {
        if !self.should_move_this_tick() {
            return false;
        }

        if rng.random_bool(SEEK_GREEDY_PROBABILITY) {
            let step = self.closest_move(target, grid);
            self.commit(step)
        } else {
            self.random_step(grid, rng)
        }
    }

    /// Run from `target`: the legal step that maximizes distance.
    ///
    /// Falls back to a random legal step when no candidate was chosen.
    pub fn move_away<R: Rng + ?Sized>(&mut self, target: Coord, grid: &Grid, rng: &mut R) -> bool {
        if !self.should_move_this_tick() {
            return false;
        }

        match self.farthest_move(target, grid) {
            Some(coord) => self.commit(Some(coord)),
            None => self.random_step(grid, rng),
        }
    }

    /// Take a uniformly random legal step, if there is one.
    pub fn wander<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        if !self.should_move_this_tick() {
            return false;
        }
        self.random_step(grid, rng)
    }

    /// Legal step that minimizes Manhattan distance to `target`.
    ///
    /// The first minimal candidate in up/down/left/right order wins.
    #[must_use]
    pub fn closest_move(&self, target: Coord, grid: &Grid) -> Option<Coord> {
        self.best_move(grid, |candidate, best| {
            candidate.manhattan(target) < best.manhattan(target)
        })
    }

    /// Legal step that maximizes Manhattan distance to `target`.
    ///
    /// The first maximal candidate in up/down/left/right order wins.
    #[must_use]
    pub fn farthest_move(&self, target: Coord, grid: &Grid) -> Option<Coord> {
        self.best_move(grid, |candidate, best| {
            candidate.manhattan(target) > best.manhattan(target)
        })
    }

    /// Scan legal moves in order, replacing the current pick only when
    /// `better(candidate, pick)` holds strictly.
    fn best_move<F>(&self, grid: &Grid, better: F) -> Option<Coord>
    where
        F: Fn(Coord, Coord) -> bool,
    {
        let (moves, count) = self.legal_moves(grid);
        moves[..count as usize]
            .iter()
            .copied()
            .fold(None, |pick, candidate| match pick {
                Some(current) if !better(candidate, current) => Some(current),
                _ => Some(candidate),
            })
    }

    fn random_step<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        let (moves, count) = self.legal_moves(grid);
        if count == 0 {
            return false;
        }
        let pick = moves[rng.random_range(0..usize::from(count))];
        self.commit(Some(pick))
    }

    fn commit(&mut self, destination: Option<Coord>) -> bool {
        match destination {
            Some(coord) if coord != self.position => {
                self.position = coord;
                true
            }
            _ => false,
        }
    }
}
