//! Player state: position, energy and running.

use crate::game::{Coord, Grid};

/// Energy ceiling (and starting energy).
pub const MAX_ENERGY: f64 = 100.0;

/// Energy spent per tick while running.
pub const RUN_DRAIN: f64 = 1.0;

/// Energy recovered per tick while not running.
pub const REGEN: f64 = 0.5;

/// The player-controlled actor.
///
/// Every move is a single-tile step; running only changes how energy
/// evolves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Current position.
    position: Coord,
    /// Stamina in `[0, MAX_ENERGY]`.
    energy: f64,
    /// Whether the player is running.
    running: bool,
}

impl Player {
    /// Create a rested player at `position`.
    #[must_use]
    pub const fn new(position: Coord) -> Self {
        Self {
            position,
            energy: MAX_ENERGY,
            running: false,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// Current energy.
    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Whether the player is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Step by `(d_row, d_col)` if the destination is on the grid and open
    /// to the player.
    ///
    /// Returns `true` if the player moved. A refused move changes nothing.
    pub fn step(&mut self, d_row: i32, d_col: i32, grid: &Grid) -> bool {
        let Some(target) = self.position.offset(d_row, d_col, grid.rows(), grid.cols()) else {
            return false;
        };
        if !grid.player_can_enter(target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Start running, if there is any energy left.
    pub fn start_running(&mut self) {
        if self.energy > 0.0 {
            self.running = true;
        }
    }

    /// Stop running.
    pub fn stop_running(&mut self) {
        self.running = false;
    }

    /// Advance energy by one tick.
    ///
    /// Running drains energy and stops the run once it is empty; otherwise
    /// energy regenerates up to the ceiling. Exactly one of the two happens.
    pub fn tick(&mut self) {
        if self.running {
            self.energy = (self.energy - RUN_DRAIN).max(0.0);
            if self.energy <= 0.0 {
                self.running = false;
            }
        } else if self.energy < MAX_ENERGY {
            self.energy = (self.energy + REGEN).min(MAX_ENERGY);
        }
    }

    /// Relocate the player without terrain checks.
    ///
    /// Used when setting up scenarios; regular movement goes through
    /// [`Player::step`].
    pub fn place(&mut self, position: Coord) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TileType;

    fn assert_energy(player: &Player, expected: f64) {
        assert!(
            (player.energy() - expected).abs() < f64::EPSILON,
            "energy {} != {expected}",
            player.energy()
        );
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new(Coord::new(0, 0));
        assert_eq!(player.position(), Coord::new(0, 0));
        assert_energy(&player, 100.0);
        assert!(!player.is_running());
    }

    #[test]
    fn test_step_respects_bounds_and_terrain() {
        let mut grid = Grid::filled(3, 3, TileType::Open).unwrap();
        grid.set(Coord::new(1, 0), TileType::VineOnly);
        grid.set(Coord::new(0, 1), TileType::TunnelOnly);

        let mut player = Player::new(Coord::new(0, 0));
        assert!(!player.step(-1, 0, &grid));
        assert!(!player.step(0, -1, &grid));
        assert!(!player.step(1, 0, &grid)); // vines
        assert_eq!(player.position(), Coord::new(0, 0));

        assert!(player.step(0, 1, &grid)); // tunnel
        assert_eq!(player.position(), Coord::new(0, 1));
    }

    #[test]
    fn test_running_drains_until_empty() {
        let mut player = Player::new(Coord::new(0, 0));
        player.start_running();
        assert!(player.is_running());

        player.tick();
        assert_energy(&player, 99.0);

        for _ in 0..99 {
            player.tick();
        }
        assert_energy(&player, 0.0);
        assert!(!player.is_running());

        // Cannot start again on an empty tank.
        player.start_running();
        assert!(!player.is_running());
    }

    #[test]
    fn test_regen_caps_at_max() {
        let mut player = Player::new(Coord::new(0, 0));
        player.start_running();
        player.tick();
        player.tick();
        player.stop_running();
        assert_energy(&player, 98.0);

        player.tick();
        assert_energy(&player, 98.5);
        for _ in 0..10 {
            player.tick();
        }
        assert_energy(&player, 100.0);
    }

    #[test]
    fn test_stop_running_is_idempotent() {
        let mut player = Player::new(Coord::new(0, 0));
        player.start_running();
        for _ in 0..10 {
            player.tick();
        }
        player.stop_running();
        player.stop_running();
        player.tick();
        // A single regeneration step, not two.
        assert_energy(&player, 90.5);
    }
}
