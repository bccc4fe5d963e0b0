//! Trap placement with a shared cooldown.

use crate::game::{Coord, FrameClock};

/// Maximum number of traps on the board at once.
pub const MAX_TRAPS: usize = 3;

/// Seconds that must pass between two successful placements.
pub const TRAP_COOLDOWN_SECS: u64 = 5;

/// Tracks the active traps and the global placement cooldown.
///
/// Positions are kept in placement order. Placing a trap where one already
/// exists stacks a second trap on that tile; each enemy contact consumes
/// only one of them.
///
/// The cooldown is counted in whole frames of the session's [`FrameClock`],
/// so a placement exactly `TRAP_COOLDOWN_SECS * rate` frames after the
/// previous one is always allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrapManager {
    /// Active trap positions, oldest first.
    traps: Vec<Coord>,
    /// Frame of the last successful placement.
    last_placed: Option<u64>,
}

impl TrapManager {
    /// Create an empty manager with no cooldown pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            traps: Vec::new(),
            last_placed: None,
        }
    }

    /// Active trap positions, oldest first.
    #[must_use]
    pub fn traps(&self) -> &[Coord] {
        &self.traps
    }

    /// How many more traps fit on the board.
    #[must_use]
    pub fn remaining(&self) -> usize {
        MAX_TRAPS.saturating_sub(self.traps.len())
    }

    /// Length of the cooldown in frames at the clock's rate.
    #[must_use]
    pub fn cooldown_frames(clock: &FrameClock) -> u64 {
        TRAP_COOLDOWN_SECS * u64::from(clock.rate())
    }

    /// Frames until the cooldown allows another placement (0 when ready).
    #[must_use]
    pub fn cooldown_left(&self, clock: &FrameClock) -> u64 {
        self.last_placed.map_or(0, |at| {
            let waited = clock.frames().saturating_sub(at);
            Self::cooldown_frames(clock).saturating_sub(waited)
        })
    }

    /// Check whether a trap may be placed at the clock's current frame.
    #[must_use]
    pub fn can_place(&self, clock: &FrameClock) -> bool {
        self.traps.len() < MAX_TRAPS && self.cooldown_left(clock) == 0
    }

    /// Place a trap at `coord`, if allowed.
    ///
    /// Returns `true` if the trap was placed; a success restarts the
    /// cooldown.
    pub fn place(&mut self, coord: Coord, clock: &FrameClock) -> bool {
        if !self.can_place(clock) {
            return false;
        }
        self.traps.push(coord);
        self.last_placed = Some(clock.frames());
        true
    }

    /// Remove one trap at `coord` (the oldest if several are stacked).
    ///
    /// Returns `false` if there was no trap there.
    pub fn remove(&mut self, coord: Coord) -> bool {
        if let Some(idx) = self.traps.iter().position(|&t| t == coord) {
            self.traps.remove(idx);
            true
        } else {
            false
        }
    }

    /// Check whether any trap sits on `coord`.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.traps.contains(&coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock at 30 Hz already advanced to `frames`.
    fn clock_at(frames: u64) -> FrameClock {
        let mut clock = FrameClock::new(30);
        for _ in 0..frames {
            clock.advance();
        }
        clock
    }

    #[test]
    fn test_first_placement_is_immediate() {
        let mut traps = TrapManager::new();
        let clock = clock_at(0);
        assert!(traps.can_place(&clock));
        assert!(traps.place(Coord::new(1, 1), &clock));
        assert_eq!(traps.traps(), &[Coord::new(1, 1)]);
        assert_eq!(traps.remaining(), 2);
    }

    #[test]
    fn test_cooldown() {
        let mut traps = TrapManager::new();
        let mut clock = clock_at(30);
        assert!(traps.place(Coord::new(0, 0), &clock));

        for _ in 0..60 {
            clock.advance();
        }
        assert_eq!(traps.cooldown_left(&clock), 90);
        for _ in 0..89 {
            clock.advance();
        }
        assert!(!traps.place(Coord::new(0, 1), &clock));
        clock.advance();
        assert!(traps.place(Coord::new(0, 1), &clock));
        assert_eq!(traps.cooldown_left(&clock), 150);
        assert_eq!(traps.traps().len(), 2);
    }

    #[test]
    fn test_cooldown_ends_on_exact_frame() {
        let mut clock = FrameClock::new(30);
        for start in 1..3000u64 {
            clock.advance();
            assert_eq!(clock.frames(), start);

            let mut traps = TrapManager::new();
            assert!(traps.place(Coord::new(0, 0), &clock));

            let mut later = clock;
            for _ in 0..149 {
                later.advance();
            }
            assert!(!traps.can_place(&later), "early at start frame {start}");
            later.advance();
            assert!(traps.can_place(&later), "refused at start frame {start}");
        }
    }

    #[test]
    fn test_cooldown_follows_frame_rate() {
        let mut traps = TrapManager::new();
        let mut clock = FrameClock::new(60);
        assert_eq!(TrapManager::cooldown_frames(&clock), 300);
        assert!(traps.place(Coord::new(0, 0), &clock));
        for _ in 0..299 {
            clock.advance();
        }
        assert!(!traps.can_place(&clock));
        clock.advance();
        assert!(traps.can_place(&clock));
    }

    #[test]
    fn test_capacity() {
        let mut traps = TrapManager::new();
        let mut clock = clock_at(0);
        for i in 0..3u16 {
            assert!(traps.place(Coord::new(i, 0), &clock));
            for _ in 0..300 {
                clock.advance();
            }
        }
        assert_eq!(traps.remaining(), 0);
        assert!(!traps.can_place(&clock));
        assert!(!traps.place(Coord::new(9, 9), &clock));

        assert!(traps.remove(Coord::new(1, 0)));
        assert!(traps.place(Coord::new(9, 9), &clock));
        assert_eq!(
            traps.traps(),
            &[Coord::new(0, 0), Coord::new(2, 0), Coord::new(9, 9)]
        );
    }

    #[test]
    fn test_failed_placement_keeps_cooldown() {
        let mut traps = TrapManager::new();
        assert!(traps.place(Coord::new(0, 0), &clock_at(0)));
        assert!(!traps.place(Coord::new(0, 1), &clock_at(120)));
        // The refused attempt at frame 120 must not restart the timer.
        assert!(traps.place(Coord::new(0, 1), &clock_at(150)));
    }

    #[test]
    fn test_stacked_traps_are_kept() {
        let mut traps = TrapManager::new();
        assert!(traps.place(Coord::new(2, 2), &clock_at(0)));
        assert!(traps.place(Coord::new(2, 2), &clock_at(150)));
        assert_eq!(traps.traps().len(), 2);

        assert!(traps.remove(Coord::new(2, 2)));
        assert!(traps.contains(Coord::new(2, 2)));
        assert!(traps.remove(Coord::new(2, 2)));
        assert!(!traps.contains(Coord::new(2, 2)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut traps = TrapManager::new();
        assert!(!traps.remove(Coord::new(3, 3)));
        traps.place(Coord::new(1, 1), &clock_at(0));
        assert!(!traps.remove(Coord::new(3, 3)));
        assert_eq!(traps.traps().len(), 1);
    }
}
