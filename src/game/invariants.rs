//! Session invariants - sanity checks that detect bugs.
//!
//! The rules engine should never produce a session that fails these. They
//! are run after every tick in the property and integration tests.

use crate::config::Mode;
use crate::game::session::{CAPTURES_TO_WIN, GameSession, SessionState};
use crate::game::{Coord, MAX_ENERGY, MAX_TRAPS, mazegen};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(session: &GameSession) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut fail = |message: String| violations.push(InvariantViolation { message });

    let grid = &session.grid;
    let origin = Coord::new(0, 0);

    if session.exit() != grid.last_cell() {
        fail(format!(
            "Exit {:?} is not the last cell {:?}",
            session.exit(),
            grid.last_cell()
        ));
    }

    if !mazegen::has_open_path(grid) {
        fail("No open path from the origin to the exit".to_string());
    }

    let player = session.player.position();
    if !grid.player_can_enter(player) {
        fail(format!("Player stands on impassable tile {player:?}"));
    }

    let energy = session.player.energy();
    if !(0.0..=MAX_ENERGY).contains(&energy) {
        fail(format!("Player energy {energy} outside [0, {MAX_ENERGY}]"));
    }
    if session.player.is_running() && energy <= 0.0 {
        fail("Player is running with no energy".to_string());
    }

    // The respawn fallback may leave an enemy on the origin regardless of
    // terrain.
    for (idx, enemy) in session.enemies.iter().enumerate() {
        let at = enemy.position();
        if at != origin && !grid.enemy_can_enter(at) {
            fail(format!("Enemy {idx} stands on impassable tile {at:?}"));
        }
    }

    let expected = session.config().preset().enemy_count;
    if session.enemies.len() != expected {
        fail(format!(
            "Enemy count {} differs from preset {expected}",
            session.enemies.len()
        ));
    }

    if session.traps.traps().len() > MAX_TRAPS {
        fail(format!(
            "{} traps exceed the maximum of {MAX_TRAPS}",
            session.traps.traps().len()
        ));
    }
    for trap in session.traps.traps() {
        if !grid.in_bounds(*trap) {
            fail(format!("Trap {trap:?} is off the grid"));
        }
    }

    match session.mode() {
        Mode::Escape => {
            if session.captures() != 0 {
                fail(format!("Escape session has {} captures", session.captures()));
            }
        }
        Mode::Hunter => {
            if session.state() == SessionState::Active && session.captures() >= CAPTURES_TO_WIN {
                fail(format!(
                    "Hunter session still active with {} captures",
                    session.captures()
                ));
            }
            if session.state() == SessionState::Active && session.score() <= 0 {
                fail(format!(
                    "Hunter session still active at score {}",
                    session.score()
                ));
            }
        }
    }

    violations
}

/// Assert all session invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(session: &GameSession) {
    let violations = check_invariants(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Session invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_session: &GameSession) {}
