//! Multi-tick integration tests for the rules engine.
//!
//! These tests drive whole sessions through the public API: scripted
//! scenarios with known outcomes, and many seeded autopilot games that must
//! keep every invariant.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use labyrinth::autopilot::Autopilot;
use labyrinth::game::Enemy;
use labyrinth::game::invariants::assert_invariants;
use labyrinth::scores;
use labyrinth::{
    Command, Coord, Difficulty, GameConfig, GameSession, Grid, Mode, SessionState, TileType,
};

fn config(mode: Mode) -> GameConfig {
    GameConfig {
        mode,
        ..GameConfig::default()
    }
}

/// Open grid with no enemies.
fn open_session(mode: Mode, rows: u16, cols: u16) -> GameSession {
    let grid = Grid::filled(rows, cols, TileType::Open).unwrap();
    let mut session = GameSession::with_grid(grid, config(mode), 42);
    session.enemies.clear();
    session
}

#[test]
fn test_escape_three_by_three() {
    let mut session = open_session(Mode::Escape, 3, 3);

    let moves = [
        Command::MoveRight,
        Command::MoveRight,
        Command::MoveDown,
        Command::MoveDown,
    ];
    let mut states = Vec::new();
    for command in moves {
        states.push(session.tick(&[command]));
    }

    assert_eq!(
        states,
        vec![
            SessionState::Active,
            SessionState::Active,
            SessionState::Active,
            SessionState::Won
        ]
    );
    assert_eq!(session.player.position(), Coord::new(2, 2));
    // 4 frames at 30 Hz: 1000 - floor(10 * 0.133) = 999.
    assert_eq!(session.score(), 999);

    // The bonus is applied exactly once.
    for _ in 0..10 {
        assert_eq!(session.tick(&[Command::MoveUp]), SessionState::Won);
    }
    assert_eq!(session.score(), 999);
    assert_eq!(session.player.position(), Coord::new(2, 2));
}

#[test]
fn test_trap_trigger() {
    let mut session = open_session(Mode::Escape, 5, 5);
    // Tunnels are closed to enemies, so the respawn can land on neither the
    // trap tile nor the player.
    session.grid.set(Coord::new(1, 1), TileType::TunnelOnly);
    session.grid.set(Coord::new(0, 0), TileType::TunnelOnly);
    let clock = *session.clock();
    assert!(session.traps.place(Coord::new(1, 1), &clock));
    session.enemies.push(Enemy::new(Coord::new(1, 1), 1000));

    assert_eq!(session.tick(&[]), SessionState::Active);
    assert!(session.traps.traps().is_empty());
    assert_eq!(session.score(), 50);
    assert_ne!(session.enemies[0].position(), Coord::new(1, 1));
}

#[test]
fn test_hunter_capture_same_tick() {
    let mut session = open_session(Mode::Hunter, 5, 5);
    session.grid.set(Coord::new(2, 2), TileType::TunnelOnly);
    session.player.place(Coord::new(2, 2));
    session.enemies.push(Enemy::new(Coord::new(2, 2), 1000));

    assert_eq!(session.tick(&[]), SessionState::Active);
    assert_eq!(session.captures(), 1);
    assert_ne!(session.enemies[0].position(), Coord::new(2, 2));
    // 100 start + 100 capture + 3 adjacency, minus 2 on a decay tick.
    assert!(matches!(session.score(), 201 | 203), "score {}", session.score());
}

#[test]
fn test_hunter_exit_escape_can_lose() {
    let mut session = open_session(Mode::Hunter, 5, 5);
    // Keep the respawned enemy off the player so nothing is captured.
    session.grid.set(Coord::new(0, 0), TileType::TunnelOnly);
    session.enemies.push(Enemy::new(Coord::new(4, 4), 1000));

    assert_eq!(session.tick(&[]), SessionState::Lost);
    assert!(matches!(session.score(), 0 | -2));
}

#[test]
fn test_trap_cooldown_over_long_session() {
    let mut session = open_session(Mode::Escape, 4, 4);

    // Ask for a trap every tick: placements land exactly 150 frames apart.
    let mut placed_at = Vec::new();
    for _ in 0..1000 {
        let before = session.traps.traps().len();
        session.tick(&[Command::PlaceTrap]);
        if session.traps.traps().len() > before {
            placed_at.push(session.frames());
        }
    }
    assert_eq!(placed_at, vec![1, 151, 301]);
}

#[test]
fn test_player_blocked_by_terrain() {
    let mut session = open_session(Mode::Escape, 3, 3);
    session.grid.set(Coord::new(0, 1), TileType::Wall);
    session.grid.set(Coord::new(1, 0), TileType::VineOnly);

    session.tick(&[Command::MoveRight, Command::MoveDown, Command::MoveUp]);
    assert_eq!(session.player.position(), Coord::new(0, 0));
    assert_eq!(session.state(), SessionState::Active);
}

#[test]
fn test_quit_is_reportable() {
    let mut session = GameSession::new(config(Mode::Hunter), 8).unwrap();
    session.tick(&[]);
    assert_eq!(session.tick(&[Command::Quit]), SessionState::Abandoned);

    let summary = session.summary();
    assert_eq!(summary.state, SessionState::Abandoned);
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.mode, Mode::Hunter);
}

#[test]
fn test_running_energy_over_session() {
    let mut session = open_session(Mode::Escape, 10, 10);
    session.tick(&[Command::StartRun]);
    for _ in 0..9 {
        session.tick(&[]);
    }
    assert!((session.player.energy() - 90.0).abs() < 1e-9);

    session.tick(&[Command::StopRun, Command::StopRun]);
    assert!((session.player.energy() - 90.5).abs() < 1e-9);
}

#[test]
fn test_autopilot_sessions_keep_invariants() {
    for mode in Mode::ALL {
        for difficulty in Difficulty::ALL {
            for seed in 0..10u64 {
                let config = GameConfig {
                    mode,
                    difficulty,
                    ..GameConfig::default()
                };
                let mut session = GameSession::new(config, seed).unwrap();
                let mut pilot = Autopilot::new();

                for _ in 0..1500 {
                    let commands = pilot.decide(&session.snapshot());
                    let state = session.tick(&commands);
                    assert_invariants(&session);
                    if state.is_terminal() {
                        break;
                    }
                }
                assert_ne!(session.state(), SessionState::Abandoned);
            }
        }
    }
}

#[test]
fn test_finished_game_reaches_leaderboard() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = open_session(Mode::Escape, 2, 2);
    session.tick(&[Command::MoveRight]);
    assert_eq!(session.tick(&[Command::MoveDown]), SessionState::Won);

    let board = scores::record(dir.path(), session.mode(), "ana", session.score()).unwrap();
    assert_eq!(board.entries()[0].score, 1000);

    let reloaded = scores::load(dir.path(), Mode::Escape).unwrap();
    assert_eq!(reloaded, board);
    assert!(scores::load(dir.path(), Mode::Hunter).unwrap().is_empty());
}
