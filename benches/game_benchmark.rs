//! Benchmarks for maze generation and complete games.
//!
//! The headless session loop is what `simulate` spends its time in.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use labyrinth::autopilot::Autopilot;
use labyrinth::game::mazegen;
use labyrinth::simulate::{DEFAULT_MAX_TICKS, run_game};
use labyrinth::{GameConfig, GameSession, Mode};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_maze_generation(c: &mut Criterion) {
    c.bench_function("mazegen_15x15", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| black_box(mazegen::generate(black_box(15), black_box(15), &mut rng)));
    });

    c.bench_function("mazegen_100x100", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| black_box(mazegen::generate(black_box(100), black_box(100), &mut rng)));
    });
}

fn bench_ticks(c: &mut Criterion) {
    // 300 autopilot ticks on a fixed session, restarted each iteration
    let config = GameConfig {
        mode: Mode::Hunter,
        ..GameConfig::default()
    };

    c.bench_function("300_ticks_hunter", |b| {
        b.iter(|| {
            let mut session = GameSession::new(config, black_box(7)).ok();
            let mut pilot = Autopilot::new();
            if let Some(session) = session.as_mut() {
                for _ in 0..300 {
                    let commands = pilot.decide(&session.snapshot());
                    session.tick(&commands);
                }
            }
            black_box(session)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // Benchmark running 10 games sequentially (without parallel overhead)
    let config = GameConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_game(black_box(seed), black_box(&config), DEFAULT_MAX_TICKS);
                let _ = black_box(result);
            }
        });
    });
}

criterion_group!(benches, bench_maze_generation, bench_ticks, bench_game_batch);
criterion_main!(benches);
