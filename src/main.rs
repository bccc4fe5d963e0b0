//! Labyrinth CLI - play the maze game, browse leaderboards, run simulations.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Args as ClapArgs, Parser, Subcommand};
use labyrinth::config::DEFAULT_GRID_SIZE;
use labyrinth::simulate::DEFAULT_MAX_TICKS;
use labyrinth::{Difficulty, GameConfig, Mode};
use std::path::PathBuf;
use std::process::ExitCode;

/// Labyrinth - escape the hunters, or hunt them down
#[derive(Parser, Debug)]
#[command(name = "labyrinth")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Game settings shared by `play` and `simulate`.
#[derive(ClapArgs, Debug, Clone, Copy)]
struct GameArgs {
    /// Game mode: escape or hunter
    #[arg(short, long, default_value = "escape")]
    mode: Mode,

    /// Difficulty: easy, medium or hard
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Maze side length in tiles
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    size: u16,
}

impl GameArgs {
    fn config(self) -> GameConfig {
        GameConfig {
            rows: self.size,
            cols: self.size,
            mode: self.mode,
            difficulty: self.difficulty,
            ..GameConfig::default()
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Name recorded on the leaderboard
        #[arg(short, long, default_value = "")]
        name: String,

        #[command(flatten)]
        game: GameArgs,

        /// Random seed (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory holding the leaderboard files
        #[arg(long, default_value = ".")]
        scores_dir: PathBuf,
    },

    /// Show the top 5 for one or both modes
    Scores {
        /// Mode to show (default: both)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Directory holding the leaderboard files
        #[arg(long, default_value = ".")]
        scores_dir: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many autopilot games in parallel and aggregate the results
    Simulate {
        #[command(flatten)]
        game: GameArgs,

        /// Number of games to run
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Tick limit per game
        #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            name,
            game,
            seed,
            scores_dir,
        } => cli::play::execute(name, game.config(), seed, scores_dir),

        Commands::Scores {
            mode,
            scores_dir,
            format,
        } => cli::scores::execute(mode, scores_dir, format),

        Commands::Simulate {
            game,
            games,
            seed,
            threads,
            max_ticks,
            format,
            progress,
        } => cli::simulate::execute(game.config(), games, seed, threads, max_ticks, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
