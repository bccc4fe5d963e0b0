//! Simulate command implementation.

use super::output::{JsonSimulation, format_simulation};
use super::{CliError, OutputFormat, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use labyrinth::GameConfig;
use labyrinth::simulate::run_batch;
use std::time::Instant;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    config: GameConfig,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_ticks: u64,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    config.validate()?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games")
                .map_err(|e| CliError::new(format!("Bad progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let summary = run_batch(base_seed, games, &config, max_ticks)?;

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(summary.games);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed().as_secs_f64();

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_simulation(&summary, base_seed));
            println!();
            println!("Duration: {duration:.2}s");
        }
        OutputFormat::Json => {
            let json = JsonSimulation::from_summary(base_seed, summary, duration);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
