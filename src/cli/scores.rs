//! Scores command implementation.

use super::output::{JsonLeaderboard, format_leaderboard};
use super::{CliError, OutputFormat};
use labyrinth::Mode;
use labyrinth::scores;
use std::path::PathBuf;

/// Execute the scores command.
///
/// # Errors
///
/// Returns an error if the leaderboard exists but cannot be read.
pub(crate) fn execute(mode: Option<Mode>, dir: PathBuf, format: OutputFormat) -> Result<(), CliError> {
    let modes: Vec<Mode> = mode.map_or_else(|| Mode::ALL.to_vec(), |m| vec![m]);

    let mut boards = Vec::with_capacity(modes.len());
    for mode in modes {
        boards.push((mode, scores::load(&dir, mode)?));
    }

    match format {
        OutputFormat::Text => {
            for (mode, board) in &boards {
                print!("{}", format_leaderboard(board, *mode));
            }
        }
        OutputFormat::Json => {
            let json: Vec<_> = boards
                .iter()
                .map(|(mode, board)| JsonLeaderboard {
                    mode: *mode,
                    entries: board.entries(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
