//! Run command implementation.

use super::output::{render_outcome, render_turn};
use super::{CliError, OutputFormat, open_input};
use enigma::{Bot, BotConfig, GameTracker, ServerEvent};
use std::io::BufRead;
use std::path::Path;
use tracing::warn;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, a line is not a valid event,
/// or the tracker rejects an update.
pub(crate) fn execute(
    events: Option<&Path>,
    config: BotConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    let input = open_input(events)?;
    let mut tracker = GameTracker::new();
    let mut bot = Bot::new(config);
    let mut moves = 0u32;

    for (number, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ServerEvent = serde_json::from_str(&line)
            .map_err(|e| CliError::new(format!("Line {}: {e}", number + 1)))?;

        tracker
            .handle(&event)
            .map_err(|e| CliError::new(format!("Line {}: {e}", number + 1)))?;

        match event {
            ServerEvent::GameStart(_) => {
                bot.reset();
                moves = 0;
            }
            ServerEvent::GameUpdate(_) => {
                if tracker.is_over() {
                    warn!(turn = tracker.turn(), "update after game over");
                }
                let action = bot.play(&tracker)?;
                if action.is_some() {
                    moves += 1;
                }
                println!("{}", render_turn(format, tracker.turn(), action)?);
            }
            ServerEvent::GameLost | ServerEvent::GameWon => {
                if let Some(outcome) = tracker.outcome() {
                    println!("{}", render_outcome(format, outcome, tracker.turn(), moves)?);
                }
            }
        }
    }

    Ok(())
}
