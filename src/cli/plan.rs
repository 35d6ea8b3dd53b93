//! Plan command implementation.

use super::output::render_turn;
use super::{CliError, OutputFormat, open_input};
use enigma::{Bot, BotConfig, Snapshot, TurnState};
use std::io::Read;
use std::path::Path;

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or is malformed.
pub(crate) fn execute(
    snapshot: Option<&Path>,
    config: BotConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut text = String::new();
    open_input(snapshot)?.read_to_string(&mut text)?;

    let snapshot: Snapshot = serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("Invalid snapshot: {e}")))?;
    let state = TurnState::from_snapshot(snapshot)?;

    let mut bot = Bot::new(config);
    let action = bot.take_turn(&state);
    println!("{}", render_turn(format, state.turn(), action)?);

    Ok(())
}
