//! Output formatting utilities for CLI.

use enigma::{Action, Outcome};
use serde::Serialize;

use super::OutputFormat;

/// JSON-serializable turn result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTurn {
    /// Turn number.
    pub(super) turn: u32,
    /// Move sent this turn (null if none).
    pub(super) action: Option<Action>,
}

/// JSON-serializable end of game.
#[derive(Debug, Serialize)]
pub(super) struct JsonOutcome {
    /// "won" or "lost".
    pub(super) outcome: &'static str,
    /// Last turn seen.
    pub(super) turn: u32,
    /// Moves sent during the game.
    pub(super) moves: u32,
}

/// Format one turn's move as human-readable text.
pub(super) fn format_text(turn: u32, action: Option<&Action>) -> String {
    match action {
        Some(action) => format!(
            "turn {turn}: {} -> {}{}",
            action.attacker_index,
            action.target_index,
            if action.send_half { " (half)" } else { "" }
        ),
        None => format!("turn {turn}: -"),
    }
}

const fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "won",
        Outcome::Lost => "lost",
    }
}

/// Render one turn in the requested format.
pub(super) fn render_turn(
    format: OutputFormat,
    turn: u32,
    action: Option<Action>,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format_text(turn, action.as_ref())),
        OutputFormat::Json => serde_json::to_string(&JsonTurn { turn, action }),
    }
}

/// Render the end of a game in the requested format.
pub(super) fn render_outcome(
    format: OutputFormat,
    outcome: Outcome,
    turn: u32,
    moves: u32,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Game {} on turn {turn} after {moves} moves",
            outcome_name(outcome)
        )),
        OutputFormat::Json => serde_json::to_string(&JsonOutcome {
            outcome: outcome_name(outcome),
            turn,
            moves,
        }),
    }
}
