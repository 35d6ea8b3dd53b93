//! CLI command implementations for Enigma.

pub(crate) mod plan;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use enigma::{BotConfig, BotError, BotKind};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Output format for planned moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output, one object per line.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BotError> for CliError {
    fn from(e: BotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Load the config file, if any, and apply command-line overrides.
pub(crate) fn load_config(
    path: Option<&Path>,
    kind: Option<BotKind>,
    seed: Option<u64>,
) -> Result<BotConfig, CliError> {
    let mut config = match path {
        Some(path) => BotConfig::load(path)
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?,
        None => BotConfig::default(),
    };
    if let Some(kind) = kind {
        config.kind = kind;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Open a file, or stdin when no path (or `-`) is given.
pub(crate) fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
