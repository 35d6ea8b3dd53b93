//! Bot configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::intel::USEFUL_ARMY_THRESHOLD;
use crate::planner::BotKind;

/// Tuning knobs for one bot.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Which strategy plans the moves.
    pub kind: BotKind,
    /// No moves are planned up to and including this turn.
    pub opening_turns: u32,
    /// Smallest stack considered for attacks.
    pub useful_army_threshold: u32,
    /// Until this turn the gatherer may attack out of its general.
    pub opening_game_turns: u32,
    /// Seed for random target choice.
    pub seed: u64,
    /// Number of past moves kept.
    pub history_len: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            kind: BotKind::Hunter,
            opening_turns: 24,
            useful_army_threshold: USEFUL_ARMY_THRESHOLD,
            opening_game_turns: 50,
            seed: 0x5eed,
            history_len: 5,
        }
    }
}

impl BotConfig {
    /// Parse a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.kind, BotKind::Hunter);
        assert_eq!(config.opening_turns, 24);
        assert_eq!(config.useful_army_threshold, 2);
        assert_eq!(config.history_len, 5);
    }

    #[test]
    fn test_partial_json() {
        let config = BotConfig::from_json(r#"{"kind": "gatherer", "seed": 7}"#).unwrap();
        assert_eq!(config.kind, BotKind::Gatherer);
        assert_eq!(config.seed, 7);
        assert_eq!(config.opening_game_turns, 50);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"openingTurns": 3}}"#).unwrap();
        // Field names are snake_case; unknown keys are ignored.
        let config = BotConfig::load(file.path()).unwrap();
        assert_eq!(config, BotConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"opening_turns": 3}}"#).unwrap();
        assert_eq!(BotConfig::load(file.path()).unwrap().opening_turns, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BotConfig::load(dir.path().join("nope.json")).is_err());
    }
}
