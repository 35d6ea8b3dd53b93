//! Error types for the bot.

use thiserror::Error;

use crate::game::CellIndex;

/// Everything that can stop the bot from producing a move.
///
/// Unreachable targets and abandoned plans are not errors; they degrade to
/// partial paths and an empty queue instead.
#[derive(Debug, Error)]
pub enum BotError {
    /// No game has started, or no map update has been received yet.
    #[error("no game state available: {0}")]
    MissingState(&'static str),

    /// Map width or height is zero, or the cell count overflows.
    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions {
        /// Map width in cells.
        width: usize,
        /// Map height in cells.
        height: usize,
    },

    /// A per-cell array does not match the map size.
    #[error("{what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Which array was wrong.
        what: &'static str,
        /// Expected length (`width * height`).
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A terrain value below the known sentinels.
    #[error("unknown terrain value {value} at cell {index}")]
    UnknownTerrain {
        /// Cell position.
        index: usize,
        /// Raw terrain value.
        value: i32,
    },

    /// A negative army count.
    #[error("negative army count {value} at cell {index}")]
    NegativeArmies {
        /// Cell position.
        index: usize,
        /// Raw army value.
        value: i32,
    },

    /// A cell reference outside the board.
    #[error("cell {index} is outside a board of {size} cells")]
    CellOutOfBounds {
        /// Offending cell.
        index: CellIndex,
        /// Board size.
        size: usize,
    },

    /// A diff payload ended in the middle of a segment.
    #[error("malformed patch: {0}")]
    MalformedPatch(String),

    /// JSON decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BotError::LengthMismatch {
            what: "armies",
            expected: 9,
            actual: 8,
        };
        assert_eq!(err.to_string(), "armies has 8 entries, expected 9");

        let err = BotError::CellOutOfBounds {
            index: CellIndex(12),
            size: 9,
        };
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_missing_state_display() {
        let err = BotError::MissingState("no update received");
        assert!(err.to_string().contains("no update received"));
    }
}
