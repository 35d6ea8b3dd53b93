//! Server events as they arrive on the wire.

use serde::{Deserialize, Serialize};

use crate::game::PlayerId;

/// One message from the game server.
///
/// Encoded as a JSON object tagged by `event`, e.g.
/// `{"event": "game_update", "turn": 3, "map_diff": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A new game begins; all memory of the previous one is dropped.
    GameStart(GameStart),
    /// A new turn's state.
    GameUpdate(GameUpdate),
    /// We were eliminated.
    GameLost,
    /// We won.
    GameWon,
}

/// Lobby details sent once per game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStart {
    /// Our lobby index.
    #[serde(rename = "playerIndex")]
    pub player_index: PlayerId,
    /// Team id per player index; empty in free-for-all games.
    #[serde(default)]
    pub teams: Vec<u32>,
    /// Player names in lobby order.
    #[serde(default)]
    pub usernames: Vec<String>,
    /// Replay id for this game.
    #[serde(default)]
    pub replay_id: Option<String>,
    /// Chat room for this game.
    #[serde(default)]
    pub chat_room: Option<String>,
}

/// Per-turn state, diffed against the previous update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUpdate {
    /// Turn number.
    pub turn: u32,
    /// Diff of `[width, height, armies..., terrain...]`.
    pub map_diff: Vec<i32>,
    /// Diff of the visible city list.
    #[serde(default)]
    pub cities_diff: Vec<i32>,
    /// General location per player index, `-1` when not visible.
    #[serde(default)]
    pub generals: Vec<i32>,
    /// Scoreboard, in no particular order.
    #[serde(default)]
    pub scores: Vec<ScoreLine>,
}

/// One scoreboard entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    /// Player index.
    pub i: PlayerId,
    /// Total army.
    pub total: u32,
    /// Tiles held.
    pub tiles: u32,
    /// Eliminated.
    #[serde(default)]
    pub dead: bool,
}
