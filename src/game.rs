//! Game model for the bot.
//!
//! - Board with row-major cell addressing and terrain sentinels
//! - Per-turn state snapshot with contextual cell flags
//! - Opponent and scoreboard records
//! - Combat arithmetic used by the heuristics

mod combat;
mod map;
mod player;
mod state;

pub use combat::{attack_diff, half_suffices, is_losing, overwhelms};
pub use map::{
    CellIndex, Map, Terrain, TERRAIN_EMPTY, TERRAIN_FOG, TERRAIN_FOG_MOUNTAIN, TERRAIN_MOUNTAIN,
};
pub use player::{OpponentRecord, PlayerId, Score, GATHER_BLOCK_TILES};
pub use state::{Cell, Snapshot, TurnState};
