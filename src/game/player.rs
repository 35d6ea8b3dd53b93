//! Player, opponent and scoreboard records.

use serde::{Deserialize, Serialize};

use crate::game::CellIndex;

/// Index of a player in the lobby; also the terrain value of cells they own.
pub type PlayerId = u8;

/// Land is gathered in blocks of this many tiles when estimating how much of
/// an opponent's army can actually be brought together.
pub const GATHER_BLOCK_TILES: u32 = 50;

/// What we know about one other player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentRecord {
    /// Lobby index of the opponent.
    pub player: PlayerId,
    /// Last seen location of their general, if ever seen.
    #[serde(default, rename = "generalLocationIndex")]
    pub general: Option<CellIndex>,
    /// Whether the player has been eliminated.
    #[serde(default)]
    pub dead: bool,
    /// Whether the player is on our team.
    #[serde(default)]
    pub is_team: bool,
    /// Tiles held.
    #[serde(default)]
    pub tiles: u32,
    /// Total army across all tiles.
    #[serde(default)]
    pub total: u32,
}

impl OpponentRecord {
    /// A living, non-team opponent with no known general.
    #[must_use]
    pub const fn new(player: PlayerId) -> Self {
        Self {
            player,
            general: None,
            dead: false,
            is_team: false,
            tiles: 0,
            total: 0,
        }
    }

    /// Whether this record describes an enemy we can still fight.
    #[must_use]
    pub const fn is_hostile(&self) -> bool {
        !self.dead && !self.is_team
    }

    /// Armies not needed to hold one unit on every tile.
    #[must_use]
    pub const fn available_armies(&self) -> u32 {
        self.total.saturating_sub(self.tiles)
    }

    /// Rough count of armies the opponent could bring together.
    ///
    /// Only the land beyond the last full block is counted, weighted by the
    /// number of blocks it sits behind.
    #[must_use]
    pub const fn gatherable_armies(&self) -> u32 {
        let blocks = self.tiles / GATHER_BLOCK_TILES;
        (self.tiles % GATHER_BLOCK_TILES).saturating_mul(blocks + 1)
    }
}

/// Our own scoreboard entry, with change flags against the previous turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Total army across all tiles.
    pub total: u32,
    /// Tiles held.
    pub tiles: u32,
    /// Total army did not grow since the last update.
    pub lost_armies: bool,
    /// Tiles shrank since the last update.
    pub lost_territory: bool,
}

impl Score {
    /// Derive the next score from the previous one and a fresh scoreboard line.
    #[must_use]
    pub const fn advance(self, total: u32, tiles: u32) -> Self {
        Self {
            total,
            tiles,
            lost_armies: self.total >= total,
            lost_territory: self.tiles > tiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_creation() {
        let opponent = OpponentRecord::new(3);
        assert_eq!(opponent.player, 3);
        assert!(opponent.general.is_none());
        assert!(opponent.is_hostile());
    }

    #[test]
    fn test_available_armies() {
        let mut opponent = OpponentRecord::new(1);
        opponent.total = 80;
        opponent.tiles = 30;
        assert_eq!(opponent.available_armies(), 50);

        opponent.total = 10;
        assert_eq!(opponent.available_armies(), 0);
    }

    #[test]
    fn test_gatherable_armies() {
        let mut opponent = OpponentRecord::new(1);
        opponent.tiles = 30;
        assert_eq!(opponent.gatherable_armies(), 30);

        opponent.tiles = 120;
        // 20 leftover tiles behind two full blocks
        assert_eq!(opponent.gatherable_armies(), 60);

        opponent.tiles = 100;
        assert_eq!(opponent.gatherable_armies(), 0);
    }

    #[test]
    fn test_hostility() {
        let mut opponent = OpponentRecord::new(2);
        opponent.is_team = true;
        assert!(!opponent.is_hostile());
        opponent.is_team = false;
        opponent.dead = true;
        assert!(!opponent.is_hostile());
    }

    #[test]
    fn test_score_advance() {
        let score = Score::default().advance(10, 5);
        assert!(!score.lost_armies);
        assert!(!score.lost_territory);

        let next = score.advance(10, 4);
        assert!(next.lost_armies);
        assert!(next.lost_territory);

        let grown = next.advance(12, 6);
        assert!(!grown.lost_armies);
        assert!(!grown.lost_territory);
    }

    #[test]
    fn test_opponent_json_field_names() {
        let json = r#"{"player":1,"generalLocationIndex":7,"dead":false,"isTeam":true,"tiles":3,"total":9}"#;
        let opponent: OpponentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(opponent.general, Some(CellIndex(7)));
        assert!(opponent.is_team);
    }
}
