//! Per-turn game state.
//!
//! A [`TurnState`] is the immutable snapshot the planner works against. It is
//! rebuilt every turn from a raw [`Snapshot`] (or by the tracker), since the
//! terrain and army arrays are replaced wholesale by each server update.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::game::{CellIndex, Map, OpponentRecord, PlayerId, Score, Terrain};

/// The raw per-turn inputs, as handed over by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Current turn number.
    #[serde(default)]
    pub turn: u32,
    /// Width of the map in cells.
    pub map_width: usize,
    /// Terrain values in row-major order (see the `TERRAIN_*` sentinels).
    pub terrain: Vec<i32>,
    /// Army counts in row-major order.
    pub armies: Vec<i32>,
    /// Our lobby index.
    pub player_index: PlayerId,
    /// Our team id, when not derivable from `teams`.
    #[serde(default)]
    pub team: Option<u32>,
    /// Team id per player index; empty in free-for-all games.
    #[serde(default)]
    pub teams: Vec<u32>,
    /// Cells believed to be cities, possibly currently fogged.
    #[serde(default)]
    pub known_cities: Vec<CellIndex>,
    /// Every other player we have a scoreboard line for.
    #[serde(default)]
    pub opponents: Vec<OpponentRecord>,
    /// Location of our own general.
    #[serde(default)]
    pub my_general_location_index: Option<CellIndex>,
    /// Our own scoreboard entry.
    #[serde(default)]
    pub my_score: Score,
}

/// A snapshot of one cell with its contextual flags.
///
/// Built on demand by [`TurnState::cell`]; never cached across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Position on the board.
    pub index: CellIndex,
    /// Visible terrain.
    pub terrain: Terrain,
    /// Armies stationed here.
    pub armies: u32,
    /// Team of the owner, if owned and teams are in play.
    pub team: Option<u32>,
    /// Owned by us.
    pub is_mine: bool,
    /// Owned by another player on our team.
    pub is_teammate: bool,
    /// Empty, or owned by an enemy that is not a teammate.
    pub is_attackable: bool,
    /// A known city.
    pub is_city: bool,
    /// The general of a living enemy.
    pub is_enemy_general: bool,
}

impl Cell {
    /// Owned by players sharing a team.
    #[must_use]
    pub fn same_team_as(&self, other: &Cell) -> bool {
        matches!((self.team, other.team), (Some(a), Some(b)) if a == b)
    }

    /// Ours or a teammate's.
    #[must_use]
    pub const fn is_friendly(&self) -> bool {
        self.is_mine || self.is_teammate
    }
}

/// Everything the planner may read during one turn.
#[derive(Debug, Clone)]
pub struct TurnState {
    turn: u32,
    map: Map,
    player: PlayerId,
    team: Option<u32>,
    teams: Vec<u32>,
    cities: Vec<CellIndex>,
    city_set: HashSet<CellIndex>,
    opponents: Vec<OpponentRecord>,
    my_general: Option<CellIndex>,
    score: Score,
}

impl TurnState {
    /// Create a state with no teams, cities, opponents or general.
    #[must_use]
    pub fn new(map: Map, player: PlayerId) -> Self {
        Self {
            turn: 0,
            map,
            player,
            team: None,
            teams: Vec::new(),
            cities: Vec::new(),
            city_set: HashSet::new(),
            opponents: Vec::new(),
            my_general: None,
            score: Score::default(),
        }
    }

    /// Validate and decode a raw snapshot.
    ///
    /// # Errors
    ///
    /// Fails when the map arrays are malformed or a referenced cell lies off
    /// the board.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let map = Map::from_raw(snapshot.map_width, &snapshot.terrain, &snapshot.armies)?;
        let size = map.size();
        let check = |index: CellIndex| {
            if index.get() < size {
                Ok(index)
            } else {
                Err(BotError::CellOutOfBounds { index, size })
            }
        };

        let my_general = snapshot.my_general_location_index.map(check).transpose()?;
        for city in &snapshot.known_cities {
            check(*city)?;
        }
        let opponents = snapshot
            .opponents
            .into_iter()
            .map(|mut opponent| {
                // A general reported off the board is treated as unknown.
                opponent.general = opponent.general.filter(|g| g.get() < size);
                opponent
            })
            .collect();

        let team = snapshot
            .team
            .or_else(|| snapshot.teams.get(usize::from(snapshot.player_index)).copied());

        let mut state = Self::new(map, snapshot.player_index)
            .with_turn(snapshot.turn)
            .with_teams(snapshot.teams)
            .with_cities(snapshot.known_cities)
            .with_opponents(opponents)
            .with_score(snapshot.my_score);
        state.team = team;
        state.my_general = my_general;
        Ok(state)
    }

    /// Set the turn number.
    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Set per-player team ids; our own team is looked up from them.
    #[must_use]
    pub fn with_teams(mut self, teams: Vec<u32>) -> Self {
        self.team = teams.get(usize::from(self.player)).copied();
        self.teams = teams;
        self
    }

    /// Set the known city list.
    #[must_use]
    pub fn with_cities(mut self, cities: Vec<CellIndex>) -> Self {
        self.city_set = cities.iter().copied().collect();
        self.cities = cities;
        self
    }

    /// Set the opponent records.
    #[must_use]
    pub fn with_opponents(mut self, opponents: Vec<OpponentRecord>) -> Self {
        self.opponents = opponents;
        self
    }

    /// Set our general's location.
    #[must_use]
    pub fn with_general(mut self, general: CellIndex) -> Self {
        self.my_general = Some(general);
        self
    }

    /// Set our scoreboard entry.
    #[must_use]
    pub fn with_score(mut self, score: Score) -> Self {
        self.score = score;
        self
    }

    /// Current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The board.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Our lobby index.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// Our team id, if teams are in play.
    #[must_use]
    pub const fn team(&self) -> Option<u32> {
        self.team
    }

    /// Our general's location.
    #[must_use]
    pub const fn my_general(&self) -> Option<CellIndex> {
        self.my_general
    }

    /// Our scoreboard entry.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Known cities in discovery order.
    #[must_use]
    pub fn known_cities(&self) -> &[CellIndex] {
        &self.cities
    }

    /// All opponent records.
    #[must_use]
    pub fn opponents(&self) -> &[OpponentRecord] {
        &self.opponents
    }

    /// Whether a cell is a known city.
    #[must_use]
    #[inline]
    pub fn is_known_city(&self, index: CellIndex) -> bool {
        self.city_set.contains(&index)
    }

    /// Team of a player, if teams are in play.
    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> Option<u32> {
        self.teams.get(usize::from(player)).copied()
    }

    /// Another player on our team.
    #[must_use]
    pub fn is_teammate(&self, player: PlayerId) -> bool {
        player != self.player
            && self.team.is_some()
            && self.team_of(player) == self.team
    }

    /// Whether a cell holds the general of a living, non-team opponent.
    #[must_use]
    pub fn is_enemy_general(&self, index: CellIndex) -> bool {
        self.opponents
            .iter()
            .any(|o| o.is_hostile() && o.player != self.player && o.general == Some(index))
    }

    /// Locations of living enemy generals, in player order.
    pub fn enemy_generals(&self) -> impl Iterator<Item = CellIndex> {
        self.opponents
            .iter()
            .filter(move |o| o.is_hostile() && o.player != self.player && !self.is_teammate(o.player))
            .filter_map(|o| o.general)
    }

    /// Build the snapshot of one cell.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> Cell {
        let terrain = self.map.terrain(index);
        let owner = terrain.owner();
        let is_mine = owner == Some(self.player);
        let is_teammate = owner.is_some_and(|p| self.is_teammate(p));
        let is_attackable = match terrain {
            Terrain::Empty => true,
            Terrain::Owned(_) => !is_mine && !is_teammate,
            _ => false,
        };

        Cell {
            index,
            terrain,
            armies: self.map.armies(index),
            team: owner.and_then(|p| self.team_of(p)),
            is_mine,
            is_teammate,
            is_attackable,
            is_city: self.is_known_city(index),
            is_enemy_general: self.is_enemy_general(index),
        }
    }

    /// Neighbor cells of a cell, in up, down, left, right order.
    pub fn neighbor_cells(&self, index: CellIndex) -> impl Iterator<Item = Cell> {
        self.map.neighbors(index).map(move |n| self.cell(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            turn: 30,
            map_width: 3,
            terrain: vec![1, -1, -3, -2, 0, -4, 2, -1, -1],
            armies: vec![1, 0, 0, 0, 5, 0, 3, 2, 0],
            player_index: 0,
            team: None,
            teams: vec![0, 1, 0],
            known_cities: vec![CellIndex(7)],
            opponents: vec![
                OpponentRecord {
                    general: Some(CellIndex(0)),
                    ..OpponentRecord::new(1)
                },
                OpponentRecord {
                    is_team: true,
                    ..OpponentRecord::new(2)
                },
            ],
            my_general_location_index: Some(CellIndex(4)),
            my_score: Score::default(),
        }
    }

    #[test]
    fn test_from_snapshot() {
        let state = TurnState::from_snapshot(snapshot()).unwrap();
        assert_eq!(state.turn(), 30);
        assert_eq!(state.team(), Some(0));
        assert_eq!(state.my_general(), Some(CellIndex(4)));
        assert!(state.is_known_city(CellIndex(7)));
    }

    #[test]
    fn test_cell_flags() {
        let state = TurnState::from_snapshot(snapshot()).unwrap();

        let mine = state.cell(CellIndex(4));
        assert!(mine.is_mine);
        assert!(!mine.is_attackable);

        let enemy_general = state.cell(CellIndex(0));
        assert!(enemy_general.is_attackable);
        assert!(enemy_general.is_enemy_general);

        let teammate = state.cell(CellIndex(6));
        assert!(teammate.is_teammate);
        assert!(!teammate.is_attackable);
        assert!(teammate.same_team_as(&mine));

        let city = state.cell(CellIndex(7));
        assert!(city.is_city);
        assert!(city.is_attackable);

        assert!(!state.cell(CellIndex(2)).is_attackable); // fog
        assert!(!state.cell(CellIndex(3)).is_attackable); // mountain
    }

    #[test]
    fn test_enemy_generals_skip_team_and_dead() {
        let mut raw = snapshot();
        raw.opponents.push(OpponentRecord {
            general: Some(CellIndex(8)),
            dead: true,
            ..OpponentRecord::new(3)
        });
        let state = TurnState::from_snapshot(raw).unwrap();
        assert_eq!(state.enemy_generals().collect::<Vec<_>>(), vec![CellIndex(0)]);
        assert!(!state.is_enemy_general(CellIndex(8)));
    }

    #[test]
    fn test_rejects_general_off_board() {
        let mut raw = snapshot();
        raw.my_general_location_index = Some(CellIndex(40));
        assert!(matches!(
            TurnState::from_snapshot(raw),
            Err(BotError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_snapshot_json() {
        let json = r#"{
            "turn": 2,
            "mapWidth": 2,
            "terrain": [0, -1],
            "armies": [2, 0],
            "playerIndex": 0,
            "myGeneralLocationIndex": 0
        }"#;
        let raw: Snapshot = serde_json::from_str(json).unwrap();
        let state = TurnState::from_snapshot(raw).unwrap();
        assert_eq!(state.map().size(), 2);
        assert!(state.team().is_none());
    }
}
