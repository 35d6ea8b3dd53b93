//! Board, cell addressing and terrain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::game::PlayerId;

/// Raw sentinel for an empty visible cell.
pub const TERRAIN_EMPTY: i32 = -1;
/// Raw sentinel for a visible mountain.
pub const TERRAIN_MOUNTAIN: i32 = -2;
/// Raw sentinel for a fogged cell (empty, swamp or occupied).
pub const TERRAIN_FOG: i32 = -3;
/// Raw sentinel for a fogged obstacle (city or mountain).
pub const TERRAIN_FOG_MOUNTAIN: i32 = -4;

/// A cell position in the row-major flattening of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellIndex(pub usize);

impl CellIndex {
    /// The raw array position.
    #[must_use]
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CellIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// What the player can see on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    /// Owned by the given player.
    Owned(PlayerId),
    /// Visible, unowned and passable (may be a neutral city).
    Empty,
    /// Visible mountain.
    Mountain,
    /// Fogged, passable as far as we know.
    Fog,
    /// Fogged obstacle: a mountain or a city.
    FogMountain,
}

impl Terrain {
    /// Decode a raw terrain value. Returns `None` for values outside the encoding.
    #[must_use]
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            TERRAIN_EMPTY => Some(Self::Empty),
            TERRAIN_MOUNTAIN => Some(Self::Mountain),
            TERRAIN_FOG => Some(Self::Fog),
            TERRAIN_FOG_MOUNTAIN => Some(Self::FogMountain),
            v if v >= 0 => PlayerId::try_from(v).ok().map(Self::Owned),
            _ => None,
        }
    }

    /// Encode back to the wire value.
    #[must_use]
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Owned(player) => i32::from(player),
            Self::Empty => TERRAIN_EMPTY,
            Self::Mountain => TERRAIN_MOUNTAIN,
            Self::Fog => TERRAIN_FOG,
            Self::FogMountain => TERRAIN_FOG_MOUNTAIN,
        }
    }

    /// The owning player, if any.
    #[must_use]
    pub const fn owner(self) -> Option<PlayerId> {
        match self {
            Self::Owned(player) => Some(player),
            _ => None,
        }
    }

    /// Empty or owned: anything at or above the empty sentinel.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Owned(_) | Self::Empty)
    }
}

/// The visible board for one turn.
#[derive(Debug, Clone)]
pub struct Map {
    /// Width of the map in cells.
    width: usize,
    /// Height of the map in cells.
    height: usize,
    /// Terrain in row-major order.
    terrain: Vec<Terrain>,
    /// Army counts in row-major order.
    armies: Vec<u32>,
}

impl Map {
    /// Build a map from the raw wire arrays.
    ///
    /// # Errors
    ///
    /// Fails if the width is zero, the arrays differ in length, the length is
    /// not a multiple of the width, or any value is outside its encoding.
    pub fn from_raw(width: usize, terrain: &[i32], armies: &[i32]) -> Result<Self> {
        let terrain = terrain
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Terrain::from_raw(value).ok_or(BotError::UnknownTerrain { index, value })
            })
            .collect::<Result<Vec<_>>>()?;
        let armies = armies
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u32::try_from(value).map_err(|_| BotError::NegativeArmies { index, value })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(width, terrain, armies)
    }

    /// Build a map from typed cells, for tests and tools.
    ///
    /// # Errors
    ///
    /// Fails on a zero width or mismatched lengths.
    pub fn new(width: usize, terrain: Vec<Terrain>, armies: Vec<u32>) -> Result<Self> {
        if width == 0 || terrain.is_empty() || terrain.len() % width != 0 {
            return Err(BotError::InvalidDimensions {
                width,
                height: if width == 0 { 0 } else { terrain.len() / width },
            });
        }
        if armies.len() != terrain.len() {
            return Err(BotError::LengthMismatch {
                what: "armies",
                expected: terrain.len(),
                actual: armies.len(),
            });
        }
        Ok(Self {
            width,
            height: terrain.len() / width,
            terrain,
            armies,
        })
    }

    /// Get the width of the map.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the map.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub fn size(&self) -> usize {
        self.terrain.len()
    }

    /// Check if an index is on the board.
    #[must_use]
    #[inline]
    pub fn in_bounds(&self, index: CellIndex) -> bool {
        index.0 < self.terrain.len()
    }

    /// Row and column of a cell.
    #[must_use]
    #[inline]
    pub const fn row_col(&self, index: CellIndex) -> (usize, usize) {
        (index.0 / self.width, index.0 % self.width)
    }

    /// Terrain at a cell. Off-board cells read as fogged mountains.
    #[must_use]
    #[inline]
    pub fn terrain(&self, index: CellIndex) -> Terrain {
        self.terrain
            .get(index.0)
            .copied()
            .unwrap_or(Terrain::FogMountain)
    }

    /// Army count at a cell. Off-board cells read as zero.
    #[must_use]
    #[inline]
    pub fn armies(&self, index: CellIndex) -> u32 {
        self.armies.get(index.0).copied().unwrap_or(0)
    }

    /// Raw terrain slice in row-major order.
    #[must_use]
    pub fn terrain_cells(&self) -> &[Terrain] {
        &self.terrain
    }

    /// Raw army slice in row-major order.
    #[must_use]
    pub fn army_cells(&self) -> &[u32] {
        &self.armies
    }

    /// Get adjacent cells (up, down, left, right).
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid cells in indices 0..count. Moving left from
    /// column 0 or right from the last column yields no neighbor, even though
    /// the flat index would land in the adjacent row.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, index: CellIndex) -> ([CellIndex; 4], usize) {
        let mut result = [CellIndex(0); 4];
        let mut count = 0;
        if !self.in_bounds(index) {
            return (result, 0);
        }
        let (row, col) = self.row_col(index);

        if row > 0 {
            result[count] = CellIndex(index.0 - self.width); // up
            count += 1;
        }
        if row + 1 < self.height {
            result[count] = CellIndex(index.0 + self.width); // down
            count += 1;
        }
        if col > 0 {
            result[count] = CellIndex(index.0 - 1); // left
            count += 1;
        }
        if col + 1 < self.width {
            result[count] = CellIndex(index.0 + 1); // right
            count += 1;
        }

        (result, count)
    }

    /// Iterate over the neighbors of a cell in up, down, left, right order.
    pub fn neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> {
        let (adjacent, count) = self.adjacent(index);
        adjacent.into_iter().take(count)
    }

    /// Iterate over all cells with their terrain and armies.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Terrain, u32)> {
        self.terrain
            .iter()
            .zip(&self.armies)
            .enumerate()
            .map(|(index, (&terrain, &armies))| (CellIndex(index), terrain, armies))
    }

    /// Cells owned by a specific player.
    pub fn cells_owned_by(&self, player: PlayerId) -> impl Iterator<Item = CellIndex> {
        self.iter()
            .filter(move |(_, terrain, _)| terrain.owner() == Some(player))
            .map(|(index, _, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_map(width: usize, height: usize) -> Map {
        Map::new(
            width,
            vec![Terrain::Empty; width * height],
            vec![0; width * height],
        )
        .unwrap()
    }

    #[test]
    fn test_adjacent_center() {
        let map = open_map(3, 3);
        let neighbors: Vec<_> = map.neighbors(CellIndex(4)).collect();
        assert_eq!(
            neighbors,
            vec![CellIndex(1), CellIndex(7), CellIndex(3), CellIndex(5)]
        );
    }

    #[test]
    fn test_adjacent_corner() {
        let map = open_map(3, 3);
        let neighbors: Vec<_> = map.neighbors(CellIndex(0)).collect();
        assert_eq!(neighbors, vec![CellIndex(3), CellIndex(1)]);
    }

    #[test]
    fn test_adjacent_never_wraps_rows() {
        let map = open_map(4, 3);
        // Last column of row 0: index 4 is the first cell of row 1.
        let right_edge: Vec<_> = map.neighbors(CellIndex(3)).collect();
        assert!(!right_edge.contains(&CellIndex(4)));
        // First column of row 1: index 3 is the last cell of row 0.
        let left_edge: Vec<_> = map.neighbors(CellIndex(4)).collect();
        assert!(!left_edge.contains(&CellIndex(3)));
    }

    #[test]
    fn test_single_row() {
        let map = open_map(3, 1);
        let neighbors: Vec<_> = map.neighbors(CellIndex(1)).collect();
        assert_eq!(neighbors, vec![CellIndex(0), CellIndex(2)]);
    }

    #[test]
    fn test_out_of_bounds_has_no_neighbors() {
        let map = open_map(3, 3);
        assert_eq!(map.neighbors(CellIndex(9)).count(), 0);
        assert_eq!(map.terrain(CellIndex(9)), Terrain::FogMountain);
    }

    #[test]
    fn test_terrain_round_trip_sentinels() {
        for raw in [-4, -3, -2, -1, 0, 7] {
            let terrain = Terrain::from_raw(raw).unwrap();
            assert_eq!(terrain.to_raw(), raw);
        }
        assert!(Terrain::from_raw(-5).is_none());
        assert!(Terrain::from_raw(1000).is_none());
    }

    #[test]
    fn test_from_raw_rejects_bad_input() {
        assert!(matches!(
            Map::from_raw(0, &[-1], &[0]),
            Err(BotError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Map::from_raw(2, &[-1, -1], &[0]),
            Err(BotError::LengthMismatch { what: "armies", .. })
        ));
        assert!(matches!(
            Map::from_raw(2, &[-1, -9], &[0, 0]),
            Err(BotError::UnknownTerrain { index: 1, value: -9 })
        ));
        assert!(matches!(
            Map::from_raw(2, &[-1, -1], &[0, -3]),
            Err(BotError::NegativeArmies { index: 1, .. })
        ));
    }

    #[test]
    fn test_from_raw_decodes() {
        let map = Map::from_raw(2, &[0, -1, -2, -3], &[5, 0, 0, 0]).unwrap();
        assert_eq!(map.height(), 2);
        assert_eq!(map.terrain(CellIndex(0)), Terrain::Owned(0));
        assert_eq!(map.armies(CellIndex(0)), 5);
        assert_eq!(map.terrain(CellIndex(2)), Terrain::Mountain);
        assert_eq!(map.cells_owned_by(0).collect::<Vec<_>>(), vec![CellIndex(0)]);
    }
}
