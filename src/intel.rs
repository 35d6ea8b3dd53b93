//! Per-turn board summary.
//!
//! One linear pass over the board sorts every cell into the buckets the
//! planner draws targets from and ranks our own stacks. The terrain and army
//! arrays are replaced wholesale by each update, so the summary is rebuilt
//! every turn and never patched.

use crate::game::{Cell, CellIndex, Terrain, TurnState};

/// Stacks smaller than this cannot attack anything.
pub const USEFUL_ARMY_THRESHOLD: u32 = 2;

/// One of our stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Army {
    /// Where the stack stands.
    pub index: CellIndex,
    /// Units in the stack.
    pub armies: u32,
}

/// What the planner knows about the board this turn.
#[derive(Debug, Clone, Default)]
pub struct Intel {
    /// Cells we own, in board order.
    pub mine: Vec<CellIndex>,
    /// Visible unowned cells.
    pub empty: Vec<CellIndex>,
    /// Fogged cells that are not known mountains.
    pub fogged: Vec<CellIndex>,
    /// Visible cells held by players outside our team.
    pub visible_enemy: Vec<CellIndex>,
    /// Known cities we do not hold. Informational: only the turn log reads it.
    pub cities: Vec<CellIndex>,
    /// Every stack we own, largest first.
    pub my_armies: Vec<Army>,
    /// Stacks large enough to attack, largest first.
    pub top_armies: Vec<Army>,
    /// Units we could move this turn: every stack minus the one left behind.
    pub deployable_power: u64,
    /// Our general, when we know where it is.
    pub my_general: Option<Cell>,
    /// Tiles we hold.
    pub tiles: u32,
    /// Some living enemy holds more land than we do. Informational: only the
    /// turn log reads it.
    pub behind_in_land: bool,
}

impl Intel {
    /// Summarize the board.
    ///
    /// Thresholds below [`USEFUL_ARMY_THRESHOLD`] are raised to it.
    #[must_use]
    pub fn gather(state: &TurnState, useful_army_threshold: u32) -> Self {
        let threshold = useful_army_threshold.max(USEFUL_ARMY_THRESHOLD);
        let mut intel = Self::default();

        for (index, terrain, armies) in state.map().iter() {
            match terrain {
                Terrain::Owned(owner) if owner == state.player() => {
                    intel.mine.push(index);
                    intel.my_armies.push(Army { index, armies });
                    if armies > 1 {
                        intel.deployable_power += u64::from(armies - 1);
                    }
                }
                Terrain::Owned(owner) if !state.is_teammate(owner) => {
                    intel.visible_enemy.push(index);
                }
                Terrain::Empty => intel.empty.push(index),
                Terrain::Fog => intel.fogged.push(index),
                _ => {}
            }
            if state.is_known_city(index) && terrain.owner() != Some(state.player()) {
                intel.cities.push(index);
            }
        }

        // Stable, so equal stacks keep board order.
        intel.my_armies.sort_by(|a, b| b.armies.cmp(&a.armies));
        intel.top_armies = intel
            .my_armies
            .iter()
            .copied()
            .filter(|army| army.armies >= threshold)
            .collect();

        intel.my_general = state
            .my_general()
            .filter(|g| state.map().in_bounds(*g))
            .map(|g| state.cell(g));
        intel.tiles = u32::try_from(intel.mine.len()).unwrap_or(u32::MAX);
        intel.behind_in_land = state
            .opponents()
            .iter()
            .any(|o| o.is_hostile() && o.player != state.player() && o.tiles > intel.tiles);

        intel
    }

    /// Our largest stack.
    #[must_use]
    pub fn largest(&self) -> Option<Army> {
        self.my_armies.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Map, OpponentRecord};

    //  0  E  F
    //  M  0  1
    //  2  FM E
    fn state() -> TurnState {
        let terrain = [0, -1, -3, -2, 0, 1, 2, -4, -1];
        let armies = [3, 0, 0, 0, 7, 2, 4, 0, 40];
        let map = Map::from_raw(3, &terrain, &armies).unwrap();
        TurnState::new(map, 0)
            .with_teams(vec![0, 1, 0])
            .with_cities(vec![CellIndex(8), CellIndex(4)])
            .with_general(CellIndex(4))
            .with_opponents(vec![OpponentRecord {
                tiles: 5,
                ..OpponentRecord::new(1)
            }])
    }

    fn idx(raw: &[usize]) -> Vec<CellIndex> {
        raw.iter().copied().map(CellIndex).collect()
    }

    #[test]
    fn test_buckets() {
        let intel = Intel::gather(&state(), USEFUL_ARMY_THRESHOLD);
        assert_eq!(intel.mine, idx(&[0, 4]));
        assert_eq!(intel.empty, idx(&[1, 8]));
        assert_eq!(intel.fogged, idx(&[2]));
        // Cell 6 belongs to a teammate.
        assert_eq!(intel.visible_enemy, idx(&[5]));
        assert_eq!(intel.cities, idx(&[8]));
    }

    #[test]
    fn test_armies_ranked() {
        let intel = Intel::gather(&state(), USEFUL_ARMY_THRESHOLD);
        let ranked: Vec<_> = intel.my_armies.iter().map(|a| a.index).collect();
        assert_eq!(ranked, idx(&[4, 0]));
        assert_eq!(intel.largest().map(|a| a.armies), Some(7));
        assert_eq!(intel.deployable_power, 6 + 2);
        assert_eq!(intel.tiles, 2);
    }

    #[test]
    fn test_top_armies_threshold() {
        let intel = Intel::gather(&state(), 5);
        assert_eq!(intel.top_armies.len(), 1);
        let intel = Intel::gather(&state(), 0);
        assert_eq!(intel.top_armies.len(), 2);
    }

    #[test]
    fn test_general_and_land() {
        let intel = Intel::gather(&state(), USEFUL_ARMY_THRESHOLD);
        assert_eq!(intel.my_general.map(|g| g.armies), Some(7));
        assert!(intel.behind_in_land);
    }

    #[test]
    fn test_equal_stacks_keep_board_order() {
        let map = Map::from_raw(3, &[0, 0, 0], &[2, 5, 2]).unwrap();
        let intel = Intel::gather(&TurnState::new(map, 0), USEFUL_ARMY_THRESHOLD);
        let ranked: Vec<_> = intel.my_armies.iter().map(|a| a.index).collect();
        assert_eq!(ranked, idx(&[1, 0, 2]));
        assert!(intel.my_general.is_none());
        assert!(!intel.behind_in_land);
    }
}
