//! Combat arithmetic.
//!
//! An attack moves all but one unit off the attacker. Against a hostile cell
//! the two stacks cancel out; onto a friendly cell they merge.

use crate::game::Cell;

/// Units left after `attacker` moves onto `target`. Higher is better.
///
/// Cooperative when both cells share an owner or a team (the merged stack,
/// minus the unit left behind); otherwise the survivors of the fight.
#[must_use]
pub fn attack_diff(attacker: &Cell, target: &Cell) -> i64 {
    let a = i64::from(attacker.armies);
    let b = i64::from(target.armies);
    let same_owner = attacker.terrain.owner().is_some() && attacker.terrain == target.terrain;
    if same_owner || attacker.same_team_as(target) {
        a + b - 1
    } else {
        a - b - 1
    }
}

/// Whether `attacker` wins against `target` with a unit to spare.
#[must_use]
pub const fn overwhelms(attacker_armies: u32, target_armies: u32) -> bool {
    attacker_armies > target_armies.saturating_add(1)
}

/// Whether an attack would leave us with nothing: the armies that can move
/// (all but one) do not exceed the defenders.
#[must_use]
pub const fn is_losing(attacker_armies: u32, target_armies: u32) -> bool {
    attacker_armies.saturating_sub(1) <= target_armies
}

/// Whether half the attacker still overwhelms the target.
#[must_use]
pub fn half_suffices(attacker_armies: u32, target_armies: u32) -> bool {
    // a / 2 > t + 1, kept exact for odd armies
    u64::from(attacker_armies) > 2 * (u64::from(target_armies) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CellIndex, Terrain};

    fn cell(terrain: Terrain, armies: u32, team: Option<u32>) -> Cell {
        Cell {
            index: CellIndex(0),
            terrain,
            armies,
            team,
            is_mine: false,
            is_teammate: false,
            is_attackable: false,
            is_city: false,
            is_enemy_general: false,
        }
    }

    #[test]
    fn test_attack_diff_hostile() {
        let a = cell(Terrain::Owned(0), 10, Some(0));
        let b = cell(Terrain::Owned(1), 4, Some(1));
        assert_eq!(attack_diff(&a, &b), 5);
        assert_eq!(attack_diff(&b, &a), -7);
    }

    #[test]
    fn test_attack_diff_same_owner() {
        let a = cell(Terrain::Owned(0), 10, Some(0));
        let b = cell(Terrain::Owned(0), 4, Some(0));
        assert_eq!(attack_diff(&a, &b), 13);
        assert_eq!(attack_diff(&b, &a), 13);
    }

    #[test]
    fn test_attack_diff_same_team() {
        let a = cell(Terrain::Owned(0), 3, Some(1));
        let b = cell(Terrain::Owned(2), 6, Some(1));
        assert_eq!(attack_diff(&a, &b), 8);
        assert_eq!(attack_diff(&b, &a), 8);
    }

    #[test]
    fn test_attack_diff_empty_target() {
        let a = cell(Terrain::Owned(0), 5, Some(0));
        let b = cell(Terrain::Empty, 0, None);
        assert_eq!(attack_diff(&a, &b), 4);
    }

    #[test]
    fn test_attack_diff_unowned_cells_fight() {
        let a = cell(Terrain::Empty, 5, None);
        let b = cell(Terrain::Empty, 2, None);
        assert_eq!(attack_diff(&a, &b), 2);
        let a = cell(Terrain::Fog, 0, None);
        let b = cell(Terrain::Fog, 0, None);
        assert_eq!(attack_diff(&a, &b), -1);
    }

    #[test]
    fn test_thresholds() {
        assert!(overwhelms(5, 3));
        assert!(!overwhelms(4, 3));
        assert!(is_losing(4, 3));
        assert!(!is_losing(5, 3));
        assert!(half_suffices(9, 3));
        assert!(!half_suffices(8, 3));
    }
}
