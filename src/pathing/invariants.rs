//! Distance field invariants - sanity checks that detect search bugs.
//!
//! A correctly built field never trips these. Tests and the fuzz harness run
//! them after every build.

use crate::game::{CellIndex, TurnState};
use crate::pathing::{DistanceField, Reach, is_traversable};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all distance field invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_field_invariants(field: &DistanceField, state: &TurnState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let map = state.map();
    let source = field.source();

    if field.cells().len() != map.size() {
        violations.push(InvariantViolation {
            message: format!(
                "Field covers {} cells but the map has {}",
                field.cells().len(),
                map.size()
            ),
        });
        return violations;
    }

    if map.in_bounds(source) && field.reach(source) != Reach::Distance(0) {
        violations.push(InvariantViolation {
            message: format!("Source {source} is labelled {:?}", field.reach(source)),
        });
    }

    for (i, reach) in field.cells().iter().enumerate() {
        let index = CellIndex(i);
        if index == source {
            continue;
        }

        let closest = map.neighbors(index).filter_map(|n| field.distance(n)).min();

        match *reach {
            Reach::Distance(d) => {
                if d == 0 {
                    violations.push(InvariantViolation {
                        message: format!("Cell {index} has distance 0 but is not the source"),
                    });
                }
                if closest.map(|c| c + 1) != Some(d) {
                    violations.push(InvariantViolation {
                        message: format!(
                            "Cell {index} has distance {d} but its closest neighbor is {closest:?}"
                        ),
                    });
                }
                if !is_traversable(state, index, field.options()) {
                    violations.push(InvariantViolation {
                        message: format!("Cell {index} has distance {d} but is not traversable"),
                    });
                }
            }
            Reach::BlockedByMountain | Reach::BlockedByCity => {
                if closest.is_none() {
                    violations.push(InvariantViolation {
                        message: format!("Blocked cell {index} has no labelled neighbor"),
                    });
                }
            }
            Reach::Unvisited => {
                if closest.is_some() {
                    violations.push(InvariantViolation {
                        message: format!("Cell {index} is unvisited next to a labelled cell"),
                    });
                }
            }
        }
    }

    violations
}
