//! Path reconstruction by gradient descent on a distance field.

use tracing::{debug, trace};

use crate::game::{CellIndex, TurnState, attack_diff};
use crate::pathing::{DistanceField, FieldOptions};

/// Walk from `target` back toward the field's source.
///
/// The result runs target first, source last. Each step goes to the neighbor
/// with the smallest distance below the current one, preferring the neighbor
/// our current stack fares best against. When the walk lands somewhere the
/// field never reached, it wanders to the first neighbor not yet on the path.
///
/// The walk is capped at one step per cell, so an unreachable target yields a
/// partial path that does not end at the source.
#[must_use]
pub fn extract_path(field: &DistanceField, target: CellIndex, state: &TurnState) -> Vec<CellIndex> {
    let map = state.map();
    if !map.in_bounds(target) {
        return Vec::new();
    }

    let mut path = vec![target];
    let mut current = target;
    for _ in 0..map.size() {
        if current == field.source() {
            break;
        }
        let Some(next) = next_step(field, state, current, &path) else {
            break;
        };
        path.push(next);
        current = next;
    }
    path
}

fn next_step(
    field: &DistanceField,
    state: &TurnState,
    current: CellIndex,
    path: &[CellIndex],
) -> Option<CellIndex> {
    let here = field.distance(current);
    let from = state.cell(current);

    let mut best: Option<(u32, i64, CellIndex)> = None;
    let mut saw_distance = false;
    for neighbor in state.map().neighbors(current) {
        let Some(distance) = field.distance(neighbor) else {
            continue;
        };
        saw_distance = true;
        if here.is_some_and(|h| distance >= h) {
            continue;
        }
        let score = attack_diff(&from, &state.cell(neighbor));
        let better = match best {
            None => true,
            Some((best_distance, best_score, _)) => {
                distance < best_distance || (distance == best_distance && score > best_score)
            }
        };
        if better {
            best = Some((distance, score, neighbor));
        }
    }

    if let Some((_, _, next)) = best {
        return Some(next);
    }
    if saw_distance {
        return None;
    }

    let fallback = state
        .map()
        .neighbors(current)
        .find(|n| !path.contains(n));
    trace!(from = %current, to = ?fallback.map(|c| c.get()), "path left the field");
    fallback
}

/// Build a field from `source` and extract the path to `target`.
#[must_use]
pub fn find_path(
    state: &TurnState,
    source: CellIndex,
    target: CellIndex,
    options: FieldOptions,
) -> Vec<CellIndex> {
    let field = DistanceField::build(state, source, options);
    let path = extract_path(&field, target, state);
    debug!(%source, %target, len = path.len(), "new path");
    path
}

/// Whether a target→source path actually arrives at `source`.
#[must_use]
pub fn reaches(path: &[CellIndex], source: CellIndex) -> bool {
    path.last() == Some(&source)
}

/// Attack moves along a target→source path, in execution order.
///
/// Yields `(attacker, target)` pairs starting at the source end.
pub fn path_moves(path: &[CellIndex]) -> impl Iterator<Item = (CellIndex, CellIndex)> {
    path.windows(2).rev().map(|pair| (pair[1], pair[0]))
}
