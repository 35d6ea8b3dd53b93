//! The planning rules.
//!
//! Each rule inspects the queue, decides for itself whether it may act, and
//! either leaves the plan alone, appends to it, or throws it away. Strategies
//! call them in a fixed order.

use tracing::debug;

use crate::game::{Cell, CellIndex, TurnState, half_suffices, is_losing, overwhelms};
use crate::intel::{Army, Intel};
use crate::pathing::{
    DistanceField, FieldOptions, find_path, is_traversable, path_moves, reaches,
};
use crate::planner::{
    AttackMove, AttackQueue, MoveMode, PRIORITY_CITY, PRIORITY_DEFAULT, PRIORITY_GATHER,
    PRIORITY_GENERAL_CAPTURE, PRIORITY_SEEK,
};
use crate::rng::Rng;

/// A city holding more than this is worth bringing home first.
pub const GATHER_CITY_ARMIES: u32 = 24;

/// Throw the plan away when its next move no longer makes sense.
///
/// The head is stale when we lost the attacker, the attacker is down to its
/// last unit, or the attack would be lost. Losing attacks are kept when the
/// plan's priority is at least `keep_losing_from`.
pub fn drop_stale_head(queue: &mut AttackQueue, state: &TurnState, keep_losing_from: u32) -> bool {
    let Some(head) = queue.head().copied() else {
        return false;
    };
    let attacker = state.cell(head.attacker);
    let target = state.cell(head.target);

    let stale = !attacker.is_mine
        || attacker.armies < 2
        || (is_losing(attacker.armies, target.armies)
            && !target.is_friendly()
            && head.priority < keep_losing_from);
    if stale {
        debug!(head = %head, dropped = queue.len(), "plan abandoned");
        queue.clear();
    }
    stale
}

/// Throw the plan away when the next attacker is down to its last unit.
pub fn drop_exhausted_head(queue: &mut AttackQueue, state: &TurnState) -> bool {
    let exhausted = queue
        .head()
        .is_some_and(|head| state.map().armies(head.attacker) < 2);
    if exhausted {
        debug!(dropped = queue.len(), "attacker exhausted");
        queue.clear();
    }
    exhausted
}

/// First neighbor of the plan's next attacker matching `wanted` that it can
/// take outright.
fn beatable_neighbor(
    state: &TurnState,
    attacker: &Cell,
    wanted: impl Fn(&Cell) -> bool,
) -> Option<Cell> {
    state
        .neighbor_cells(attacker.index)
        .find(|n| n.is_attackable && wanted(n) && overwhelms(attacker.armies, n.armies))
}

/// Drop everything to take an enemy general standing next to our attacker.
pub fn capture_adjacent_general(queue: &mut AttackQueue, state: &TurnState) -> bool {
    let Some(head) = queue.head().copied() else {
        return false;
    };
    if head.priority >= PRIORITY_GENERAL_CAPTURE {
        return false;
    }

    let attacker = state.cell(head.attacker);
    let Some(general) = beatable_neighbor(state, &attacker, |n| n.is_enemy_general) else {
        return false;
    };
    let attack = AttackMove::new(MoveMode::GeneralCapture, attacker.index, general.index)
        .with_priority(PRIORITY_GENERAL_CAPTURE);
    debug!(%attack, "general in reach");
    queue.replace(attack);
    true
}

/// March the largest stack on the first known enemy general.
pub fn seek_and_destroy(queue: &mut AttackQueue, state: &TurnState, intel: &Intel) -> bool {
    if !queue.yields_to(PRIORITY_SEEK) {
        return false;
    }
    let Some(general) = state.enemy_generals().next() else {
        return false;
    };
    let Some(army) = intel.largest() else {
        return false;
    };

    queue.clear();
    let queued = queue_path_to_target(
        queue,
        state,
        army.index,
        general,
        MoveMode::SeekAndDestroy,
        PRIORITY_SEEK,
        FieldOptions::default(),
    );
    queued > 0
}

/// Swap a routine plan for a city next to the current attacker.
pub fn take_adjacent_city(queue: &mut AttackQueue, state: &TurnState) -> bool {
    let Some(head) = queue.head().copied() else {
        return false;
    };
    if head.priority >= PRIORITY_CITY {
        return false;
    }

    let attacker = state.cell(head.attacker);
    let Some(city) = beatable_neighbor(state, &attacker, |n| n.is_city) else {
        return false;
    };
    let attack = AttackMove::new(MoveMode::CityPriority, attacker.index, city.index)
        .with_priority(PRIORITY_CITY)
        .with_half(half_suffices(attacker.armies, city.armies));
    debug!(%attack, "city in reach");
    queue.replace(attack);
    true
}

/// Queue one winnable fight next to one of `armies`.
///
/// Stacks are tried in the order given. Around each stack, cities are tried
/// first, then the weakest neighbors.
pub fn queue_easy_wins(queue: &mut AttackQueue, state: &TurnState, armies: &[Army]) -> bool {
    if !queue.is_empty() {
        return false;
    }

    for army in armies {
        let attacker = state.cell(army.index);
        let mut neighbors: Vec<Cell> = state.neighbor_cells(army.index).collect();
        neighbors.sort_by(|a, b| b.is_city.cmp(&a.is_city).then(a.armies.cmp(&b.armies)));

        let target = neighbors
            .iter()
            .find(|n| n.is_attackable && overwhelms(attacker.armies, n.armies));
        if let Some(target) = target {
            let attack = AttackMove::new(MoveMode::EasyWin, attacker.index, target.index);
            debug!(%attack, "easy win");
            queue.push(attack);
            return true;
        }
    }
    false
}

/// Send the largest stack somewhere when nothing else is planned.
///
/// Tries, in order: a visible enemy cell it can beat, a fogged cell, any
/// visible enemy cell. Each pick is random among its candidates.
pub fn pressure_border(
    queue: &mut AttackQueue,
    state: &TurnState,
    intel: &Intel,
    rng: &mut Rng,
) -> bool {
    if !queue.is_empty() {
        return false;
    }
    let Some(army) = intel.largest() else {
        return false;
    };

    let beatable: Vec<CellIndex> = intel
        .visible_enemy
        .iter()
        .copied()
        .filter(|&c| overwhelms(army.armies, state.map().armies(c)))
        .collect();

    let choices = [
        (beatable.as_slice(), MoveMode::AttackBorder),
        (intel.fogged.as_slice(), MoveMode::Explore),
        (intel.visible_enemy.as_slice(), MoveMode::AttackBorder),
    ];
    for (candidates, mode) in choices {
        let Some(&target) = rng.choose(candidates) else {
            continue;
        };
        let queued = queue_path_to_target(
            queue,
            state,
            army.index,
            target,
            mode,
            PRIORITY_DEFAULT,
            FieldOptions::default(),
        );
        if queued > 0 {
            return true;
        }
    }
    false
}

/// Walk the largest stack toward a random fogged cell.
pub fn explore_fog(queue: &mut AttackQueue, state: &TurnState, intel: &Intel, rng: &mut Rng) -> bool {
    if !queue.is_empty() {
        return false;
    }
    let (Some(army), Some(&target)) = (intel.largest(), rng.choose(&intel.fogged)) else {
        return false;
    };
    let queued = queue_path_to_target(
        queue,
        state,
        army.index,
        target,
        MoveMode::Explore,
        PRIORITY_DEFAULT,
        FieldOptions::default(),
    );
    queued > 0
}

/// Bring the most useful stack home to our general.
///
/// Candidates exclude the general's own cell and are ranked: big cities
/// first, then larger stacks, then stacks farther from home.
pub fn gather_to_general(queue: &mut AttackQueue, state: &TurnState, intel: &Intel) -> bool {
    if !queue.is_empty() {
        return false;
    }
    let Some(general) = intel.my_general.map(|g| g.index) else {
        return false;
    };

    let home = DistanceField::build(state, general, FieldOptions::default());
    let distance = |army: &Army| home.distance(army.index).unwrap_or(0);
    let big_city =
        |army: &Army| state.is_known_city(army.index) && army.armies > GATHER_CITY_ARMIES;

    let mut candidates: Vec<Army> = intel
        .top_armies
        .iter()
        .copied()
        .filter(|a| a.index != general)
        .collect();
    candidates.sort_by(|a, b| {
        big_city(b)
            .cmp(&big_city(a))
            .then(b.armies.cmp(&a.armies))
            .then(distance(b).cmp(&distance(a)))
    });

    let Some(best) = candidates.first() else {
        return false;
    };
    let queued = queue_path_to_target(
        queue,
        state,
        best.index,
        general,
        MoveMode::GatherToGeneral,
        PRIORITY_GATHER,
        FieldOptions::default(),
    );
    queued > 0
}

/// Append every step from `attacker` to `target`.
///
/// Returns the number of moves queued. Nothing is queued when the path does
/// not lead back to the attacker, or when any cell on it is one the search
/// treats as an obstacle.
pub fn queue_path_to_target(
    queue: &mut AttackQueue,
    state: &TurnState,
    attacker: CellIndex,
    target: CellIndex,
    mode: MoveMode,
    priority: u32,
    options: FieldOptions,
) -> usize {
    let path = find_path(state, attacker, target, options);
    if !reaches(&path, attacker) {
        debug!(%attacker, %target, %mode, "no route");
        return 0;
    }
    if let Some(blocked) = path.iter().find(|&&c| !is_traversable(state, c, options)) {
        debug!(%attacker, %target, %mode, %blocked, "route crosses an obstacle");
        return 0;
    }

    let before = queue.len();
    for (from, to) in path_moves(&path) {
        queue.push(AttackMove::new(mode, from, to).with_priority(priority));
    }
    queue.len() - before
}
