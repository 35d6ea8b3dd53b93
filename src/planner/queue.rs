//! The attack queue and its entries.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::CellIndex;

/// Routine moves: easy wins, border pressure, exploration.
pub const PRIORITY_DEFAULT: u32 = 0;
/// Taking a city next to the current attacker.
pub const PRIORITY_CITY: u32 = 1;
/// Marching on a known enemy general.
pub const PRIORITY_SEEK: u32 = 10;
/// Pulling a stack back to our own general.
pub const PRIORITY_GATHER: u32 = 20;
/// Capturing an enemy general next to the current attacker.
pub const PRIORITY_GENERAL_CAPTURE: u32 = 100;

/// Which heuristic produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveMode {
    /// A winnable fight next to one of our stacks.
    EasyWin,
    /// An enemy general turned up next to the current attacker.
    GeneralCapture,
    /// A step on the road to a known enemy general.
    SeekAndDestroy,
    /// A city next to the current attacker.
    CityPriority,
    /// A step toward a visible enemy cell.
    AttackBorder,
    /// A step toward a random fogged cell.
    Explore,
    /// A step bringing a stack home to our general.
    GatherToGeneral,
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EasyWin => "EasyWin",
            Self::GeneralCapture => "GeneralCapture",
            Self::SeekAndDestroy => "SeekAndDestroy",
            Self::CityPriority => "CityPriority",
            Self::AttackBorder => "AttackBorder",
            Self::Explore => "Explore",
            Self::GatherToGeneral => "GatherToGeneral",
        };
        f.write_str(name)
    }
}

/// The move sent to the server: all but one unit (or half) from `attacker`
/// onto `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Cell the units leave.
    pub attacker_index: CellIndex,
    /// Cell the units move onto.
    pub target_index: CellIndex,
    /// Commit only half the stack.
    pub send_half: bool,
}

/// One planned move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackMove {
    /// Heuristic that queued the move.
    pub mode: MoveMode,
    /// Cell the units leave.
    pub attacker: CellIndex,
    /// Cell the units move onto.
    pub target: CellIndex,
    /// Commit only half the stack.
    pub send_half: bool,
    /// Urgency; lower-priority rules never overwrite it.
    pub priority: u32,
}

impl AttackMove {
    /// A full-stack move at default priority.
    #[must_use]
    pub const fn new(mode: MoveMode, attacker: CellIndex, target: CellIndex) -> Self {
        Self {
            mode,
            attacker,
            target,
            send_half: false,
            priority: PRIORITY_DEFAULT,
        }
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set whether only half the stack moves.
    #[must_use]
    pub const fn with_half(mut self, send_half: bool) -> Self {
        self.send_half = send_half;
        self
    }

    /// What actually goes over the wire.
    #[must_use]
    pub const fn action(&self) -> Action {
        Action {
            attacker_index: self.attacker,
            target_index: self.target,
            send_half: self.send_half,
        }
    }
}

impl fmt::Display for AttackMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} --> {}", self.mode, self.attacker, self.target)?;
        if self.send_half {
            f.write_str(" (HALF)")?;
        }
        Ok(())
    }
}

/// Moves waiting to be sent, oldest first.
///
/// Executed one per turn from the front. Rules never reorder entries; they
/// either append or throw the whole plan away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackQueue {
    moves: VecDeque<AttackMove>,
}

impl AttackQueue {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The next move to execute.
    #[must_use]
    pub fn head(&self) -> Option<&AttackMove> {
        self.moves.front()
    }

    /// Priority of the plan in progress, if any.
    #[must_use]
    pub fn head_priority(&self) -> Option<u32> {
        self.head().map(|m| m.priority)
    }

    /// Whether an opportunity at `priority` may overwrite the current plan.
    ///
    /// Only strictly higher priorities preempt; an empty queue yields to
    /// anything.
    #[must_use]
    pub fn yields_to(&self, priority: u32) -> bool {
        self.head_priority().is_none_or(|p| p < priority)
    }

    /// Append a move.
    pub fn push(&mut self, attack: AttackMove) {
        self.moves.push_back(attack);
    }

    /// Abandon the plan.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Abandon the plan in favour of a single move.
    pub fn replace(&mut self, attack: AttackMove) {
        self.moves.clear();
        self.moves.push_back(attack);
    }

    /// Take the next move.
    pub fn pop(&mut self) -> Option<AttackMove> {
        self.moves.pop_front()
    }

    /// Queued moves, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AttackMove> {
        self.moves.iter()
    }
}
