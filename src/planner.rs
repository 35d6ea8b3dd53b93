//! Move planning.
//!
//! The planner keeps a FIFO queue of attack moves between turns. Each turn a
//! [`Strategy`] runs its rules over the queue in a fixed order:
//!
//! ```text
//! validity → general capture → seek & destroy → city → easy wins → border
//!                 100               10           1        0          0
//! ```
//!
//! A plan in progress only gives way to a strictly higher priority.

mod queue;
pub mod rules;
mod strategy;

pub use queue::{
    Action, AttackMove, AttackQueue, MoveMode, PRIORITY_CITY, PRIORITY_DEFAULT, PRIORITY_GATHER,
    PRIORITY_GENERAL_CAPTURE, PRIORITY_SEEK,
};
pub use strategy::{BotKind, Explorer, Gatherer, Hunter, Strategy};

use crate::config::BotConfig;
use crate::game::TurnState;
use crate::intel::Intel;
use crate::rng::Rng;

/// Everything a planning pass reads, plus the RNG it draws from.
#[derive(Debug)]
pub struct PlanContext<'a> {
    /// This turn's board.
    pub state: &'a TurnState,
    /// This turn's summary of the board.
    pub intel: &'a Intel,
    /// Bot tuning.
    pub config: &'a BotConfig,
    /// Source for random target choice.
    pub rng: &'a mut Rng,
}

/// Run one planning pass: take last turn's queue, return this turn's.
#[must_use]
pub fn plan(strategy: &dyn Strategy, mut queue: AttackQueue, ctx: &mut PlanContext<'_>) -> AttackQueue {
    strategy.plan(&mut queue, ctx);
    queue
}
