//! Bot personalities.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::intel::Army;
use crate::planner::{AttackQueue, PRIORITY_SEEK, PlanContext, rules};

/// A planning policy: rewrites the queue once per turn.
pub trait Strategy: fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run one planning pass over `queue`.
    fn plan(&self, queue: &mut AttackQueue, ctx: &mut PlanContext<'_>);
}

/// Hunts enemy generals, grabs cities and easy wins on the way, and pushes
/// into enemy land or fog when idle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hunter;

impl Strategy for Hunter {
    fn name(&self) -> &'static str {
        "hunter"
    }

    fn plan(&self, queue: &mut AttackQueue, ctx: &mut PlanContext<'_>) {
        let (state, intel) = (ctx.state, ctx.intel);
        rules::drop_stale_head(queue, state, PRIORITY_SEEK);
        rules::capture_adjacent_general(queue, state);
        rules::seek_and_destroy(queue, state, intel);
        rules::take_adjacent_city(queue, state);
        rules::queue_easy_wins(queue, state, &intel.top_armies);
        rules::pressure_border(queue, state, intel, ctx.rng);
    }
}

/// Takes easy wins, otherwise pulls its stacks home to the general.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gatherer;

impl Strategy for Gatherer {
    fn name(&self) -> &'static str {
        "gatherer"
    }

    fn plan(&self, queue: &mut AttackQueue, ctx: &mut PlanContext<'_>) {
        let (state, intel) = (ctx.state, ctx.intel);
        rules::drop_stale_head(queue, state, u32::MAX);

        if queue.is_empty() {
            let general = intel.my_general.map(|g| g.index);
            let armies: Vec<Army> = if state.turn() <= ctx.config.opening_game_turns {
                intel.top_armies.clone()
            } else {
                intel
                    .top_armies
                    .iter()
                    .copied()
                    .filter(|a| Some(a.index) != general)
                    .collect()
            };
            rules::queue_easy_wins(queue, state, &armies);
        }

        rules::gather_to_general(queue, state, intel);
    }
}

/// Wanders its largest stack into the fog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explorer;

impl Strategy for Explorer {
    fn name(&self) -> &'static str {
        "explorer"
    }

    fn plan(&self, queue: &mut AttackQueue, ctx: &mut PlanContext<'_>) {
        rules::drop_exhausted_head(queue, ctx.state);
        rules::explore_fog(queue, ctx.state, ctx.intel, ctx.rng);
    }
}

/// Selectable strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    /// Seek generals, take cities, pressure borders.
    #[default]
    Hunter,
    /// Gather armies to the general.
    Gatherer,
    /// Explore the fog at random.
    Explorer,
}

impl BotKind {
    /// Build the strategy.
    #[must_use]
    pub fn strategy(self) -> Box<dyn Strategy> {
        match self {
            Self::Hunter => Box::new(Hunter),
            Self::Gatherer => Box::new(Gatherer),
            Self::Explorer => Box::new(Explorer),
        }
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;
    use crate::game::{CellIndex, Map, TurnState};
    use crate::intel::Intel;
    use crate::planner::{AttackMove, MoveMode, PRIORITY_DEFAULT, PRIORITY_GATHER};
    use crate::rng::Rng;

    fn run(strategy: &dyn Strategy, queue: &mut AttackQueue, state: &TurnState, config: &BotConfig) {
        let intel = Intel::gather(state, config.useful_army_threshold);
        let mut rng = Rng::new(config.seed);
        let mut ctx = PlanContext {
            state,
            intel: &intel,
            config,
            rng: &mut rng,
        };
        strategy.plan(queue, &mut ctx);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(BotKind::Hunter.to_string(), "hunter");
        assert_eq!(BotKind::Gatherer.to_string(), "gatherer");
        assert_eq!(BotKind::Explorer.to_string(), "explorer");
        assert_eq!(BotKind::default(), BotKind::Hunter);
    }

    #[test]
    fn test_gatherer_spares_general_after_opening() {
        // G . a
        let map = Map::from_raw(3, &[0, -1, 0], &[9, 0, 1]).unwrap();
        let state = TurnState::new(map, 0).with_general(CellIndex(0));
        let config = BotConfig::default();

        let mut queue = AttackQueue::new();
        run(&Gatherer, &mut queue, &state.clone().with_turn(30), &config);
        assert_eq!(queue.head().map(|m| m.mode), Some(MoveMode::EasyWin));

        // Later the general stays home and nothing else is big enough.
        let mut queue = AttackQueue::new();
        run(&Gatherer, &mut queue, &state.with_turn(80), &config);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_gatherer_brings_stack_home() {
        // G . . a
        let map = Map::from_raw(4, &[0, 0, 0, 0], &[2, 1, 1, 6]).unwrap();
        let state = TurnState::new(map, 0).with_general(CellIndex(0)).with_turn(80);
        let mut queue = AttackQueue::new();
        run(&Gatherer, &mut queue, &state, &BotConfig::default());
        let moves: Vec<_> = queue.iter().map(|m| (m.attacker.get(), m.target.get())).collect();
        assert_eq!(moves, vec![(3, 2), (2, 1), (1, 0)]);
        assert!(queue.iter().all(|m| m.priority == PRIORITY_GATHER));
    }

    #[test]
    fn test_explorer_walks_into_fog() {
        let map = Map::from_raw(3, &[0, -1, -3], &[5, 0, 0]).unwrap();
        let state = TurnState::new(map, 0).with_turn(30);
        let mut queue = AttackQueue::new();
        run(&Explorer, &mut queue, &state, &BotConfig::default());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.iter().last().map(|m| m.target), Some(CellIndex(2)));
    }

    #[test]
    fn test_explorer_keeps_plan_while_attacker_has_units() {
        let map = Map::from_raw(3, &[0, -1, -3], &[5, 0, 0]).unwrap();
        let state = TurnState::new(map, 0);
        let mut queue = AttackQueue::new();
        let planned = AttackMove::new(MoveMode::Explore, CellIndex(0), CellIndex(1))
            .with_priority(PRIORITY_DEFAULT);
        queue.push(planned);
        run(&Explorer, &mut queue, &state, &BotConfig::default());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.head(), Some(&planned));
    }
}
