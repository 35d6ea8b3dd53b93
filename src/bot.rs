//! The bot: one planning pass and at most one move per turn.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::config::BotConfig;
use crate::error::Result;
use crate::game::TurnState;
use crate::intel::Intel;
use crate::planner::{self, Action, AttackMove, AttackQueue, PlanContext, Strategy};
use crate::rng::Rng;
use crate::tracker::GameTracker;

/// A bot playing one game.
///
/// Owns the attack queue between turns. Each turn it plans against a fresh
/// [`TurnState`] and sends the move at the front of the queue.
#[derive(Debug)]
pub struct Bot {
    config: BotConfig,
    strategy: Box<dyn Strategy>,
    queue: AttackQueue,
    rng: Rng,
    history: VecDeque<AttackMove>,
}

impl Bot {
    /// Create a bot from its config.
    #[must_use]
    pub fn new(config: BotConfig) -> Self {
        Self {
            strategy: config.kind.strategy(),
            queue: AttackQueue::new(),
            rng: Rng::new(config.seed),
            history: VecDeque::with_capacity(config.history_len),
            config,
        }
    }

    /// The config the bot was built with.
    #[must_use]
    pub const fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Moves still planned.
    #[must_use]
    pub const fn queue(&self) -> &AttackQueue {
        &self.queue
    }

    /// Recent moves, newest first.
    pub fn history(&self) -> impl Iterator<Item = &AttackMove> {
        self.history.iter()
    }

    /// Forget the plan and history, e.g. when a new game starts.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.history.clear();
    }

    /// Plan against `state` and return this turn's move, if any.
    ///
    /// Nothing is planned during the opening, while armies build up.
    pub fn take_turn(&mut self, state: &TurnState) -> Option<Action> {
        let turn = state.turn();
        if turn > self.config.opening_turns {
            let intel = Intel::gather(state, self.config.useful_army_threshold);
            debug!(
                turn,
                tiles = intel.tiles,
                power = intel.deployable_power,
                cities = intel.cities.len(),
                behind = intel.behind_in_land,
                "board"
            );
            let mut ctx = PlanContext {
                state,
                intel: &intel,
                config: &self.config,
                rng: &mut self.rng,
            };
            let queue = std::mem::take(&mut self.queue);
            self.queue = planner::plan(self.strategy.as_ref(), queue, &mut ctx);
            debug!(
                turn,
                strategy = self.strategy.name(),
                queued = self.queue.len(),
                "planned"
            );
        }

        let attack = self.queue.pop()?;
        info!("TURN {turn}: {attack}");
        self.history.push_front(attack);
        self.history.truncate(self.config.history_len);
        Some(attack.action())
    }

    /// Take a turn against the tracker's latest state.
    ///
    /// # Errors
    ///
    /// Returns an error when the tracker has no usable state yet.
    pub fn play(&mut self, tracker: &GameTracker) -> Result<Option<Action>> {
        let state = tracker.turn_state()?;
        Ok(self.take_turn(&state))
    }
}
