// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Enigma: a client bot for grid territory-conquest games.
//!
//! Every turn the bot decodes the server's diffs into a board, summarizes it,
//! and sends at most one move taken from a persistent attack queue.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Bot (queue, history, RNG)       │
//! ├─────────────────────────────────────┤
//! │   Planner (strategy → rules)        │
//! ├──────────────────┬──────────────────┤
//! │  Intel summary   │  Distance field  │
//! ├──────────────────┴──────────────────┤
//! │  Game model  ←  Tracker (diffs)     │
//! └─────────────────────────────────────┘
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod game;
pub mod intel;
pub mod pathing;
pub mod planner;
pub mod rng;
pub mod tracker;

pub use bot::Bot;
pub use config::BotConfig;
pub use error::{BotError, Result};

// Re-export key types at crate root for convenience
pub use game::{Cell, CellIndex, Map, PlayerId, Snapshot, Terrain, TurnState};
pub use intel::Intel;
pub use pathing::{DistanceField, FieldOptions, Reach};
pub use planner::{Action, AttackMove, AttackQueue, BotKind, MoveMode, Strategy};
pub use tracker::{GameTracker, Outcome, ServerEvent};
