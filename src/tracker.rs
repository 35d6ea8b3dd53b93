//! Game state tracking across server events.
//!
//! The server only sends diffs and only shows what is in vision. The tracker
//! keeps the decoded arrays and remembers what fog hides again: enemy
//! generals and cities stay known once seen.

mod events;
mod patch;

pub use events::{GameStart, GameUpdate, ScoreLine, ServerEvent};
pub use patch::patch;

use tracing::{debug, info};

use crate::error::{BotError, Result};
use crate::game::{CellIndex, OpponentRecord, PlayerId, Score, Snapshot, TurnState};

/// Width and height lead the map array.
const MAP_HEADER: usize = 2;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// We were eliminated.
    Lost,
    /// We won.
    Won,
}

/// Our view of the current game.
#[derive(Debug, Clone, Default)]
pub struct GameTracker {
    player: Option<PlayerId>,
    team: Option<u32>,
    teams: Vec<u32>,
    usernames: Vec<String>,
    replay_id: Option<String>,
    turn: u32,
    map: Vec<i32>,
    width: usize,
    size: usize,
    visible_cities_raw: Vec<i32>,
    visible_cities: Vec<CellIndex>,
    known_cities: Vec<CellIndex>,
    generals: Vec<Option<CellIndex>>,
    my_general: Option<CellIndex>,
    opponents: Vec<OpponentRecord>,
    score: Score,
    updated: bool,
    outcome: Option<Outcome>,
}

impl GameTracker {
    /// A tracker with no game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one server event.
    ///
    /// # Errors
    ///
    /// Fails when an update arrives before a start or carries a malformed
    /// diff.
    pub fn handle(&mut self, event: &ServerEvent) -> Result<()> {
        match event {
            ServerEvent::GameStart(start) => {
                self.start(start);
                Ok(())
            }
            ServerEvent::GameUpdate(update) => self.update(update),
            ServerEvent::GameLost => {
                self.finish(Outcome::Lost);
                Ok(())
            }
            ServerEvent::GameWon => {
                self.finish(Outcome::Won);
                Ok(())
            }
        }
    }

    /// Begin a new game, forgetting everything about the last one.
    pub fn start(&mut self, start: &GameStart) {
        *self = Self {
            player: Some(start.player_index),
            team: start.teams.get(usize::from(start.player_index)).copied(),
            teams: start.teams.clone(),
            usernames: start.usernames.clone(),
            replay_id: start.replay_id.clone(),
            ..Self::default()
        };
        info!(
            player = start.player_index,
            replay = start.replay_id.as_deref().unwrap_or("-"),
            "game starting"
        );
    }

    /// Apply one turn's update.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::MissingState`] before the first start, and a
    /// decoding error when the diffs or the patched map are malformed. A
    /// failed update leaves the tracker unchanged.
    pub fn update(&mut self, update: &GameUpdate) -> Result<()> {
        let player = self.player.ok_or(BotError::MissingState("no game started"))?;

        let map = patch(&self.map, &update.map_diff)?;
        let cities_raw = patch(&self.visible_cities_raw, &update.cities_diff)?;
        let (width, size) = map_layout(&map)?;

        self.map = map;
        self.width = width;
        self.size = size;
        self.visible_cities_raw = cities_raw;
        self.turn = update.turn;

        self.my_general = update
            .generals
            .get(usize::from(player))
            .and_then(|&g| self.cell_index(g));
        if self.generals.len() < update.generals.len() {
            self.generals.resize(update.generals.len(), None);
        }
        for (i, &raw) in update.generals.iter().enumerate() {
            if i == usize::from(player) {
                continue;
            }
            if let Some(general) = self.cell_index(raw) {
                if self.generals[i] != Some(general) {
                    debug!(player = i, %general, "general spotted");
                }
                self.generals[i] = Some(general);
            }
        }

        let seen: Vec<CellIndex> = self
            .visible_cities_raw
            .iter()
            .filter_map(|&c| self.cell_index(c))
            .collect();
        for city in &seen {
            if !self.known_cities.contains(city) {
                self.known_cities.push(*city);
            }
        }
        let terrain = self.terrain();
        let visible: Vec<CellIndex> = seen
            .into_iter()
            .filter(|c| terrain.get(c.get()) != Some(&i32::from(player)))
            .collect();
        self.visible_cities = visible;

        for line in &update.scores {
            self.record_score(player, line);
        }

        self.updated = true;
        Ok(())
    }

    fn record_score(&mut self, player: PlayerId, line: &ScoreLine) {
        if line.i == player {
            self.score = self.score.advance(line.total, line.tiles);
            return;
        }

        let is_team = self.team.is_some() && self.teams.get(usize::from(line.i)).copied() == self.team;
        let record = OpponentRecord {
            player: line.i,
            general: self.generals.get(usize::from(line.i)).copied().flatten(),
            dead: line.dead,
            is_team,
            tiles: line.tiles,
            total: line.total,
        };
        match self.opponents.iter_mut().find(|o| o.player == line.i) {
            Some(existing) => *existing = record,
            None => {
                self.opponents.push(record);
                self.opponents.sort_by_key(|o| o.player);
            }
        }
    }

    /// Mark the game over.
    pub fn finish(&mut self, outcome: Outcome) {
        info!(?outcome, turn = self.turn, "game over");
        self.outcome = Some(outcome);
    }

    /// How the game ended, if it has.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Turn of the latest update.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Player names in lobby order.
    #[must_use]
    pub fn usernames(&self) -> &[String] {
        &self.usernames
    }

    /// Replay id announced at the start.
    #[must_use]
    pub fn replay_id(&self) -> Option<&str> {
        self.replay_id.as_deref()
    }

    /// Cities in vision that we do not hold.
    #[must_use]
    pub fn visible_cities(&self) -> &[CellIndex] {
        &self.visible_cities
    }

    /// Every city seen so far.
    #[must_use]
    pub fn known_cities(&self) -> &[CellIndex] {
        &self.known_cities
    }

    /// Opponent records in player order.
    #[must_use]
    pub fn opponents(&self) -> &[OpponentRecord] {
        &self.opponents
    }

    /// Our scoreboard entry.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// The raw per-turn inputs for the planner.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::MissingState`] until a game has started and at
    /// least one update has arrived.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let player = self.player.ok_or(BotError::MissingState("no game started"))?;
        if !self.updated {
            return Err(BotError::MissingState("no map update received"));
        }

        Ok(Snapshot {
            turn: self.turn,
            map_width: self.width,
            terrain: self.terrain().to_vec(),
            armies: self.armies().to_vec(),
            player_index: player,
            team: self.team,
            teams: self.teams.clone(),
            known_cities: self.known_cities.clone(),
            opponents: self.opponents.clone(),
            my_general_location_index: self.my_general,
            my_score: self.score,
        })
    }

    /// Decode the snapshot into a planner state.
    ///
    /// # Errors
    ///
    /// Same as [`GameTracker::snapshot`], plus any validation failure.
    pub fn turn_state(&self) -> Result<TurnState> {
        TurnState::from_snapshot(self.snapshot()?)
    }

    fn armies(&self) -> &[i32] {
        self.map
            .get(MAP_HEADER..MAP_HEADER + self.size)
            .unwrap_or_default()
    }

    fn terrain(&self) -> &[i32] {
        self.map
            .get(MAP_HEADER + self.size..MAP_HEADER + 2 * self.size)
            .unwrap_or_default()
    }

    fn cell_index(&self, raw: i32) -> Option<CellIndex> {
        usize::try_from(raw)
            .ok()
            .filter(|&i| i < self.size)
            .map(CellIndex)
    }
}

/// Width and cell count of a patched map array.
fn map_layout(map: &[i32]) -> Result<(usize, usize)> {
    let dimension = |i: usize| map.get(i).and_then(|&v| usize::try_from(v).ok()).unwrap_or(0);
    let (width, height) = (dimension(0), dimension(1));
    let size = width
        .checked_mul(height)
        .filter(|&s| s > 0)
        .ok_or(BotError::InvalidDimensions { width, height })?;

    let expected = MAP_HEADER + 2 * size;
    if map.len() != expected {
        return Err(BotError::LengthMismatch {
            what: "map",
            expected,
            actual: map.len(),
        });
    }
    Ok((width, size))
}
