//! Breadth-first distance fields.

use std::collections::VecDeque;

use crate::game::{CellIndex, Terrain, TurnState};

/// What the search learned about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reach {
    /// Never reached from the source.
    Unvisited,
    /// Steps from the source through traversable cells.
    Distance(u32),
    /// A mountain, visible or fogged, that the search will not cross.
    BlockedByMountain,
    /// A known city the caller asked to route around.
    BlockedByCity,
}

impl Reach {
    /// The numeric distance, if any.
    #[must_use]
    pub const fn distance(self) -> Option<u32> {
        match self {
            Self::Distance(d) => Some(d),
            _ => None,
        }
    }

    /// Whether the search labelled this cell as an obstacle.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::BlockedByMountain | Self::BlockedByCity)
    }
}

/// Search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Treat known cities as obstacles.
    pub no_cities: bool,
}

impl FieldOptions {
    /// Options that route around known cities.
    #[must_use]
    pub const fn avoiding_cities() -> Self {
        Self { no_cities: true }
    }
}

/// Per-cell reachability from a single source.
///
/// Built fresh for each path query; nothing is cached across turns.
#[derive(Debug, Clone)]
pub struct DistanceField {
    source: CellIndex,
    options: FieldOptions,
    reach: Vec<Reach>,
}

impl DistanceField {
    /// Run the search from `source` over the current board.
    ///
    /// A cell is labelled once and never revisited. Blocked cells are dead
    /// ends: they are marked but never propagate a distance. A source off the
    /// board yields a field with every cell unvisited.
    #[must_use]
    pub fn build(state: &TurnState, source: CellIndex, options: FieldOptions) -> Self {
        let map = state.map();
        let mut reach = vec![Reach::Unvisited; map.size()];
        let mut queue = VecDeque::new();

        if map.in_bounds(source) {
            reach[source.get()] = Reach::Distance(0);
            queue.push_back(source);
        }

        while let Some(current) = queue.pop_front() {
            let Reach::Distance(distance) = reach[current.get()] else {
                continue;
            };

            for neighbor in map.neighbors(current) {
                if reach[neighbor.get()] != Reach::Unvisited {
                    continue;
                }
                let label = classify(state, neighbor, distance + 1, options);
                reach[neighbor.get()] = label;
                if matches!(label, Reach::Distance(_)) {
                    queue.push_back(neighbor);
                }
            }
        }

        Self {
            source,
            options,
            reach,
        }
    }

    /// The cell the search started from.
    #[must_use]
    pub const fn source(&self) -> CellIndex {
        self.source
    }

    /// The options the field was built with.
    #[must_use]
    pub const fn options(&self) -> FieldOptions {
        self.options
    }

    /// Label of a cell; off-board cells are unvisited.
    #[must_use]
    #[inline]
    pub fn reach(&self, index: CellIndex) -> Reach {
        self.reach
            .get(index.get())
            .copied()
            .unwrap_or(Reach::Unvisited)
    }

    /// Numeric distance of a cell, if it has one.
    #[must_use]
    #[inline]
    pub fn distance(&self, index: CellIndex) -> Option<u32> {
        self.reach(index).distance()
    }

    /// All labels in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Reach] {
        &self.reach
    }
}

/// Whether the search may step onto a cell.
#[must_use]
pub fn is_traversable(state: &TurnState, index: CellIndex, options: FieldOptions) -> bool {
    let city = state.is_known_city(index);
    if options.no_cities && city {
        return false;
    }
    let terrain = state.map().terrain(index);
    terrain == Terrain::Fog || terrain.is_open() || city
}

fn classify(state: &TurnState, index: CellIndex, distance: u32, options: FieldOptions) -> Reach {
    if options.no_cities && state.is_known_city(index) {
        Reach::BlockedByCity
    } else if is_traversable(state, index, options) {
        Reach::Distance(distance)
    } else {
        Reach::BlockedByMountain
    }
}
