//! Pathfinding over the partially observed board.
//!
//! - [`DistanceField`]: breadth-first distances from one source, with mountains
//!   and (optionally) cities labelled as obstacles
//! - [`extract_path`]: greedy descent from a target back to the source
//! - [`check_field_invariants`]: sanity checks for built fields

mod field;
mod invariants;
mod path;

pub use field::{DistanceField, FieldOptions, Reach, is_traversable};
pub use invariants::{InvariantViolation, check_field_invariants};
pub use path::{extract_path, find_path, path_moves, reaches};
