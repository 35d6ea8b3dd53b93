#![no_main]

use arbitrary::Arbitrary;
use enigma::game::{CellIndex, Map, TurnState};
use enigma::pathing::{DistanceField, FieldOptions, check_field_invariants, extract_path};
use libfuzzer_sys::fuzz_target;

/// Structured input for distance field fuzzing.
#[derive(Arbitrary, Debug)]
struct FieldInput {
    /// Map width (1-32).
    width: u8,
    /// Raw cells; each byte picks a terrain value.
    cells: Vec<u8>,
    /// Cities, as raw indices.
    cities: Vec<u16>,
    /// Search source.
    source: u16,
    /// Path target.
    target: u16,
    /// Route around cities.
    no_cities: bool,
}

fuzz_target!(|input: FieldInput| {
    let width = usize::from(input.width % 32) + 1;
    let height = (input.cells.len() / width).min(32);
    if height == 0 {
        return;
    }
    let size = width * height;

    let terrain: Vec<i32> = input.cells[..size]
        .iter()
        .map(|&b| i32::from(b % 7) - 4)
        .collect();
    let armies = vec![1; size];
    let Ok(map) = Map::from_raw(width, &terrain, &armies) else {
        return;
    };
    let cities = input
        .cities
        .iter()
        .map(|&c| CellIndex(usize::from(c) % size))
        .collect();
    let state = TurnState::new(map, 0).with_cities(cities);

    let options = FieldOptions {
        no_cities: input.no_cities,
    };
    // Off-board sources are allowed and must yield an unvisited field
    let field = DistanceField::build(&state, CellIndex(usize::from(input.source)), options);
    let violations = check_field_invariants(&field, &state);
    assert!(violations.is_empty(), "{violations:?}");

    let target = CellIndex(usize::from(input.target) % size);
    let path = extract_path(&field, target, &state);
    assert!(path.len() <= size + 1);
    if field.distance(target).is_some() {
        assert_eq!(path.last(), Some(&field.source()));
    }
});
