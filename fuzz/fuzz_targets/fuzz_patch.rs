#![no_main]

use arbitrary::Arbitrary;
use enigma::tracker::patch;
use libfuzzer_sys::fuzz_target;

/// An old array and a diff against it.
#[derive(Arbitrary, Debug)]
struct PatchInput {
    old: Vec<i32>,
    diff: Vec<i32>,
}

fuzz_target!(|input: PatchInput| {
    // Cap run lengths so a single huge count cannot exhaust memory
    let diff: Vec<i32> = input.diff.iter().map(|v| v % 4096).collect();

    let Ok(new) = patch(&input.old, &diff) else {
        return;
    };

    // An empty diff yields an empty array; otherwise the output only
    // holds values copied from the old array or the diff
    if diff.is_empty() {
        assert!(new.is_empty());
    }
    for value in &new {
        assert!(input.old.contains(value) || diff.contains(value));
    }
});
