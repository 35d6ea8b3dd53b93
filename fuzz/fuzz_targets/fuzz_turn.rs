#![no_main]

use arbitrary::Arbitrary;
use enigma::game::{Snapshot, Terrain, TurnState};
use enigma::{Bot, BotConfig, BotKind};
use libfuzzer_sys::fuzz_target;

/// A raw snapshot plus the bot to run on it.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    width: u8,
    terrain: Vec<i8>,
    armies: Vec<u8>,
    player: u8,
    teams: Vec<u8>,
    cities: Vec<u16>,
    general: Option<u16>,
    kind: u8,
    seed: u64,
}

fuzz_target!(|input: TurnInput| {
    let snapshot = Snapshot {
        turn: 100,
        map_width: usize::from(input.width),
        terrain: input.terrain.iter().map(|&t| i32::from(t)).collect(),
        armies: input.armies.iter().map(|&a| i32::from(a)).collect(),
        player_index: input.player % 8,
        teams: input.teams.iter().map(|&t| u32::from(t % 4)).collect(),
        known_cities: input
            .cities
            .iter()
            .map(|&c| usize::from(c).into())
            .collect(),
        my_general_location_index: input.general.map(|g| usize::from(g).into()),
        ..Snapshot::default()
    };

    // Malformed snapshots are rejected, never planned on
    let Ok(state) = TurnState::from_snapshot(snapshot) else {
        return;
    };

    let kind = match input.kind % 3 {
        0 => BotKind::Hunter,
        1 => BotKind::Gatherer,
        _ => BotKind::Explorer,
    };
    let mut bot = Bot::new(BotConfig {
        kind,
        opening_turns: 0,
        seed: input.seed,
        ..BotConfig::default()
    });

    if let Some(action) = bot.take_turn(&state) {
        let map = state.map();
        assert!(map.in_bounds(action.attacker_index));
        assert!(map.neighbors(action.attacker_index).any(|n| n == action.target_index));
        // Only known cities may hide behind mountain terrain
        if !state.is_known_city(action.target_index) {
            assert_ne!(map.terrain(action.target_index), Terrain::Mountain);
        }
    }
});
