//! Whole-game sessions: server events through the tracker into the bot.
//!
//! Run with: cargo test session

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use enigma::{Action, Bot, BotConfig, BotError, CellIndex, GameTracker, Outcome, ServerEvent};

const SESSION: &str = r#"
{"event":"game_start","playerIndex":0,"usernames":["enigma","rival"],"replay_id":"r1"}
{"event":"game_update","turn":25,"map_diff":[0,8,3,1,6,0,0,0,-1,-1],"generals":[0,-1],"scores":[{"i":0,"total":6,"tiles":1},{"i":1,"total":3,"tiles":1}]}
{"event":"game_update","turn":26,"map_diff":[2,2,1,5,2,1,0,1],"generals":[0,-1],"scores":[{"i":0,"total":6,"tiles":2},{"i":1,"total":3,"tiles":1}]}
{"event":"game_won"}
"#;

fn events(text: &str) -> Vec<ServerEvent> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn play(events: &[ServerEvent]) -> (GameTracker, Vec<Option<Action>>) {
    let mut tracker = GameTracker::new();
    let mut bot = Bot::new(BotConfig::default());
    let mut actions = Vec::new();
    for event in events {
        tracker.handle(event).unwrap();
        match event {
            ServerEvent::GameStart(_) => bot.reset(),
            ServerEvent::GameUpdate(_) => actions.push(bot.play(&tracker).unwrap()),
            ServerEvent::GameLost | ServerEvent::GameWon => {}
        }
    }
    (tracker, actions)
}

#[test]
fn test_session_moves_each_turn() {
    let (tracker, actions) = play(&events(SESSION));

    let moves: Vec<(usize, usize)> = actions
        .iter()
        .map(|a| {
            let a = a.unwrap();
            (a.attacker_index.get(), a.target_index.get())
        })
        .collect();
    assert_eq!(moves, vec![(0, 1), (1, 2)]);
    assert_eq!(tracker.outcome(), Some(Outcome::Won));
    assert_eq!(tracker.turn(), 26);
    assert_eq!(tracker.replay_id(), Some("r1"));
    assert_eq!(tracker.opponents().len(), 1);
}

#[test]
fn test_session_state_after_diffs() {
    let events = events(SESSION);
    let (tracker, _) = play(&events[..3]);

    let state = tracker.turn_state().unwrap();
    assert_eq!(state.map().army_cells(), &[1, 5, 0]);
    assert_eq!(state.my_general(), Some(CellIndex(0)));
    assert_eq!(state.score().tiles, 2);
}

#[test]
fn test_malformed_update_is_rejected() {
    let events = events(SESSION);
    let (mut tracker, _) = play(&events[..2]);

    let bad: ServerEvent =
        serde_json::from_str(r#"{"event":"game_update","turn":26,"map_diff":[40]}"#).unwrap();
    assert!(matches!(
        tracker.handle(&bad),
        Err(BotError::MalformedPatch(_))
    ));
    assert_eq!(tracker.turn(), 25);
    assert!(tracker.turn_state().is_ok());
}

#[test]
fn test_update_before_start() {
    let events = events(SESSION);
    let mut tracker = GameTracker::new();
    assert!(matches!(
        tracker.handle(&events[1]),
        Err(BotError::MissingState(_))
    ));
}

#[test]
fn test_new_game_forgets_old() {
    let events = events(SESSION);
    let (mut tracker, _) = play(&events);
    tracker.handle(&events[0]).unwrap();

    assert!(tracker.outcome().is_none());
    assert!(tracker.opponents().is_empty());
    assert!(matches!(
        tracker.turn_state(),
        Err(BotError::MissingState(_))
    ));
}
