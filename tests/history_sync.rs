use hop_chess::game::config::{GameConfig, LocalSide};
use hop_chess::game::game::{Game, Mode, MoveOutcome, Rejection};
use hop_chess::game::sync::{SyncMessage, SyncPayload};
use hop_chess::game_state::chess_types::{Color, Square};

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn player(color: Color) -> Game {
    Game::with_config(GameConfig::default().with_local_side(LocalSide::Only(color))).unwrap()
}

fn play(game: &mut Game, text: &str) {
    let outcome = game.attempt_move(sq(&text[..2]), sq(&text[2..]));
    assert!(outcome.is_applied(), "{text} was not applied: {outcome:?}");
}

/// Ship every queued message from `from` to `to` through JSON.
fn relay(from: &mut Game, to: &mut Game) -> usize {
    let mut delivered = 0;
    for message in from.drain_outbox() {
        let json = message.to_json().unwrap();
        if to.receive_json(&json).unwrap() {
            delivered += 1;
        }
    }
    delivered
}

fn line(game: &Game) -> Vec<String> {
    game.history().main_line().iter().map(|r| r.notation()).collect()
}

#[test]
fn moves_flow_between_instances() {
    let mut light = player(Color::Light);
    let mut dark = player(Color::Dark);
    assert_ne!(light.instance_id(), dark.instance_id());

    play(&mut light, "e2e4");
    assert_eq!(relay(&mut light, &mut dark), 1);
    play(&mut dark, "e7e5");
    assert_eq!(relay(&mut dark, &mut light), 1);

    assert_eq!(line(&light), vec!["e2e4", "e7e5"]);
    assert_eq!(line(&dark), line(&light));
    assert_eq!(light.live_position(), dark.live_position());
    assert_eq!(
        dark.attempt_move(sq("d2"), sq("d4")),
        MoveOutcome::Rejected(Rejection::NotLocalSide)
    );
    assert_eq!(
        light.attempt_move(sq("d7"), sq("d5")),
        MoveOutcome::Rejected(Rejection::NotSideToMove)
    );
}

#[test]
fn own_messages_never_duplicate_history() {
    let mut light = player(Color::Light);
    play(&mut light, "d2d4");
    let outbox = light.drain_outbox();
    assert_eq!(outbox.len(), 1);

    let SyncPayload::Move(record) = outbox[0].payload.clone() else {
        panic!("expected a move message");
    };
    assert!(!light.apply_remote(light.instance_id(), *record));
    assert!(!light.receive(outbox[0].clone()));
    assert!(!light.apply_remote_undo(light.instance_id()));
    assert_eq!(light.history().len(), 2);
}

#[test]
fn a_replayed_message_is_refused_as_out_of_turn() {
    let mut light = player(Color::Light);
    let mut dark = player(Color::Dark);
    play(&mut light, "d2d4");
    let message = light.drain_outbox().remove(0);

    assert!(dark.receive(message.clone()));
    assert!(!dark.receive(message));
    assert_eq!(dark.history().len(), 2);
}

#[test]
fn undoing_the_opponents_move_only_reviews() {
    let mut light = player(Color::Light);
    let mut dark = player(Color::Dark);
    play(&mut light, "e2e4");
    relay(&mut light, &mut dark);
    play(&mut dark, "c7c5");
    relay(&mut dark, &mut light);

    light.undo().unwrap();
    assert_eq!(light.mode(), Mode::Reviewing);
    assert!(light.drain_outbox().is_empty());
    assert_eq!(line(&light), vec!["e2e4", "c7c5"]);

    light.redo().unwrap();
    assert_eq!(light.mode(), Mode::Playing);
    assert!(light.drain_outbox().is_empty());
}

#[test]
fn undoing_ones_own_move_takes_it_back_everywhere() {
    let mut light = player(Color::Light);
    let mut dark = player(Color::Dark);
    play(&mut light, "e2e4");
    relay(&mut light, &mut dark);
    play(&mut dark, "c7c5");
    relay(&mut dark, &mut light);

    dark.undo().unwrap();
    assert_eq!(dark.mode(), Mode::Playing);
    assert_eq!(relay(&mut dark, &mut light), 1);
    assert_eq!(line(&light), vec!["e2e4"]);
    assert_eq!(line(&dark), vec!["e2e4"]);
    assert_eq!(light.live_position(), dark.live_position());

    // Redoing the retired move sends it again.
    dark.redo().unwrap();
    assert_eq!(relay(&mut dark, &mut light), 1);
    assert_eq!(line(&light), vec!["e2e4", "c7c5"]);
    assert_eq!(light.live_position(), dark.live_position());
}

#[test]
fn a_remote_move_pulls_the_view_out_of_review() {
    let mut light = player(Color::Light);
    let mut dark = player(Color::Dark);
    play(&mut light, "e2e4");
    relay(&mut light, &mut dark);

    let root = light.history().root();
    light.jump_to(root).unwrap();
    assert_eq!(light.mode(), Mode::Reviewing);

    play(&mut dark, "e7e5");
    assert_eq!(relay(&mut dark, &mut light), 1);
    assert_eq!(light.mode(), Mode::Playing);
    assert_eq!(light.position(), dark.position());
    play(&mut light, "g1f3");
}

#[test]
fn reset_propagates_and_clears_history() {
    let mut light = player(Color::Light);
    let mut dark = player(Color::Dark);
    play(&mut light, "g1f3");
    relay(&mut light, &mut dark);

    light.reset();
    let outbox = light.drain_outbox();
    assert!(matches!(outbox.as_slice(), [SyncMessage { payload: SyncPayload::Reset, .. }]));
    assert!(dark.receive(outbox[0].clone()));
    assert!(dark.history().is_empty());
    assert!(light.history().is_empty());
    assert!(dark.drain_outbox().is_empty());
}

#[test]
fn a_remote_move_closes_the_analysis_line() {
    let mut light = player(Color::Light);
    let mut dark = player(Color::Dark);
    play(&mut light, "e2e4");
    relay(&mut light, &mut dark);

    light.start_analysis();
    play(&mut light, "e7e5");
    play(&mut light, "g1f3");
    assert!(light.drain_outbox().is_empty());
    assert_eq!(line(&light), vec!["e2e4"]);

    play(&mut dark, "c7c5");
    assert_eq!(relay(&mut dark, &mut light), 1);
    assert_eq!(light.mode(), Mode::Playing);
    assert!(light.analysis().is_none());
    assert_eq!(line(&light), vec!["e2e4", "c7c5"]);
    assert_eq!(light.position(), dark.position());
    play(&mut light, "g1f3");
    assert_eq!(relay(&mut light, &mut dark), 1);
}
