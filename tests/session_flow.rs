//! End-to-end game flows driven through the public session API with
//! scripted dice.

use heresy::dice::ScriptedDice;
use heresy::policy::Decision;
use heresy::session::{GameSession, LogKind};
use heresy::turn::{Phase, TurnStep, HUMAN_SEAT, OPPONENT_SEAT};

/// Selects every die currently showing one of `faces`, in id order, taking
/// as many dice per face as listed.
fn select_faces(session: &mut GameSession, faces: &[u8]) {
    let mut wanted = faces.to_vec();
    let ids: Vec<u8> = session
        .dice()
        .as_slice()
        .iter()
        .filter(|d| d.is_scoring && !d.is_locked)
        .filter_map(|d| {
            let pos = wanted.iter().position(|&f| f == d.value)?;
            wanted.remove(pos);
            Some(d.id)
        })
        .collect();
    assert!(wanted.is_empty(), "could not select {:?}", faces);
    for id in ids {
        session.toggle_select(id).unwrap();
    }
}

/// Plays a human turn that banks `1000` via three 1s on the first roll.
fn human_banks_1000(session: &mut GameSession) {
    session.roll(&mut ScriptedDice::new([1, 1, 1, 2, 3, 4])).unwrap();
    select_faces(session, &[1, 1, 1]);
    session
        .resolve_turn(Decision::Bank, &mut ScriptedDice::default())
        .unwrap();
}

/// The opponent farkles on its first roll.
fn opponent_farkles(session: &mut GameSession) {
    let snaps = session
        .play_opponent_turn(&mut ScriptedDice::new([2, 2, 3, 4, 6, 6]))
        .unwrap();
    assert_eq!(snaps.len(), 1);
}

#[test]
fn first_bank_puts_player_on_board() {
    let mut session = GameSession::new_game();
    human_banks_1000(&mut session);
    let human = &session.players()[HUMAN_SEAT];
    assert_eq!(human.score, 1000);
    assert!(human.is_on_board);
    assert_eq!(session.phase(), Phase::OpponentTurn);
    assert_eq!(session.turn().current_player_index, OPPONENT_SEAT);
    assert_eq!(session.turn().turn_score, 0);
}

#[test]
fn banking_to_exactly_10000_finishes_the_game() {
    let mut session = GameSession::new_game();
    for _ in 0..9 {
        human_banks_1000(&mut session);
        opponent_farkles(&mut session);
    }
    assert_eq!(session.players()[HUMAN_SEAT].score, 9000);

    human_banks_1000(&mut session);
    assert_eq!(session.players()[HUMAN_SEAT].score, 10_000);
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.winner(), Some(HUMAN_SEAT));
    // The winning seat keeps the dice; no new turn was started.
    assert_eq!(session.turn().current_player_index, HUMAN_SEAT);
    assert_eq!(session.log().last().unwrap().kind, LogKind::GameOver);
    assert!(session.play_opponent_turn(&mut ScriptedDice::default()).is_err());
}

#[test]
fn farkle_after_locks_discards_turn_score() {
    let mut session = GameSession::new_game();
    session.roll(&mut ScriptedDice::new([1, 5, 2, 3, 4, 4])).unwrap();
    select_faces(&mut session, &[1, 5]);

    // Continue with four dice: three 4s and a 1.
    session
        .resolve_turn(Decision::Continue, &mut ScriptedDice::new([4, 4, 4, 1]))
        .unwrap();
    select_faces(&mut session, &[4, 4, 4]);
    assert_eq!(session.turn().step, TurnStep::AwaitingSelection);

    // Keep 400 more (550 total), then farkle on the last die.
    let snap = session
        .resolve_turn(Decision::Continue, &mut ScriptedDice::new([6]))
        .unwrap();
    // The 1 left over from the previous roll was rerolled, not kept.
    assert_eq!(snap.turn_score, 0);
    assert_eq!(snap.current_player_index, OPPONENT_SEAT);
    assert_eq!(snap.players[HUMAN_SEAT].score, 0);
    assert!(snap.dice.as_slice().iter().all(|d| !d.is_locked));
}

#[test]
fn hot_dice_keeps_turn_score_and_rerolls_six() {
    let mut session = GameSession::new_game();
    session.roll(&mut ScriptedDice::new([1, 2, 3, 4, 5, 6])).unwrap();
    select_faces(&mut session, &[1, 2, 3, 4, 5, 6]);

    let mut dice = ScriptedDice::new([5, 2, 2, 3, 4, 6]);
    let snap = session.resolve_turn(Decision::Continue, &mut dice).unwrap();
    assert_eq!(dice.remaining(), 0);
    assert_eq!(snap.turn_score, 1500);
    assert_eq!(snap.step, TurnStep::AwaitingSelection);
    assert!(session
        .log()
        .entries()
        .iter()
        .any(|e| e.kind == LogKind::HotDice));

    select_faces(&mut session, &[5]);
    let snap = session
        .resolve_turn(Decision::Bank, &mut ScriptedDice::default())
        .unwrap();
    assert_eq!(snap.players[HUMAN_SEAT].score, 1550);
}

#[test]
fn rejected_tithe_keeps_player_off_board() {
    let mut session = GameSession::new_game();
    session.roll(&mut ScriptedDice::new([5, 2, 3, 4, 6, 6])).unwrap();
    select_faces(&mut session, &[5]);
    session
        .resolve_turn(Decision::Bank, &mut ScriptedDice::default())
        .unwrap();
    let human = &session.players()[HUMAN_SEAT];
    assert_eq!(human.score, 0);
    assert!(!human.is_on_board);
    assert_eq!(session.phase(), Phase::OpponentTurn);
}

#[test]
fn on_board_player_banks_small_turns() {
    let mut session = GameSession::new_game();
    human_banks_1000(&mut session);
    opponent_farkles(&mut session);

    session.roll(&mut ScriptedDice::new([5, 2, 3, 4, 6, 6])).unwrap();
    select_faces(&mut session, &[5]);
    session
        .resolve_turn(Decision::Bank, &mut ScriptedDice::default())
        .unwrap();
    assert_eq!(session.players()[HUMAN_SEAT].score, 1050);
}

#[test]
fn opponent_on_board_banks_at_400_with_three_dice_left() {
    let mut session = GameSession::new_game();
    // Human farkles; opponent gets on board with 1050.
    session.roll(&mut ScriptedDice::new([2, 2, 3, 4, 6, 6])).unwrap();
    session
        .play_opponent_turn(&mut ScriptedDice::new([1, 1, 1, 5, 2, 3]))
        .unwrap();
    // Human farkles again.
    session.roll(&mut ScriptedDice::new([2, 2, 3, 4, 6, 6])).unwrap();

    // Opponent keeps three 4s (400) with three dice left and banks.
    let snaps = session
        .play_opponent_turn(&mut ScriptedDice::new([4, 4, 4, 2, 3, 6]))
        .unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].players[OPPONENT_SEAT].score, 1450);
}

#[test]
fn opponent_three_pairs_banks_whole_roll() {
    let mut session = GameSession::new_game();
    session.roll(&mut ScriptedDice::new([2, 2, 3, 4, 6, 6])).unwrap();

    let snaps = session
        .play_opponent_turn(&mut ScriptedDice::new([2, 2, 3, 3, 6, 6]))
        .unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].players[OPPONENT_SEAT].score, 1500);
    assert_eq!(session.phase(), Phase::PlayerTurn);
}

#[test]
fn opponent_hot_dice_continues_with_six() {
    let mut session = GameSession::new_game();
    session.roll(&mut ScriptedDice::new([2, 2, 3, 4, 6, 6])).unwrap();

    let mut dice = ScriptedDice::new([
        1, 2, 3, 4, 6, 6, // keep 1: 100, five left
        2, 2, 2, 3, 4, // keep three 2s: 300, two left
        1, 5, // keep both: 450, hot dice
        5, 2, 3, 4, 6, 6, // keep 5: 500, bank
    ]);
    let snaps = session.play_opponent_turn(&mut dice).unwrap();
    assert_eq!(dice.remaining(), 0);
    assert_eq!(snaps.len(), 4);
    assert_eq!(snaps[2].turn_score, 450);
    assert_eq!(snaps[2].dice.unlocked_count(), 0);
    assert_eq!(snaps[3].players[OPPONENT_SEAT].score, 500);
    assert!(session
        .log()
        .entries()
        .iter()
        .any(|e| e.kind == LogKind::HotDice && e.player == Some(OPPONENT_SEAT)));
}

#[test]
fn every_operation_appends_to_the_log() {
    let mut session = GameSession::new_game();
    let mut last_seq = session.log().last().unwrap().seq;
    let snap = session.roll(&mut ScriptedDice::new([1, 2, 3, 4, 6, 6])).unwrap();
    assert_eq!(snap.events.len(), 1);
    assert!(snap.events[0].seq > last_seq);
    last_seq = snap.events[0].seq;

    let snap = session.toggle_select(0).unwrap();
    assert_eq!(snap.events.len(), 1);
    assert_eq!(snap.events[0].kind, LogKind::Select);
    assert!(snap.events[0].seq > last_seq);
}

#[test]
fn forfeiting_roll_reports_faces_and_heresy() {
    let mut session = GameSession::new_game();
    let snap = session.roll(&mut ScriptedDice::new([2, 2, 3, 4, 6, 6])).unwrap();

    let kinds: Vec<LogKind> = snap.events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![LogKind::Roll, LogKind::Heresy, LogKind::Report, LogKind::TurnStart]
    );
    assert!(snap.events[0].message.contains("2, 2, 3, 4, 6, 6"));
    assert!(snap.events[1].message.contains("has committed HERESY"));
    assert_eq!(snap.last_roll, vec![2, 2, 3, 4, 6, 6]);
    // The dice themselves are already reset for the next player.
    assert!(snap.dice.as_slice().iter().all(|d| !d.is_locked && !d.is_scoring));
    assert_eq!(snap.current_player_index, OPPONENT_SEAT);
}

#[test]
fn bank_snapshot_keeps_the_bank_entry() {
    let mut session = GameSession::new_game();
    session.roll(&mut ScriptedDice::new([1, 1, 1, 2, 3, 4])).unwrap();
    select_faces(&mut session, &[1, 1, 1]);
    let snap = session
        .resolve_turn(Decision::Bank, &mut ScriptedDice::default())
        .unwrap();

    let kinds: Vec<LogKind> = snap.events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![LogKind::Lock, LogKind::Bank, LogKind::Report, LogKind::TurnStart]
    );
    assert!(snap.events[1].message.contains("secures 1000 glory"));
    assert_eq!(snap.last_roll, vec![1, 1, 1, 2, 3, 4]);
}

#[test]
fn opponent_snapshots_carry_each_cycle() {
    let mut session = GameSession::new_game();
    session.roll(&mut ScriptedDice::new([2, 2, 3, 4, 6, 6])).unwrap();

    let mut dice = ScriptedDice::new([1, 2, 3, 4, 6, 6, 2, 3, 4, 6, 6]);
    let snaps = session.play_opponent_turn(&mut dice).unwrap();
    assert_eq!(snaps.len(), 2);

    let first: Vec<LogKind> = snaps[0].events.iter().map(|e| e.kind).collect();
    assert_eq!(first, vec![LogKind::Roll, LogKind::Lock, LogKind::Decide]);

    let second: Vec<LogKind> = snaps[1].events.iter().map(|e| e.kind).collect();
    assert_eq!(
        second,
        vec![LogKind::Roll, LogKind::Heresy, LogKind::Report, LogKind::TurnStart]
    );
    assert_eq!(snaps[1].last_roll, vec![2, 3, 4, 6, 6]);
}
