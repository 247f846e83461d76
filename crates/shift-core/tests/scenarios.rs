//! Scripted scenarios through the public engine API.
//!
//! Scenarios steer the run through configuration and custom decks rather
//! than by reaching into the state.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use shift_core::config::ShiftConfig;
use shift_core::deck::{base_deck, parse_deck};
use shift_core::ShiftEngine;
use shift_types::{EventKind, ModifierKind, PressurePhase, RejectReason, RunSeed, TimelineLabel};

fn count(engine: &ShiftEngine, kind: EventKind) -> usize {
    engine.events().iter().filter(|e| e.kind == kind).count()
}

#[test]
fn fossil_exit_plan_through_the_engine() {
    let deck = parse_deck(
        "- { id: 6, suit: planet, title: Fossil Exit Plan, effects: { planet: 4, tension: 2, wealth: -1 }, cost: 3, risk: high }\n",
    )
    .unwrap();
    let mut engine = ShiftEngine::new(ShiftConfig::default(), deck).unwrap();
    let result = engine.play_card(0);
    assert!(result.applied);

    let snap = engine.snapshot();
    assert_eq!(snap.capital, 7);
    assert_eq!(snap.tracks.planet, 54);
    assert_eq!(snap.tracks.tension, 22);
    assert_eq!(snap.tracks.wealth, 49);
    assert_eq!(snap.momentum, 0);
    assert_eq!(snap.discard_count, 1);
}

#[test]
fn second_play_of_an_empty_hand_is_rejected() {
    let deck = parse_deck("- { id: 1, suit: planet, title: Tree Cover, effects: { planet: 2 }, cost: 1 }\n").unwrap();
    let mut engine = ShiftEngine::new(ShiftConfig::default(), deck).unwrap();
    assert!(engine.play_card(0).applied);
    assert_eq!(engine.play_card(0).reason, Some(RejectReason::NoSuchCard));
    assert_eq!(count(&engine, EventKind::PlayRejected), 1);
}

#[test]
fn early_resistance_skips_reveal_and_installs_consolidation() {
    let config = ShiftConfig::parse(
        "
tracks:
  tension: 40
pressure:
  resistance_threshold: 1
",
    )
    .unwrap();
    let mut engine = ShiftEngine::new(config, base_deck()).unwrap();
    engine.end_round().unwrap();

    let state = engine.state();
    assert_eq!(state.pressure.phase, PressurePhase::ResistanceActive);
    assert!(state.modifiers.contains(ModifierKind::EliteConsolidation));
    assert_eq!(engine.timeline()[0].label, TimelineLabel::ResistanceActivated);
    assert_eq!(count(&engine, EventKind::ResistanceActivated), 1);
    assert_eq!(count(&engine, EventKind::PressureRevealed), 0);

    // Activation happens once; later rounds only escalate.
    while engine.end_round().is_some() {}
    assert_eq!(count(&engine, EventKind::ResistanceActivated), 1);
}

#[test]
fn collapsed_planet_starts_and_resolves_an_emergency() {
    let config = ShiftConfig::parse("tracks:\n  planet: 10\n").unwrap();
    let mut engine = ShiftEngine::new(config, base_deck()).unwrap();
    for _ in 0..4 {
        engine.end_round();
    }
    assert!(count(&engine, EventKind::EmergencyTriggered) >= 1);
    assert_eq!(count(&engine, EventKind::EmergencyResolved), 1);
    assert_eq!(engine.timeline()[0].label, TimelineLabel::EmergencyTriggered);
}

#[test]
fn short_runs_end_at_their_bound() {
    let config = ShiftConfig::parse("run:\n  max_rounds: 3\n  seed: quick\n").unwrap();
    let mut engine = ShiftEngine::new(config, base_deck()).unwrap();
    let mut rounds = 0;
    while engine.end_round().is_some() {
        rounds += 1;
    }
    assert_eq!(rounds, 3);
    assert_eq!(engine.snapshot().round, 4);
    assert_eq!(engine.run_log().meta.seed, RunSeed::Text("quick".to_owned()));
    assert_eq!(engine.play_card(0).reason, Some(RejectReason::RunOver));
}
