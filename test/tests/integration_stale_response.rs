//! Stale-response discard: every reset allocates a fresh match id, and an
//! automated-turn response correlated with an older id is dropped unapplied.

use std::time::Duration;

use tokio::time::Instant;

use shogi_client::{MatchCoordinator, MatchPhase, TurnKind, TurnOutcome};
use shogi_shared::Side;
use shogi_test::helpers::*;

fn coordinator() -> MatchCoordinator {
    MatchCoordinator::new(Duration::from_millis(500), Duration::from_millis(1000))
}

#[test]
fn each_reset_allocates_a_strictly_newer_match_id() {
    let mut coordinator = coordinator();
    let state = base_state(Side::Sente);

    let mut previous = coordinator.match_id();
    for _ in 0..5 {
        let id = coordinator.begin_match(&state, Instant::now());
        assert!(id > previous);
        previous = id;
    }
}

#[test]
fn a_response_from_an_abandoned_match_is_discarded() {
    let mut coordinator = coordinator();
    let first = configured_state(Side::Sente, "gemini-2.5-pro", "gpt-5");

    coordinator.begin_match(&first, Instant::now());
    let deadline = coordinator.next_deadline().unwrap();
    let ticket = coordinator.request_due_turn(deadline).unwrap();
    assert_eq!(ticket.kind, TurnKind::Llm);

    // the user abandons the match while the turn is in flight
    let second_id = coordinator.begin_match(&first, Instant::now());
    assert!(second_id > ticket.match_id);

    // the slow response finally lands: dropped, and no scheduling decision
    let late = configured_state(Side::Gote, "gemini-2.5-pro", "gpt-5");
    let outcome = coordinator.apply_automated_outcome(&ticket, &late, Instant::now());
    assert_eq!(outcome, TurnOutcome::Stale);

    // the new match's own scheduled turn is untouched
    assert!(coordinator.next_deadline().is_some());
    assert_eq!(coordinator.phase(), MatchPhase::AutomatedTurnInFlight);
}

#[test]
fn a_current_response_applies_and_schedules_the_next_turn() {
    let mut coordinator = coordinator();
    let start = configured_state(Side::Sente, "gemini-2.5-pro", "gpt-5");

    coordinator.begin_match(&start, Instant::now());
    let deadline = coordinator.next_deadline().unwrap();
    let ticket = coordinator.request_due_turn(deadline).unwrap();

    let after = configured_state(Side::Gote, "gemini-2.5-pro", "gpt-5");
    let outcome = coordinator.apply_automated_outcome(&ticket, &after, Instant::now());

    assert_eq!(outcome, TurnOutcome::Applied);
    assert!(coordinator.next_deadline().is_some());
}

#[test]
fn only_one_ticket_is_outstanding_at_a_time() {
    let mut coordinator = coordinator();
    let start = configured_state(Side::Sente, "gemini-2.5-pro", "gpt-5");

    coordinator.begin_match(&start, Instant::now());
    let deadline = coordinator.next_deadline().unwrap();
    assert!(coordinator.request_due_turn(deadline).is_some());

    // nothing more until the first ticket resolves
    assert!(coordinator.request_due_turn(deadline + Duration::from_secs(60)).is_none());
}

#[test]
fn a_terminal_snapshot_stops_all_scheduling() {
    let mut coordinator = coordinator();
    let start = configured_state(Side::Sente, "gemini-2.5-pro", "gpt-5");

    coordinator.begin_match(&start, Instant::now());
    let deadline = coordinator.next_deadline().unwrap();
    let ticket = coordinator.request_due_turn(deadline).unwrap();

    let finished = game_over(configured_state(Side::Gote, "gemini-2.5-pro", "gpt-5"));
    coordinator.apply_automated_outcome(&ticket, &finished, Instant::now());

    assert_eq!(coordinator.phase(), MatchPhase::GameOver);
    assert!(coordinator.next_deadline().is_none());
}
