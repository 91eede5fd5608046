//! Full match scenarios over the scripted transport: human-vs-CPU turn
//! alternation, automated matches running to completion, rejection handling,
//! and the event stream a UI consumes.

use shogi_client::{
    MatchEndEvent, MatchPhase, MatchSetup, MatchStartEvent, MoveAppliedEvent, MoveOutcome,
    MoveRejectedEvent, ShogiClientError, StateUpdateEvent, ThinkingEvent,
};
use shogi_shared::{MoveAction, Side};
use shogi_test::helpers::*;

fn pawn_push() -> MoveAction {
    MoveAction::Move {
        from: sq(4, 6),
        to: sq(4, 5),
        promote: false,
    }
}

#[tokio::test(start_paused = true)]
async fn the_cpu_replies_after_an_accepted_human_move() {
    let transport = MockTransport::new();
    let mut client = test_client(transport.clone());

    let start = human_vs_cpu_state(Side::Sente);
    transport.enqueue("/api/reset", Scripted::ok(reset_ok_body(&start)));
    client.new_match(&MatchSetup::human_vs_cpu()).await.unwrap();
    assert_eq!(client.phase(), MatchPhase::WaitingHuman);

    let mut after_human = human_vs_cpu_state(Side::Gote);
    after_human.sfen = "after-human".to_string();
    transport.enqueue(
        "/api/check_promote",
        Scripted::ok(check_promote_body(false)),
    );
    transport.enqueue(
        "/api/move",
        Scripted::ok(move_ok_body(&after_human, 1, "５五歩")),
    );

    let outcome = client.submit(pawn_push()).await.unwrap();
    assert_eq!(outcome, MoveOutcome::Applied);
    assert_eq!(client.phase(), MatchPhase::AutomatedTurnInFlight);

    let mut after_cpu = human_vs_cpu_state(Side::Sente);
    after_cpu.sfen = "after-cpu".to_string();
    transport.enqueue("/api/cpu", Scripted::ok(cpu_ok_body(&after_cpu, 2, "３四歩")));

    client.drive().await.unwrap();

    assert_eq!(client.phase(), MatchPhase::WaitingHuman);
    assert_eq!(client.game_state().unwrap().sfen, "after-cpu");
    assert_eq!(transport.calls_to("/api/cpu"), 1);
    assert_eq!(client.journal().len(), 2);
    assert_eq!(client.journal()[1].mover, "cpu");
}

#[tokio::test(start_paused = true)]
async fn an_automated_match_runs_until_game_over_then_stops() {
    let transport = MockTransport::new();
    let mut client = test_client(transport.clone());

    let start = configured_state(Side::Sente, "gemini-2.5-pro", "gpt-5");
    transport.enqueue("/api/reset", Scripted::ok(reset_ok_body(&start)));
    client
        .new_match(&MatchSetup::configured("gemini-2.5-pro", "gpt-5"))
        .await
        .unwrap();

    let mid = configured_state(Side::Gote, "gemini-2.5-pro", "gpt-5");
    let end = game_over(configured_state(Side::Sente, "gemini-2.5-pro", "gpt-5"));
    transport.enqueue(
        "/api/llm_move",
        Scripted::ok(llm_ok_body(&mid, 1, "７六歩", "gemini-2.5-pro", "develops the bishop diagonal")),
    );
    transport.enqueue(
        "/api/llm_move",
        Scripted::ok(llm_ok_body(&end, 2, "３四歩", "gpt-5", "mirrors to keep the center fluid")),
    );

    client.drive().await.unwrap();

    assert_eq!(client.phase(), MatchPhase::GameOver);
    assert_eq!(transport.calls_to("/api/llm_move"), 2);

    // the terminal snapshot stops the loop for good
    client.drive().await.unwrap();
    assert_eq!(transport.calls_to("/api/llm_move"), 2);

    let result = client.submit(pawn_push()).await;
    assert!(matches!(result, Err(ShogiClientError::MatchOver)));

    let mut events = client.take_events();
    assert!(events.has::<MatchEndEvent>());
    let thinking: Vec<_> = events.read::<ThinkingEvent>().collect();
    assert_eq!(thinking.len(), 4);
    assert!(thinking[0].active && !thinking[1].active);
}

#[tokio::test(start_paused = true)]
async fn a_rejected_move_clears_the_selection_and_keeps_the_state() {
    let transport = MockTransport::new();
    let mut client = test_client(transport.clone());

    let start = base_state(Side::Sente);
    transport.enqueue("/api/reset", Scripted::ok(reset_ok_body(&start)));
    client
        .new_match(&MatchSetup::human_vs_human())
        .await
        .unwrap();
    let sfen_before = client.game_state().unwrap().sfen.clone();
    client.take_events();

    transport.enqueue(
        "/api/check_promote",
        Scripted::ok(check_promote_body(false)),
    );
    transport.enqueue(
        "/api/move",
        Scripted::status(400, error_body("Invalid or Illegal move")),
    );

    let outcome = client.submit(pawn_push()).await.unwrap();

    match outcome {
        MoveOutcome::Rejected { message } => assert_eq!(message, "Invalid or Illegal move"),
        other => panic!("expected a rejection, got {other:?}"),
    }
    // prior state is untouched and the UI was told to re-render
    assert_eq!(client.game_state().unwrap().sfen, sfen_before);
    assert_eq!(client.phase(), MatchPhase::WaitingHuman);
    let mut events = client.take_events();
    assert!(events.has::<MoveRejectedEvent>());
    assert!(events.has::<StateUpdateEvent>());
    assert_eq!(client.journal().len(), 0);
}

#[tokio::test(start_paused = true)]
async fn replaying_an_identical_snapshot_changes_nothing_observable() {
    let transport = MockTransport::new();
    let mut client = test_client(transport.clone());

    let start = base_state(Side::Sente);
    transport.enqueue("/api/reset", Scripted::ok(reset_ok_body(&start)));
    client
        .new_match(&MatchSetup::human_vs_human())
        .await
        .unwrap();

    // two accepted moves whose snapshots carry identical content
    let same = base_state(Side::Sente);
    for _ in 0..2 {
        transport.enqueue(
            "/api/check_promote",
            Scripted::ok(check_promote_body(false)),
        );
        transport.enqueue("/api/move", Scripted::ok(move_ok_body(&same, 1, "５五歩")));
        client.submit(pawn_push()).await.unwrap();
    }

    assert_eq!(client.game_state().unwrap(), &same);
    assert_eq!(client.phase(), MatchPhase::WaitingHuman);
}

#[tokio::test(start_paused = true)]
async fn events_narrate_a_match_from_start_to_move() {
    let transport = MockTransport::new();
    let mut client = test_client(transport.clone());

    let start = base_state(Side::Sente);
    transport.enqueue("/api/reset", Scripted::ok(reset_ok_body(&start)));
    let match_id = client
        .new_match(&MatchSetup::human_vs_human())
        .await
        .unwrap();

    transport.enqueue(
        "/api/check_promote",
        Scripted::ok(check_promote_body(false)),
    );
    let after = base_state(Side::Gote);
    transport.enqueue("/api/move", Scripted::ok(move_ok_body(&after, 1, "５五歩")));
    client.submit(pawn_push()).await.unwrap();

    let mut events = client.take_events();
    let starts: Vec<_> = events.read::<MatchStartEvent>().collect();
    assert_eq!(starts, vec![match_id]);

    let applied: Vec<_> = events.read::<MoveAppliedEvent>().collect();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].mover, "human");
    assert_eq!(applied[0].notation.as_deref(), Some("５五歩"));

    let updates: Vec<_> = events.read::<StateUpdateEvent>().collect();
    assert_eq!(updates.len(), 2);
}
