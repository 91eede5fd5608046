//! Property tests over the match-generation counter: ids are strictly
//! monotonic across arbitrary reset sequences, and a ticket only ever
//! applies when no reset intervened after it was issued.

use std::time::Duration;

use proptest::prelude::*;
use tokio::time::Instant;

use shogi_client::{MatchCoordinator, TurnOutcome};
use shogi_shared::Side;
use shogi_test::helpers::*;

fn coordinator() -> MatchCoordinator {
    MatchCoordinator::new(Duration::from_millis(500), Duration::from_millis(1000))
}

proptest! {
    #[test]
    fn match_ids_are_strictly_monotonic(resets in 1usize..64) {
        let mut coordinator = coordinator();
        let state = base_state(Side::Sente);

        let mut previous = coordinator.match_id();
        for _ in 0..resets {
            let id = coordinator.begin_match(&state, Instant::now());
            prop_assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn a_ticket_applies_exactly_when_no_reset_intervened(interleaving in prop::collection::vec(any::<bool>(), 1..32)) {
        let mut coordinator = coordinator();
        let state = configured_state(Side::Sente, "gemini-2.5-pro", "gpt-5");
        coordinator.begin_match(&state, Instant::now());

        for abandon_first in interleaving {
            let deadline = coordinator.next_deadline().unwrap();
            let ticket = coordinator.request_due_turn(deadline).unwrap();

            if abandon_first {
                coordinator.begin_match(&state, Instant::now());
            }

            let outcome = coordinator.apply_automated_outcome(&ticket, &state, Instant::now());
            let expected = if abandon_first {
                TurnOutcome::Stale
            } else {
                TurnOutcome::Applied
            };
            prop_assert_eq!(outcome, expected);

            // either way the current match still has a turn scheduled,
            // because the snapshot's side to move is automated
            prop_assert!(coordinator.next_deadline().is_some());
        }
    }
}
