//! The turn-taking state machine: match-generation tracking, turn gating,
//! automated-turn scheduling, and the promotion two-phase flow.

mod match_coordinator;
mod turn_scheduler;

pub use match_coordinator::{MatchCoordinator, MatchPhase, TapAction, TurnOutcome, TurnTicket};
pub use turn_scheduler::{ScheduledTurn, TurnKind, TurnScheduler};
