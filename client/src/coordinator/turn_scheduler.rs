use log::debug;
use tokio::time::Instant;

use shogi_shared::{Actor, MatchId, Side};

/// Which endpoint plays a scheduled automated turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnKind {
    /// The server's built-in search opponent.
    Cpu,
    /// The side's configured external model.
    Llm,
}

impl TurnKind {
    /// The turn kind driving an actor's moves; human actors have none.
    pub fn for_actor(actor: &Actor) -> Option<TurnKind> {
        match actor {
            Actor::Human => None,
            Actor::Cpu => Some(TurnKind::Cpu),
            Actor::Model(_) => Some(TurnKind::Llm),
        }
    }
}

/// An automated turn waiting for its deadline. Keyed by the match it belongs
/// to so that a match change invalidates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTurn {
    pub match_id: MatchId,
    pub side: Side,
    pub kind: TurnKind,
    pub fire_at: Instant,
}

/// Holds at most one pending automated turn. One slot is sufficient by
/// construction: the coordinator never schedules the next turn until the
/// previous one has resolved or been superseded by a match change.
#[derive(Default)]
pub struct TurnScheduler {
    pending: Option<ScheduledTurn>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, turn: ScheduledTurn) {
        if let Some(replaced) = self.pending.replace(turn) {
            debug!(
                "replacing scheduled {} turn for {}",
                replaced.side, replaced.match_id
            );
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|turn| turn.fire_at)
    }

    /// Removes and returns the pending turn once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<ScheduledTurn> {
        if self.pending.map(|turn| turn.fire_at <= now)? {
            self.pending.take()
        } else {
            None
        }
    }
}
