use std::time::Duration;

use log::debug;
use tokio::time::Instant;

use shogi_shared::{GameState, MatchId, MoveAction, PendingMove, Selection, Side, Square};

use crate::error::ShogiClientError;

use super::turn_scheduler::{ScheduledTurn, TurnKind, TurnScheduler};

/// Where the coordinator stands in the turn-taking loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPhase {
    /// No match started or restored yet.
    Idle,
    /// The side to move is played by a human actor.
    WaitingHuman,
    /// An automated turn is scheduled or awaiting its response.
    AutomatedTurnInFlight,
    /// The match ended; only a new match leaves this phase.
    GameOver,
}

/// Correlates an automated-turn response with the match that requested it.
/// The match id is compared on arrival; the underlying request is never
/// aborted, only its effect suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnTicket {
    pub match_id: MatchId,
    pub side: Side,
    pub kind: TurnKind,
}

/// What became of an automated-turn response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The response belonged to the current match and was applied.
    Applied,
    /// The match has moved on; the response was discarded unapplied.
    Stale,
}

/// What a tap on the board or the hand amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapAction {
    /// Not this actor's turn, or nothing actionable under the tap.
    Ignored,
    /// A piece (or hand piece) became the selection.
    Selected,
    /// The existing selection was dismissed.
    Cleared,
    /// A selected board piece was aimed at a destination square.
    MoveIntent {
        piece: String,
        from: Square,
        to: Square,
    },
    /// A selected hand piece was aimed at a destination square.
    DropIntent { name: String, to: Square },
}

/// The turn-taking state machine. Pure bookkeeping: it decides what may
/// happen and when, while the owning client performs the actual calls and
/// feeds outcomes back in, tagged with the ticket they were requested under.
pub struct MatchCoordinator {
    human_turn_debounce: Duration,
    automated_turn_interval: Duration,
    match_id: MatchId,
    phase: MatchPhase,
    selection: Option<Selection>,
    pending_promotion: Option<PendingMove>,
    scheduler: TurnScheduler,
    in_flight: Option<TurnTicket>,
}

impl MatchCoordinator {
    pub fn new(human_turn_debounce: Duration, automated_turn_interval: Duration) -> Self {
        Self {
            human_turn_debounce,
            automated_turn_interval,
            match_id: MatchId::zero(),
            phase: MatchPhase::Idle,
            selection: None,
            pending_promotion: None,
            scheduler: TurnScheduler::new(),
            in_flight: None,
        }
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn pending_promotion(&self) -> Option<&PendingMove> {
        self.pending_promotion.as_ref()
    }

    /// Starts (or resumes) a match: allocates a fresh match id, drops every
    /// remnant of the previous match, and enters the phase matching the
    /// side-to-move's actor. Any response still in flight for an earlier
    /// match id will be recognized as stale on arrival.
    pub fn begin_match(&mut self, state: &GameState, now: Instant) -> MatchId {
        self.match_id = self.match_id.next();
        self.selection = None;
        self.pending_promotion = None;
        self.scheduler.cancel();
        self.in_flight = None;
        self.advance(state, now, self.automated_turn_interval);
        self.match_id
    }

    /// Rejects a human action locally unless the coordinator is waiting for
    /// this human and the snapshot agrees. The snapshot is re-checked; the
    /// phase alone is not authoritative.
    pub fn gate_human_action(&self, state: &GameState) -> Result<(), ShogiClientError> {
        match self.phase {
            MatchPhase::Idle => Err(ShogiClientError::NoMatch),
            MatchPhase::GameOver => Err(ShogiClientError::MatchOver),
            MatchPhase::AutomatedTurnInFlight => Err(ShogiClientError::TurnInFlight),
            MatchPhase::WaitingHuman => {
                if state.game_over {
                    Err(ShogiClientError::MatchOver)
                } else if state.actor_to_move().is_automated() {
                    Err(ShogiClientError::NotYourTurn)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Interprets a tap on a board square against the current selection.
    pub fn tap_square(&mut self, state: &GameState, square: Square) -> TapAction {
        if self.gate_human_action(state).is_err() || self.pending_promotion.is_some() {
            return TapAction::Ignored;
        }

        match self.selection.take() {
            Some(Selection::Board(from)) => {
                if from == square {
                    TapAction::Cleared
                } else {
                    let piece = state
                        .board
                        .piece_at(from)
                        .map(|piece| piece.name.clone())
                        .unwrap_or_default();
                    TapAction::MoveIntent {
                        piece,
                        from,
                        to: square,
                    }
                }
            }
            Some(Selection::Hand(name)) => TapAction::DropIntent { name, to: square },
            None => match state.board.piece_at(square) {
                Some(piece) if piece.owner == state.turn => {
                    self.selection = Some(Selection::Board(square));
                    TapAction::Selected
                }
                _ => TapAction::Ignored,
            },
        }
    }

    /// Interprets a tap on a named hand piece: select, or deselect on the
    /// second tap.
    pub fn tap_hand(&mut self, state: &GameState, name: &str) -> TapAction {
        if self.gate_human_action(state).is_err() || self.pending_promotion.is_some() {
            return TapAction::Ignored;
        }
        if state.hands.count(state.turn, name) == 0 {
            return TapAction::Ignored;
        }

        match self.selection.take() {
            Some(Selection::Hand(existing)) if existing == name => TapAction::Cleared,
            _ => {
                self.selection = Some(Selection::Hand(name.to_string()));
                TapAction::Selected
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Suspends a promotion-eligible move until an explicit choice arrives.
    pub fn suspend_promotion(&mut self, pending: PendingMove) {
        self.pending_promotion = Some(pending);
    }

    /// Merges the promotion choice into the suspended move, clearing it.
    pub fn resolve_promotion(&mut self, promote: bool) -> Result<MoveAction, ShogiClientError> {
        let pending = self
            .pending_promotion
            .take()
            .ok_or(ShogiClientError::NoPendingPromotion)?;
        Ok(pending.resolve(promote))
    }

    /// Records an accepted human action and decides what follows: waiting
    /// for the next human, scheduling the automated reply after the debounce
    /// delay, or ending the match.
    pub fn human_action_applied(&mut self, state: &GameState, now: Instant) {
        self.selection = None;
        self.advance(state, now, self.human_turn_debounce);
    }

    /// Records a rejected human action; the attempted move is discarded, not
    /// retried, and only the selection is dropped.
    pub fn human_action_rejected(&mut self) {
        self.selection = None;
    }

    /// The deadline of the scheduled automated turn, if one is waiting.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Hands out the ticket for a due automated turn. At most one ticket is
    /// outstanding at a time; the next is only available after this one is
    /// applied, discarded as stale, or reported failed.
    pub fn request_due_turn(&mut self, now: Instant) -> Option<TurnTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let turn = self.scheduler.take_due(now)?;
        let ticket = TurnTicket {
            match_id: turn.match_id,
            side: turn.side,
            kind: turn.kind,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Applies the snapshot an automated turn produced, unless the ticket's
    /// match id no longer matches the coordinator's: then the match has
    /// moved on or been abandoned, the response is discarded unapplied, and
    /// no scheduling decision is made.
    pub fn apply_automated_outcome(
        &mut self,
        ticket: &TurnTicket,
        state: &GameState,
        now: Instant,
    ) -> TurnOutcome {
        if ticket.match_id != self.match_id {
            debug!(
                "discarding stale automated response for {} (current {})",
                ticket.match_id, self.match_id
            );
            return TurnOutcome::Stale;
        }

        self.in_flight = None;
        self.advance(state, now, self.automated_turn_interval);
        TurnOutcome::Applied
    }

    /// Records that a dispatched automated turn failed outright. The loop
    /// stops rather than retrying into the same failure; `resume_automated`
    /// or a new match restarts it.
    pub fn automated_turn_failed(&mut self, ticket: &TurnTicket) {
        if ticket.match_id != self.match_id {
            return;
        }
        self.in_flight = None;
    }

    /// Reschedules the automated turn for the current snapshot after a
    /// failure. Returns whether anything was scheduled.
    pub fn resume_automated(&mut self, state: &GameState, now: Instant) -> bool {
        if self.phase != MatchPhase::AutomatedTurnInFlight
            || self.in_flight.is_some()
            || !self.scheduler.is_empty()
        {
            return false;
        }
        self.advance(state, now, self.automated_turn_interval);
        !self.scheduler.is_empty()
    }

    /// Single place that reads a snapshot and decides the next phase and any
    /// scheduling.
    fn advance(&mut self, state: &GameState, now: Instant, delay: Duration) {
        if state.game_over {
            self.phase = MatchPhase::GameOver;
            self.scheduler.cancel();
            return;
        }

        match TurnKind::for_actor(&state.actor_to_move()) {
            None => {
                self.phase = MatchPhase::WaitingHuman;
            }
            Some(kind) => {
                self.phase = MatchPhase::AutomatedTurnInFlight;
                self.scheduler.schedule(ScheduledTurn {
                    match_id: self.match_id,
                    side: state.turn,
                    kind,
                    fire_at: now + delay,
                });
            }
        }
    }
}
