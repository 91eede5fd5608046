use std::vec::IntoIter;

use shogi_shared::{MatchId, MoveNumber, PendingMove, Side};

use crate::error::ShogiClientError;

/// One entry of the move journal: who moved, how the server described it,
/// and any rationale the acting model offered.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveRecord {
    pub number: Option<MoveNumber>,
    /// Label of the acting side: "human", "cpu", or the model identifier.
    pub mover: String,
    /// Human-readable notation, as produced by the server.
    pub notation: Option<String>,
    pub usi: Option<String>,
    pub reasoning: Option<String>,
    /// Synthesized speech for the move, passed through opaquely for UIs
    /// that play it.
    pub speech: Option<String>,
    /// The server's scripted fallback chose this move after the model
    /// exhausted its retry budget.
    pub fallback: bool,
}

/// Start or end of an automated actor's deliberation, for UIs that show a
/// thinking indicator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThinkingUpdate {
    pub side: Side,
    pub label: String,
    pub active: bool,
}

/// Everything the client wants the embedding UI to know, drained between
/// interactions. Replaces direct rendering: a consumer redraws on
/// `StateUpdateEvent` and surfaces the rest as it sees fit.
pub struct Events {
    match_starts: Vec<MatchId>,
    state_updates: Vec<MatchId>,
    moves_applied: Vec<MoveRecord>,
    moves_rejected: Vec<String>,
    promotion_prompts: Vec<PendingMove>,
    thinking: Vec<ThinkingUpdate>,
    match_ends: Vec<MatchId>,
    errors: Vec<ShogiClientError>,
    empty: bool,
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            match_starts: Vec::new(),
            state_updates: Vec::new(),
            moves_applied: Vec::new(),
            moves_rejected: Vec::new(),
            promotion_prompts: Vec::new(),
            thinking: Vec::new(),
            match_ends: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        return V::iter(self);
    }

    pub fn has<V: Event>(&self) -> bool {
        return V::has(self);
    }

    pub(crate) fn push_match_start(&mut self, match_id: MatchId) {
        self.match_starts.push(match_id);
        self.empty = false;
    }

    pub(crate) fn push_state_update(&mut self, match_id: MatchId) {
        self.state_updates.push(match_id);
        self.empty = false;
    }

    pub(crate) fn push_move_applied(&mut self, record: MoveRecord) {
        self.moves_applied.push(record);
        self.empty = false;
    }

    pub(crate) fn push_move_rejected(&mut self, message: String) {
        self.moves_rejected.push(message);
        self.empty = false;
    }

    pub(crate) fn push_promotion_prompt(&mut self, pending: PendingMove) {
        self.promotion_prompts.push(pending);
        self.empty = false;
    }

    pub(crate) fn push_thinking(&mut self, update: ThinkingUpdate) {
        self.thinking.push(update);
        self.empty = false;
    }

    pub(crate) fn push_match_end(&mut self, match_id: MatchId) {
        self.match_ends.push(match_id);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: ShogiClientError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// Match Start Event
pub struct MatchStartEvent;
impl Event for MatchStartEvent {
    type Iter = IntoIter<MatchId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.match_starts);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.match_starts.is_empty()
    }
}

// State Update Event
pub struct StateUpdateEvent;
impl Event for StateUpdateEvent {
    type Iter = IntoIter<MatchId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.state_updates);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.state_updates.is_empty()
    }
}

// Move Applied Event
pub struct MoveAppliedEvent;
impl Event for MoveAppliedEvent {
    type Iter = IntoIter<MoveRecord>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.moves_applied);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.moves_applied.is_empty()
    }
}

// Move Rejected Event
pub struct MoveRejectedEvent;
impl Event for MoveRejectedEvent {
    type Iter = IntoIter<String>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.moves_rejected);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.moves_rejected.is_empty()
    }
}

// Promotion Prompt Event
pub struct PromotionPromptEvent;
impl Event for PromotionPromptEvent {
    type Iter = IntoIter<PendingMove>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.promotion_prompts);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.promotion_prompts.is_empty()
    }
}

// Thinking Event
pub struct ThinkingEvent;
impl Event for ThinkingEvent {
    type Iter = IntoIter<ThinkingUpdate>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.thinking);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.thinking.is_empty()
    }
}

// Match End Event
pub struct MatchEndEvent;
impl Event for MatchEndEvent {
    type Iter = IntoIter<MatchId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.match_ends);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.match_ends.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<ShogiClientError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.errors);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}
