use log::info;
use tokio::time::{sleep_until, Instant};

use shogi_shared::{
    CheckPromoteRequest, CheckPromoteResponse, CpuTurnRequest, CpuTurnResponse, GameState,
    HealthResponse, LlmTurnRequest, LlmTurnResponse, MatchId, MoveAction, MoveRequest,
    MoveResponse, PendingMove, ResetRequest, ResetResponse, Side, Square,
};

use crate::{
    client_config::ClientConfig,
    connection::{ApiClient, EndpointResolver},
    coordinator::{MatchCoordinator, MatchPhase, TapAction, TurnKind, TurnOutcome, TurnTicket},
    error::ShogiClientError,
    events::{Events, MoveRecord, ThinkingUpdate},
    session::{SessionId, SessionStore, Storage},
    transport::Transport,
};

/// Who plays each side of a new match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Two humans sharing the board.
    HumanVsHuman,
    /// Human Sente against the server's built-in opponent.
    HumanVsCpu,
    /// Both sides driven by their configured model identifiers, any of
    /// which may be "human".
    Configured,
}

/// Parameters for starting or restarting a match.
#[derive(Clone, Debug)]
pub struct MatchSetup {
    pub mode: MatchMode,
    pub sente_model: Option<String>,
    pub gote_model: Option<String>,
    /// Position string to resume from instead of the initial position.
    pub resume_sfen: Option<String>,
}

impl MatchSetup {
    pub fn human_vs_human() -> Self {
        Self {
            mode: MatchMode::HumanVsHuman,
            sente_model: None,
            gote_model: None,
            resume_sfen: None,
        }
    }

    pub fn human_vs_cpu() -> Self {
        Self {
            mode: MatchMode::HumanVsCpu,
            sente_model: None,
            gote_model: None,
            resume_sfen: None,
        }
    }

    pub fn configured(sente_model: impl Into<String>, gote_model: impl Into<String>) -> Self {
        Self {
            mode: MatchMode::Configured,
            sente_model: Some(sente_model.into()),
            gote_model: Some(gote_model.into()),
            resume_sfen: None,
        }
    }

    pub fn resume_from(mut self, sfen: impl Into<String>) -> Self {
        self.resume_sfen = Some(sfen.into());
        self
    }
}

/// Result of a submitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Accepted by the server; the new snapshot has been applied.
    Applied,
    /// Suspended awaiting a promotion choice; nothing was submitted yet.
    PromotionPending,
    /// Refused by the server's rules. The selection is cleared and the
    /// cached state untouched; the attempt is not retried.
    Rejected { message: String },
}

/// Result of a tap on the board or the hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored,
    Selected,
    Cleared,
    /// The tap completed a move or drop intent, with this result.
    Submitted(MoveOutcome),
}

/// The session-scoped controller: owns the locally cached snapshot, the
/// session store, the API client and the turn coordinator. Constructed once
/// per embedding UI; `new_match` resets it for the next game.
pub struct ShogiClient<T: Transport, S: Storage> {
    config: ClientConfig,
    api: ApiClient<T>,
    store: SessionStore<S>,
    coordinator: MatchCoordinator,
    events: Events,
    state: Option<GameState>,
    journal: Vec<MoveRecord>,
}

impl<T: Transport, S: Storage> ShogiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, storage: S) -> Self {
        let store = SessionStore::new(storage);
        let resolver = EndpointResolver::new(
            &config.page_host,
            &config.local_origin,
            &config.remote_origin,
        );
        let api = ApiClient::new(
            transport,
            resolver,
            store.session_id().clone(),
            config.retry.clone(),
        );
        let coordinator =
            MatchCoordinator::new(config.human_turn_debounce, config.automated_turn_interval);

        Self {
            config,
            api,
            store,
            coordinator,
            events: Events::new(),
            state: None,
            journal: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        self.store.session_id()
    }

    /// The last snapshot received from the server, if any.
    pub fn game_state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn match_id(&self) -> MatchId {
        self.coordinator.match_id()
    }

    pub fn phase(&self) -> MatchPhase {
        self.coordinator.phase()
    }

    /// Moves applied since the current match started, oldest first.
    pub fn journal(&self) -> &[MoveRecord] {
        &self.journal
    }

    /// Drains everything that happened since the last call.
    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    /// Rehydrates the previous session's match from local storage. Returns
    /// whether anything was restored; resuming allocates a fresh match id.
    pub fn restore(&mut self) -> bool {
        let Some(state) = self.store.restore_state() else {
            return false;
        };
        info!("restored session {} from local storage", self.session_id());
        self.journal.clear();
        self.start_match_from(state);
        true
    }

    /// Starts a new match (or resumes one from a position string) on the
    /// server and adopts the returned snapshot.
    pub async fn new_match(&mut self, setup: &MatchSetup) -> Result<MatchId, ShogiClientError> {
        let request = self.reset_request(setup);
        let response: ResetResponse = match self.api.post_json("/api/reset", &request).await {
            Ok(response) => response,
            Err(err) => {
                let error = ShogiClientError::from(err);
                self.events.push_error(error.clone());
                return Err(error);
            }
        };
        if !response.status.is_ok() {
            let error = ShogiClientError::Refused {
                message: response
                    .message
                    .unwrap_or_else(|| "reset refused".to_string()),
            };
            self.events.push_error(error.clone());
            return Err(error);
        }
        let state = response.game_state.ok_or(ShogiClientError::MissingState)?;

        self.journal.clear();
        Ok(self.start_match_from(state))
    }

    /// Interprets a tap on a board square: select a piece, dismiss the
    /// selection, or complete a pending intent by submitting it.
    pub async fn tap_square(&mut self, square: Square) -> Result<TapOutcome, ShogiClientError> {
        let action = match &self.state {
            None => return Err(ShogiClientError::NoMatch),
            Some(state) => self.coordinator.tap_square(state, square),
        };

        match action {
            TapAction::Ignored => Ok(TapOutcome::Ignored),
            TapAction::Selected => {
                self.events.push_state_update(self.coordinator.match_id());
                Ok(TapOutcome::Selected)
            }
            TapAction::Cleared => {
                self.events.push_state_update(self.coordinator.match_id());
                Ok(TapOutcome::Cleared)
            }
            TapAction::MoveIntent { piece, from, to } => {
                let outcome = self.submit_board_move(piece, from, to).await?;
                Ok(TapOutcome::Submitted(outcome))
            }
            TapAction::DropIntent { name, to } => {
                let outcome = self.submit_checked(MoveAction::Drop { name, to }).await?;
                Ok(TapOutcome::Submitted(outcome))
            }
        }
    }

    /// Interprets a tap on a named piece in the acting side's hand.
    pub fn tap_hand(&mut self, name: &str) -> Result<TapOutcome, ShogiClientError> {
        let action = match &self.state {
            None => return Err(ShogiClientError::NoMatch),
            Some(state) => self.coordinator.tap_hand(state, name),
        };

        match action {
            TapAction::Ignored => Ok(TapOutcome::Ignored),
            TapAction::Selected => {
                self.events.push_state_update(self.coordinator.match_id());
                Ok(TapOutcome::Selected)
            }
            _ => {
                self.events.push_state_update(self.coordinator.match_id());
                Ok(TapOutcome::Cleared)
            }
        }
    }

    /// Submits a human action directly. Board-to-board moves without an
    /// explicit promotion flag go through the eligibility check first and
    /// may suspend awaiting `resolve_promotion`.
    pub async fn submit(&mut self, action: MoveAction) -> Result<MoveOutcome, ShogiClientError> {
        {
            let state = self.state.as_ref().ok_or(ShogiClientError::NoMatch)?;
            self.coordinator.gate_human_action(state)?;
            if self.coordinator.pending_promotion().is_some() {
                return Err(ShogiClientError::PromotionPending);
            }
        }

        match action {
            MoveAction::Move {
                from,
                to,
                promote: false,
            } => {
                let piece = self
                    .state
                    .as_ref()
                    .and_then(|state| state.board.piece_at(from))
                    .map(|piece| piece.name.clone())
                    .unwrap_or_default();
                self.submit_board_move(piece, from, to).await
            }
            other => self.submit_checked(other).await,
        }
    }

    /// Answers the pending promotion prompt and submits the suspended move
    /// with the choice merged in.
    pub async fn resolve_promotion(
        &mut self,
        promote: bool,
    ) -> Result<MoveOutcome, ShogiClientError> {
        let action = self.coordinator.resolve_promotion(promote)?;
        self.submit_checked(action).await
    }

    /// Runs due automated turns until the match waits for human input, ends,
    /// or a turn fails. Returns immediately when nothing is scheduled.
    pub async fn drive(&mut self) -> Result<(), ShogiClientError> {
        loop {
            let Some(deadline) = self.coordinator.next_deadline() else {
                return Ok(());
            };
            sleep_until(deadline).await;
            let Some(ticket) = self.coordinator.request_due_turn(Instant::now()) else {
                continue;
            };
            self.run_automated_turn(ticket).await?;
        }
    }

    /// Reschedules a stalled automated turn after a failure surfaced from
    /// `drive`. Returns whether a turn was scheduled.
    pub fn resume_automated(&mut self) -> bool {
        match &self.state {
            None => false,
            Some(state) => self.coordinator.resume_automated(state, Instant::now()),
        }
    }

    /// Liveness probe against the API service.
    pub async fn health(&self) -> Result<HealthResponse, ShogiClientError> {
        Ok(self.api.get_json("/api/health").await?)
    }

    // Internals

    fn reset_request(&self, setup: &MatchSetup) -> ResetRequest {
        let (vs_ai, ai_vs_ai) = match setup.mode {
            MatchMode::HumanVsHuman => (false, false),
            MatchMode::HumanVsCpu => (true, false),
            MatchMode::Configured => (false, true),
        };
        let (sente_model, gote_model) = if setup.mode == MatchMode::Configured {
            (
                Some(
                    setup
                        .sente_model
                        .clone()
                        .unwrap_or_else(|| self.config.default_sente_model.clone()),
                ),
                Some(
                    setup
                        .gote_model
                        .clone()
                        .unwrap_or_else(|| self.config.default_gote_model.clone()),
                ),
            )
        } else {
            (None, None)
        };

        ResetRequest {
            vs_ai,
            ai_vs_ai,
            sente_model,
            gote_model,
            sfen: setup.resume_sfen.clone(),
        }
    }

    fn start_match_from(&mut self, state: GameState) -> MatchId {
        let match_id = self.coordinator.begin_match(&state, Instant::now());
        self.events.push_match_start(match_id);
        let over = state.game_over;
        self.apply_state(state);
        if over {
            self.events.push_match_end(match_id);
        }
        match_id
    }

    /// The only place the cached snapshot changes: a wholesale swap,
    /// persisted, with a render trigger for the UI.
    fn apply_state(&mut self, state: GameState) {
        self.store.persist_state(&state);
        self.state = Some(state);
        self.events.push_state_update(self.coordinator.match_id());
    }

    fn current_sfen(&self) -> Result<String, ShogiClientError> {
        self.state
            .as_ref()
            .map(|state| state.sfen.clone())
            .ok_or(ShogiClientError::NoMatch)
    }

    /// First phase of the promotion protocol: ask the server whether the
    /// move is promotion-eligible, and suspend it if so.
    async fn submit_board_move(
        &mut self,
        piece: String,
        from: Square,
        to: Square,
    ) -> Result<MoveOutcome, ShogiClientError> {
        let request = CheckPromoteRequest {
            sfen: self.current_sfen()?,
            name: piece.clone(),
            from,
            to,
        };
        let response: CheckPromoteResponse =
            match self.api.post_json("/api/check_promote", &request).await {
                Ok(response) => response,
                Err(err) => {
                    let error = ShogiClientError::from(err);
                    self.events.push_error(error.clone());
                    return Err(error);
                }
            };

        if response.can_promote {
            let pending = PendingMove { piece, from, to };
            self.coordinator.suspend_promotion(pending.clone());
            self.events.push_promotion_prompt(pending);
            return Ok(MoveOutcome::PromotionPending);
        }

        self.submit_checked(MoveAction::Move {
            from,
            to,
            promote: false,
        })
        .await
    }

    /// Second phase: the actual `/api/move` submission.
    async fn submit_checked(&mut self, action: MoveAction) -> Result<MoveOutcome, ShogiClientError> {
        let request = {
            let state = self.state.as_ref().ok_or(ShogiClientError::NoMatch)?;
            MoveRequest {
                action,
                sfen: state.sfen.clone(),
                vs_ai: state.vs_ai,
                ai_vs_ai: state.ai_vs_ai_mode,
                sente_model: state.sente_model.clone(),
                gote_model: state.gote_model.clone(),
            }
        };

        match self
            .api
            .post_json::<_, MoveResponse>("/api/move", &request)
            .await
        {
            Ok(response) if response.status.is_ok() => {
                let new_state = response.game_state.ok_or(ShogiClientError::MissingState)?;
                self.record_move(MoveRecord {
                    number: response.move_count,
                    mover: "human".to_string(),
                    notation: response.move_str_ja,
                    usi: None,
                    reasoning: None,
                    speech: None,
                    fallback: false,
                });
                self.coordinator
                    .human_action_applied(&new_state, Instant::now());
                let over = new_state.game_over;
                self.apply_state(new_state);
                if over {
                    self.events.push_match_end(self.coordinator.match_id());
                }
                Ok(MoveOutcome::Applied)
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "move rejected".to_string());
                self.reject_move(message.clone());
                Ok(MoveOutcome::Rejected { message })
            }
            Err(err) => {
                if let Some(message) = err.rejection_message() {
                    self.reject_move(message.clone());
                    Ok(MoveOutcome::Rejected { message })
                } else {
                    let error = ShogiClientError::from(err);
                    self.events.push_error(error.clone());
                    Err(error)
                }
            }
        }
    }

    /// A rule rejection discards the attempt: the selection goes, the cached
    /// state stays, and the UI re-renders.
    fn reject_move(&mut self, message: String) {
        self.coordinator.human_action_rejected();
        self.events.push_move_rejected(message);
        self.events.push_state_update(self.coordinator.match_id());
    }

    fn record_move(&mut self, record: MoveRecord) {
        self.journal.push(record.clone());
        self.events.push_move_applied(record);
    }

    async fn run_automated_turn(&mut self, ticket: TurnTicket) -> Result<(), ShogiClientError> {
        let label = self
            .state
            .as_ref()
            .map(|state| state.actor_for(ticket.side).label().to_string())
            .unwrap_or_else(|| "cpu".to_string());
        self.events.push_thinking(ThinkingUpdate {
            side: ticket.side,
            label: label.clone(),
            active: true,
        });

        let result = match ticket.kind {
            TurnKind::Cpu => self.request_cpu_turn().await,
            TurnKind::Llm => self.request_llm_turn(ticket.side).await,
        };

        self.events.push_thinking(ThinkingUpdate {
            side: ticket.side,
            label,
            active: false,
        });

        match result {
            Ok((new_state, record)) => {
                let outcome =
                    self.coordinator
                        .apply_automated_outcome(&ticket, &new_state, Instant::now());
                if outcome == TurnOutcome::Applied {
                    if let Some(record) = record {
                        self.record_move(record);
                    }
                    let over = new_state.game_over;
                    self.apply_state(new_state);
                    if over {
                        self.events.push_match_end(self.coordinator.match_id());
                    }
                }
                Ok(())
            }
            Err(error) => {
                self.coordinator.automated_turn_failed(&ticket);
                self.events.push_error(error.clone());
                Err(error)
            }
        }
    }

    async fn request_cpu_turn(
        &self,
    ) -> Result<(GameState, Option<MoveRecord>), ShogiClientError> {
        let request = {
            let state = self.state.as_ref().ok_or(ShogiClientError::NoMatch)?;
            CpuTurnRequest {
                sfen: state.sfen.clone(),
                vs_ai: state.vs_ai,
                ai_vs_ai: state.ai_vs_ai_mode,
                sente_model: state.sente_model.clone(),
                gote_model: state.gote_model.clone(),
            }
        };
        let response: CpuTurnResponse = self.api.post_json("/api/cpu", &request).await?;
        if !response.status.is_ok() {
            return Err(ShogiClientError::Refused {
                message: response
                    .message
                    .unwrap_or_else(|| "cpu turn refused".to_string()),
            });
        }
        let new_state = response.game_state.ok_or(ShogiClientError::MissingState)?;
        let record = response.move_str_ja.map(|notation| MoveRecord {
            number: response.move_count,
            mover: "cpu".to_string(),
            notation: Some(notation),
            usi: None,
            reasoning: None,
            speech: None,
            fallback: false,
        });
        Ok((new_state, record))
    }

    async fn request_llm_turn(
        &self,
        side: Side,
    ) -> Result<(GameState, Option<MoveRecord>), ShogiClientError> {
        let (request, configured_model) = {
            let state = self.state.as_ref().ok_or(ShogiClientError::NoMatch)?;
            (
                LlmTurnRequest {
                    sfen: state.sfen.clone(),
                    turn: side,
                    sente_model: state.sente_model.clone(),
                    gote_model: state.gote_model.clone(),
                    vs_ai: state.vs_ai,
                    ai_vs_ai: state.ai_vs_ai_mode,
                    max_retries: self.config.llm_retry_budget.clamp(1, 3),
                },
                state.model_for(side).to_string(),
            )
        };
        let response: LlmTurnResponse = self.api.post_json("/api/llm_move", &request).await?;
        if !response.status.is_ok() {
            let message = response
                .message
                .or(response.last_error)
                .unwrap_or_else(|| "model turn refused".to_string());
            return Err(ShogiClientError::Refused { message });
        }
        let new_state = response.game_state.ok_or(ShogiClientError::MissingState)?;
        let record = Some(MoveRecord {
            number: response.move_count,
            mover: response.model.unwrap_or(configured_model),
            notation: response.move_str_ja,
            usi: response.usi,
            reasoning: response.reasoning,
            speech: response.speech,
            fallback: response.fallback,
        });
        Ok((new_state, record))
    }
}
