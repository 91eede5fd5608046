//! # Shogi Client
//! A client for a server-hosted shogi game. It keeps a local cache of the
//! last server snapshot, decides locally whose turn it is before letting any
//! request out, and drives the turn-taking loop across human, scripted-CPU
//! and language-model actors. Board legality, promotion rules and move
//! selection all live server-side; this crate owns only the synchronization
//! protocol around them.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;

pub mod shared {
    pub use shogi_shared::{
        Actor, Board, CheckPromoteRequest, CheckPromoteResponse, CpuTurnRequest, CpuTurnResponse,
        GameState, Hands, HealthResponse, LastMove, LlmTurnRequest, LlmTurnResponse, MatchId,
        MoveAction, MoveNumber, MoveRequest, MoveResponse, PendingMove, Piece, ResetRequest,
        ResetResponse, Selection, Side, SideError, Square, SquareError, Status, BOARD_SIZE,
    };
}

mod client;
mod client_config;
mod connection;
mod coordinator;
mod error;
mod events;
mod session;

pub use client::{MatchMode, MatchSetup, MoveOutcome, ShogiClient, TapOutcome};
pub use client_config::ClientConfig;
pub use connection::{ApiClient, RetryConfig, SESSION_HEADER};
pub use coordinator::{
    MatchCoordinator, MatchPhase, ScheduledTurn, TapAction, TurnKind, TurnOutcome, TurnScheduler,
    TurnTicket,
};
pub use error::{ApiError, ShogiClientError};
pub use events::{
    ErrorEvent, Event, Events, MatchEndEvent, MatchStartEvent, MoveAppliedEvent, MoveRecord,
    MoveRejectedEvent, PromotionPromptEvent, StateUpdateEvent, ThinkingEvent, ThinkingUpdate,
};
pub use session::{FileStorage, MemoryStorage, SessionId, SessionStore, Storage, StorageError};
