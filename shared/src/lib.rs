//! # Shogi Shared
//! Common types and wire protocol shared between the shogi game client and
//! services that speak the Game API.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod actor;
mod error;
mod moves;
mod protocol;
mod state;
mod types;

pub use actor::Actor;
pub use error::{SideError, SquareError};
pub use moves::{MoveAction, PendingMove, Selection, Square};
pub use protocol::{
    CheckPromoteRequest, CheckPromoteResponse, CpuTurnRequest, CpuTurnResponse, HealthResponse,
    LlmTurnRequest, LlmTurnResponse, MoveRequest, MoveResponse, ResetRequest, ResetResponse,
    Status,
};
pub use state::{Board, GameState, Hands, LastMove, Piece, BOARD_SIZE};
pub use types::{MatchId, MoveNumber, Side};
