//! Request and response payloads for the Game API endpoints. Field names
//! match the server's JSON exactly; the client owns no other wire format.

use serde::{Deserialize, Serialize};

use crate::{
    moves::{MoveAction, Square},
    state::GameState,
    types::{MoveNumber, Side},
};

/// Outcome marker carried by every server response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

/// `POST /api/reset` — start a fresh match, or resume one from a position
/// string.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResetRequest {
    pub vs_ai: bool,
    pub ai_vs_ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sente_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gote_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfen: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
}

/// `POST /api/move` — submit a human move or drop. The position string and
/// the mode/actor context ride along because the server is stateless.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(flatten)]
    pub action: MoveAction,
    pub sfen: String,
    pub vs_ai: bool,
    pub ai_vs_ai: bool,
    pub sente_model: String,
    pub gote_model: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_str_ja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_count: Option<MoveNumber>,
}

/// `POST /api/cpu` — ask the server's built-in opponent to play the current
/// side's move.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CpuTurnRequest {
    pub sfen: String,
    pub vs_ai: bool,
    pub ai_vs_ai: bool,
    pub sente_model: String,
    pub gote_model: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CpuTurnResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub chosen: Option<MoveAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_str_ja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_count: Option<MoveNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

/// `POST /api/llm_move` — ask the configured external model to play the
/// current side's move. `max_retries` is the server-side budget for re-asking
/// the model after an illegal answer before it falls back to a scripted pick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmTurnRequest {
    pub sfen: String,
    pub turn: Side,
    pub sente_model: String,
    pub gote_model: String,
    pub vs_ai: bool,
    pub ai_vs_ai: bool,
    pub max_retries: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmTurnResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub chosen: Option<MoveAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_str_ja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_count: Option<MoveNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Synthesized speech payload, passed through opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
    /// Set when the server's scripted fallback chose the move because the
    /// model exhausted its retry budget.
    #[serde(default)]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// `POST /api/check_promote` — ask whether a candidate board move is
/// promotion-eligible. Eligibility depends on server-held rule state the
/// client does not reimplement; the server is the sole authority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckPromoteRequest {
    pub sfen: String,
    pub name: String,
    pub from: Square,
    pub to: Square,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CheckPromoteResponse {
    pub can_promote: bool,
}

/// `GET /api/health` — liveness probe.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: Status,
}
