use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{actor::Actor, moves::Square, types::Side};

pub const BOARD_SIZE: usize = 9;

/// A piece standing on the board, named by its kanji identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub name: String,
    pub owner: Side,
}

/// The 9x9 board as the server serializes it: rows top-to-bottom, each cell
/// either a piece or null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([[Option<Piece>; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    pub fn empty() -> Self {
        Self(std::array::from_fn(|_| std::array::from_fn(|_| None)))
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.0[square.y() as usize][square.x() as usize].as_ref()
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.0[square.y() as usize][square.x() as usize] = piece;
    }
}

/// Captured-piece counts, kanji name to count. The server keys the two sides
/// by their integer encoding, which arrives as the JSON keys `"1"` and `"-1"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hands {
    #[serde(rename = "1")]
    pub sente: BTreeMap<String, u32>,
    #[serde(rename = "-1")]
    pub gote: BTreeMap<String, u32>,
}

impl Hands {
    pub fn for_side(&self, side: Side) -> &BTreeMap<String, u32> {
        match side {
            Side::Sente => &self.sente,
            Side::Gote => &self.gote,
        }
    }

    /// Count of a named piece in a side's hand, zero if absent.
    pub fn count(&self, side: Side, name: &str) -> u32 {
        self.for_side(side).get(name).copied().unwrap_or(0)
    }
}

/// The destination of the most recent move, used by UIs to highlight it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub to: Square,
    pub owner: Side,
}

fn default_model() -> String {
    "gemini-2.5-pro".to_string()
}

/// One complete snapshot of a match as returned by the server. The client
/// holds this only as a cache: it is replaced wholesale on every successful
/// response and never patched field-by-field. The `sfen` string is the sole
/// position input the server needs to validate the next move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub hands: Hands,
    pub turn: Side,
    pub game_over: bool,
    pub sfen: String,
    #[serde(default)]
    pub last_move: Option<LastMove>,
    /// Human (Sente) against the server's built-in search opponent.
    #[serde(default)]
    pub vs_ai: bool,
    /// Both sides played by configured actors, any of which may be "human".
    #[serde(default)]
    pub ai_vs_ai_mode: bool,
    #[serde(default = "default_model")]
    pub sente_model: String,
    #[serde(default = "default_model")]
    pub gote_model: String,
}

impl GameState {
    pub fn side_to_move(&self) -> Side {
        self.turn
    }

    /// The configured model identifier for a side.
    pub fn model_for(&self, side: Side) -> &str {
        match side {
            Side::Sente => &self.sente_model,
            Side::Gote => &self.gote_model,
        }
    }

    /// Who acts for a side under the snapshot's mode flags. In the flexible
    /// mode the per-side model identifiers decide; in the legacy vs-AI mode
    /// Gote is always the built-in opponent; otherwise both sides are human.
    pub fn actor_for(&self, side: Side) -> Actor {
        if self.ai_vs_ai_mode {
            Actor::parse(self.model_for(side))
        } else if self.vs_ai && side == Side::Gote {
            Actor::Cpu
        } else {
            Actor::Human
        }
    }

    /// The actor whose turn it currently is.
    pub fn actor_to_move(&self) -> Actor {
        self.actor_for(self.turn)
    }
}
