use serde::{Deserialize, Serialize};

use crate::error::SquareError;
use crate::state::BOARD_SIZE;

/// A board coordinate. `x` counts files left-to-right and `y` counts ranks
/// top-to-bottom, both 0-based, matching the server's `[x, y]` array encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "(u8, u8)", try_from = "(u8, u8)")]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    pub fn new(x: u8, y: u8) -> Result<Self, SquareError> {
        if (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE {
            Ok(Self { x, y })
        } else {
            Err(SquareError::OutOfRange { x, y })
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }
}

impl From<Square> for (u8, u8) {
    fn from(square: Square) -> (u8, u8) {
        (square.x, square.y)
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareError;

    fn try_from((x, y): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(x, y)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A move description as the server consumes it: either sliding a piece
/// between two board squares (with a promotion decision) or dropping a
/// captured piece from the hand onto an empty square.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MoveAction {
    Move {
        from: Square,
        to: Square,
        promote: bool,
    },
    Drop {
        name: String,
        to: Square,
    },
}

/// Transient selection made by the human actor: a board square holding one of
/// their pieces, or the name of a piece in their hand. Exists only in memory,
/// cleared on every completed action or deselect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Board(Square),
    Hand(String),
}

/// A board-to-board move held between promotion-eligibility detection and the
/// explicit yes/no choice. The chosen flag is merged into the payload on
/// resolution; the pending move is cleared either way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMove {
    pub piece: String,
    pub from: Square,
    pub to: Square,
}

impl PendingMove {
    /// Merges the promotion choice into a submittable move.
    pub fn resolve(self, promote: bool) -> MoveAction {
        MoveAction::Move {
            from: self.from,
            to: self.to,
            promote,
        }
    }
}
