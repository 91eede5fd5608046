use serde::{Deserialize, Serialize};

use crate::error::SideError;

/// Number of a move within a match, starting at 1.
pub type MoveNumber = u32;

/// Identifies one match (or one resumption of a match) for the lifetime of a
/// client. Allocated monotonically; an asynchronous outcome tagged with an
/// older `MatchId` than the client's current one must be discarded unapplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchId(u64);

impl MatchId {
    /// The id held before any match has started.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match#{}", self.0)
    }
}

/// One of the two sides of a shogi match. On the wire this is the integer
/// encoding the server uses: Sente (moves first, starts at the bottom of the
/// board) is `1`, Gote is `-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Side {
    Sente,
    Gote,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }
}

impl From<Side> for i8 {
    fn from(side: Side) -> i8 {
        match side {
            Side::Sente => 1,
            Side::Gote => -1,
        }
    }
}

impl TryFrom<i8> for Side {
    type Error = SideError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::Sente),
            -1 => Ok(Side::Gote),
            _ => Err(SideError::InvalidValue { value }),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Sente => write!(f, "sente"),
            Side::Gote => write!(f, "gote"),
        }
    }
}
