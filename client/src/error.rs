use thiserror::Error;

use crate::transport::TransportError;

/// How far the API client truncates response bodies carried inside errors.
pub(crate) const ERROR_BODY_LIMIT: usize = 100;

/// Failure of a Game API call, surfaced after the retry policy has run its
/// course. Carries the HTTP status where one exists and a truncated response
/// body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-success HTTP response. 5xx statuses are retried before this
    /// surfaces; 4xx statuses surface immediately.
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Network-level failure, retried before this surfaces.
    #[error(transparent)]
    Network(#[from] TransportError),

    /// The response arrived but its payload could not be decoded.
    #[error("malformed response payload: {detail}")]
    Malformed { detail: String },
}

impl ApiError {
    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        ApiError::Malformed {
            detail: err.to_string(),
        }
    }

    /// Whether the retry policy may try again after this failure.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Network(_) => true,
            ApiError::Malformed { .. } => false,
        }
    }

    /// The HTTP status, if this failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// For 4xx failures: the server's rejection message, pulled from the
    /// response body when it parses as an error envelope, otherwise the raw
    /// (truncated) body text.
    pub fn rejection_message(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }

        match self {
            ApiError::Status { status, body } if (400..500).contains(status) => {
                match serde_json::from_str::<ErrorBody>(body) {
                    Ok(parsed) => Some(parsed.message),
                    Err(_) => Some(body.clone()),
                }
            }
            _ => None,
        }
    }
}

/// Errors surfaced by the client's public operations. Turn-gating rejections
/// are produced locally, before any network call is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShogiClientError {
    /// No match has been started or restored yet.
    #[error("no match is active")]
    NoMatch,

    /// The match has ended; start a new one.
    #[error("the match is over")]
    MatchOver,

    /// The side to move is not played by a human actor.
    #[error("it is not the human actor's turn")]
    NotYourTurn,

    /// An automated turn is scheduled or in flight.
    #[error("an automated turn is pending")]
    TurnInFlight,

    /// A promotion choice is still owed for a suspended move.
    #[error("a promotion decision is pending")]
    PromotionPending,

    /// `resolve_promotion` was called with nothing suspended.
    #[error("no promotion decision is pending")]
    NoPendingPromotion,

    /// The Game API call failed after the retry policy ran its course.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered, but declined the request in its envelope.
    #[error("server refused the request: {message}")]
    Refused { message: String },

    /// The server accepted the request but did not include a game state.
    #[error("server response carried no game state")]
    MissingState,
}
