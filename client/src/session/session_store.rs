use log::warn;

use shogi_shared::GameState;

use super::storage::Storage;

pub(crate) const SESSION_ID_KEY: &str = "shogi_session_id";
pub(crate) const STATE_KEY: &str = "shogi_state";

/// Stable per-client identifier, attached to every outbound request so the
/// server can correlate calls from one browser or process.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    fn generate() -> Self {
        let mut suffix = String::with_capacity(9);
        for _ in 0..9 {
            suffix.push(fastrand::alphanumeric());
        }
        Self(format!("sess_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns the locally persisted pieces of a session: the session identifier and
/// the last known game state. The state cache is overwritten wholesale on
/// every successful server response; restoring treats malformed stored data
/// as absence.
pub struct SessionStore<S: Storage> {
    storage: S,
    session_id: SessionId,
}

impl<S: Storage> SessionStore<S> {
    /// Loads the persisted session identifier, generating and persisting one
    /// on first use. Generation is random and collision-tolerant; a storage
    /// write failure is logged and the fresh id is kept for this process.
    pub fn new(mut storage: S) -> Self {
        let session_id = match storage.get(SESSION_ID_KEY) {
            Some(existing) if !existing.is_empty() => SessionId(existing),
            _ => {
                let fresh = SessionId::generate();
                if let Err(err) = storage.set(SESSION_ID_KEY, fresh.as_str()) {
                    warn!("could not persist session id: {err}");
                }
                fresh
            }
        };

        Self {
            storage,
            session_id,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Overwrites the cached game state.
    pub fn persist_state(&mut self, state: &GameState) {
        match serde_json::to_string(state) {
            Ok(serialized) => {
                if let Err(err) = self.storage.set(STATE_KEY, &serialized) {
                    warn!("could not persist game state: {err}");
                }
            }
            Err(err) => warn!("could not serialize game state: {err}"),
        }
    }

    /// Loads the cached game state, if any. Corrupt stored data is logged
    /// and treated as absence.
    pub fn restore_state(&self) -> Option<GameState> {
        let stored = self.storage.get(STATE_KEY)?;
        match serde_json::from_str(&stored) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!("discarding unreadable stored game state: {err}");
                None
            }
        }
    }
}
