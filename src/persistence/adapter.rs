//! Mapping between the in-memory session collection and the key-value store

use std::{collections::HashSet, sync::Arc};
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::{
    error::{PersistenceError, PersistenceResult},
    state::Session,
};

/// Key holding the JSON array of sessions
pub const SESSIONS_KEY: &str = "timekeeper_sessions";

/// Key holding the active session id as a plain string
pub const ACTIVE_SESSION_KEY: &str = "timekeeper_active_session";

/// Everything restored at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub sessions: Vec<Session>,
    pub active_id: Option<String>,
}

/// Persistence adapter over an injected key-value store
#[derive(Clone)]
pub struct Persistence {
    kv: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Restore sessions and the active pointer.
    ///
    /// Missing or corrupt data yields an empty collection and no active id.
    /// An active id that matches no restored session is dropped.
    pub fn load(&self) -> PersistedState {
        let sessions = match self.load_sessions() {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!("Discarding stored sessions: {}", e);
                return PersistedState::default();
            }
        };

        let active_id = match self.kv.get(ACTIVE_SESSION_KEY) {
            Ok(Some(id)) if sessions.iter().any(|s| s.id == id) => Some(id),
            Ok(Some(id)) => {
                warn!("Stored active session '{}' no longer exists, ignoring it", id);
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read active session id: {}", e);
                None
            }
        };

        debug!("Loaded {} sessions, active={:?}", sessions.len(), active_id);
        PersistedState { sessions, active_id }
    }

    fn load_sessions(&self) -> PersistenceResult<Vec<Session>> {
        let Some(raw) = self.kv.get(SESSIONS_KEY)? else {
            return Ok(Vec::new());
        };

        let sessions: Vec<Session> = serde_json::from_str(&raw)?;

        let mut seen = HashSet::new();
        for session in &sessions {
            if !seen.insert(session.id.as_str()) {
                return Err(PersistenceError::Corrupt(format!(
                    "duplicate session id '{}'",
                    session.id
                )));
            }
            session.timer.validate().map_err(|e| {
                PersistenceError::Corrupt(format!("session '{}': {}", session.id, e))
            })?;
        }

        Ok(sessions)
    }

    /// Replace the stored collection with `sessions`
    pub fn save(&self, sessions: &[Session]) -> PersistenceResult<()> {
        let json = serde_json::to_string(sessions)?;
        self.kv.set(SESSIONS_KEY, &json)
    }

    /// Store the active pointer; `None` removes the key so a cleared pointer
    /// is not resurrected on the next load
    pub fn save_active_id(&self, id: Option<&str>) -> PersistenceResult<()> {
        match id {
            Some(id) => self.kv.set(ACTIVE_SESSION_KEY, id),
            None => self.kv.remove(ACTIVE_SESSION_KEY),
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}
