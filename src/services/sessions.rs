use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::models::session::SessionSummary;
use crate::services::form_state::FormSession;
use crate::services::validation::draft_is_valid;

/// In-memory store of live form sessions keyed by generated id.
///
/// Nothing is persisted; a restart forgets every session. Callers never hold
/// the lock across an await: they mutate under `with_session`, release, run
/// the async work, then apply the outcome in a second `with_session` call.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, FormSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a fresh session and return its id.
    pub fn create(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(session_id.clone(), FormSession::new());
        info!("Created reservation form session {}", session_id);
        session_id
    }

    /// Run a closure against one session. Returns None for an unknown id.
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut FormSession) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.get_mut(session_id).map(f)
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.lock().unwrap();
        let removed = sessions.remove(session_id).is_some();
        if removed {
            info!("Removed reservation form session {}", session_id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compact listing of all live sessions for the management endpoint.
    pub fn summaries(&self) -> Vec<SessionSummary> {
        let sessions = self.sessions.lock().unwrap();
        sessions
            .iter()
            .map(|(session_id, session)| SessionSummary {
                session_id: session_id.clone(),
                submission_state: session.submission_state(),
                form_is_valid: draft_is_valid(session.draft()),
            })
            .collect()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
