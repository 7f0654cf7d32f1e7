//! Isolated sessions for hosts that interview several candidates at once.
//!
//! Each [`Session`] sits behind its own async mutex, so a slow completion
//! call for one candidate never blocks another, and no two candidates ever
//! share stage, record or history.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use super::interviewer::{InterviewError, Interviewer};
use super::session::Session;

/// Opaque identifier of one candidate's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "is-{}", self.0.simple())
    }
}

type SharedSession = Arc<tokio::sync::Mutex<Session>>;

/// Map from [`SessionId`] to an independently locked [`Session`].
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session at the greeting stage.
    pub fn create(&self) -> SessionId {
        let id = SessionId::new();
        self.lock()
            .insert(id, Arc::new(tokio::sync::Mutex::new(Session::new())));
        id
    }

    pub fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.lock().get(&id).cloned()
    }

    /// Drop a session. In-flight turns holding the session finish normally.
    pub fn remove(&self, id: SessionId) -> bool {
        self.lock().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run one turn for session `id`. Turns for the same session are
    /// serialized; turns for different sessions run independently.
    pub async fn handle_turn(
        &self,
        interviewer: &Interviewer<'_>,
        id: SessionId,
        input: &str,
    ) -> Result<String, InterviewError> {
        let session = self.get(id).ok_or(InterviewError::UnknownSession(id))?;
        let mut session = session.lock().await;
        interviewer.handle_turn(&mut session, input).await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, SharedSession>> {
        // A panic while holding this lock cannot leave the map half-updated.
        self.sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
