//! Per-candidate interview state.

use super::record::CandidateRecord;
use super::stage::Stage;
use crate::Message;

/// Everything one interview remembers between turns: the current stage, the
/// validated answers, and the user/assistant history replayed to the model.
///
/// A session is only mutated by [`Interviewer::handle_turn`](super::Interviewer::handle_turn),
/// which either applies a whole turn or leaves the session untouched.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) stage: Stage,
    pub(crate) candidate: CandidateRecord,
    pub(crate) history: Vec<Message>,
}

impl Session {
    /// A fresh session at [`Stage::Greeting`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session that starts partway through the script.
    pub fn at_stage(stage: Stage) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn candidate(&self) -> &CandidateRecord {
        &self.candidate
    }

    /// User and assistant turns in the order they happened.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Whether the interview has reached [`Stage::Farewell`].
    pub fn is_finished(&self) -> bool {
        self.stage.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty_at_greeting() {
        let session = Session::new();
        assert_eq!(session.stage(), Stage::Greeting);
        assert!(session.candidate().is_empty());
        assert!(session.history().is_empty());
        assert!(!session.is_finished());
    }

    #[test]
    fn at_stage_sets_only_the_stage() {
        let session = Session::at_stage(Stage::Farewell);
        assert!(session.is_finished());
        assert!(session.history().is_empty());
    }
}
