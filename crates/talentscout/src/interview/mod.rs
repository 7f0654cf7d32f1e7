//! The guided interview: stages, checks, prompts, and the state machine.
//!
//! - [`stage`] — [`Stage`] and its fixed successor table.
//! - [`validate`] — email and phone format checks.
//! - [`prompt`] — per-stage system prompt and the tech-question prompt.
//! - [`record`] — [`CandidateRecord`] of validated answers.
//! - [`session`] — [`Session`]: stage, record, and history of one candidate.
//! - [`interviewer`] — [`Interviewer::handle_turn`], the state machine.
//! - [`events`] — [`EventHandler`] hooks for observing turns.
//! - [`registry`] — [`SessionRegistry`] for hosts with many candidates.

pub mod events;
pub mod interviewer;
pub mod prompt;
pub mod record;
pub mod registry;
pub mod session;
pub mod stage;
pub mod validate;

pub use events::{EventHandler, FnEventHandler, InterviewEvent, LoggingHandler, NoopHandler};
pub use interviewer::{
    Decision, EXIT_COMMANDS, FAREWELL_MESSAGE, INVALID_EMAIL_MESSAGE, INVALID_PHONE_MESSAGE,
    InterviewError, Interviewer, OPENING_INPUT, is_exit_command,
};
pub use record::CandidateRecord;
pub use registry::{SessionId, SessionRegistry};
pub use session::Session;
pub use stage::Stage;
