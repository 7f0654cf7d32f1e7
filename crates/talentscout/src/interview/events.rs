//! Events emitted by the [`Interviewer`](super::Interviewer) while handling turns.
//!
//! | Handler | Use case |
//! |---------|----------|
//! | [`NoopHandler`] | Tests or when nothing needs observing |
//! | [`LoggingHandler`] | Structured logging via `tracing` |
//! | [`FnEventHandler`] | Quick closures for simple callbacks |
//! | Custom `impl EventHandler` | Audit trails, UI status lines, metrics |

use tracing::{debug, info, warn};

use super::stage::Stage;
use crate::gateway::GatewayError;

/// Something that happened during a turn.
#[derive(Debug)]
pub enum InterviewEvent<'a> {
    /// A turn is starting at `stage`.
    TurnStarted { stage: Stage },
    /// The candidate asked to leave.
    ExitRequested { from: Stage },
    /// A reply call was skipped because its text would have been discarded.
    ReplyCallSkipped { stage: Stage },
    /// The model produced the per-turn reply.
    Reply(&'a str),
    /// An answer failed its format check; the stage stays put.
    AnswerRejected { stage: Stage, answer: &'a str },
    /// A validated answer was stored on the candidate record.
    FieldCaptured { field: &'static str },
    /// The interview moved on.
    StageAdvanced { from: Stage, to: Stage },
    /// Technical questions were generated for the declared stack.
    QuestionsGenerated { technologies: &'a [String] },
    /// A completion call failed; the session is unchanged.
    GatewayFailed { stage: Stage, error: &'a GatewayError },
}

/// Handler for interview events.
///
/// The default implementation ignores everything.
pub trait EventHandler: Send + Sync {
    fn on_event(&self, event: &InterviewEvent<'_>) {
        let _ = event;
    }
}

/// Ignores all events.
pub struct NoopHandler;
impl EventHandler for NoopHandler {}

/// An event handler backed by a closure.
///
/// ```ignore
/// let handler = FnEventHandler::new(|event| {
///     if let InterviewEvent::StageAdvanced { to, .. } = event {
///         println!("now at {to}");
///     }
/// });
/// ```
pub struct FnEventHandler<F>(F)
where
    F: Fn(&InterviewEvent<'_>) + Send + Sync;

impl<F> FnEventHandler<F>
where
    F: Fn(&InterviewEvent<'_>) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> EventHandler for FnEventHandler<F>
where
    F: Fn(&InterviewEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &InterviewEvent<'_>) {
        (self.0)(event)
    }
}

/// Logs events via `tracing`.
///
/// Candidate answers are never logged verbatim at `info`; rejected answers
/// only show their length.
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn on_event(&self, event: &InterviewEvent<'_>) {
        match event {
            InterviewEvent::TurnStarted { stage } => {
                debug!("Turn started at stage {stage}");
            }
            InterviewEvent::ExitRequested { from } => {
                info!("Candidate ended the interview at stage {from}");
            }
            InterviewEvent::ReplyCallSkipped { stage } => {
                debug!("Skipped reply call at stage {stage}");
            }
            InterviewEvent::Reply(text) => {
                let preview: String = text.chars().take(200).collect();
                debug!(
                    "LLM reply: {preview}{}",
                    if text.chars().count() > 200 { "..." } else { "" }
                );
            }
            InterviewEvent::AnswerRejected { stage, answer } => {
                info!(
                    "Rejected {stage} answer ({} chars), re-prompting",
                    answer.chars().count()
                );
            }
            InterviewEvent::FieldCaptured { field } => {
                info!("Captured candidate {field}");
            }
            InterviewEvent::StageAdvanced { from, to } => {
                info!("Stage {from} -> {to}");
            }
            InterviewEvent::QuestionsGenerated { technologies } => {
                info!(
                    "Generated technical questions for {} technolog{}: {}",
                    technologies.len(),
                    if technologies.len() == 1 { "y" } else { "ies" },
                    technologies.join(", ")
                );
            }
            InterviewEvent::GatewayFailed { stage, error } => {
                warn!("Completion failed at stage {stage}: {error}");
            }
        }
    }
}
