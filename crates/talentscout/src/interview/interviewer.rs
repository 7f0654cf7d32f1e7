//! The interview state machine.
//!
//! [`Interviewer::handle_turn`] runs once per candidate message:
//!
//! 1. A finished session answers with the farewell message and nothing else.
//! 2. An exit word (`exit`, `quit`, `bye`) ends the interview without a
//!    model call.
//! 3. The answer is checked against the stage it was given in (see
//!    [`Decision`]).
//! 4. The model is asked for the next assistant message under the current
//!    stage's system prompt. For `tech_stack` answers a second call
//!    generates the technical questions, and that text is returned instead.
//! 5. Only when every call succeeded are history, record and stage updated.

use tracing::debug;

use super::events::{EventHandler, InterviewEvent, LoggingHandler};
use super::prompt::{TECH_INTERVIEWER_PERSONA, system_prompt, tech_questions_prompt};
use super::record::parse_tech_stack;
use super::registry::SessionId;
use super::session::Session;
use super::stage::Stage;
use super::validate::{validate_email, validate_phone};
use crate::Message;
use crate::config::{GatewayPolicy, InterviewConfig};
use crate::gateway::{CompletionGateway, GatewayError};

/// Returned when the candidate leaves and on every turn after that.
pub const FAREWELL_MESSAGE: &str =
    "Thank you for your time! We will review your application and get back to you soon.";

pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address.";

pub const INVALID_PHONE_MESSAGE: &str = "Please provide a valid phone number.";

/// Words that end the interview at any stage (matched trimmed, case-insensitive).
pub const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "bye"];

/// Input sent on the candidate's behalf to obtain the opening greeting.
pub const OPENING_INPUT: &str = "start";

/// Errors that abort a turn. The session is left as it was before the turn.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("no interview session with id {0}")]
    UnknownSession(SessionId),
}

impl InterviewError {
    /// Whether sending the same message again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            InterviewError::Gateway(e) => e.is_retryable(),
            InterviewError::UnknownSession(_) => false,
        }
    }
}

pub fn is_exit_command(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    EXIT_COMMANDS.contains(&normalized.as_str())
}

/// What an answer means for the stage it was given in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Format check failed; reply with this message and stay.
    Reject(&'static str),
    /// Valid email; store it and move to phone.
    CaptureEmail,
    /// Valid phone; store it and move to experience.
    CapturePhone,
    /// Declared technologies; store them, move to questions, and reply with
    /// generated questions.
    CaptureTechStack(Vec<String>),
    /// Move on unconditionally.
    Advance(Stage),
    /// Keep the current stage.
    Stay,
}

impl Decision {
    /// Classify `input` given while the interview is at `stage`.
    ///
    /// Empty input at a gated stage is not checked and keeps the stage.
    pub fn for_answer(stage: Stage, input: &str) -> Self {
        match stage {
            Stage::Email if !input.is_empty() => {
                if validate_email(input) {
                    Decision::CaptureEmail
                } else {
                    Decision::Reject(INVALID_EMAIL_MESSAGE)
                }
            }
            Stage::Phone if !input.is_empty() => {
                if validate_phone(input) {
                    Decision::CapturePhone
                } else {
                    Decision::Reject(INVALID_PHONE_MESSAGE)
                }
            }
            Stage::TechStack if !input.is_empty() => {
                Decision::CaptureTechStack(parse_tech_stack(input))
            }
            _ => stage.successor().map_or(Decision::Stay, Decision::Advance),
        }
    }

    /// Whether the per-turn model reply is replaced by other text.
    pub fn discards_reply(&self) -> bool {
        matches!(self, Decision::Reject(_) | Decision::CaptureTechStack(_))
    }
}

/// Drives [`Session`]s through the interview script using a completion gateway.
pub struct Interviewer<'a> {
    gateway: &'a dyn CompletionGateway,
    config: InterviewConfig,
    event_handler: &'a dyn EventHandler,
}

impl<'a> Interviewer<'a> {
    pub fn new(gateway: &'a dyn CompletionGateway, config: InterviewConfig) -> Self {
        Self {
            gateway,
            config,
            event_handler: &LoggingHandler,
        }
    }

    /// Replace the default [`LoggingHandler`].
    pub fn with_event_handler(mut self, handler: &'a dyn EventHandler) -> Self {
        self.event_handler = handler;
        self
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    /// Produce the opening greeting for a fresh session.
    pub async fn open(&self, session: &mut Session) -> Result<String, InterviewError> {
        self.handle_turn(session, OPENING_INPUT).await
    }

    /// Handle one candidate message and return the text to show them.
    ///
    /// On error the session is unchanged, so the same message can be resent.
    pub async fn handle_turn(
        &self,
        session: &mut Session,
        input: &str,
    ) -> Result<String, InterviewError> {
        let stage = session.stage;

        if stage.is_terminal() {
            return Ok(FAREWELL_MESSAGE.to_string());
        }

        self.emit(&InterviewEvent::TurnStarted { stage });

        if is_exit_command(input) {
            session.history.push(Message::user(input));
            session.stage = Stage::Farewell;
            self.emit(&InterviewEvent::ExitRequested { from: stage });
            return Ok(FAREWELL_MESSAGE.to_string());
        }

        let decision = Decision::for_answer(stage, input);
        debug!("Stage {stage} decision: {decision:?}");

        let reply = if decision.discards_reply() {
            self.discarded_reply(session, stage, input).await?
        } else {
            Some(self.reply(session, stage, input).await?)
        };

        let shown = match &decision {
            Decision::Reject(message) => (*message).to_string(),
            Decision::CaptureTechStack(techs) => self.generate_questions(stage, techs).await?,
            _ => reply.clone().unwrap_or_default(),
        };

        session.history.push(Message::user(input));
        session
            .history
            .push(Message::assistant(reply.unwrap_or_else(|| shown.clone())));

        match decision {
            Decision::Reject(_) => {
                self.emit(&InterviewEvent::AnswerRejected {
                    stage,
                    answer: input,
                });
            }
            Decision::CaptureEmail => {
                session.candidate.email = Some(input.to_string());
                self.emit(&InterviewEvent::FieldCaptured { field: "email" });
                self.advance(session, Stage::Phone);
            }
            Decision::CapturePhone => {
                session.candidate.phone = Some(input.to_string());
                self.emit(&InterviewEvent::FieldCaptured { field: "phone" });
                self.advance(session, Stage::Experience);
            }
            Decision::CaptureTechStack(techs) => {
                self.emit(&InterviewEvent::QuestionsGenerated {
                    technologies: &techs,
                });
                session.candidate.tech_stack = techs;
                self.emit(&InterviewEvent::FieldCaptured {
                    field: "tech_stack",
                });
                self.advance(session, Stage::Questions);
            }
            Decision::Advance(next) => self.advance(session, next),
            Decision::Stay => {}
        }

        Ok(shown)
    }

    /// The per-turn reply call for a turn whose reply will not be shown.
    /// Returns `None` when the gateway policy skips it.
    async fn discarded_reply(
        &self,
        session: &Session,
        stage: Stage,
        input: &str,
    ) -> Result<Option<String>, InterviewError> {
        match self.config.gateway_policy {
            GatewayPolicy::Faithful => Ok(Some(self.reply(session, stage, input).await?)),
            GatewayPolicy::SkipDiscarded => {
                self.emit(&InterviewEvent::ReplyCallSkipped { stage });
                Ok(None)
            }
        }
    }

    /// Ask the model for the next assistant message: the stage's system
    /// prompt, the full history, then this turn's input.
    async fn reply(
        &self,
        session: &Session,
        stage: Stage,
        input: &str,
    ) -> Result<String, InterviewError> {
        let mut messages = Vec::with_capacity(session.history.len() + 2);
        messages.push(Message::system(system_prompt(stage)));
        messages.extend(session.history.iter().cloned());
        messages.push(Message::user(input));

        let reply = self.complete(stage, &messages).await?;
        self.emit(&InterviewEvent::Reply(&reply));
        Ok(reply)
    }

    async fn generate_questions(
        &self,
        stage: Stage,
        techs: &[String],
    ) -> Result<String, InterviewError> {
        let messages = [
            Message::system(TECH_INTERVIEWER_PERSONA),
            Message::user(tech_questions_prompt(techs)),
        ];
        self.complete(stage, &messages).await
    }

    async fn complete(&self, stage: Stage, messages: &[Message]) -> Result<String, InterviewError> {
        match self
            .gateway
            .complete(messages, self.config.temperature)
            .await
        {
            Ok(text) => Ok(text),
            Err(error) => {
                self.emit(&InterviewEvent::GatewayFailed {
                    stage,
                    error: &error,
                });
                Err(error.into())
            }
        }
    }

    fn advance(&self, session: &mut Session, to: Stage) {
        let from = session.stage;
        session.stage = to;
        self.emit(&InterviewEvent::StageAdvanced { from, to });
    }

    fn emit(&self, event: &InterviewEvent<'_>) {
        self.event_handler.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_match_trimmed_and_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  BYE "));
        assert!(is_exit_command("Quit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn email_stage_gates_on_format() {
        assert_eq!(
            Decision::for_answer(Stage::Email, "not-an-email"),
            Decision::Reject(INVALID_EMAIL_MESSAGE)
        );
        assert_eq!(
            Decision::for_answer(Stage::Email, "jane@example.com"),
            Decision::CaptureEmail
        );
        assert_eq!(Decision::for_answer(Stage::Email, ""), Decision::Stay);
    }

    #[test]
    fn phone_stage_gates_on_format() {
        assert_eq!(
            Decision::for_answer(Stage::Phone, "123"),
            Decision::Reject(INVALID_PHONE_MESSAGE)
        );
        assert_eq!(
            Decision::for_answer(Stage::Phone, "+14155551234"),
            Decision::CapturePhone
        );
    }

    #[test]
    fn tech_stack_stage_parses_list() {
        assert_eq!(
            Decision::for_answer(Stage::TechStack, "Python, Go, Rust"),
            Decision::CaptureTechStack(vec!["Python".into(), "Go".into(), "Rust".into()])
        );
        assert_eq!(
            Decision::for_answer(Stage::TechStack, " , "),
            Decision::CaptureTechStack(vec![String::new(), String::new()])
        );
        assert_eq!(Decision::for_answer(Stage::TechStack, ""), Decision::Stay);
    }

    #[test]
    fn ungated_stages_follow_successor_table() {
        assert_eq!(
            Decision::for_answer(Stage::Greeting, "start"),
            Decision::Advance(Stage::Name)
        );
        assert_eq!(
            Decision::for_answer(Stage::Location, "Berlin"),
            Decision::Advance(Stage::TechStack)
        );
        assert_eq!(Decision::for_answer(Stage::Questions, "ok"), Decision::Stay);
    }

    #[test]
    fn only_rejections_and_questions_discard_the_reply() {
        assert!(Decision::Reject(INVALID_EMAIL_MESSAGE).discards_reply());
        assert!(Decision::CaptureTechStack(vec!["Go".into()]).discards_reply());
        assert!(!Decision::CaptureEmail.discards_reply());
        assert!(!Decision::Advance(Stage::Name).discards_reply());
        assert!(!Decision::Stay.discards_reply());
    }
}
