//! Convenience re-exports for common `talentscout` types.
//!
//! ```ignore
//! use talentscout::prelude::*;
//! ```
//!
//! Pulls in the client, message constructors, configuration, the gateway
//! trait, and the interview state machine with its event handlers.

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{Message, MessageRole, OpenRouterClient};

// ── Configuration ───────────────────────────────────────────────────
pub use crate::config::{ApiCredentials, ConfigError, GatewayPolicy, InterviewConfig, Provider};

// ── Gateway ─────────────────────────────────────────────────────────
pub use crate::gateway::{CompletionGateway, GatewayError, GatewayFuture};

// ── Interview ───────────────────────────────────────────────────────
pub use crate::interview::{
    CandidateRecord, EventHandler, FnEventHandler, InterviewError, InterviewEvent, Interviewer,
    LoggingHandler, NoopHandler, Session, SessionId, SessionRegistry, Stage,
};
