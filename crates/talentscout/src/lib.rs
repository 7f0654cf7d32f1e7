//! Guided technical-hiring interview agent.
//!
//! `talentscout` walks a job candidate through a fixed script of questions
//! (name, contact details, experience, desired role, location, tech stack)
//! and then produces interview questions tailored to the technologies the
//! candidate declared. An OpenAI-compatible chat completions API is both the
//! conversational voice and the question generator.
//!
//! # Getting started
//!
//! ```ignore
//! use talentscout::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = InterviewConfig::default();
//!     let client = config.build_client(&ApiCredentials::from_env()?)?;
//!
//!     let interviewer = Interviewer::new(&client, config);
//!     let mut session = Session::new();
//!
//!     let greeting = interviewer.handle_turn(&mut session, "start").await?;
//!     println!("{greeting}");
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **The interview state machine:** [`Interviewer`](interview::Interviewer)
//!   drives one [`Session`](interview::Session) turn by turn.
//! - **Stages and transitions:** [`Stage`](interview::Stage).
//! - **Prompt text:** [`interview::prompt`].
//! - **Email / phone checks:** [`interview::validate`].
//! - **Plugging in another LLM backend:** implement
//!   [`CompletionGateway`](gateway::CompletionGateway).
//! - **Observing the interview:** implement
//!   [`EventHandler`](interview::EventHandler) or use
//!   [`LoggingHandler`](interview::LoggingHandler).
//! - **Hosting many candidates:** [`SessionRegistry`](interview::SessionRegistry).

pub mod config;
pub mod gateway;
pub mod interview;
pub mod prelude;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::gateway::GatewayError;

// ── Constants ──────────────────────────────────────────────────────

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model when talking to OpenRouter.
pub const DEFAULT_MODEL: &str = "openai/gpt-4";

/// Default model when talking to OpenAI directly.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body (OpenAI format). Optional fields are
/// omitted from serialization.
#[derive(Serialize, Debug, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
    pub temperature: f32,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type from [`OpenRouterClient::chat`].
#[derive(Debug)]
pub struct ChatCompletion {
    pub content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct UsageInfo {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for an OpenAI-compatible chat completions endpoint.
///
/// Defaults to OpenRouter; point it at [`OPENAI_URL`] (or any compatible
/// server) with [`with_endpoint`](Self::with_endpoint).
pub struct OpenRouterClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) model: String,
    pub(crate) max_tokens: u32,
}

impl OpenRouterClient {
    /// Create a client for OpenRouter with the default model and a 120 s timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(api_key, Duration::from_secs(120))
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("talentscout/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: OPENROUTER_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 0,
        })
    }

    /// Send requests to a different chat completions URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Model used by [`CompletionGateway`](gateway::CompletionGateway) calls.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Cap on response tokens. `0` leaves it to the provider.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a chat completion request.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, GatewayError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(GatewayError::from_transport)?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to parse response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(GatewayError::Api(err.message));
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.and_then(|c| c.into_iter().next());
        match choice {
            Some(c) => {
                debug!(
                    "LLM finish reason: {}",
                    c.finish_reason.as_deref().unwrap_or("none")
                );
                Ok(ChatCompletion {
                    content: c.message.content,
                })
            }
            None => {
                debug!("LLM output: empty (no choices)");
                Ok(ChatCompletion { content: None })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors() {
        let sys = Message::system("hello");
        assert_eq!(sys.role, MessageRole::System);
        assert_eq!(sys.content, "hello");

        let user = Message::user("world");
        assert_eq!(user.role, MessageRole::User);

        let assist = Message::assistant("hi there");
        assert_eq!(assist.role, MessageRole::Assistant);
        assert_eq!(assist.content, "hi there");
    }

    #[test]
    fn chat_request_serializes_openai_shape() {
        let req = ChatRequest {
            model: "test-model".into(),
            messages: vec![Message::system("sys"), Message::user("hi")],
            max_tokens: 0,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!(json.get("max_tokens").is_none());
        let temp = json["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 0.001);
    }

    #[test]
    fn raw_response_parses_first_choice() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Hello!"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let parsed: RawChatResponse = serde_json::from_str(body).unwrap();
        let choice = parsed.choices.unwrap().into_iter().next().unwrap();
        assert_eq!(choice.message.content.as_deref(), Some("Hello!"));
        assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
        assert_eq!(parsed.usage.unwrap().total_tokens, Some(12));
    }

    #[test]
    fn role_display_matches_wire_name() {
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
        let json = serde_json::to_value(MessageRole::User).unwrap();
        assert_eq!(json, "user");
    }
}
