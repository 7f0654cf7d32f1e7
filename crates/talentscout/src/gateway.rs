//! The LLM completion capability the interview depends on.
//!
//! [`CompletionGateway`] is the single seam between the interview state
//! machine and a language model: send an ordered list of messages at a
//! sampling temperature, get text back. [`OpenRouterClient`] implements it
//! over HTTP; tests implement it with scripted replies.

use std::future::Future;
use std::pin::Pin;

use crate::{ChatRequest, Message, OpenRouterClient};

/// Boxed future returned by [`CompletionGateway::complete`].
pub type GatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>>;

/// Errors from a completion call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("API HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("empty response from model")]
    EmptyResponse,
}

impl GatewayError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Request(err.to_string())
        }
    }

    /// Whether resending the same turn may succeed (429, 5xx, timeouts,
    /// connection failures). Auth and bad-request errors are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout | GatewayError::Request(_) => true,
            GatewayError::Http { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Api(_)
            | GatewayError::InvalidResponse(_)
            | GatewayError::EmptyResponse => false,
        }
    }
}

/// A text-completion service.
///
/// Uses a boxed future so that the trait is dyn-compatible (object-safe).
pub trait CompletionGateway: Send + Sync {
    /// Complete the conversation in `messages` and return the reply text.
    fn complete<'a>(&'a self, messages: &'a [Message], temperature: f32) -> GatewayFuture<'a>;
}

impl CompletionGateway for OpenRouterClient {
    fn complete<'a>(&'a self, messages: &'a [Message], temperature: f32) -> GatewayFuture<'a> {
        Box::pin(async move {
            let body = ChatRequest {
                model: self.model.clone(),
                messages: messages.to_vec(),
                max_tokens: self.max_tokens,
                temperature,
            };
            let completion = self.chat(&body).await?;
            completion
                .content
                .filter(|c| !c.trim().is_empty())
                .ok_or(GatewayError::EmptyResponse)
        })
    }
}
