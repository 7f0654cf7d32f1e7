//! Interview configuration with reference defaults.
//!
//! [`InterviewConfig`] holds the few knobs the interview has (model,
//! sampling temperature, endpoint, timeout, and whether discarded reply
//! calls are made at all) and builds the HTTP gateway from them via
//! [`build_client`](InterviewConfig::build_client).

use std::time::Duration;

use crate::{DEFAULT_MODEL, DEFAULT_OPENAI_MODEL, OPENAI_URL, OPENROUTER_URL, OpenRouterClient};

/// Environment variables checked for a credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["OPENROUTER_KEY", "OPENAI_API_KEY"];

/// Errors raised before the first turn can run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing API key: set one of {}", API_KEY_VARS.join(", "))]
    MissingApiKey,

    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Which hosted API a credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenRouter,
    OpenAi,
}

impl Provider {
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Provider::OpenRouter => OPENROUTER_URL,
            Provider::OpenAi => OPENAI_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenRouter => DEFAULT_MODEL,
            Provider::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }

    /// Guess the provider from a key's prefix (`sk-or-` is OpenRouter).
    pub fn infer_from_key(key: &str) -> Self {
        if key.trim_start().starts_with("sk-or-") {
            Provider::OpenRouter
        } else {
            Provider::OpenAi
        }
    }
}

/// A resolved API key and the provider it is for.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub key: String,
    pub provider: Provider,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key", &"<redacted>")
            .field("provider", &self.provider)
            .finish()
    }
}

impl ApiCredentials {
    pub fn new(key: impl Into<String>, provider: Provider) -> Self {
        Self {
            key: key.into(),
            provider,
        }
    }

    /// Look up the first non-blank key in [`API_KEY_VARS`] using `lookup`.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        for (var, provider) in API_KEY_VARS
            .iter()
            .zip([Provider::OpenRouter, Provider::OpenAi])
        {
            if let Some(key) = lookup(*var).map(|k| k.trim().to_string())
                && !key.is_empty()
            {
                return Ok(Self::new(key, provider));
            }
        }
        Err(ConfigError::MissingApiKey)
    }

    /// [`resolve`](Self::resolve) against the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|var| std::env::var(var).ok())
    }
}

/// Whether reply calls whose text is never shown are still made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GatewayPolicy {
    /// Every non-exit turn makes the per-turn reply call, even when the
    /// reply is then replaced by a rejection message or generated questions.
    #[default]
    Faithful,
    /// Skip the per-turn reply call when its text would be discarded. Reply
    /// text seen by the candidate is identical.
    SkipDiscarded,
}

/// Configuration for an interview session.
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    /// Model identifier. `None` uses the provider's default.
    pub model: Option<String>,
    /// Sampling temperature for both call sites. Default: `0.7`.
    pub temperature: f32,
    /// Maximum response tokens. Default: `0` (provider decides).
    pub max_tokens: u32,
    /// Chat completions URL. `None` uses the provider's default.
    pub api_url: Option<String>,
    /// Per-request timeout. Default: 60 s.
    pub request_timeout: Duration,
    /// Default: [`GatewayPolicy::Faithful`].
    pub gateway_policy: GatewayPolicy,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: 0,
            api_url: None,
            request_timeout: Duration::from_secs(60),
            gateway_policy: GatewayPolicy::Faithful,
        }
    }
}

impl InterviewConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_gateway_policy(mut self, policy: GatewayPolicy) -> Self {
        self.gateway_policy = policy;
        self
    }

    /// Reject settings no provider accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }

    /// Build the HTTP gateway for `credentials`, filling the model and
    /// endpoint from the provider when not set explicitly.
    pub fn build_client(
        &self,
        credentials: &ApiCredentials,
    ) -> Result<OpenRouterClient, ConfigError> {
        self.validate()?;
        let provider = credentials.provider;
        let endpoint = self.api_url.as_deref().unwrap_or(provider.default_endpoint());
        let model = self.model.as_deref().unwrap_or(provider.default_model());
        let client = OpenRouterClient::with_timeout(credentials.key.clone(), self.request_timeout)?
            .with_endpoint(endpoint)
            .with_model(model)
            .with_max_tokens(self.max_tokens);
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_reference_behavior() {
        let config = InterviewConfig::default();
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.gateway_policy, GatewayPolicy::Faithful);
        assert!(config.model.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn openrouter_key_wins() {
        let vars = env(&[("OPENROUTER_KEY", "or-key"), ("OPENAI_API_KEY", "oa-key")]);
        let creds = ApiCredentials::resolve(|v| vars.get(v).cloned()).unwrap();
        assert_eq!(creds, ApiCredentials::new("or-key", Provider::OpenRouter));
    }

    #[test]
    fn falls_back_to_openai_key() {
        let vars = env(&[("OPENROUTER_KEY", "   "), ("OPENAI_API_KEY", "oa-key")]);
        let creds = ApiCredentials::resolve(|v| vars.get(v).cloned()).unwrap();
        assert_eq!(creds.provider, Provider::OpenAi);
        assert_eq!(creds.key, "oa-key");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = ApiCredentials::resolve(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("OPENROUTER_KEY"));
    }

    #[test]
    fn provider_inferred_from_key_prefix() {
        assert_eq!(Provider::infer_from_key("sk-or-v1-abc"), Provider::OpenRouter);
        assert_eq!(Provider::infer_from_key("sk-proj-abc"), Provider::OpenAi);
    }

    #[test]
    fn debug_redacts_key() {
        let creds = ApiCredentials::new("secret-value", Provider::OpenAi);
        assert!(!format!("{creds:?}").contains("secret-value"));
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let config = InterviewConfig::default().with_temperature(3.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTemperature(t)) if (t - 3.5).abs() < f32::EPSILON
        ));
    }

    #[test]
    fn client_uses_provider_defaults() {
        let config = InterviewConfig::default();
        let client = config
            .build_client(&ApiCredentials::new("k", Provider::OpenAi))
            .unwrap();
        assert_eq!(client.endpoint(), OPENAI_URL);
        assert_eq!(client.model(), DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn explicit_settings_override_provider() {
        let config = InterviewConfig::default()
            .with_model("anthropic/claude-sonnet-4")
            .with_api_url("http://localhost:8080/v1/chat/completions");
        let client = config
            .build_client(&ApiCredentials::new("k", Provider::OpenRouter))
            .unwrap();
        assert_eq!(client.model(), "anthropic/claude-sonnet-4");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
