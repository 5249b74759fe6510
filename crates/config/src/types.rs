//! Configuration types for the wechatbot.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SESSION_CLEAR_TOKEN, DEFAULT_SESSION_TIMEOUT,
    DEFAULT_TEMPERATURE,
};
use crate::loader::ConfigError;

/// Placeholder written in place of a non-empty secret when serializing.
pub const REDACTED: &str = "[REDACTED]";

/// Module for serializing SecretString without revealing it.
mod secret_redacted {
    use secrecy::{ExposeSecret, SecretString};
    use serde::Serializer;

    use super::REDACTED;

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if secret.expose_secret().is_empty() {
            serializer.serialize_str("")
        } else {
            serializer.serialize_str(REDACTED)
        }
    }
}

/// Module for serializing Duration as nanoseconds (integer).
///
/// Mirrors the file encoding of `session_timeout`.
mod duration_nanos {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_nanos())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }
}

/// Process-wide bot configuration.
///
/// Built once by the loader (defaults, then `config.json`, then environment
/// variables) and shared read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    /// Base URL of the completion API.
    pub base_url: String,
    /// API key sent with completion requests.
    #[serde(serialize_with = "secret_redacted::serialize")]
    pub api_key: SecretString,
    /// Automatically accept incoming friend requests.
    pub auto_pass: bool,
    /// Idle time after which a chat session is discarded.
    #[serde(serialize_with = "duration_nanos::serialize")]
    pub session_timeout: Duration,
    /// Maximum number of tokens requested per completion.
    pub max_tokens: u64,
    /// Completion model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Text prepended to every reply.
    pub reply_prefix: String,
    /// Message that clears the current chat session.
    pub session_clear_token: String,
    /// System prompt sent ahead of the conversation.
    pub system_content: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: SecretString::new("".into()),
            auto_pass: false,
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            reply_prefix: String::new(),
            session_clear_token: DEFAULT_SESSION_CLEAR_TOKEN.to_string(),
            system_content: String::new(),
        }
    }
}

impl Configuration {
    /// Returns true if a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    /// Checks the one required field.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingApiKey` if the API key is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.has_api_key() {
            Ok(())
        } else {
            Err(ConfigError::MissingApiKey)
        }
    }
}
