//! Centralized constants for the wechatbot configuration loader.
//!
//! Default values and the names of the recognized environment variables live
//! here so the loader stages and the tests agree on a single source.

use std::time::Duration;

// =============================================================================
// File Source
// =============================================================================

/// Name of the optional JSON configuration file, resolved against the current
/// working directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

// =============================================================================
// Field Defaults
// =============================================================================

/// Base URL applied during the environment stage when neither `BASE_URL` nor the
/// file provided one.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default session timeout.
///
/// The raw value `60` is kept with the integer semantics of the duration type,
/// i.e. nanoseconds.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_nanos(60);

/// Default maximum number of tokens per completion request.
pub const DEFAULT_MAX_TOKENS: u64 = 512;

/// Default completion model.
pub const DEFAULT_MODEL: &str = "text-davinci-003";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.9;

/// Default phrase ("next question") that clears the current chat session.
pub const DEFAULT_SESSION_CLEAR_TOKEN: &str = "下个问题";

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_API_KEY: &str = "APIKEY";
pub const ENV_AUTO_PASS: &str = "AUTO_PASS";
pub const ENV_SESSION_TIMEOUT: &str = "SESSION_TIMEOUT";
pub const ENV_MODEL: &str = "MODEL";
pub const ENV_MAX_TOKENS: &str = "MAX_TOKENS";
/// Misspelled on purpose: deployments already set `TEMPREATURE`.
pub const ENV_TEMPERATURE: &str = "TEMPREATURE";
pub const ENV_REPLY_PREFIX: &str = "REPLY_PREFIX";
pub const ENV_SESSION_CLEAR_TOKEN: &str = "SESSION_CLEAR_TOKEN";
pub const ENV_SYSTEM_CONTENT: &str = "SYSTEM_CONTENT";

/// Every environment variable the loader inspects, in evaluation order.
pub const RECOGNIZED_ENV_VARS: [&str; 10] = [
    ENV_BASE_URL,
    ENV_API_KEY,
    ENV_AUTO_PASS,
    ENV_SESSION_TIMEOUT,
    ENV_MODEL,
    ENV_MAX_TOKENS,
    ENV_TEMPERATURE,
    ENV_REPLY_PREFIX,
    ENV_SESSION_CLEAR_TOKEN,
    ENV_SYSTEM_CONTENT,
];

/// Setting this to `1` or `true` disables `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
