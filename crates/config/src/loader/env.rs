//! Environment variable overlay for configuration.
//!
//! Responsibilities:
//! - Read the recognized environment variables.
//! - Parse typed values (duration, integer, float, boolean literal) and apply them.
//!
//! Does NOT handle:
//! - Loading from the JSON file (see file.rs).
//! - Logging of failures (the loader in builder.rs logs whatever this returns).
//!
//! Invariants:
//! - Variables are applied in the fixed order of `ENV_OVERLAYS`.
//! - Unset and empty variables are skipped. Values are NOT trimmed.
//! - `AUTO_PASS` only ever switches the flag on, and only for the exact literal `"true"`.
//! - The first parse failure aborts the remaining overlays (see `apply_env`).

use secrecy::SecretString;

use super::duration::parse_go_duration;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_BASE_URL, ENV_API_KEY, ENV_AUTO_PASS, ENV_BASE_URL, ENV_MAX_TOKENS, ENV_MODEL,
    ENV_REPLY_PREFIX, ENV_SESSION_CLEAR_TOKEN, ENV_SESSION_TIMEOUT, ENV_SYSTEM_CONTENT,
    ENV_TEMPERATURE,
};
use crate::types::Configuration;

/// Read an environment variable, returning None if unset, empty, or not valid UTF-8.
///
/// Unlike most env readers, whitespace is significant: `" "` is a value.
pub fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

type ApplyFn = fn(&mut Configuration, Option<&str>) -> Result<(), ConfigError>;

/// One entry of the ordered environment overlay.
struct EnvOverlay {
    var: &'static str,
    apply: ApplyFn,
}

/// Evaluation order matters: a parse failure stops every entry after it.
static ENV_OVERLAYS: [EnvOverlay; 10] = [
    EnvOverlay {
        var: ENV_BASE_URL,
        apply: apply_base_url,
    },
    EnvOverlay {
        var: ENV_API_KEY,
        apply: apply_api_key,
    },
    EnvOverlay {
        var: ENV_AUTO_PASS,
        apply: apply_auto_pass,
    },
    EnvOverlay {
        var: ENV_SESSION_TIMEOUT,
        apply: apply_session_timeout,
    },
    EnvOverlay {
        var: ENV_MODEL,
        apply: apply_model,
    },
    EnvOverlay {
        var: ENV_MAX_TOKENS,
        apply: apply_max_tokens,
    },
    EnvOverlay {
        var: ENV_TEMPERATURE,
        apply: apply_temperature,
    },
    EnvOverlay {
        var: ENV_REPLY_PREFIX,
        apply: apply_reply_prefix,
    },
    EnvOverlay {
        var: ENV_SESSION_CLEAR_TOKEN,
        apply: apply_session_clear_token,
    },
    EnvOverlay {
        var: ENV_SYSTEM_CONTENT,
        apply: apply_system_content,
    },
];

/// Apply environment variable configuration on top of `config`.
///
/// Environment variables take precedence over file and default values.
///
/// NOTE: a malformed typed value returns immediately, so every variable after
/// it in `ENV_OVERLAYS` is ignored even when valid. This partial overlay is
/// preserved as-is but is likely a latent defect.
pub fn apply_env(config: &mut Configuration) -> Result<(), ConfigError> {
    for overlay in &ENV_OVERLAYS {
        let value = env_var_non_empty(overlay.var);
        (overlay.apply)(config, value.as_deref())?;
    }
    Ok(())
}

fn invalid_value(
    var: &'static str,
    field: &'static str,
    value: &str,
    err: impl std::fmt::Display,
) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        field,
        value: value.to_string(),
        message: err.to_string(),
    }
}

fn apply_base_url(config: &mut Configuration, value: Option<&str>) -> Result<(), ConfigError> {
    match value {
        Some(url) => config.base_url = url.to_string(),
        // A file-supplied empty string counts as unset.
        None if config.base_url.is_empty() => config.base_url = DEFAULT_BASE_URL.to_string(),
        None => {}
    }
    Ok(())
}

fn apply_api_key(config: &mut Configuration, value: Option<&str>) -> Result<(), ConfigError> {
    if let Some(key) = value {
        config.api_key = SecretString::new(key.into());
    }
    Ok(())
}

fn apply_auto_pass(config: &mut Configuration, value: Option<&str>) -> Result<(), ConfigError> {
    if value == Some("true") {
        config.auto_pass = true;
    }
    Ok(())
}

fn apply_session_timeout(
    config: &mut Configuration,
    value: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(raw) = value {
        config.session_timeout = parse_go_duration(raw)
            .map_err(|e| invalid_value(ENV_SESSION_TIMEOUT, "session timeout", raw, e))?;
    }
    Ok(())
}

fn apply_model(config: &mut Configuration, value: Option<&str>) -> Result<(), ConfigError> {
    if let Some(model) = value {
        config.model = model.to_string();
    }
    Ok(())
}

/// Parsed as a signed 64-bit integer, then reinterpreted as unsigned:
/// `"-1"` becomes `u64::MAX`, while anything beyond `i64` range is an error.
fn apply_max_tokens(config: &mut Configuration, value: Option<&str>) -> Result<(), ConfigError> {
    if let Some(raw) = value {
        let parsed = raw
            .parse::<i64>()
            .map_err(|e| invalid_value(ENV_MAX_TOKENS, "max tokens", raw, e))?;
        config.max_tokens = parsed as u64;
    }
    Ok(())
}

/// True for the spelled-out infinities `f64::from_str` accepts (`inf`, `-Infinity`, ...).
fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn apply_temperature(config: &mut Configuration, value: Option<&str>) -> Result<(), ConfigError> {
    if let Some(raw) = value {
        let parsed = raw
            .parse::<f64>()
            .map_err(|e| invalid_value(ENV_TEMPERATURE, "temperature", raw, e))?;
        // A finite literal too large for f64 rounds to infinity; treat it as out of range.
        if parsed.is_infinite() && !is_infinity_literal(raw) {
            return Err(invalid_value(
                ENV_TEMPERATURE,
                "temperature",
                raw,
                "value out of range",
            ));
        }
        config.temperature = parsed;
    }
    Ok(())
}

fn apply_reply_prefix(config: &mut Configuration, value: Option<&str>) -> Result<(), ConfigError> {
    if let Some(prefix) = value {
        config.reply_prefix = prefix.to_string();
    }
    Ok(())
}

fn apply_session_clear_token(
    config: &mut Configuration,
    value: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(token) = value {
        config.session_clear_token = token.to_string();
    }
    Ok(())
}

fn apply_system_content(
    config: &mut Configuration,
    value: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(content) = value {
        config.system_content = content.to_string();
    }
    Ok(())
}
