//! Integration tests for configuration loading through the public API.
//!
//! These tests exercise `ConfigLoader` the way the binary and other crates
//! use it, with a real file on disk and a controlled environment.

use secrecy::ExposeSecret;
use serial_test::serial;
use std::io::Write;
use std::time::Duration;
use wechatbot_config::constants::RECOGNIZED_ENV_VARS;
use wechatbot_config::{ConfigError, ConfigLoader, Configuration, env_var_non_empty};

/// Run `f` with all recognized variables unset, then `vars` applied.
fn with_clean_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let mut all: Vec<(&str, Option<&str>)> =
        RECOGNIZED_ENV_VARS.iter().map(|name| (*name, None)).collect();
    for (name, value) in vars {
        all.retain(|(existing, _)| existing != name);
        all.push((*name, Some(*value)));
    }
    temp_env::with_vars(all, f);
}

/// Test the full precedence chain: env vars > config file > defaults
#[test]
#[serial]
fn test_precedence_chain() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.json");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(
        file,
        "{}",
        serde_json::json!({
            "model": "gpt-4",
            "max_tokens": 2048,
            "reply_prefix": "[file] ",
        })
    )
    .unwrap();

    with_clean_env(&[("REPLY_PREFIX", "[env] "), ("APIKEY", "sk-env")], || {
        let config = ConfigLoader::new()
            .with_config_path(config_path.clone())
            .load()
            .into_configuration();

        // env
        assert_eq!(config.reply_prefix, "[env] ");
        assert_eq!(config.api_key.expose_secret(), "sk-env");
        // file
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.max_tokens, 2048);
        // defaults
        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.session_clear_token, "下个问题");
        assert_eq!(config.base_url, "https://api.openai.com");
    });
}

/// Test that an error never escapes the loader.
#[test]
#[serial]
fn test_load_reports_error_instead_of_failing() {
    let temp_dir = tempfile::tempdir().unwrap();

    with_clean_env(&[("SESSION_TIMEOUT", "soon"), ("MODEL", "gpt-4")], || {
        let outcome = ConfigLoader::new()
            .with_config_path(temp_dir.path().join("config.json"))
            .load();

        assert!(!outcome.is_complete());
        let err = outcome.error().unwrap();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(err.env_var(), Some("SESSION_TIMEOUT"));
        assert_eq!(
            err.to_string(),
            "config session timeout error: invalid duration \"soon\", get is soon"
        );
        assert_eq!(outcome.configuration().model, "text-davinci-003");
    });
}

/// Test that `env_var_non_empty` is exported and treats empty as unset.
#[test]
#[serial]
fn test_env_var_non_empty_exported() {
    temp_env::with_var("MODEL", Some(""), || {
        assert!(env_var_non_empty("MODEL").is_none());
    });
}

#[test]
fn test_session_timeout_default_is_sixty_nanoseconds() {
    assert_eq!(
        Configuration::default().session_timeout,
        Duration::from_nanos(60)
    );
}
