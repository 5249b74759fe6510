//! Integration tests for the `wechatbot-config` binary.
//!
//! Responsibilities:
//! - Verify the resolved configuration is printed as JSON on stdout.
//! - Verify loader diagnostics reach stderr without failing the process.
//! - Verify `.env` loading and the `DOTENV_DISABLED` gate.
//!
//! Invariants:
//! - All tests use the hermetic `wechatbot_cmd()` helper.

mod common;

use common::wechatbot_cmd;
use predicates::prelude::*;
use serde_json::Value;

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_defaults_printed_and_missing_key_logged() {
    let temp_dir = tempfile::tempdir().unwrap();

    let assert = wechatbot_cmd(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("config error: api key required"));

    let json = stdout_json(assert.get_output());
    assert_eq!(json["base_url"], "https://api.openai.com");
    assert_eq!(json["api_key"], "");
    assert_eq!(json["auto_pass"], false);
    assert_eq!(json["session_timeout"], 60);
    assert_eq!(json["max_tokens"], 512);
    assert_eq!(json["model"], "text-davinci-003");
    assert_eq!(json["temperature"], 0.9);
    assert_eq!(json["session_clear_token"], "下个问题");
}

#[test]
fn test_api_key_is_redacted() {
    let temp_dir = tempfile::tempdir().unwrap();

    let assert = wechatbot_cmd(temp_dir.path())
        .env("APIKEY", "sk-do-not-print")
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-do-not-print").not())
        .stderr(predicate::str::contains("api key required").not());

    assert_eq!(stdout_json(assert.get_output())["api_key"], "[REDACTED]");
}

#[test]
fn test_config_file_in_working_directory_is_used() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"model": "gpt-4", "api_key": "sk-file"}"#,
    )
    .unwrap();

    let assert = wechatbot_cmd(temp_dir.path())
        .env("MAX_TOKENS", "1024")
        .assert()
        .success();

    let json = stdout_json(assert.get_output());
    assert_eq!(json["model"], "gpt-4");
    assert_eq!(json["max_tokens"], 1024);
}

#[test]
fn test_invalid_env_value_is_logged_not_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();

    let assert = wechatbot_cmd(temp_dir.path())
        .env("APIKEY", "sk-test")
        .env("SESSION_TIMEOUT", "not-a-duration")
        .env("MODEL", "gpt-4")
        .assert()
        .success()
        .stderr(
            predicate::str::contains("config session timeout error")
                .and(predicate::str::contains("var=SESSION_TIMEOUT"))
                .and(predicate::str::contains("value=not-a-duration"))
                .and(predicate::str::contains("error=config session timeout error")),
        );

    // MODEL comes after SESSION_TIMEOUT and is dropped.
    assert_eq!(stdout_json(assert.get_output())["model"], "text-davinci-003");
}

#[test]
fn test_dotenv_values_are_loaded() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join(".env"), "MODEL=gpt-from-dotenv\n").unwrap();

    let assert = wechatbot_cmd(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .assert()
        .success();

    assert_eq!(stdout_json(assert.get_output())["model"], "gpt-from-dotenv");
}

#[test]
fn test_dotenv_disabled_ignores_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join(".env"), "MODEL=gpt-from-dotenv\n").unwrap();

    let assert = wechatbot_cmd(temp_dir.path()).assert().success();

    assert_eq!(stdout_json(assert.get_output())["model"], "text-davinci-003");
}

#[test]
fn test_invalid_dotenv_fails_without_leaking() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join(".env"),
        "APIKEY=sk-secret-in-dotenv\nINVALID_LINE_WITHOUT_EQUALS",
    )
    .unwrap();

    wechatbot_cmd(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Failed to load environment")
                .and(predicate::str::contains("sk-secret-in-dotenv").not()),
        );
}
