//! Shared test utilities for wechatbot-config integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory that prevents dotenv loading.
//! - Clear every recognized configuration variable inherited from the host.
//!
//! Invariants / Assumptions:
//! - Each command runs inside a caller-provided working directory, so only
//!   files the test writes there (`config.json`, `.env`) are visible.

use assert_cmd::Command;
use std::path::Path;

const RECOGNIZED_ENV_VARS: [&str; 10] = [
    "BASE_URL",
    "APIKEY",
    "AUTO_PASS",
    "SESSION_TIMEOUT",
    "MODEL",
    "MAX_TOKENS",
    "TEMPREATURE",
    "REPLY_PREFIX",
    "SESSION_CLEAR_TOKEN",
    "SYSTEM_CONTENT",
];

/// Returns a hermetic `wechatbot-config` command running in `dir`.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent `.env` contamination.
/// - All recognized variables and `RUST_LOG` are cleared.
pub fn wechatbot_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("wechatbot-config");
    cmd.current_dir(dir);

    // Hermeticity: prevent loading .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    for name in RECOGNIZED_ENV_VARS {
        cmd.env_remove(name);
    }
    cmd.env_remove("RUST_LOG");

    cmd
}
