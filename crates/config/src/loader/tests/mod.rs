//! Tests for the configuration loader pipeline.
//!
//! Responsibilities:
//! - Test defaults and the default base URL resolution.
//! - Test config file overlay and its failure modes.
//! - Test environment variable precedence and the truncate-on-error overlay.
//! - Test `.env` loading and the `DOTENV_DISABLED` gate.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Every test starts from an environment with all recognized variables unset.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::constants::RECOGNIZED_ENV_VARS;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Run `f` with every recognized variable unset except the ones in `vars`.
pub fn with_env<F: FnOnce()>(vars: &[(&'static str, &'static str)], f: F) {
    let mut all: Vec<(&str, Option<&str>)> =
        RECOGNIZED_ENV_VARS.iter().map(|name| (*name, None)).collect();

    for (name, value) in vars {
        match all.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = Some(*value),
            None => all.push((*name, Some(*value))),
        }
    }

    temp_env::with_vars(all, f);
}

/// Write `contents` to `config.json` inside `dir`.
pub fn write_config_file(dir: &Path, contents: &str) -> PathBuf {
    let config_path = dir.join("config.json");
    std::fs::write(&config_path, contents).unwrap();
    config_path
}
