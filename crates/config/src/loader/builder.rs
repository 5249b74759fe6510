//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that runs the layered load once.
//! - Log every recoverable failure and report the one that ended the load early.
//! - Load `.env` files on request, gated by `DOTENV_DISABLED`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - File decoding (delegated to file.rs).
//! - Process-wide caching (see global.rs).
//!
//! Invariants / Assumptions:
//! - Precedence is defaults < config file < environment variables.
//! - Any failure stops the pipeline; later stages never run for that load.
//! - `load()` never fails: the partially built configuration is always returned.

use std::path::{Path, PathBuf};

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{CONFIG_FILE_NAME, ENV_DOTENV_DISABLED};
use crate::types::Configuration;

/// Result of one run of the loader pipeline.
#[derive(Debug)]
pub struct LoadOutcome {
    configuration: Configuration,
    error: Option<ConfigError>,
}

impl LoadOutcome {
    /// The configuration as far as the pipeline got.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The error that stopped the pipeline early, if any.
    pub fn error(&self) -> Option<&ConfigError> {
        self.error.as_ref()
    }

    /// True if every stage ran to completion.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }
}

/// Configuration loader that layers defaults, `config.json` and environment variables.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader that reads `config.json` from the current working directory.
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from(CONFIG_FILE_NAME),
        }
    }

    /// Override the config file path (primarily for testing).
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = path;
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Run the pipeline: defaults, then the config file, then environment variables.
    ///
    /// Failures are logged at error level and returned in the outcome; the
    /// configuration built up to that point is kept.
    pub fn load(&self) -> LoadOutcome {
        let mut configuration = Configuration::default();
        let error = self.apply_layers(&mut configuration).err();

        if let Some(ref e) = error {
            log_load_error(e);
        }

        LoadOutcome {
            configuration,
            error,
        }
    }

    fn apply_layers(&self, configuration: &mut Configuration) -> Result<(), ConfigError> {
        apply_file(configuration, &self.config_path)?;
        apply_env(configuration)?;
        tracing::debug!("Configuration loaded");
        Ok(())
    }
}

fn log_load_error(error: &ConfigError) {
    match error {
        ConfigError::ConfigFileRead { path, .. } | ConfigError::ConfigFileParse { path, .. } => {
            tracing::error!(path = %path.display(), error = %error, "{}", error);
        }
        ConfigError::InvalidValue { var, value, .. } => {
            tracing::error!(var = %var, value = %value, error = %error, "{}", error);
        }
        _ => tracing::error!(error = %error, "{}", error),
    }
}

/// `DOTENV_DISABLED` accepts only `"true"` or `"1"`; anything else leaves `.env` loading on.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// A missing `.env` is the common case for deployments that set real env vars.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Populate the bot's variables (`APIKEY`, `MODEL`, ...) from a `.env` file in the
/// working directory.
///
/// The process-wide configuration is built once, so this has to run before the
/// first [`get_configuration`](crate::get_configuration) call or the values are
/// never seen. Variables already present in the environment win over the file.
/// `DOTENV_DISABLED=1` (or `true`) skips the file entirely.
///
/// # Errors
///
/// A `.env` with bad syntax yields `ConfigError::DotenvParse`; one that exists but
/// cannot be read yields `ConfigError::DotenvIo`. A missing file is not an error.
/// None of these carry line contents, since the file usually holds the API key.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}
