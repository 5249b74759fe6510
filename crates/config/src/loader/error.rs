//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every recoverable loader failure.
//! - Carry enough context (paths, variable names, offending values) for the log line.
//!
//! Does NOT handle:
//! - Deciding whether an error is fatal. The loader logs and swallows every variant.
//!
//! Invariants:
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - `InvalidValue` never carries the API key; only typed fields can fail to parse.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("open config error: {source} (path: {path})")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode config error: {source} (path: {path})")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config {field} error: {message}, get is {value}")]
    InvalidValue {
        var: &'static str,
        field: &'static str,
        value: String,
        message: String,
    },

    #[error("config error: api key required")]
    MissingApiKey,

    /// `.env` syntax error. Only the offset is kept; the line may hold `APIKEY`.
    #[error("dotenv error: invalid syntax at byte {error_index} (DOTENV_DISABLED=1 skips .env)")]
    DotenvParse { error_index: usize },

    /// `.env` exists but could not be read.
    #[error("dotenv error: cannot read .env: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Any other dotenvy failure.
    #[error("dotenv error: cannot load .env (DOTENV_DISABLED=1 skips .env)")]
    DotenvUnknown,
}

impl ConfigError {
    /// Name of the environment variable that produced this error, if any.
    pub fn env_var(&self) -> Option<&'static str> {
        match self {
            ConfigError::InvalidValue { var, .. } => Some(*var),
            _ => None,
        }
    }
}
