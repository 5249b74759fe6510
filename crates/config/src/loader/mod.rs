//! Configuration loader for files and environment variables.
//!
//! Responsibilities:
//! - Build a `Configuration` from defaults, `config.json` and environment variables.
//! - Cache one configuration for the whole process behind a once-guard.
//! - Optionally pre-load a `.env` file into the environment.
//!
//! Does NOT handle:
//! - Persisting configuration back to disk.
//! - Reloading configuration after the first load.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values, which take precedence over defaults.
//! - All failures are logged through `tracing`; nothing is propagated to `get_configuration` callers.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod duration;
mod env;
mod error;
mod file;
mod global;

pub use builder::{ConfigLoader, LoadOutcome, load_dotenv};
pub use duration::{DurationParseError, parse_go_duration};
pub use env::env_var_non_empty;
pub use error::ConfigError;
pub use global::get_configuration;

#[cfg(test)]
mod tests;
