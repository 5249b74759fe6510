//! Configuration management for the wechatbot.
//!
//! This crate loads the bot's single, process-wide configuration from built-in
//! defaults, an optional `config.json`, and environment variables.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, DurationParseError, LoadOutcome, env_var_non_empty,
    get_configuration, load_dotenv, parse_go_duration,
};
pub use types::Configuration;
