//! wechatbot-config - print the bot's resolved configuration.
//!
//! Responsibilities:
//! - Load an optional `.env` file before the configuration is first accessed.
//! - Install the logging subscriber so loader diagnostics reach stderr.
//! - Resolve the process-wide configuration and print it as JSON on stdout.
//!
//! Does NOT handle:
//! - Any layering or parsing logic (see `crates/config`).
//! - Command-line flags; everything comes from `config.json` and the environment.
//!
//! Invariants:
//! - `load_dotenv()` runs BEFORE `get_configuration()` so `.env` values are visible to it.
//! - The API key is never printed; it is replaced by a redaction marker.
//! - Configuration problems are logged, not turned into a failing exit code.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wechatbot_config::{get_configuration, load_dotenv};

fn main() -> Result<()> {
    load_dotenv().context("Failed to load environment")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with(
            fmt::layer()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .init();

    let config = get_configuration();
    let rendered =
        serde_json::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{rendered}");

    Ok(())
}
