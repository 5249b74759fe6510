//! Process-wide configuration accessor.
//!
//! Invariants:
//! - The loader pipeline runs at most once per process, regardless of how many
//!   threads race on the first call. Late arrivals block until it finishes.
//! - A failed load is never retried; its partial result is what every caller sees.
//! - The missing-API-key diagnostic is emitted on every call, not just the first.

use std::sync::OnceLock;

use super::builder::ConfigLoader;
use crate::types::Configuration;

static CONFIGURATION: OnceLock<Configuration> = OnceLock::new();

/// Return the process-wide configuration, loading it on first use.
///
/// The first call reads `config.json` from the current working directory and
/// the recognized environment variables. Every call returns the same instance.
/// Load failures and a missing API key are logged, never returned.
pub fn get_configuration() -> &'static Configuration {
    let configuration =
        CONFIGURATION.get_or_init(|| ConfigLoader::new().load().into_configuration());

    if let Err(e) = configuration.validate() {
        tracing::error!(error = %e, "{}", e);
    }

    configuration
}
