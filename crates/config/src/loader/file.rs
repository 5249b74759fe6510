//! JSON file overlay for configuration.
//!
//! Responsibilities:
//! - Detect the optional `config.json` file.
//! - Decode it and apply every field it sets onto a `Configuration`.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Logging of failures (the loader in builder.rs logs whatever this returns).
//!
//! Invariants:
//! - A file that cannot be stat'ed is treated as absent, not as an error.
//! - Only the first JSON value in the file is decoded; trailing bytes are ignored.
//! - Fields that are missing or `null` leave the current value untouched.
//! - Keys match field names case-insensitively; unknown keys are ignored.
//! - A key that appears more than once takes its last non-null value.
//! - A failed decode applies no fields at all.

use serde::de::{Deserializer, Error as _, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;

use super::error::ConfigError;
use crate::types::Configuration;

/// On-disk shape of `config.json`.
///
/// `session_timeout` is a signed count of nanoseconds; negative values clamp to zero.
#[derive(Debug, Default)]
struct ConfigFile {
    base_url: Option<String>,
    api_key: Option<String>,
    auto_pass: Option<bool>,
    session_timeout: Option<i64>,
    max_tokens: Option<u64>,
    model: Option<String>,
    temperature: Option<f64>,
    reply_prefix: Option<String>,
    session_clear_token: Option<String>,
    system_content: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum FileField {
    BaseUrl,
    ApiKey,
    AutoPass,
    SessionTimeout,
    MaxTokens,
    Model,
    Temperature,
    ReplyPrefix,
    SessionClearToken,
    SystemContent,
}

const FILE_FIELDS: [(&str, FileField); 10] = [
    ("base_url", FileField::BaseUrl),
    ("api_key", FileField::ApiKey),
    ("auto_pass", FileField::AutoPass),
    ("session_timeout", FileField::SessionTimeout),
    ("max_tokens", FileField::MaxTokens),
    ("model", FileField::Model),
    ("temperature", FileField::Temperature),
    ("reply_prefix", FileField::ReplyPrefix),
    ("session_clear_token", FileField::SessionClearToken),
    ("system_content", FileField::SystemContent),
];

/// Simple case folding for key comparison. Besides ASCII, the Kelvin sign
/// folds to `k` and the long s (`ſ`) to `s`.
fn fold_char(c: char) -> char {
    match c {
        '\u{212A}' => 'k',
        '\u{17F}' => 's',
        _ => c.to_ascii_lowercase(),
    }
}

fn key_matches(key: &str, name: &str) -> bool {
    key.chars().map(fold_char).eq(name.chars())
}

impl FileField {
    fn from_key(key: &str) -> Option<Self> {
        FILE_FIELDS
            .iter()
            .find(|(name, _)| key_matches(key, name))
            .map(|(_, field)| *field)
    }
}

/// Overwrite `slot` unless the incoming value is `null`.
fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

struct ConfigFileVisitor;

impl<'de> Visitor<'de> for ConfigFileVisitor {
    type Value = ConfigFile;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConfigFile, A::Error> {
        let mut file = ConfigFile::default();
        while let Some(key) = map.next_key::<String>()? {
            match FileField::from_key(&key) {
                Some(FileField::BaseUrl) => set(&mut file.base_url, map.next_value()?),
                Some(FileField::ApiKey) => set(&mut file.api_key, map.next_value()?),
                Some(FileField::AutoPass) => set(&mut file.auto_pass, map.next_value()?),
                Some(FileField::SessionTimeout) => {
                    set(&mut file.session_timeout, map.next_value()?)
                }
                Some(FileField::MaxTokens) => set(&mut file.max_tokens, map.next_value()?),
                Some(FileField::Model) => set(&mut file.model, map.next_value()?),
                Some(FileField::Temperature) => set(&mut file.temperature, map.next_value()?),
                Some(FileField::ReplyPrefix) => set(&mut file.reply_prefix, map.next_value()?),
                Some(FileField::SessionClearToken) => {
                    set(&mut file.session_clear_token, map.next_value()?)
                }
                Some(FileField::SystemContent) => {
                    set(&mut file.system_content, map.next_value()?)
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(file)
    }
}

impl<'de> Deserialize<'de> for ConfigFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConfigFileVisitor)
    }
}

impl ConfigFile {
    fn apply_to(self, config: &mut Configuration) {
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(key) = self.api_key {
            config.api_key = SecretString::new(key.into());
        }
        if let Some(auto_pass) = self.auto_pass {
            config.auto_pass = auto_pass;
        }
        if let Some(nanos) = self.session_timeout {
            config.session_timeout = Duration::from_nanos(u64::try_from(nanos).unwrap_or(0));
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(prefix) = self.reply_prefix {
            config.reply_prefix = prefix;
        }
        if let Some(token) = self.session_clear_token {
            config.session_clear_token = token;
        }
        if let Some(content) = self.system_content {
            config.system_content = content;
        }
    }
}

/// Decode the first JSON value from `reader`.
///
/// A top-level `null` decodes to `None` and overlays nothing.
fn decode_first_value<R: Read>(reader: R) -> Result<Option<ConfigFile>, serde_json::Error> {
    let mut stream =
        serde_json::Deserializer::from_reader(reader).into_iter::<Option<ConfigFile>>();
    match stream.next() {
        Some(result) => result,
        None => Err(serde_json::Error::custom("unexpected end of JSON input")),
    }
}

/// Apply `path` onto `config` if the file exists.
///
/// Returns `Ok(())` without touching `config` when the file is absent.
pub fn apply_file(config: &mut Configuration, path: &Path) -> Result<(), ConfigError> {
    if std::fs::metadata(path).is_err() {
        tracing::debug!(path = %path.display(), "No config file found, skipping file overlay");
        return Ok(());
    }

    let file = File::open(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let overlay =
        decode_first_value(BufReader::new(file)).map_err(|source| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(overlay) = overlay {
        overlay.apply_to(config);
    }

    tracing::debug!(path = %path.display(), "Applied config file overlay");
    Ok(())
}
