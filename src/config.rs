//! JSON configuration for automation runs.
//!
//! A config file describes one sequence and how to replay it:
//!
//! ```json
//! {
//!   "sequence": "^a{DEL}status report{ENTER}",
//!   "pause": "50ms",
//!   "repeat_count": 3,
//!   "interval": "2s"
//! }
//! ```
//!
//! Durations are humane strings: `"500ms"`, `"2s"`, `"1m"`, or a bare
//! number of milliseconds.

use std::fs;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SendKeysError};
use crate::key_sender::{SendOptions, DEFAULT_PAUSE};
use crate::parser::{parse_keys, ParseOptions};

/// Configuration for a sequence replay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The key sequence to compile and send.
    pub sequence: String,

    /// Pause between consecutive actions.
    #[serde(
        default = "default_pause",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub pause: Duration,

    /// Emit space characters instead of dropping them.
    #[serde(default)]
    pub with_spaces: bool,

    /// Emit tab characters instead of dropping them.
    #[serde(default)]
    pub with_tabs: bool,

    /// Emit newline characters (as Enter) instead of dropping them.
    #[serde(default)]
    pub with_newlines: bool,

    /// How many times to send the sequence. `0` repeats until interrupted.
    #[serde(default = "default_repeat_count")]
    pub repeat_count: u32,

    /// Wait between repeats.
    #[serde(
        default,
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub interval: Duration,

    /// Enable verbose output.
    #[serde(default)]
    pub verbose: bool,
}

fn default_pause() -> Duration {
    DEFAULT_PAUSE
}

fn default_repeat_count() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sequence: String::new(),
            pause: default_pause(),
            with_spaces: false,
            with_tabs: false,
            with_newlines: false,
            repeat_count: default_repeat_count(),
            interval: Duration::ZERO,
            verbose: false,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SendKeysError::ConfigLoad`] if the file cannot be read or
    /// parsed. The loaded config is not validated; call [`Config::validate`].
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SendKeysError::config_load(path, e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SendKeysError::config_load(path, e.to_string()))
    }

    /// Save the configuration to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| SendKeysError::config_save(path, e.to_string()))
    }

    /// Validate the configuration.
    ///
    /// The sequence must be non-empty and must compile, so a bad config
    /// fails here rather than at send time.
    pub fn validate(&self) -> Result<()> {
        if self.sequence.is_empty() {
            return Err(SendKeysError::config_validation("sequence cannot be empty"));
        }
        parse_keys(&self.sequence, &self.parse_options())
            .map_err(|e| SendKeysError::config_validation(format!("invalid sequence: {e}")))?;
        Ok(())
    }

    /// The whitespace flags as parser options.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            with_spaces: self.with_spaces,
            with_tabs: self.with_tabs,
            with_newlines: self.with_newlines,
        }
    }

    /// The executor options described by this config.
    pub fn send_options(&self) -> SendOptions {
        SendOptions {
            pause: self.pause,
            with_spaces: self.with_spaces,
            with_tabs: self.with_tabs,
            with_newlines: self.with_newlines,
        }
    }
}

/// Parse a duration string: `"500ms"`, `"2s"`, `"1m"`, or bare milliseconds.
///
/// Units are case-insensitive and surrounding whitespace is ignored.
/// Negative durations are rejected.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let lower = value.trim().to_lowercase();
    if lower.is_empty() {
        return Err(SendKeysError::invalid_duration(value, "empty duration"));
    }

    let (number, multiplier_ms) = if let Some(number) = lower.strip_suffix("ms") {
        (number, 1.0)
    } else if let Some(number) = lower.strip_suffix('s') {
        (number, 1000.0)
    } else if let Some(number) = lower.strip_suffix('m') {
        (number, 60_000.0)
    } else {
        (lower.as_str(), 1.0)
    };

    let amount: f64 = number
        .trim()
        .parse()
        .map_err(|_| SendKeysError::invalid_duration(value, "not a number"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(SendKeysError::invalid_duration(
            value,
            "must be non-negative",
        ));
    }

    Ok(Duration::from_secs_f64(amount * multiplier_ms / 1000.0))
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_duration(&value).map_err(serde::de::Error::custom)
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{}ms", duration.as_millis()))
}
