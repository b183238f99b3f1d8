//! Custom error types for sendkeys.
//!
//! This module provides structured error types using `thiserror` for better
//! error handling and more informative error messages.

use std::io;
use thiserror::Error;

/// Main error type for sendkeys operations.
#[derive(Error, Debug)]
pub enum SendKeysError {
    /// A key sequence contains unbalanced delimiters or is otherwise
    /// malformed. Raised during parsing, before anything is transmitted.
    #[error("key sequence error: {0}")]
    SequenceSyntax(String),

    /// The repetition count inside a brace code is not an unsigned integer.
    #[error("invalid repetition count '{count}' in '{{{code}}}'")]
    InvalidRepeatCount { code: String, count: String },

    /// The duration inside a `{PAUSE x}` code is not a valid number of
    /// seconds.
    #[error("invalid pause duration '{value}': {reason}")]
    InvalidPauseDuration { value: String, reason: String },

    /// A brace code names a key that is not in the code registry.
    #[error("unknown key code '{0}'")]
    UnknownCode(String),

    /// The transmit capability failed while sending an action.
    #[error("failed to send key '{key}': {reason}")]
    KeySendFailed { key: String, reason: String },

    /// Configuration validation error.
    #[error("configuration error: {0}")]
    ConfigValidation(String),

    /// Error reading or parsing configuration file.
    #[error("failed to load config from '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    /// Error writing configuration file.
    #[error("failed to save config to '{path}': {reason}")]
    ConfigSave { path: String, reason: String },

    /// Error parsing duration string.
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sendkeys operations.
pub type Result<T> = std::result::Result<T, SendKeysError>;

impl SendKeysError {
    /// Create a new SequenceSyntax error.
    pub fn sequence_syntax(message: impl Into<String>) -> Self {
        Self::SequenceSyntax(message.into())
    }

    /// Create a new InvalidRepeatCount error.
    pub fn invalid_repeat_count(code: impl Into<String>, count: impl Into<String>) -> Self {
        Self::InvalidRepeatCount {
            code: code.into(),
            count: count.into(),
        }
    }

    /// Create a new InvalidPauseDuration error.
    pub fn invalid_pause_duration(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPauseDuration {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new UnknownCode error.
    pub fn unknown_code(code: impl Into<String>) -> Self {
        Self::UnknownCode(code.into())
    }

    /// Create a new KeySendFailed error.
    pub fn key_send_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::KeySendFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new ConfigValidation error.
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation(message.into())
    }

    /// Create a new ConfigLoad error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new ConfigSave error.
    pub fn config_save(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigSave {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new InvalidDuration error.
    pub fn invalid_duration(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SendKeysError::sequence_syntax("`(` without `)`");
        assert_eq!(err.to_string(), "key sequence error: `(` without `)`");

        let err = SendKeysError::invalid_repeat_count("ENTER five", "five");
        assert_eq!(
            err.to_string(),
            "invalid repetition count 'five' in '{ENTER five}'"
        );

        let err = SendKeysError::unknown_code("FOOBAR");
        assert_eq!(err.to_string(), "unknown key code 'FOOBAR'");

        let err = SendKeysError::key_send_failed("ENTER", "device unavailable");
        assert_eq!(
            err.to_string(),
            "failed to send key 'ENTER': device unavailable"
        );

        let err = SendKeysError::config_validation("sequence cannot be empty");
        assert_eq!(
            err.to_string(),
            "configuration error: sequence cannot be empty"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: SendKeysError = io_err.into();
        assert!(matches!(err, SendKeysError::Io(_)));
    }
}
