//! # sendkeys
//!
//! A key-sequence compiler and sender for GUI test automation.
//!
//! Sequences are written in the classic SendKeys notation and compiled into
//! an ordered list of atomic key actions (press, release, pause) with
//! correct modifier scoping, escaping, repetition, and named-code
//! resolution. The compiled actions are replayed through a pluggable
//! [`KeyTransmitter`] capability, so the same engine drives any platform
//! backend (`SendInput`, `XTest`, `CGEventPost`, ...) or a test double.
//!
//! ## Features
//!
//! - `+` / `^` / `%` modifier prefixes with unit-scoped hold/release
//! - `(...)` groups to apply modifiers to several keys
//! - `{ENTER}`, `{F1}`, `{VK_*}` named codes; `{TAB 4}` repetition;
//!   `{PAUSE 1.5}` timed waits; `{X down}` / `{X up}` press/release control
//! - Self-escaping braces for literal metacharacters (`{{}`, `{^}`, ...)
//! - Pure parsing: malformed sequences fail before anything is sent
//! - JSON configuration file support
//!
//! ## Example
//!
//! ```
//! use sendkeys::{KeySender, RecordingTransmitter, SendOptions};
//!
//! let mut sender = KeySender::new(RecordingTransmitter::new());
//! sender
//!     .send_keys("^a{DEL}hello~", &SendOptions::default())
//!     .unwrap();
//!
//! // ctrl down, 'a', ctrl up, DEL, h-e-l-l-o, Enter
//! assert_eq!(sender.transmitter().events().len(), 10);
//! ```
//!
//! ## Configuration
//!
//! Replay runs can be described in JSON:
//!
//! ```json
//! {
//!   "sequence": "^a{DEL}status report{ENTER}",
//!   "pause": "50ms",
//!   "repeat_count": 3,
//!   "interval": "2s"
//! }
//! ```

pub mod action;
pub mod codes;
pub mod config;
pub mod error;
pub mod key_sender;
pub mod parser;
pub mod transmit;

pub use action::KeyAction;
pub use config::Config;
pub use error::{Result, SendKeysError};
pub use key_sender::{KeySender, SendOptions, DEFAULT_PAUSE};
pub use parser::{parse_keys, ParseOptions};
pub use transmit::{KeyInput, KeyTransmitter, RecordingTransmitter, TransmitEvent};
