//! Atomic key actions produced by the parser.
//!
//! A parsed key sequence is a flat `Vec<KeyAction>`. Each action either
//! delivers one key event through the [`KeyTransmitter`] capability or, for
//! [`KeyAction::Pause`], blocks for a fixed duration.

use std::fmt;
use std::time::Duration;

use crate::codes;
use crate::error::Result;
use crate::transmit::{KeyInput, KeyTransmitter};

/// One atomic unit of synthesized input.
///
/// `down`/`up` select the transitions an action performs: both for a full
/// keystroke, `down` only to hold a key, `up` only to release it. Non-pause
/// actions always have at least one of the two set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// A literal character, sent via Unicode injection.
    Key { ch: char, down: bool, up: bool },
    /// A named virtual key from the code registry.
    VirtualKey { code: u16, down: bool, up: bool },
    /// A character sent via the platform's scan-code lookup, needed while
    /// modifier keys are held.
    EscapedKey { ch: char, down: bool, up: bool },
    /// A timed wait. Carries no key payload.
    Pause { duration: Duration },
}

impl KeyAction {
    /// A full keystroke of a literal character.
    pub fn key(ch: char) -> Self {
        Self::Key {
            ch,
            down: true,
            up: true,
        }
    }

    /// A full keystroke of a virtual key.
    pub fn virtual_key(code: u16) -> Self {
        Self::VirtualKey {
            code,
            down: true,
            up: true,
        }
    }

    /// Press a virtual key without releasing it (modifier hold).
    pub fn virtual_key_down(code: u16) -> Self {
        Self::VirtualKey {
            code,
            down: true,
            up: false,
        }
    }

    /// Release a previously held virtual key.
    pub fn virtual_key_up(code: u16) -> Self {
        Self::VirtualKey {
            code,
            down: false,
            up: true,
        }
    }

    /// A full keystroke of an escaped character.
    pub fn escaped(ch: char) -> Self {
        Self::EscapedKey {
            ch,
            down: true,
            up: true,
        }
    }

    /// A timed wait.
    pub fn pause(duration: Duration) -> Self {
        Self::Pause { duration }
    }

    /// Promote a literal key to the escaped (scan-code) path.
    ///
    /// Virtual keys and pauses are returned unchanged.
    pub(crate) fn escape_literal(self) -> Self {
        match self {
            Self::Key { ch, down, up } => Self::EscapedKey { ch, down, up },
            other => other,
        }
    }

    /// Restrict the action to its press transition (`{CODE down}`).
    pub(crate) fn keep_only_down(&mut self) {
        match self {
            Self::Key { up, .. } | Self::VirtualKey { up, .. } | Self::EscapedKey { up, .. } => {
                *up = false;
            }
            Self::Pause { .. } => {}
        }
    }

    /// Restrict the action to its release transition (`{CODE up}`).
    pub(crate) fn keep_only_up(&mut self) {
        match self {
            Self::Key { down, .. }
            | Self::VirtualKey { down, .. }
            | Self::EscapedKey { down, .. } => {
                *down = false;
            }
            Self::Pause { .. } => {}
        }
    }

    /// Human-readable name of the key this action sends.
    ///
    /// Virtual keys go through the registry's reverse lookup; literal and
    /// escaped keys render their character, so concatenating descriptions of
    /// a literal-only sequence reconstructs the original text.
    pub fn key_description(&self) -> String {
        match self {
            Self::Key { ch, .. } | Self::EscapedKey { ch, .. } => ch.to_string(),
            Self::VirtualKey { code, .. } => codes::describe(*code),
            Self::Pause { duration } => format!("PAUSE {}", duration.as_secs_f64()),
        }
    }

    /// Execute this action against the transmit capability.
    ///
    /// Pauses block on the transmitter's clock instead of delivering a key
    /// event; everything else is delegated unchanged.
    pub fn run<T: KeyTransmitter + ?Sized>(&self, transmitter: &mut T) -> Result<()> {
        match self {
            Self::Key { ch, down, up } => transmitter.transmit(KeyInput::Unicode(*ch), *down, *up),
            Self::EscapedKey { ch, down, up } => {
                transmitter.transmit(KeyInput::Scan(*ch), *down, *up)
            }
            Self::VirtualKey { code, down, up } => {
                transmitter.transmit(KeyInput::Virtual(*code), *down, *up)
            }
            Self::Pause { duration } => {
                transmitter.sleep(*duration);
                Ok(())
            }
        }
    }

    fn direction_suffix(down: bool, up: bool) -> &'static str {
        match (down, up) {
            (true, true) => "",
            (true, false) => " down",
            (false, true) => " up",
            (false, false) => " noop",
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key { down, up, .. }
            | Self::VirtualKey { down, up, .. }
            | Self::EscapedKey { down, up, .. } => {
                write!(
                    f,
                    "<{}{}>",
                    self.key_description(),
                    Self::direction_suffix(*down, *up)
                )
            }
            Self::Pause { .. } => write!(f, "<{}>", self.key_description()),
        }
    }
}
