//! The key-transmission capability interface.
//!
//! Actual key injection (`SendInput`, `XTest`, `CGEventPost`, ...) lives
//! outside this crate. The compiler and executor only require the
//! [`KeyTransmitter`] capability; platform backends implement it, and tests
//! use [`RecordingTransmitter`] as a combined mock capability and fake clock.

use std::fmt;
use std::time::Duration;

use crate::error::Result;

/// Wire-level payload handed to a transmitter for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A literal character, injected as Unicode.
    Unicode(char),
    /// A character resolved through the platform's scan-code lookup.
    ///
    /// Required while modifiers are held, since Unicode injection ignores
    /// modifier state on some platforms.
    Scan(char),
    /// A virtual-key code.
    Virtual(u16),
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyInput::Unicode(ch) => write!(f, "'{ch}'"),
            KeyInput::Scan(ch) => write!(f, "'{ch}' (scan)"),
            KeyInput::Virtual(code) => write!(f, "{}", crate::codes::describe(*code)),
        }
    }
}

/// External capability that delivers key events to the host system.
///
/// `transmit` receives one call per action with the press/release flags of
/// that action; a backend expands `down && up` into the two OS-level
/// transitions. `sleep` is the clock used for inter-action pacing and
/// `{PAUSE x}` waits; the default implementation blocks on the real clock,
/// and test doubles override it to make timing observable.
pub trait KeyTransmitter {
    /// Deliver one key event.
    ///
    /// # Errors
    ///
    /// A failed delivery terminates the remaining sequence; the error is
    /// propagated to the caller unmodified.
    fn transmit(&mut self, input: KeyInput, down: bool, up: bool) -> Result<()>;

    /// Block for the given duration.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// One recorded `transmit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitEvent {
    pub input: KeyInput,
    pub down: bool,
    pub up: bool,
}

/// A transmitter that records every call instead of touching the host.
///
/// Sleeps are recorded rather than slept, so sequences with pauses run
/// instantly under test while the requested timing stays assertable.
#[derive(Debug, Default)]
pub struct RecordingTransmitter {
    events: Vec<TransmitEvent>,
    sleeps: Vec<Duration>,
}

impl RecordingTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transmit calls, in delivery order.
    pub fn events(&self) -> &[TransmitEvent] {
        &self.events
    }

    /// All sleep calls, in delivery order.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

impl KeyTransmitter for RecordingTransmitter {
    fn transmit(&mut self, input: KeyInput, down: bool, up: bool) -> Result<()> {
        self.events.push(TransmitEvent { input, down, up });
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_transmitter_records_in_order() {
        let mut transmitter = RecordingTransmitter::new();
        transmitter
            .transmit(KeyInput::Virtual(13), true, false)
            .unwrap();
        transmitter.sleep(Duration::from_millis(50));
        transmitter
            .transmit(KeyInput::Unicode('a'), true, true)
            .unwrap();

        assert_eq!(transmitter.events().len(), 2);
        assert_eq!(transmitter.events()[0].input, KeyInput::Virtual(13));
        assert!(!transmitter.events()[0].up);
        assert_eq!(transmitter.sleeps(), &[Duration::from_millis(50)]);
    }

    #[test]
    fn test_key_input_display() {
        assert_eq!(KeyInput::Unicode('a').to_string(), "'a'");
        assert_eq!(KeyInput::Scan('A').to_string(), "'A' (scan)");
        assert_eq!(KeyInput::Virtual(13).to_string(), "ENTER");
    }
}
