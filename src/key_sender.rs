//! The executor: walks a parsed action list and drives the transmitter.
//!
//! [`KeySender`] owns a [`KeyTransmitter`] and replays actions in order with
//! a fixed inter-action pause. There is no retry and no rollback: a
//! transmitter failure terminates the remaining sequence.

use std::time::Duration;

use tracing::debug;

use crate::action::KeyAction;
use crate::error::Result;
use crate::parser::{parse_keys, ParseOptions};
use crate::transmit::KeyTransmitter;

/// Default pause between consecutive actions.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(50);

/// Options for [`KeySender::send_keys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    /// Pause inserted after every action, including after a `{PAUSE x}`.
    pub pause: Duration,
    /// Emit space characters instead of dropping them.
    pub with_spaces: bool,
    /// Emit tab characters instead of dropping them.
    pub with_tabs: bool,
    /// Emit newline characters (as Enter) instead of dropping them.
    pub with_newlines: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            pause: DEFAULT_PAUSE,
            with_spaces: false,
            with_tabs: false,
            with_newlines: false,
        }
    }
}

impl SendOptions {
    /// The whitespace flags as parser options.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            with_spaces: self.with_spaces,
            with_tabs: self.with_tabs,
            with_newlines: self.with_newlines,
        }
    }
}

/// Sends compiled key sequences through a [`KeyTransmitter`].
///
/// # Example
///
/// ```
/// use sendkeys::{KeySender, RecordingTransmitter, SendOptions};
///
/// let mut sender = KeySender::new(RecordingTransmitter::new());
/// sender.send_keys("^a{DEL}", &SendOptions::default()).unwrap();
/// assert_eq!(sender.transmitter().events().len(), 4);
/// ```
#[derive(Debug)]
pub struct KeySender<T: KeyTransmitter> {
    transmitter: T,
}

impl<T: KeyTransmitter> KeySender<T> {
    pub fn new(transmitter: T) -> Self {
        Self { transmitter }
    }

    /// Shared access to the transmitter, e.g. to inspect a recording.
    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    /// Consume the sender and return the transmitter.
    pub fn into_inner(self) -> T {
        self.transmitter
    }

    /// Parse `text` and send the resulting actions.
    ///
    /// Parsing happens up front: a malformed sequence fails before any key
    /// is transmitted, so there is no partial execution of invalid input.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed sequences, or the transmitter's
    /// error (unmodified) if delivery fails mid-sequence.
    pub fn send_keys(&mut self, text: &str, options: &SendOptions) -> Result<()> {
        let actions = parse_keys(text, &options.parse_options())?;
        self.send_actions(&actions, options.pause)
    }

    /// Send already-parsed actions in order, sleeping `pause` after each
    /// one (also after a `Pause` action, whose own duration applies first).
    pub fn send_actions(&mut self, actions: &[KeyAction], pause: Duration) -> Result<()> {
        debug!(count = actions.len(), ?pause, "sending actions");
        for action in actions {
            action.run(&mut self.transmitter)?;
            self.transmitter.sleep(pause);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SendKeysError;
    use crate::transmit::{KeyInput, RecordingTransmitter};

    #[test]
    fn test_send_keys_transmits_in_order() {
        let mut sender = KeySender::new(RecordingTransmitter::new());
        sender.send_keys("ab", &SendOptions::default()).unwrap();

        let events = sender.transmitter().events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].input, KeyInput::Unicode('a'));
        assert_eq!(events[1].input, KeyInput::Unicode('b'));
    }

    #[test]
    fn test_pause_between_every_action() {
        let options = SendOptions {
            pause: Duration::from_millis(20),
            ..SendOptions::default()
        };
        let mut sender = KeySender::new(RecordingTransmitter::new());
        sender.send_keys("a{PAUSE 0.5}b", &options).unwrap();

        // the {PAUSE} action sleeps its own duration, and the inter-action
        // pause still applies after it
        assert_eq!(
            sender.transmitter().sleeps(),
            &[
                Duration::from_millis(20),
                Duration::from_millis(500),
                Duration::from_millis(20),
                Duration::from_millis(20),
            ]
        );
    }

    #[test]
    fn test_malformed_sequence_transmits_nothing() {
        let mut sender = KeySender::new(RecordingTransmitter::new());
        let err = sender.send_keys("ab{ENTER", &SendOptions::default());

        assert!(err.is_err());
        assert!(sender.transmitter().events().is_empty());
    }

    #[test]
    fn test_transmitter_failure_stops_the_sequence() {
        struct FailingTransmitter {
            sent: usize,
            fail_at: usize,
        }

        impl KeyTransmitter for FailingTransmitter {
            fn transmit(&mut self, input: KeyInput, _down: bool, _up: bool) -> crate::Result<()> {
                if self.sent == self.fail_at {
                    return Err(SendKeysError::key_send_failed(
                        input.to_string(),
                        "device unavailable",
                    ));
                }
                self.sent += 1;
                Ok(())
            }

            fn sleep(&mut self, _duration: Duration) {}
        }

        let mut sender = KeySender::new(FailingTransmitter { sent: 0, fail_at: 1 });
        let err = sender
            .send_keys("abc", &SendOptions::default())
            .unwrap_err();

        assert!(matches!(err, SendKeysError::KeySendFailed { .. }));
        assert_eq!(sender.transmitter().sent, 1);
    }
}
