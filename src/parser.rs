//! Key-sequence parser.
//!
//! Compiles a sequence string like `"^a^c{ENTER 2}"` into an ordered list of
//! [`KeyAction`]s. Parsing is pure: nothing is transmitted, and a malformed
//! sequence fails before any action is produced.
//!
//! ## Sequence syntax
//!
//! | Form | Meaning |
//! |------|---------|
//! | `+` / `^` / `%` | Hold Shift / Control / Alt over the next unit |
//! | `(...)` | Apply held modifiers to every unit inside |
//! | `{CODE}` | Named key from the code registry |
//! | `{CODE n}` | Repeat a named key or nested sequence `n` times |
//! | `{PAUSE f}` | Wait `f` seconds |
//! | `{CODE down}` / `{CODE up}` | Press-only / release-only event |
//! | `{{}`, `{}}`, `{^}`, ... | Literal `{`, `}`, `^`, ... |
//! | `~` and literal newline | Enter |
//!
//! Space, tab, and newline characters are dropped unless the matching
//! [`ParseOptions`] flag is set.

use std::time::Duration;

use tracing::debug;

use crate::action::KeyAction;
use crate::codes;
use crate::error::{Result, SendKeysError};

/// Whitespace handling flags for [`parse_keys`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit space characters instead of dropping them.
    pub with_spaces: bool,
    /// Emit tab characters instead of dropping them.
    pub with_tabs: bool,
    /// Emit newline characters (as Enter) instead of dropping them.
    pub with_newlines: bool,
}

/// Parse a key sequence into its ordered action list.
///
/// # Errors
///
/// Returns a [`SendKeysError`] if the sequence contains unbalanced
/// delimiters, an unknown brace code, or an invalid pause/repetition
/// argument. Nothing is returned from a partially valid sequence.
///
/// # Example
///
/// ```
/// use sendkeys::{parse_keys, KeyAction, ParseOptions};
///
/// let actions = parse_keys("{TAB 2}x", &ParseOptions::default()).unwrap();
/// assert_eq!(actions.len(), 3);
/// assert_eq!(actions[2], KeyAction::key('x'));
/// ```
pub fn parse_keys(text: &str, options: &ParseOptions) -> Result<Vec<KeyAction>> {
    let mut keys = Vec::new();
    let mut modifiers = ModifierStack::default();
    Parser::new(text, *options).scan(&mut modifiers, &mut keys, false)?;
    Ok(keys)
}

/// Ordered stack of held modifier codes; last pushed is innermost.
#[derive(Debug, Default)]
struct ModifierStack(Vec<u16>);

impl ModifierStack {
    fn hold(&mut self, code: u16, keys: &mut Vec<KeyAction>) {
        debug!(code, "modifier held");
        self.0.push(code);
        keys.push(KeyAction::virtual_key_down(code));
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Release every held modifier, most recently pushed first.
    fn release_all(&mut self, keys: &mut Vec<KeyAction>) {
        while let Some(code) = self.0.pop() {
            debug!(code, "modifier released");
            keys.push(KeyAction::virtual_key_up(code));
        }
    }
}

/// Direction restriction requested by a `{CODE up}` / `{CODE down}` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventSuffix {
    Up,
    Down,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    options: ParseOptions,
}

impl Parser {
    fn new(text: &str, options: ParseOptions) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            options,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    /// Index of the next `target` at or after `from`.
    fn find_from(&self, target: char, from: usize) -> Option<usize> {
        (from..self.chars.len()).find(|&i| self.chars[i] == target)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Scan the input left to right, appending actions to `keys`.
    ///
    /// `nested` marks a parenthesized-group scan: held modifiers then span
    /// every unit until the end of the group's text instead of draining
    /// after each unit.
    fn scan(
        &mut self,
        modifiers: &mut ModifierStack,
        keys: &mut Vec<KeyAction>,
        nested: bool,
    ) -> Result<()> {
        let mut escape_next = false;
        while let Some(c) = self.advance() {
            if let Some(code) = codes::modifier_code(c) {
                // stays held until the next unit completes
                modifiers.hold(code, keys);
                continue;
            }
            let consumed_unit = match c {
                '(' => {
                    escape_next = false;
                    self.scan_group(modifiers, keys)?;
                    true
                }
                '{' => {
                    escape_next = false;
                    self.scan_brace(keys, &mut escape_next)?;
                    true
                }
                ')' => {
                    return Err(SendKeysError::sequence_syntax("`)` should be preceded by `(`"))
                }
                '}' => {
                    return Err(SendKeysError::sequence_syntax("`}` should be preceded by `{`"))
                }
                ' ' if !self.options.with_spaces => false,
                '\t' if !self.options.with_tabs => false,
                '\n' if !self.options.with_newlines => false,
                '~' | '\n' => {
                    keys.push(KeyAction::virtual_key(codes::VK_RETURN));
                    true
                }
                c => {
                    if !modifiers.is_empty() || escape_next {
                        keys.push(KeyAction::escaped(c));
                    } else {
                        keys.push(KeyAction::key(c));
                    }
                    true
                }
            };
            if consumed_unit && !nested {
                modifiers.release_all(keys);
            }
        }
        // covers trailing unreleased modifiers, and releases group-held
        // modifiers at the end of a nested scan
        modifiers.release_all(keys);
        Ok(())
    }

    /// Parse a `(...)` group with the same modifier stack.
    ///
    /// The closer search finds the next `)`; groups do not nest.
    fn scan_group(
        &mut self,
        modifiers: &mut ModifierStack,
        keys: &mut Vec<KeyAction>,
    ) -> Result<()> {
        let close = self
            .find_from(')', self.pos)
            .ok_or_else(|| SendKeysError::sequence_syntax("`(` without `)`"))?;
        let inner = self.slice(self.pos, close);
        self.pos = close + 1;
        Parser::new(&inner, self.options).scan(modifiers, keys, true)
    }

    /// Parse a `{...}` brace code.
    fn scan_brace(&mut self, keys: &mut Vec<KeyAction>, escape_next: &mut bool) -> Result<()> {
        // the closer search starts one past the first body character, so a
        // body that is itself `}` (the `{}}` form) parses as a literal
        let start = self.pos;
        let close = self
            .find_from('}', start + 1)
            .ok_or_else(|| SendKeysError::sequence_syntax("`{` without `}`"))?;
        let mut code = self.slice(start, close);
        self.pos = close + 1;

        let mut suffix = None;
        if let Some(split) = suffix_start(&code, " up") {
            code.truncate(split);
            suffix = Some(EventSuffix::Up);
            *escape_next = true;
        } else if let Some(split) = suffix_start(&code, " down") {
            code.truncate(split);
            suffix = Some(EventSuffix::Down);
            *escape_next = true;
        }

        let mut actions = handle_code(&code)?;
        if let Some(suffix) = suffix {
            if let Some(first) = actions.first_mut() {
                // a held/released literal must go through the scan-code path
                *first = first.escape_literal();
                match suffix {
                    EventSuffix::Up => first.keep_only_up(),
                    EventSuffix::Down => first.keep_only_down(),
                }
            }
        }
        keys.extend(actions);
        Ok(())
    }
}

/// Expand one brace-code body into actions.
fn handle_code(code: &str) -> Result<Vec<KeyAction>> {
    if let Some(vk) = codes::lookup(code) {
        return Ok(vec![KeyAction::virtual_key(vk)]);
    }

    let mut chars = code.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        // single unregistered character: the self-escaping forms {{} {^} ...
        return Ok(vec![KeyAction::key(ch)]);
    }

    if let Some((name, argument)) = split_last_whitespace(code) {
        if name == "PAUSE" {
            let seconds: f64 = argument.parse().map_err(|_| {
                SendKeysError::invalid_pause_duration(argument, "not a number of seconds")
            })?;
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(SendKeysError::invalid_pause_duration(
                    argument,
                    "must be a non-negative number of seconds",
                ));
            }
            return Ok(vec![KeyAction::pause(Duration::from_secs_f64(seconds))]);
        }

        let count: usize = argument
            .parse()
            .map_err(|_| SendKeysError::invalid_repeat_count(code, argument))?;
        if let Some(vk) = codes::lookup(name) {
            return Ok(vec![KeyAction::virtual_key(vk); count]);
        }
        // repeated nested sequence: parse once, replicate the list
        let unit = parse_keys(name, &ParseOptions::default())?;
        let mut actions = Vec::with_capacity(unit.len() * count);
        for _ in 0..count {
            actions.extend_from_slice(&unit);
        }
        return Ok(actions);
    }

    Err(SendKeysError::unknown_code(code))
}

/// Split on the last whitespace run, like `rsplit` with one split.
fn split_last_whitespace(code: &str) -> Option<(&str, &str)> {
    let (idx, ws) = code.char_indices().rev().find(|(_, c)| c.is_whitespace())?;
    let name = code[..idx].trim_end();
    let argument = &code[idx + ws.len_utf8()..];
    Some((name, argument))
}

/// Byte index where an ASCII-case-insensitive `suffix` starts, if present.
fn suffix_start(code: &str, suffix: &str) -> Option<usize> {
    let split = code.len().checked_sub(suffix.len())?;
    code.get(split..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
        .then_some(split)
}
