//! Symbolic key-code registry and modifier table.
//!
//! Maps the names usable inside `{...}` brace codes (`"ENTER"`, `"F1"`,
//! `"VK_SHIFT"`, ...) to virtual-key codes, and provides the best-effort
//! reverse lookup used for diagnostics. The table is constant for the
//! process lifetime.

use crate::error::{Result, SendKeysError};

/// Shift virtual-key code, held by the `+` prefix.
pub const VK_SHIFT: u16 = 16;
/// Control virtual-key code, held by the `^` prefix.
pub const VK_CONTROL: u16 = 17;
/// Alt (menu) virtual-key code, held by the `%` prefix.
pub const VK_MENU: u16 = 18;
/// Enter virtual-key code, produced by `~` and literal newlines.
pub const VK_RETURN: u16 = 13;

/// Registry of symbolic key names.
///
/// Friendly aliases come first so that [`describe`] prefers them over the
/// raw `VK_*` spellings for the same code. Lookups are case-sensitive.
static CODES: &[(&str, u16)] = &[
    // Friendly aliases
    ("BACK", 8),
    ("BACKSPACE", 8),
    ("BKSP", 8),
    ("BS", 8),
    ("BREAK", 3),
    ("CAP", 20),
    ("CAPSLOCK", 20),
    ("DEL", 46),
    ("DELETE", 46),
    ("DOWN", 40),
    ("END", 35),
    ("ENTER", 13),
    ("ESC", 27),
    ("HELP", 47),
    ("HOME", 36),
    ("INS", 45),
    ("INSERT", 45),
    ("LEFT", 37),
    ("LWIN", 91),
    ("NUMLOCK", 144),
    ("PGDN", 34),
    ("PGUP", 33),
    ("PRTSC", 44),
    ("RIGHT", 39),
    ("RMENU", 165),
    ("RWIN", 92),
    ("SCROLLLOCK", 145),
    ("SPACE", 32),
    ("TAB", 9),
    ("UP", 38),
    ("F1", 112),
    ("F2", 113),
    ("F3", 114),
    ("F4", 115),
    ("F5", 116),
    ("F6", 117),
    ("F7", 118),
    ("F8", 119),
    ("F9", 120),
    ("F10", 121),
    ("F11", 122),
    ("F12", 123),
    ("F13", 124),
    ("F14", 125),
    ("F15", 126),
    ("F16", 127),
    ("F17", 128),
    ("F18", 129),
    ("F19", 130),
    ("F20", 131),
    ("F21", 132),
    ("F22", 133),
    ("F23", 134),
    ("F24", 135),
    // VK_* namespace
    ("VK_ACCEPT", 30),
    ("VK_ADD", 107),
    ("VK_APPS", 93),
    ("VK_ATTN", 246),
    ("VK_BACK", 8),
    ("VK_BROWSER_BACK", 166),
    ("VK_BROWSER_FORWARD", 167),
    ("VK_CANCEL", 3),
    ("VK_CAPITAL", 20),
    ("VK_CLEAR", 12),
    ("VK_CONTROL", 17),
    ("VK_CONVERT", 28),
    ("VK_CRSEL", 247),
    ("VK_DECIMAL", 110),
    ("VK_DELETE", 46),
    ("VK_DIVIDE", 111),
    ("VK_DOWN", 40),
    ("VK_END", 35),
    ("VK_EREOF", 249),
    ("VK_ESCAPE", 27),
    ("VK_EXECUTE", 43),
    ("VK_EXSEL", 248),
    ("VK_F1", 112),
    ("VK_F2", 113),
    ("VK_F3", 114),
    ("VK_F4", 115),
    ("VK_F5", 116),
    ("VK_F6", 117),
    ("VK_F7", 118),
    ("VK_F8", 119),
    ("VK_F9", 120),
    ("VK_F10", 121),
    ("VK_F11", 122),
    ("VK_F12", 123),
    ("VK_F13", 124),
    ("VK_F14", 125),
    ("VK_F15", 126),
    ("VK_F16", 127),
    ("VK_F17", 128),
    ("VK_F18", 129),
    ("VK_F19", 130),
    ("VK_F20", 131),
    ("VK_F21", 132),
    ("VK_F22", 133),
    ("VK_F23", 134),
    ("VK_F24", 135),
    ("VK_FINAL", 24),
    ("VK_HANGEUL", 21),
    ("VK_HANGUL", 21),
    ("VK_HANJA", 25),
    ("VK_HELP", 47),
    ("VK_HOME", 36),
    ("VK_INSERT", 45),
    ("VK_JUNJA", 23),
    ("VK_KANA", 21),
    ("VK_KANJI", 25),
    ("VK_LCONTROL", 162),
    ("VK_LEFT", 37),
    ("VK_LMENU", 164),
    ("VK_LSHIFT", 160),
    ("VK_LWIN", 91),
    ("VK_MEDIA_NEXT_TRACK", 176),
    ("VK_MEDIA_PLAY_PAUSE", 179),
    ("VK_MEDIA_PREV_TRACK", 177),
    ("VK_MEDIA_STOP", 178),
    ("VK_MENU", 18),
    ("VK_MODECHANGE", 31),
    ("VK_MULTIPLY", 106),
    ("VK_NEXT", 34),
    ("VK_NONAME", 252),
    ("VK_NONCONVERT", 29),
    ("VK_NUMLOCK", 144),
    ("VK_NUMPAD0", 96),
    ("VK_NUMPAD1", 97),
    ("VK_NUMPAD2", 98),
    ("VK_NUMPAD3", 99),
    ("VK_NUMPAD4", 100),
    ("VK_NUMPAD5", 101),
    ("VK_NUMPAD6", 102),
    ("VK_NUMPAD7", 103),
    ("VK_NUMPAD8", 104),
    ("VK_NUMPAD9", 105),
    ("VK_OEM_CLEAR", 254),
    ("VK_PA1", 253),
    ("VK_PAUSE", 19),
    ("VK_PLAY", 250),
    ("VK_PRINT", 42),
    ("VK_PRIOR", 33),
    ("VK_PROCESSKEY", 229),
    ("VK_RCONTROL", 163),
    ("VK_RETURN", 13),
    ("VK_RIGHT", 39),
    ("VK_RMENU", 165),
    ("VK_RSHIFT", 161),
    ("VK_RWIN", 92),
    ("VK_SCROLL", 145),
    ("VK_SELECT", 41),
    ("VK_SEPARATOR", 108),
    ("VK_SHIFT", 16),
    ("VK_SNAPSHOT", 44),
    ("VK_SPACE", 32),
    ("VK_SUBTRACT", 109),
    ("VK_TAB", 9),
    ("VK_UP", 38),
    ("VK_VOLUME_DOWN", 174),
    ("VK_VOLUME_MUTE", 173),
    ("VK_VOLUME_UP", 175),
    ("VK_ZOOM", 251),
];

/// Look up a symbolic key name, returning `None` if it is not registered.
///
/// Matching is exact and case-sensitive: `{ENTER}` resolves, `{enter}` does
/// not (and falls through to the parser's other brace-body rules).
pub fn lookup(name: &str) -> Option<u16> {
    CODES
        .iter()
        .find(|(code_name, _)| *code_name == name)
        .map(|(_, code)| *code)
}

/// Resolve a symbolic key name to its virtual-key code.
///
/// # Errors
///
/// Returns [`SendKeysError::UnknownCode`] if the name is not registered.
pub fn resolve(name: &str) -> Result<u16> {
    lookup(name).ok_or_else(|| SendKeysError::unknown_code(name))
}

/// Best-effort reverse lookup for diagnostics.
///
/// Returns the first registered name for the code, or `"VK <n>"` when the
/// code has no name.
pub fn describe(code: u16) -> String {
    CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| (*name).to_string())
        .unwrap_or_else(|| format!("VK {code}"))
}

/// Map a modifier prefix character to its virtual-key code.
///
/// The table is fixed: `+` Shift, `^` Control, `%` Alt.
pub fn modifier_code(ch: char) -> Option<u16> {
    match ch {
        '+' => Some(VK_SHIFT),
        '^' => Some(VK_CONTROL),
        '%' => Some(VK_MENU),
        _ => None,
    }
}

/// All registered `(name, code)` pairs, in registry order.
pub fn entries() -> &'static [(&'static str, u16)] {
    CODES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_names() {
        assert_eq!(lookup("ENTER"), Some(13));
        assert_eq!(lookup("TAB"), Some(9));
        assert_eq!(lookup("F24"), Some(135));
        assert_eq!(lookup("VK_LSHIFT"), Some(160));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("enter"), None);
        assert_eq!(lookup("Enter"), None);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = resolve("NOT_A_KEY").unwrap_err();
        assert_eq!(err.to_string(), "unknown key code 'NOT_A_KEY'");
    }

    #[test]
    fn test_describe_prefers_friendly_names() {
        assert_eq!(describe(13), "ENTER");
        assert_eq!(describe(9), "TAB");
        assert_eq!(describe(8), "BACK");
    }

    #[test]
    fn test_describe_falls_back_to_numeric() {
        assert_eq!(describe(251), "VK_ZOOM");
        assert_eq!(describe(200), "VK 200");
    }

    #[test]
    fn test_modifier_table() {
        assert_eq!(modifier_code('+'), Some(VK_SHIFT));
        assert_eq!(modifier_code('^'), Some(VK_CONTROL));
        assert_eq!(modifier_code('%'), Some(VK_MENU));
        assert_eq!(modifier_code('a'), None);
    }
}
