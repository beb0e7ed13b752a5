// ✏️ Structured Text Formatter
// Two independent layers over one grammar table:
//   - format(): turn any string into the nearest valid partial code
//   - is_keystroke_allowed(): reject a keystroke before it is inserted
//
// Paste and IME input bypass the gate, the transform catches those.

use std::fmt;

use crate::grammar::{Case, CharClass, Grammar, ACCOUNT_NUMBER, IFSC};

// ============================================================================
// TRANSFORM
// ============================================================================

/// Normalize `raw` against `grammar`.
///
/// The segment holding the last character is the one being typed. Segments
/// before it are settled: their characters are kept as they are, except
/// literal positions which are forced. The typed segment filters everything
/// from its start onward by its class. Never fails.
pub fn format(grammar: &Grammar, raw: &str) -> String {
    let chars: Vec<char> = match grammar.case {
        Case::Upper => raw.to_uppercase().chars().collect(),
        Case::AsTyped => raw.chars().collect(),
    };

    let active = grammar.segment_at(chars.len().saturating_sub(1));
    let start = active.positions.start.min(chars.len());

    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars[..start].iter().enumerate() {
        match grammar.class_at(i) {
            CharClass::Literal(fixed) => out.push(fixed),
            _ => out.push(c),
        }
    }

    match active.class {
        CharClass::Literal(fixed) => {
            out.extend(std::iter::repeat(fixed).take(chars.len() - start));
        }
        class => out.extend(chars[start..].iter().copied().filter(|c| class.accepts(*c))),
    }

    if grammar.truncate {
        truncate_chars(&mut out, grammar.width());
    }
    out
}

/// `sbin0123456` → `SBIN0123456`. Output is at most 11 characters.
pub fn format_ifsc(raw: &str) -> String {
    format(&IFSC, raw)
}

/// Strip everything that is not an ASCII digit. No truncation.
pub fn format_account_number(raw: &str) -> String {
    format(&ACCOUNT_NUMBER, raw)
}

fn truncate_chars(s: &mut String, max: usize) {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
}

// ============================================================================
// KEYSTROKE GATE
// ============================================================================

/// A key as reported by the input system before insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    /// Any other named key (Tab, Enter, Shift, F5, ...)
    Named(String),
}

impl Key {
    /// Parse a DOM-style key name: `"a"`, `"5"`, `"Backspace"`, `"Tab"`.
    pub fn parse(name: &str) -> Key {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => match name {
                "Backspace" => Key::Backspace,
                "Delete" => Key::Delete,
                "ArrowLeft" => Key::ArrowLeft,
                "ArrowRight" => Key::ArrowRight,
                other => Key::Named(other.to_string()),
            },
        }
    }

    /// Editing and navigation keys pass the gate in every grammar
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            Key::Backspace | Key::Delete | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::parse(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(feature = "tui")]
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            other => Key::Named(format!("{:?}", other)),
        }
    }
}

/// Pre-insertion gate. `false` means the caller suppresses the key.
///
/// The current value is part of the hook's contract but the decision only
/// depends on the class at `cursor_position`.
pub fn is_keystroke_allowed(
    grammar: &Grammar,
    _current_value: &str,
    cursor_position: usize,
    key: &Key,
) -> bool {
    match key {
        k if k.is_editing() => true,
        Key::Char(c) => grammar.class_at(cursor_position).admits_key(*c),
        _ => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
