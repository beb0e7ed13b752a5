// 🔤 Grammar Table - positional character classes for structured codes
// A grammar is data: a list of segments, each a position range with one class.

use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::Error;

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharClass {
    /// ASCII letter. Either case is admitted at the keyboard,
    /// normalized text only keeps `A-Z`.
    Letter,
    /// ASCII digit `0-9`
    Digit,
    /// Exactly this character
    Literal(char),
}

impl CharClass {
    /// Would a keystroke producing `c` be admitted at a position of this class?
    pub fn admits_key(&self, c: char) -> bool {
        match self {
            CharClass::Letter => c.is_ascii_alphabetic(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Literal(expected) => c == *expected,
        }
    }

    /// Is `c` already in normalized form for this class?
    pub fn accepts(&self, c: char) -> bool {
        match self {
            CharClass::Letter => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Literal(expected) => c == *expected,
        }
    }
}

// ============================================================================
// SEGMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub positions: Range<usize>,
    pub class: CharClass,
}

impl Segment {
    pub const fn new(positions: Range<usize>, class: CharClass) -> Self {
        Segment { positions, class }
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Case {
    AsTyped,
    Upper,
}

// ============================================================================
// GRAMMAR
// ============================================================================

/// Positional grammar of a structured code.
///
/// Segments are contiguous and start at position 0. A position past the
/// last segment takes the class of the last segment, so a cursor parked
/// after a complete code still sees a sensible class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grammar {
    pub name: &'static str,
    pub segments: &'static [Segment],
    pub case: Case,
    /// Cut formatted output at the table width
    pub truncate: bool,
}

/// Indian Financial System Code: `AAAA0NNNNNN`
pub static IFSC: Grammar = Grammar {
    name: "ifsc",
    segments: &[
        Segment::new(0..4, CharClass::Letter),
        Segment::new(4..5, CharClass::Literal('0')),
        Segment::new(5..11, CharClass::Digit),
    ],
    case: Case::Upper,
    truncate: true,
};

/// Bank account number: digits only. The 9..=18 length window is a
/// validation concern, the formatter never truncates.
pub static ACCOUNT_NUMBER: Grammar = Grammar {
    name: "account-number",
    segments: &[Segment::new(0..18, CharClass::Digit)],
    case: Case::AsTyped,
    truncate: false,
};

/// Every grammar known to the crate
pub static GRAMMARS: [&Grammar; 2] = [&IFSC, &ACCOUNT_NUMBER];

impl Grammar {
    /// Total width covered by the table
    pub fn width(&self) -> usize {
        self.segments.last().map_or(0, |s| s.positions.end)
    }

    /// Index of the segment that governs `position`
    pub fn segment_index_at(&self, position: usize) -> usize {
        self.segments
            .iter()
            .position(|s| s.contains(position))
            .unwrap_or(self.segments.len().saturating_sub(1))
    }

    pub fn segment_at(&self, position: usize) -> &Segment {
        &self.segments[self.segment_index_at(position)]
    }

    pub fn class_at(&self, position: usize) -> CharClass {
        self.segment_at(position).class
    }

    /// Does `value` satisfy every position it covers? (prefix check)
    pub fn is_partial_match(&self, value: &str) -> bool {
        let count = value.chars().count();
        if self.truncate && count > self.width() {
            return false;
        }
        value
            .chars()
            .enumerate()
            .all(|(i, c)| self.class_at(i).accepts(c))
    }

    /// Full-width match
    pub fn is_complete(&self, value: &str) -> bool {
        value.chars().count() == self.width() && self.is_partial_match(value)
    }

    pub fn by_name(name: &str) -> Option<&'static Grammar> {
        GRAMMARS.iter().copied().find(|g| g.name == name)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Name-only handle for a grammar, handy for CLI arguments and config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarKind {
    Ifsc,
    AccountNumber,
}

impl GrammarKind {
    pub fn grammar(&self) -> &'static Grammar {
        match self {
            GrammarKind::Ifsc => &IFSC,
            GrammarKind::AccountNumber => &ACCOUNT_NUMBER,
        }
    }
}

impl FromStr for GrammarKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ifsc" => Ok(GrammarKind::Ifsc),
            "account-number" | "account_number" | "account" => Ok(GrammarKind::AccountNumber),
            other => Err(Error::UnknownGrammar(other.to_string())),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
