//! Source positions, ranges and line separators.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - A [`TextRange`] is **inclusive** at both ends: `begin` is the first
//!   character covered and `end` the last one
//! - Ranges are ordered by position, so containment is a pair of comparisons

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AstError;

// ============================================================================
// Positions
// ============================================================================

/// A 1-indexed line and column in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number, starting at 1.
    pub column: u32,
}

impl Position {
    /// The first character of a file.
    pub const HOME: Position = Position { line: 1, column: 1 };

    /// Create a new position.
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Same line, different column.
    pub fn with_column(self, column: u32) -> Self {
        Position { column, ..self }
    }

    /// Same column, different line.
    pub fn with_line(self, line: u32) -> Self {
        Position { line, ..self }
    }

    /// The position `columns` characters further on the same line.
    pub fn right(self, columns: u32) -> Self {
        self.with_column(self.column.saturating_add(columns))
    }

    /// Check if this position lies strictly before `other`.
    pub fn is_before(&self, other: &Position) -> bool {
        self < other
    }

    /// Check if this position lies strictly after `other`.
    pub fn is_after(&self, other: &Position) -> bool {
        self > other
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(line {},col {})", self.line, self.column)
    }
}

// ============================================================================
// Ranges
// ============================================================================

/// An inclusive range of characters in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    /// First character covered.
    pub begin: Position,
    /// Last character covered.
    pub end: Position,
}

impl TextRange {
    /// Create a new range.
    ///
    /// The endpoints are swapped if `begin` is after `end`.
    pub fn new(begin: Position, end: Position) -> Self {
        if begin > end {
            TextRange {
                begin: end,
                end: begin,
            }
        } else {
            TextRange { begin, end }
        }
    }

    /// Shorthand for a range given as four 1-indexed numbers.
    pub fn of(begin_line: u32, begin_column: u32, end_line: u32, end_column: u32) -> Self {
        TextRange::new(
            Position::new(begin_line, begin_column),
            Position::new(end_line, end_column),
        )
    }

    /// Check if `other` lies entirely inside this range. A range contains itself.
    pub fn contains(&self, other: &TextRange) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Check if `other` lies inside this range without touching either end.
    pub fn strictly_contains(&self, other: &TextRange) -> bool {
        self.begin < other.begin && other.end < self.end
    }

    /// Check if `position` lies inside this range.
    pub fn contains_position(&self, position: Position) -> bool {
        self.begin <= position && position <= self.end
    }

    /// Check if the two ranges share at least one character.
    pub fn overlaps_with(&self, other: &TextRange) -> bool {
        self.begin <= other.end && other.begin <= self.end
    }

    /// Check if this range ends before `position`.
    pub fn is_before(&self, position: Position) -> bool {
        self.end < position
    }

    /// Check if this range begins after `position`.
    pub fn is_after(&self, position: Position) -> bool {
        self.begin > position
    }

    /// Number of lines touched by the range.
    pub fn line_count(&self) -> u32 {
        self.end.line - self.begin.line + 1
    }

    /// Same range with a new begin position.
    pub fn with_begin(self, begin: Position) -> Self {
        TextRange::new(begin, self.end)
    }

    /// Same range with a new end position.
    pub fn with_end(self, end: Position) -> Self {
        TextRange::new(self.begin, end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

// ============================================================================
// Line Separators
// ============================================================================

/// Line ending style of a piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSeparator {
    /// `\r` (classic Mac OS).
    Cr,
    /// `\n` (Unix).
    Lf,
    /// `\r\n` (Windows).
    CrLf,
    /// The text contains no line separator.
    None,
    /// The text mixes several styles.
    Mixed,
    /// No particular style has been chosen.
    Arbitrary,
}

impl LineSeparator {
    /// The separator of the platform this code was compiled for.
    pub fn system() -> Self {
        if cfg!(windows) {
            LineSeparator::CrLf
        } else {
            LineSeparator::Lf
        }
    }

    /// The literal text of this separator, or `""` for the non-standard styles.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineSeparator::Cr => "\r",
            LineSeparator::Lf => "\n",
            LineSeparator::CrLf => "\r\n",
            LineSeparator::None | LineSeparator::Mixed | LineSeparator::Arbitrary => "",
        }
    }

    /// Returns whether this is one of CR, LF or CRLF.
    pub fn is_standard_eol(&self) -> bool {
        matches!(
            self,
            LineSeparator::Cr | LineSeparator::Lf | LineSeparator::CrLf
        )
    }

    /// Detect the line ending style used by `text`.
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        let (mut cr, mut lf, mut crlf) = (0usize, 0usize, 0usize);
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    crlf += 1;
                    i += 1;
                }
                b'\r' => cr += 1,
                b'\n' => lf += 1,
                _ => {}
            }
            i += 1;
        }
        match (cr > 0, lf > 0, crlf > 0) {
            (false, false, false) => LineSeparator::None,
            (true, false, false) => LineSeparator::Cr,
            (false, true, false) => LineSeparator::Lf,
            (false, false, true) => LineSeparator::CrLf,
            _ => LineSeparator::Mixed,
        }
    }
}

impl Default for LineSeparator {
    fn default() -> Self {
        LineSeparator::system()
    }
}

impl FromStr for LineSeparator {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cr" => Ok(LineSeparator::Cr),
            "lf" => Ok(LineSeparator::Lf),
            "crlf" => Ok(LineSeparator::CrLf),
            "none" => Ok(LineSeparator::None),
            "mixed" => Ok(LineSeparator::Mixed),
            "arbitrary" => Ok(LineSeparator::Arbitrary),
            "system" => Ok(LineSeparator::system()),
            other => Err(AstError::invalid_argument(format!(
                "unknown line separator '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains_itself() {
        let r = TextRange::of(1, 1, 3, 10);
        assert!(r.contains(&r));
        assert!(!r.strictly_contains(&r));
    }

    #[test]
    fn test_range_containment() {
        let outer = TextRange::of(1, 1, 5, 1);
        let inner = TextRange::of(2, 4, 2, 9);
        let straddling = TextRange::of(4, 1, 6, 1);
        assert!(outer.contains(&inner));
        assert!(outer.strictly_contains(&inner));
        assert!(!outer.contains(&straddling));
        assert!(outer.overlaps_with(&straddling));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_range_endpoints_are_normalized() {
        let r = TextRange::new(Position::new(4, 2), Position::new(1, 1));
        assert_eq!(r.begin, Position::HOME);
        assert_eq!(r.line_count(), 4);
    }

    #[test]
    fn test_range_display() {
        let r = TextRange::of(1, 2, 3, 4);
        assert_eq!(r.to_string(), "(line 1,col 2)-(line 3,col 4)");
    }

    #[test]
    fn test_detect_line_separator() {
        assert_eq!(LineSeparator::detect("a\nb\n"), LineSeparator::Lf);
        assert_eq!(LineSeparator::detect("a\r\nb\r\n"), LineSeparator::CrLf);
        assert_eq!(LineSeparator::detect("a\rb"), LineSeparator::Cr);
        assert_eq!(LineSeparator::detect("ab"), LineSeparator::None);
        assert_eq!(LineSeparator::detect("a\nb\r\n"), LineSeparator::Mixed);
    }

    #[test]
    fn test_line_separator_from_str() {
        assert_eq!("CRLF".parse::<LineSeparator>(), Ok(LineSeparator::CrLf));
        assert!("tab".parse::<LineSeparator>().is_err());
    }

    #[test]
    fn test_line_separator_serde_names() {
        let json = serde_json::to_string(&LineSeparator::CrLf).unwrap();
        assert_eq!(json, "\"crlf\"");
    }
}
