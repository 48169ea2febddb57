//! Tokens and token ranges.
//!
//! The tokenizer itself lives outside this workspace; these types are the
//! shape in which it hands token extents to the tree. A [`TokenRange`] spans
//! from its first to its last token inclusive, and yields a character
//! [`TextRange`] only when both endpoint tokens carry a position.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::TextRange;

/// A single token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Tokenizer-specific kind number.
    pub kind: u16,
    /// Source text of the token.
    pub text: String,
    /// Character extent, absent for synthesized tokens.
    pub range: Option<TextRange>,
}

impl Token {
    /// Create a token backed by source text.
    pub fn new(kind: u16, text: impl Into<String>, range: TextRange) -> Self {
        Token {
            kind,
            text: text.into(),
            range: Some(range),
        }
    }

    /// Create a token that does not come from source text.
    pub fn synthesized(kind: u16, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
            range: None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The first and last token of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRange {
    /// First token covered.
    pub begin: Token,
    /// Last token covered.
    pub end: Token,
}

impl TokenRange {
    /// Create a new token range.
    pub fn new(begin: Token, end: Token) -> Self {
        TokenRange { begin, end }
    }

    /// A range consisting of one token.
    pub fn single(token: Token) -> Self {
        TokenRange {
            begin: token.clone(),
            end: token,
        }
    }

    /// The character range from the start of `begin` to the end of `end`.
    ///
    /// Absent unless both endpoint tokens have a position.
    pub fn to_range(&self) -> Option<TextRange> {
        match (&self.begin.range, &self.end.range) {
            (Some(begin), Some(end)) => Some(TextRange::new(begin.begin, end.end)),
            _ => None,
        }
    }

    /// Same range with a new first token.
    pub fn with_begin(self, begin: Token) -> Self {
        TokenRange { begin, ..self }
    }

    /// Same range with a new last token.
    pub fn with_end(self, end: Token) -> Self {
        TokenRange { end, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_range_derives_text_range() {
        let tokens = TokenRange::new(
            Token::new(1, "foo", TextRange::of(2, 5, 2, 7)),
            Token::new(2, ";", TextRange::of(3, 1, 3, 1)),
        );
        assert_eq!(tokens.to_range(), Some(TextRange::of(2, 5, 3, 1)));
    }

    #[test]
    fn test_token_range_without_positions_has_no_range() {
        let tokens = TokenRange::new(
            Token::new(1, "foo", TextRange::of(2, 5, 2, 7)),
            Token::synthesized(2, ";"),
        );
        assert_eq!(tokens.to_range(), None);
    }
}
