//! Core primitives for jast.
//!
//! This crate provides the language-agnostic building blocks of the tree:
//! - Error types and error classification
//! - Source positions, inclusive text ranges and line separators
//! - Tokens and token ranges handed over by the tokenizer

pub mod error;
pub mod text;
pub mod tokens;

pub use error::{AstError, AstResult, ErrorKind};
pub use text::{LineSeparator, Position, TextRange};
pub use tokens::{Token, TokenRange};
