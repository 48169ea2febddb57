// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tree-wide configuration.

use jast_core::LineSeparator;
use serde::{Deserialize, Serialize};

/// Configuration shared by every node of an [`Ast`](crate::Ast).
///
/// All fields have defaults, so a partial JSON document deserializes into a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstOptions {
    /// How many ancestors the phantom check inspects above a node's parent.
    pub phantom_lookup_depth: usize,
    /// Line separator reported for trees that never recorded one.
    pub default_line_separator: LineSeparator,
    /// Node slots to reserve up front.
    pub initial_capacity: usize,
}

impl Default for AstOptions {
    fn default() -> Self {
        AstOptions {
            phantom_lookup_depth: 3,
            default_line_separator: LineSeparator::system(),
            initial_capacity: 64,
        }
    }
}

impl AstOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phantom_lookup_depth(mut self, depth: usize) -> Self {
        self.phantom_lookup_depth = depth;
        self
    }

    pub fn with_default_line_separator(mut self, separator: LineSeparator) -> Self {
        self.default_line_separator = separator;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AstOptions::default();
        assert_eq!(options.phantom_lookup_depth, 3);
        assert_eq!(options.default_line_separator, LineSeparator::system());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: AstOptions =
            serde_json::from_str(r#"{"default_line_separator": "crlf"}"#).unwrap();
        assert_eq!(options.default_line_separator, LineSeparator::CrLf);
        assert_eq!(options.phantom_lookup_depth, 3);
        assert_eq!(options.initial_capacity, 64);
    }

    #[test]
    fn test_builder() {
        let options = AstOptions::new()
            .with_phantom_lookup_depth(1)
            .with_initial_capacity(0);
        assert_eq!(options.phantom_lookup_depth, 1);
        assert_eq!(options.initial_capacity, 0);
    }
}
