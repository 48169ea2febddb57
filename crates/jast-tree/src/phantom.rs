// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Phantom node classification.
//!
//! A phantom node is one that does not correspond to source text: it was
//! synthesized, or spliced into a place whose extent does not contain its
//! own. A node is phantom when
//!
//! - it has no extent, or
//! - its parent has an extent that does not contain the node's extent, or
//! - one of its ancestors within the lookup depth is phantom.
//!
//! The answer is cached on the node and dropped when the node changes
//! parent. Caches of descendants are left alone.

use jast_core::AstResult;
use tracing::debug;

use crate::arena::NodeId;
use crate::ast::Ast;
use crate::data::DataKey;
use crate::observer::{AstObserver, Deferred, ObserverId, ParentChange, Propagation};

struct PhantomKey;

impl DataKey for PhantomKey {
    type Value = bool;
}

/// Drops the cached classification of a node that changed parent.
struct PhantomInvalidator;

impl AstObserver for PhantomInvalidator {
    fn parent_change(&mut self, _ast: &Ast, change: &ParentChange, deferred: &mut Deferred) {
        let node = change.node;
        deferred.push(move |ast| {
            if ast.is_live(node) {
                ast.remove_data::<PhantomKey>(node)?;
            }
            Ok(())
        });
    }
}

impl Ast {
    /// Whether `node` is phantom. The result is cached until the node is
    /// moved to a different parent.
    pub fn is_phantom(&mut self, node: NodeId) -> AstResult<bool> {
        self.node(node)?;
        if let Some(&cached) = self.find_data::<PhantomKey>(node) {
            return Ok(cached);
        }
        let phantom = self.classify_phantom(node)?;
        self.set_data::<PhantomKey>(node, phantom)?;
        let invalidator = self.phantom_invalidator();
        if !self.is_registered(node, invalidator) {
            self.observe(node, invalidator, Propagation::JustThisNode)?;
        }
        debug!("phantom cache fill: {} -> {}", node, phantom);
        Ok(phantom)
    }

    /// Whether the phantom classification of `node` is currently cached.
    pub fn is_phantom_cached(&self, node: NodeId) -> bool {
        self.contains_data::<PhantomKey>(node)
    }

    fn phantom_invalidator(&mut self) -> ObserverId {
        match self.observers.phantom_invalidator {
            Some(id) => id,
            None => {
                let id = self.add_observer(PhantomInvalidator);
                self.observers.phantom_invalidator = Some(id);
                id
            }
        }
    }

    fn classify_phantom(&mut self, node: NodeId) -> AstResult<bool> {
        let Some(range) = self.range(node) else {
            return Ok(true);
        };
        if let Some(parent_range) = self.parent(node).and_then(|p| self.range(p)) {
            if !parent_range.contains(&range) {
                return Ok(true);
            }
        }
        let depth = self.options.phantom_lookup_depth;
        self.in_phantom_node(node, depth)
    }

    /// Whether an ancestor within `levels` steps is phantom.
    fn in_phantom_node(&mut self, node: NodeId, levels: usize) -> AstResult<bool> {
        if levels == 0 {
            return Ok(false);
        }
        match self.parent(node) {
            Some(parent) => Ok(self.is_phantom(parent)? || self.in_phantom_node(parent, levels - 1)?),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{NameExpr, ReturnStmt, SimpleName};
    use jast_core::TextRange;

    #[test]
    fn test_node_without_range_is_phantom() {
        let mut ast = Ast::new();
        let name = ast.create(SimpleName::new("x".into())).unwrap();
        assert!(ast.is_phantom(name).unwrap());
        assert!(ast.is_phantom_cached(name));
    }

    #[test]
    fn test_contained_node_is_not_phantom() {
        let mut ast = Ast::new();
        let name = ast.create(SimpleName::new("x".into())).unwrap();
        let expr = ast.create(NameExpr::new(name)).unwrap();
        ast.set_range(expr, Some(TextRange::of(1, 1, 1, 5))).unwrap();
        ast.set_range(name, Some(TextRange::of(1, 1, 1, 1))).unwrap();
        assert!(!ast.is_phantom(name).unwrap());
        assert!(!ast.is_phantom(expr).unwrap());
    }

    #[test]
    fn test_escaping_range_is_phantom() {
        let mut ast = Ast::new();
        let name = ast.create(SimpleName::new("x".into())).unwrap();
        let expr = ast.create(NameExpr::new(name)).unwrap();
        ast.set_range(expr, Some(TextRange::of(1, 1, 1, 5))).unwrap();
        ast.set_range(name, Some(TextRange::of(7, 1, 7, 1))).unwrap();
        assert!(ast.is_phantom(name).unwrap());
    }

    #[test]
    fn test_invalidator_is_shared() {
        let mut ast = Ast::new();
        let a = ast.create(SimpleName::new("a".into())).unwrap();
        let b = ast.create(SimpleName::new("b".into())).unwrap();
        ast.is_phantom(a).unwrap();
        ast.is_phantom(b).unwrap();
        let id = ast.observers.phantom_invalidator.unwrap();
        assert!(ast.is_registered(a, id));
        assert!(ast.is_registered(b, id));
        assert!(ast.observers_of(a).is_empty());
    }

    #[test]
    fn test_invalidator_cannot_be_taken() {
        let mut ast = Ast::new();
        let name = ast.create(SimpleName::new("x".into())).unwrap();
        let x = ast.create(NameExpr::new(name)).unwrap();
        ast.set_range(x, Some(TextRange::of(1, 8, 1, 8))).unwrap();
        let first = ast.create(ReturnStmt::new(Some(x))).unwrap();
        ast.set_range(first, Some(TextRange::of(1, 1, 1, 9))).unwrap();
        let second = ast.create(ReturnStmt::new(None)).unwrap();
        ast.set_range(second, Some(TextRange::of(5, 1, 5, 9))).unwrap();
        assert!(!ast.is_phantom(x).unwrap());

        let id = ast.observers.phantom_invalidator.unwrap();
        assert!(ast.take_observer(id).is_none());
        assert!(ast.is_registered(x, id));

        // Still invalidated on a move.
        ast.set_child(second, ReturnStmt::EXPRESSION, Some(x)).unwrap();
        assert!(!ast.is_phantom_cached(x));
        assert!(ast.is_phantom(x).unwrap());
    }
}
