// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Deep structural hash, consistent with [`EqualsVisitor`].
//!
//! Walks properties in the same order as equality and folds each part in
//! with `hash * 31 + part`. Absent values hash to 0; a list folds its
//! elements starting from 1 so that element order matters.
//!
//! [`EqualsVisitor`]: super::EqualsVisitor

use super::traits::GenericVisitor;
use crate::arena::{NodeId, NodeListId};
use crate::ast::Ast;
use crate::nodes::SlotRef;

const MIX: u64 = 31;

fn mix(hash: u64, part: u64) -> u64 {
    hash.wrapping_mul(MIX).wrapping_add(part)
}

/// Computes the structural hash of a subtree.
#[derive(Debug, Clone, Copy)]
pub struct HashVisitor {
    include_comments: bool,
}

impl Default for HashVisitor {
    fn default() -> Self {
        HashVisitor::new()
    }
}

impl HashVisitor {
    pub fn new() -> Self {
        HashVisitor {
            include_comments: true,
        }
    }

    /// A hash consistent with `EqualsVisitor::ignoring_comments`.
    pub fn ignoring_comments() -> Self {
        HashVisitor {
            include_comments: false,
        }
    }

    pub fn hash(&mut self, ast: &Ast, node: NodeId) -> u64 {
        self.hash_node(ast, Some(node))
    }

    fn hash_node(&mut self, ast: &Ast, node: Option<NodeId>) -> u64 {
        match node {
            Some(node) if ast.is_live(node) => ast.accept(node, self, &mut ()),
            _ => 0,
        }
    }

    fn hash_list(&mut self, ast: &Ast, list: Option<NodeListId>) -> u64 {
        let Some(list) = list else {
            return 0;
        };
        ast.items(list)
            .iter()
            .fold(1, |hash, item| mix(hash, self.hash_node(ast, Some(*item))))
    }
}

impl GenericVisitor<()> for HashVisitor {
    type Output = u64;

    fn visit_node(&mut self, ast: &Ast, id: NodeId, _arg: &mut ()) -> u64 {
        let Some(data) = ast.get(id) else {
            return 0;
        };
        let mut hash = data.syntax_kind() as u64;
        for (_, slot) in data.kind.slots() {
            let part = match slot {
                SlotRef::Node(child) => self.hash_node(ast, Some(child)),
                SlotRef::OptNode(child) => self.hash_node(ast, child),
                SlotRef::List(list) => self.hash_list(ast, Some(list)),
                SlotRef::OptList(list) => self.hash_list(ast, list),
                SlotRef::Attr(value) => value.attr_hash(),
            };
            hash = mix(hash, part);
        }
        if self.include_comments {
            hash = mix(hash, self.hash_list(ast, data.extension_comments));
            hash = mix(hash, self.hash_node(ast, data.comment));
        }
        hash
    }
}

impl Ast {
    /// Structural hash of the subtree at `node`; equal subtrees hash equal.
    pub fn structural_hash(&self, node: NodeId) -> u64 {
        HashVisitor::new().hash(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{ArrayInitializerExpr, IntegerLiteralExpr, LineComment};

    fn array(ast: &mut Ast, values: &[&str]) -> NodeId {
        let items: Vec<NodeId> = values
            .iter()
            .map(|v| ast.create(IntegerLiteralExpr::new((*v).into())).unwrap())
            .collect();
        let list = ast.new_list(items).unwrap();
        ast.create(ArrayInitializerExpr::new(list)).unwrap()
    }

    #[test]
    fn test_equal_trees_hash_equal() {
        let mut ast = Ast::new();
        let a = array(&mut ast, &["1", "2"]);
        let b = array(&mut ast, &["1", "2"]);
        assert!(ast.structurally_equal(a, b));
        assert_eq!(ast.structural_hash(a), ast.structural_hash(b));
    }

    #[test]
    fn test_order_sensitive() {
        let mut ast = Ast::new();
        let a = array(&mut ast, &["1", "2"]);
        let b = array(&mut ast, &["2", "1"]);
        assert_ne!(ast.structural_hash(a), ast.structural_hash(b));
    }

    #[test]
    fn test_comment_insensitive_mode() {
        let mut ast = Ast::new();
        let a = array(&mut ast, &["1"]);
        let b = array(&mut ast, &["1"]);
        let comment = ast.create(LineComment::new(" c".into())).unwrap();
        ast.set_comment(b, Some(comment)).unwrap();
        assert_ne!(ast.structural_hash(a), ast.structural_hash(b));
        let mut hasher = HashVisitor::ignoring_comments();
        assert_eq!(hasher.hash(&ast, a), hasher.hash(&ast, b));
    }
}
