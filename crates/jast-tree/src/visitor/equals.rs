// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Deep structural equality.
//!
//! Two nodes are equal when they are the same variant and every declared
//! property compares equal: attributes by value, child nodes and lists by
//! recursive dispatch. Extension comments and the comment are compared last
//! unless comments are ignored. Extents, parse status, orphan comments and
//! extension data never take part.

use super::traits::GenericVisitor;
use crate::arena::{NodeId, NodeListId};
use crate::ast::Ast;
use crate::nodes::SlotRef;

/// Compares a node of one tree against a node of `other`, passed as the
/// visitor argument. Both nodes may live in the same [`Ast`].
pub struct EqualsVisitor<'o> {
    other: &'o Ast,
    compare_comments: bool,
}

impl<'o> EqualsVisitor<'o> {
    pub fn new(other: &'o Ast) -> Self {
        EqualsVisitor {
            other,
            compare_comments: true,
        }
    }

    /// An equality that skips the comment and extension comments.
    pub fn ignoring_comments(other: &'o Ast) -> Self {
        EqualsVisitor {
            other,
            compare_comments: false,
        }
    }

    /// Whether `left` (in `ast`) equals `right` (in the other tree).
    pub fn equals(&mut self, ast: &Ast, left: NodeId, right: NodeId) -> bool {
        self.node_eq(ast, Some(left), Some(right))
    }

    fn node_eq(&mut self, ast: &Ast, left: Option<NodeId>, right: Option<NodeId>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(left), Some(mut right)) => ast.is_live(left) && ast.accept(left, self, &mut right),
            _ => false,
        }
    }

    fn list_eq(&mut self, ast: &Ast, left: Option<NodeListId>, right: Option<NodeListId>) -> bool {
        let other = self.other;
        match (left, right) {
            (None, None) => true,
            (Some(left), Some(right)) => {
                let left = ast.items(left);
                let right = other.items(right);
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(right)
                        .all(|(l, r)| self.node_eq(ast, Some(*l), Some(*r)))
            }
            _ => false,
        }
    }
}

impl GenericVisitor<NodeId> for EqualsVisitor<'_> {
    type Output = bool;

    fn visit_node(&mut self, ast: &Ast, id: NodeId, other_id: &mut NodeId) -> bool {
        let other = self.other;
        let (Some(left), Some(right)) = (ast.get(id), other.get(*other_id)) else {
            return false;
        };
        if left.syntax_kind() != right.syntax_kind() {
            return false;
        }
        for ((_, l), (_, r)) in left.kind.slots().into_iter().zip(right.kind.slots()) {
            let equal = match (l, r) {
                (SlotRef::Node(l), SlotRef::Node(r)) => self.node_eq(ast, Some(l), Some(r)),
                (SlotRef::OptNode(l), SlotRef::OptNode(r)) => self.node_eq(ast, l, r),
                (SlotRef::List(l), SlotRef::List(r)) => self.list_eq(ast, Some(l), Some(r)),
                (SlotRef::OptList(l), SlotRef::OptList(r)) => self.list_eq(ast, l, r),
                (SlotRef::Attr(l), SlotRef::Attr(r)) => l.attr_eq(r),
                _ => false,
            };
            if !equal {
                return false;
            }
        }
        if self.compare_comments {
            return self.list_eq(ast, left.extension_comments, right.extension_comments)
                && self.node_eq(ast, left.comment, right.comment);
        }
        true
    }
}

impl Ast {
    /// Deep structural equality of two nodes of this tree.
    pub fn structurally_equal(&self, left: NodeId, right: NodeId) -> bool {
        EqualsVisitor::new(self).equals(self, left, right)
    }

    /// Deep structural equality against a node of another tree.
    pub fn structurally_equal_to(&self, left: NodeId, other: &Ast, right: NodeId) -> bool {
        EqualsVisitor::new(other).equals(self, left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{BinaryExpr, BinaryOperator, IntegerLiteralExpr, LineComment, NameExpr, SimpleName};

    fn sum(ast: &mut Ast, left: &str, op: BinaryOperator) -> NodeId {
        let name = ast.create(SimpleName::new(left.into())).unwrap();
        let name = ast.create(NameExpr::new(name)).unwrap();
        let one = ast.create(IntegerLiteralExpr::new("1".into())).unwrap();
        ast.create(BinaryExpr::new(name, one, op)).unwrap()
    }

    #[test]
    fn test_equal_trees() {
        let mut ast = Ast::new();
        let a = sum(&mut ast, "x", BinaryOperator::Plus);
        let b = sum(&mut ast, "x", BinaryOperator::Plus);
        assert!(ast.structurally_equal(a, b));
        assert!(ast.structurally_equal(a, a));
    }

    #[test]
    fn test_attribute_difference() {
        let mut ast = Ast::new();
        let a = sum(&mut ast, "x", BinaryOperator::Plus);
        let b = sum(&mut ast, "y", BinaryOperator::Plus);
        let c = sum(&mut ast, "x", BinaryOperator::Minus);
        assert!(!ast.structurally_equal(a, b));
        assert!(!ast.structurally_equal(a, c));
    }

    #[test]
    fn test_different_variants_are_unequal() {
        let mut ast = Ast::new();
        let a = sum(&mut ast, "x", BinaryOperator::Plus);
        let one = ast.create(IntegerLiteralExpr::new("1".into())).unwrap();
        assert!(!ast.structurally_equal(a, one));
    }

    #[test]
    fn test_comments_can_be_ignored() {
        let mut ast = Ast::new();
        let a = sum(&mut ast, "x", BinaryOperator::Plus);
        let b = sum(&mut ast, "x", BinaryOperator::Plus);
        let comment = ast.create(LineComment::new(" note".into())).unwrap();
        ast.set_comment(b, Some(comment)).unwrap();
        assert!(!ast.structurally_equal(a, b));
        assert!(EqualsVisitor::ignoring_comments(&ast).equals(&ast, a, b));
    }

    #[test]
    fn test_equal_across_trees() {
        let mut left = Ast::new();
        let mut right = Ast::new();
        let a = sum(&mut left, "x", BinaryOperator::Plus);
        let b = sum(&mut right, "x", BinaryOperator::Plus);
        assert!(left.structurally_equal_to(a, &right, b));
    }
}
