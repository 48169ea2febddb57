// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Finding nodes by kind, predicate and position.

use jast_core::{AstResult, TextRange};

use crate::arena::NodeId;
use crate::ast::Ast;
use crate::nodes::{AstNode, Category, SyntaxKind};
use crate::traversal::TraversalOrder;

/// Selects nodes by their kind.
pub trait KindFilter {
    fn matches(&self, kind: SyntaxKind) -> bool;
}

/// Matches every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyKind;

impl KindFilter for AnyKind {
    fn matches(&self, _kind: SyntaxKind) -> bool {
        true
    }
}

impl KindFilter for SyntaxKind {
    fn matches(&self, kind: SyntaxKind) -> bool {
        *self == kind
    }
}

impl KindFilter for Category {
    fn matches(&self, kind: SyntaxKind) -> bool {
        self.accepts(kind)
    }
}

impl KindFilter for [SyntaxKind] {
    fn matches(&self, kind: SyntaxKind) -> bool {
        self.contains(&kind)
    }
}

impl<const N: usize> KindFilter for [SyntaxKind; N] {
    fn matches(&self, kind: SyntaxKind) -> bool {
        self.contains(&kind)
    }
}

impl<F: KindFilter + ?Sized> KindFilter for &F {
    fn matches(&self, kind: SyntaxKind) -> bool {
        (**self).matches(kind)
    }
}

impl Ast {
    fn kind_matches(&self, id: NodeId, filter: &(impl KindFilter + ?Sized)) -> bool {
        self.syntax_kind(id).is_some_and(|k| filter.matches(k))
    }

    /// Every node in the subtree (including `root`) matching `filter`, in pre-order.
    pub fn find_all(&self, root: NodeId, filter: impl KindFilter) -> Vec<NodeId> {
        self.find_all_in(root, filter, TraversalOrder::PreOrder)
    }

    /// Every node visited by `order` from `root` that matches `filter`.
    pub fn find_all_in(
        &self,
        root: NodeId,
        filter: impl KindFilter,
        order: TraversalOrder,
    ) -> Vec<NodeId> {
        self.traverse(root, order)
            .filter(|id| self.kind_matches(*id, &filter))
            .collect()
    }

    /// Every node visited by `order` matching both `filter` and `predicate`.
    pub fn find_all_matching(
        &self,
        root: NodeId,
        filter: impl KindFilter,
        order: TraversalOrder,
        mut predicate: impl FnMut(&Ast, NodeId) -> bool,
    ) -> Vec<NodeId> {
        self.traverse(root, order)
            .filter(|id| self.kind_matches(*id, &filter) && predicate(self, *id))
            .collect()
    }

    /// Every node of type `T` in the subtree, in pre-order.
    pub fn find_all_of<T: AstNode>(&self, root: NodeId) -> Vec<NodeId> {
        self.find_all(root, T::KIND)
    }

    /// The first node in pre-order matching `filter` and `predicate`.
    ///
    /// Stops at the first match.
    pub fn find_first(
        &self,
        root: NodeId,
        filter: impl KindFilter,
        mut predicate: impl FnMut(&Ast, NodeId) -> bool,
    ) -> Option<NodeId> {
        self.pre_order(root)
            .find(|id| self.kind_matches(*id, &filter) && predicate(self, *id))
    }

    /// The first node of type `T` in pre-order whose payload satisfies `predicate`.
    pub fn find_first_of<T: AstNode>(
        &self,
        root: NodeId,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> Option<NodeId> {
        self.pre_order(root)
            .find(|id| self.cast::<T>(*id).is_some_and(&mut predicate))
    }

    /// The nearest proper ancestor matching `filter` and `predicate`.
    pub fn find_ancestor(
        &self,
        node: NodeId,
        filter: impl KindFilter,
        mut predicate: impl FnMut(&Ast, NodeId) -> bool,
    ) -> Option<NodeId> {
        self.parents(node)
            .find(|id| self.kind_matches(*id, &filter) && predicate(self, *id))
    }

    /// The nearest proper ancestor of type `T`.
    pub fn find_ancestor_of<T: AstNode>(&self, node: NodeId) -> Option<NodeId> {
        self.find_ancestor(node, T::KIND, |_, _| true)
    }

    /// The innermost non-phantom node under `root` whose extent contains `range`.
    ///
    /// Descends from `root` into the first child containing the range, so a
    /// node without an extent hides its subtree. Returns `None` when `root`
    /// itself does not contain the range.
    pub fn find_by_range(&mut self, root: NodeId, range: TextRange) -> AstResult<Option<NodeId>> {
        self.node(root)?;
        if !self.contains_range(root, &range)? {
            return Ok(None);
        }
        let mut current = root;
        'descend: loop {
            for child in self.children(current).to_vec() {
                if self.contains_range(child, &range)? {
                    current = child;
                    continue 'descend;
                }
            }
            return Ok(Some(current));
        }
    }

    fn contains_range(&mut self, node: NodeId, range: &TextRange) -> AstResult<bool> {
        if self.is_phantom(node)? {
            return Ok(false);
        }
        Ok(self.range(node).is_some_and(|r| r.contains(range)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{ExpressionStmt, NameExpr, SimpleName};

    fn stmt(ast: &mut Ast, id: &str) -> NodeId {
        let name = ast.create(SimpleName::new(id.into())).unwrap();
        let expr = ast.create(NameExpr::new(name)).unwrap();
        ast.create(ExpressionStmt::new(expr)).unwrap()
    }

    #[test]
    fn test_find_all_by_kind_and_category() {
        let mut ast = Ast::new();
        let root = stmt(&mut ast, "x");
        assert_eq!(ast.find_all(root, SyntaxKind::SimpleName).len(), 1);
        assert_eq!(ast.find_all(root, Category::Expression).len(), 1);
        assert_eq!(ast.find_all(root, AnyKind).len(), 3);
        assert_eq!(
            ast.find_all(root, [SyntaxKind::SimpleName, SyntaxKind::NameExpr])
                .len(),
            2
        );
        assert_eq!(ast.find_all_of::<ExpressionStmt>(root), vec![root]);
    }

    #[test]
    fn test_find_first_of_with_predicate() {
        let mut ast = Ast::new();
        let root = stmt(&mut ast, "x");
        let hit = ast.find_first_of::<SimpleName>(root, |n| n.identifier() == "x");
        assert!(hit.is_some());
        let miss = ast.find_first_of::<SimpleName>(root, |n| n.identifier() == "y");
        assert_eq!(miss, None);
    }

    #[test]
    fn test_find_ancestor() {
        let mut ast = Ast::new();
        let root = stmt(&mut ast, "x");
        let name = ast.find_all_of::<SimpleName>(root)[0];
        assert_eq!(ast.find_ancestor_of::<ExpressionStmt>(name), Some(root));
        assert_eq!(ast.find_ancestor(name, Category::Statement, |_, _| false), None);
    }
}
