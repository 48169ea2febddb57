// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tree traversal iterators.
//!
//! All iterators follow the children view (order of arrival), start lazily,
//! and stay exhausted once they return `None`. A stale start handle yields
//! an empty traversal.
//!
//! ```text
//! PreOrder       node, then each child subtree
//! PostOrder      each child subtree, then node
//! BreadthFirst   level by level
//! Parents        parent, grandparent, ... (excludes the start node)
//! DirectChildren the children of the start node
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use jast_core::AstError;

use crate::arena::NodeId;
use crate::ast::Ast;

/// Traversal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    PreOrder,
    PostOrder,
    BreadthFirst,
    Parents,
    DirectChildren,
}

impl TraversalOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::PreOrder => "pre_order",
            TraversalOrder::PostOrder => "post_order",
            TraversalOrder::BreadthFirst => "breadth_first",
            TraversalOrder::Parents => "parents",
            TraversalOrder::DirectChildren => "direct_children",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalOrder {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "preorder" => Ok(TraversalOrder::PreOrder),
            "postorder" => Ok(TraversalOrder::PostOrder),
            "breadthfirst" => Ok(TraversalOrder::BreadthFirst),
            "parents" => Ok(TraversalOrder::Parents),
            "directchildren" => Ok(TraversalOrder::DirectChildren),
            _ => Err(AstError::invalid_argument(format!(
                "unknown traversal order '{s}'"
            ))),
        }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Depth-first, node before children.
pub struct PreOrder<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.ast.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Depth-first, children before node.
pub struct PostOrder<'a> {
    ast: &'a Ast,
    /// `(node, children already pushed)`.
    stack: Vec<(NodeId, bool)>,
}

impl Iterator for PostOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            let children = self.ast.children(id);
            if expanded || children.is_empty() {
                return Some(id);
            }
            self.stack.push((id, true));
            self.stack
                .extend(children.iter().rev().map(|c| (*c, false)));
        }
    }
}

/// Level by level, each level in children order.
pub struct BreadthFirst<'a> {
    ast: &'a Ast,
    queue: VecDeque<NodeId>,
}

impl Iterator for BreadthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.ast.children(id).iter().copied());
        Some(id)
    }
}

/// Ancestor chain, nearest first.
pub struct Parents<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Parents<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.ast.parent(id);
        Some(id)
    }
}

/// The children of one node.
pub struct DirectChildren<'a> {
    children: std::slice::Iter<'a, NodeId>,
}

impl Iterator for DirectChildren<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.children.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

/// Any of the traversal iterators, chosen at run time.
pub enum Traversal<'a> {
    PreOrder(PreOrder<'a>),
    PostOrder(PostOrder<'a>),
    BreadthFirst(BreadthFirst<'a>),
    Parents(Parents<'a>),
    DirectChildren(DirectChildren<'a>),
}

impl Iterator for Traversal<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        match self {
            Traversal::PreOrder(it) => it.next(),
            Traversal::PostOrder(it) => it.next(),
            Traversal::BreadthFirst(it) => it.next(),
            Traversal::Parents(it) => it.next(),
            Traversal::DirectChildren(it) => it.next(),
        }
    }
}

// ============================================================================
// Entry Points
// ============================================================================

impl Ast {
    fn live_start(&self, node: NodeId) -> Option<NodeId> {
        self.is_live(node).then_some(node)
    }

    pub fn pre_order(&self, node: NodeId) -> PreOrder<'_> {
        PreOrder {
            ast: self,
            stack: self.live_start(node).into_iter().collect(),
        }
    }

    pub fn post_order(&self, node: NodeId) -> PostOrder<'_> {
        PostOrder {
            ast: self,
            stack: self
                .live_start(node)
                .map(|n| (n, false))
                .into_iter()
                .collect(),
        }
    }

    pub fn breadth_first(&self, node: NodeId) -> BreadthFirst<'_> {
        BreadthFirst {
            ast: self,
            queue: self.live_start(node).into_iter().collect(),
        }
    }

    /// Ancestors of `node`, nearest first.
    pub fn parents(&self, node: NodeId) -> Parents<'_> {
        Parents {
            ast: self,
            next: self.parent(node),
        }
    }

    pub fn direct_children(&self, node: NodeId) -> DirectChildren<'_> {
        DirectChildren {
            children: self.children(node).iter(),
        }
    }

    pub fn traverse(&self, node: NodeId, order: TraversalOrder) -> Traversal<'_> {
        match order {
            TraversalOrder::PreOrder => Traversal::PreOrder(self.pre_order(node)),
            TraversalOrder::PostOrder => Traversal::PostOrder(self.post_order(node)),
            TraversalOrder::BreadthFirst => Traversal::BreadthFirst(self.breadth_first(node)),
            TraversalOrder::Parents => Traversal::Parents(self.parents(node)),
            TraversalOrder::DirectChildren => Traversal::DirectChildren(self.direct_children(node)),
        }
    }

    /// Call `f` on every node of the traversal.
    pub fn walk(&self, node: NodeId, order: TraversalOrder, mut f: impl FnMut(NodeId)) {
        for id in self.traverse(node, order) {
            f(id);
        }
    }

    // ------------------------------------------------------------------------
    // Ancestry
    // ------------------------------------------------------------------------

    /// The topmost ancestor of `node`, or `node` itself.
    pub fn find_root(&self, node: NodeId) -> NodeId {
        self.parents(node).last().unwrap_or(node)
    }

    /// Whether `ancestor` is a proper ancestor of `node`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.parents(node).any(|p| p == ancestor)
    }

    /// Whether `node` is a proper descendant of `ancestor`.
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.is_ancestor_of(ancestor, node)
    }

    /// Number of ancestors above `node`.
    pub fn depth(&self, node: NodeId) -> usize {
        self.parents(node).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{BinaryExpr, BinaryOperator, NameExpr, SimpleName};

    /// `a + b` as BinaryExpr(NameExpr(a), NameExpr(b)).
    fn binary(ast: &mut Ast) -> (NodeId, NodeId, NodeId) {
        let a = ast.create(SimpleName::new("a".into())).unwrap();
        let a = ast.create(NameExpr::new(a)).unwrap();
        let b = ast.create(SimpleName::new("b".into())).unwrap();
        let b = ast.create(NameExpr::new(b)).unwrap();
        let sum = ast
            .create(BinaryExpr::new(a, b, BinaryOperator::Plus))
            .unwrap();
        (sum, a, b)
    }

    #[test]
    fn test_orders() {
        let mut ast = Ast::new();
        let (sum, a, b) = binary(&mut ast);
        let a_name = ast.children(a)[0];
        let b_name = ast.children(b)[0];

        let pre: Vec<_> = ast.pre_order(sum).collect();
        assert_eq!(pre, vec![sum, a, a_name, b, b_name]);
        let post: Vec<_> = ast.post_order(sum).collect();
        assert_eq!(post, vec![a_name, a, b_name, b, sum]);
        let bfs: Vec<_> = ast.breadth_first(sum).collect();
        assert_eq!(bfs, vec![sum, a, b, a_name, b_name]);
        let up: Vec<_> = ast.parents(b_name).collect();
        assert_eq!(up, vec![b, sum]);
        let direct: Vec<_> = ast.direct_children(sum).collect();
        assert_eq!(direct, vec![a, b]);
    }

    #[test]
    fn test_exhausted_iterator_stays_exhausted() {
        let mut ast = Ast::new();
        let (sum, _, _) = binary(&mut ast);
        let mut it = ast.traverse(sum, TraversalOrder::PostOrder);
        assert_eq!(it.by_ref().count(), 5);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_ancestry() {
        let mut ast = Ast::new();
        let (sum, a, b) = binary(&mut ast);
        let a_name = ast.children(a)[0];
        assert_eq!(ast.find_root(a_name), sum);
        assert_eq!(ast.find_root(sum), sum);
        assert!(ast.is_ancestor_of(sum, a_name));
        assert!(!ast.is_ancestor_of(b, a_name));
        assert!(!ast.is_ancestor_of(sum, sum));
        assert!(ast.is_descendant_of(a_name, a));
        assert_eq!(ast.depth(a_name), 2);
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!(
            "breadth-first".parse::<TraversalOrder>(),
            Ok(TraversalOrder::BreadthFirst)
        );
        assert_eq!("PreOrder".parse::<TraversalOrder>(), Ok(TraversalOrder::PreOrder));
        assert!("sideways".parse::<TraversalOrder>().is_err());
    }
}
