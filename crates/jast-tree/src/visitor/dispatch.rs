// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Entry points and walk functions for the visitor traits.
//!
//! # Visit order
//!
//! Every walk visits the children of a node in the order returned by
//! [`Ast::visit_order`]: declared properties in declaration order (list
//! properties expanded element by element), then the extension comments,
//! then the comment.
//!
//! # Control Flow
//!
//! For [`Visitor`], the `VisitResult` returned by `visit_*` controls traversal:
//! - `Continue`: Visit children, then call `leave_*`
//! - `SkipChildren`: Skip children, but still call `leave_*`
//! - `Stop`: Stop immediately, no more `visit_*` or `leave_*` calls

use jast_core::{AstError, AstResult};

use super::traits::{
    dispatch_generic, dispatch_leave, dispatch_list, dispatch_visit, GenericVisitor,
    ListVisitor, VisitResult, Visitor,
};
use crate::arena::NodeId;
use crate::ast::Ast;

impl Ast {
    /// Dispatch `id` to the method of `visitor` for its variant.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale. Children reached from a live node are
    /// always live; use [`Ast::try_accept`] for handles of unknown provenance.
    pub fn accept<A, V>(&self, id: NodeId, visitor: &mut V, arg: &mut A) -> V::Output
    where
        V: GenericVisitor<A> + ?Sized,
    {
        match self.get(id) {
            Some(data) => dispatch_generic(visitor, self, id, &data.kind, arg),
            None => panic!("stale handle {id}"),
        }
    }

    /// Like [`Ast::accept`], failing on a stale handle.
    pub fn try_accept<A, V>(&self, id: NodeId, visitor: &mut V, arg: &mut A) -> AstResult<V::Output>
    where
        V: GenericVisitor<A> + ?Sized,
    {
        let data = self.get(id).ok_or_else(|| AstError::stale(id))?;
        Ok(dispatch_generic(visitor, self, id, &data.kind, arg))
    }

    /// Dispatch every child of `id`, in visit order.
    pub fn accept_children<A, V>(&self, id: NodeId, visitor: &mut V, arg: &mut A) -> Vec<V::Output>
    where
        V: GenericVisitor<A> + ?Sized,
    {
        self.visit_order(id)
            .into_iter()
            .map(|child| self.accept(child, visitor, arg))
            .collect()
    }

    /// Walk the subtree at `root` with a side-effect visitor.
    ///
    /// Returns `Stop` if the visitor stopped the walk. A stale root visits
    /// nothing.
    pub fn visit<A, V>(&self, root: NodeId, visitor: &mut V, arg: &mut A) -> VisitResult
    where
        V: Visitor<A> + ?Sized,
    {
        walk_node(visitor, self, root, arg)
    }

    /// Collect the items a list visitor produces for the subtree at `id`.
    pub fn accept_list<A, V>(&self, id: NodeId, visitor: &mut V, arg: &mut A) -> Vec<V::Item>
    where
        V: ListVisitor<A> + ?Sized,
    {
        match self.get(id) {
            Some(data) => dispatch_list(visitor, self, id, &data.kind, arg),
            None => Vec::new(),
        }
    }
}

/// Walk one node and its subtree.
///
/// Calls `enter_node`, the variant's `visit_*`, the children, the variant's
/// `leave_*` and `exit_node`, honoring the returned [`VisitResult`].
pub fn walk_node<A, V>(visitor: &mut V, ast: &Ast, id: NodeId, arg: &mut A) -> VisitResult
where
    V: Visitor<A> + ?Sized,
{
    let Some(data) = ast.get(id) else {
        return VisitResult::Continue;
    };
    let result = match visitor.enter_node(ast, id, arg) {
        VisitResult::Continue => dispatch_visit(visitor, ast, id, &data.kind, arg),
        other => other,
    };
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for child in ast.visit_order(id) {
                if walk_node(visitor, ast, child, arg) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    dispatch_leave(visitor, ast, id, &data.kind, arg);
    visitor.exit_node(ast, id, arg);
    VisitResult::Continue
}

/// Concatenate the items of every child of `id`, in visit order.
///
/// Absent optional children contribute nothing.
pub fn walk_list<A, V>(visitor: &mut V, ast: &Ast, id: NodeId, arg: &mut A) -> Vec<V::Item>
where
    V: ListVisitor<A> + ?Sized,
{
    let mut items = Vec::new();
    for child in ast.visit_order(id) {
        items.extend(ast.accept_list(child, visitor, arg));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{
        BinaryExpr, BinaryOperator, ExpressionStmt, LineComment, NameExpr, SimpleName,
    };

    /// `a + b;` with a comment on the statement.
    fn tree(ast: &mut Ast) -> NodeId {
        let a = ast.create(SimpleName::new("a".into())).unwrap();
        let a = ast.create(NameExpr::new(a)).unwrap();
        let b = ast.create(SimpleName::new("b".into())).unwrap();
        let b = ast.create(NameExpr::new(b)).unwrap();
        let sum = ast
            .create(BinaryExpr::new(a, b, BinaryOperator::Plus))
            .unwrap();
        let stmt = ast.create(ExpressionStmt::new(sum)).unwrap();
        let comment = ast.create(LineComment::new(" sum".into())).unwrap();
        ast.set_comment(stmt, Some(comment)).unwrap();
        stmt
    }

    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
        skip_binary: bool,
        stop_at: Option<&'static str>,
    }

    impl Visitor<()> for Trace {
        fn visit_simple_name(
            &mut self,
            _ast: &Ast,
            _id: NodeId,
            node: &SimpleName,
            _arg: &mut (),
        ) -> VisitResult {
            self.events.push(format!("visit {}", node.identifier()));
            if self.stop_at == Some(node.identifier().as_str()) {
                return VisitResult::Stop;
            }
            VisitResult::Continue
        }

        fn visit_binary_expr(
            &mut self,
            _ast: &Ast,
            _id: NodeId,
            _node: &BinaryExpr,
            _arg: &mut (),
        ) -> VisitResult {
            self.events.push("visit binary".into());
            if self.skip_binary {
                VisitResult::SkipChildren
            } else {
                VisitResult::Continue
            }
        }

        fn leave_binary_expr(&mut self, _ast: &Ast, _id: NodeId, _node: &BinaryExpr, _arg: &mut ()) {
            self.events.push("leave binary".into());
        }

        fn visit_line_comment(
            &mut self,
            _ast: &Ast,
            _id: NodeId,
            _node: &LineComment,
            _arg: &mut (),
        ) -> VisitResult {
            self.events.push("visit comment".into());
            VisitResult::Continue
        }
    }

    #[test]
    fn test_walk_visits_comment_last() {
        let mut ast = Ast::new();
        let stmt = tree(&mut ast);
        let mut trace = Trace::default();
        assert_eq!(ast.visit(stmt, &mut trace, &mut ()), VisitResult::Continue);
        assert_eq!(
            trace.events,
            vec!["visit binary", "visit a", "visit b", "leave binary", "visit comment"]
        );
    }

    #[test]
    fn test_skip_children_still_leaves() {
        let mut ast = Ast::new();
        let stmt = tree(&mut ast);
        let mut trace = Trace {
            skip_binary: true,
            ..Trace::default()
        };
        ast.visit(stmt, &mut trace, &mut ());
        assert_eq!(
            trace.events,
            vec!["visit binary", "leave binary", "visit comment"]
        );
    }

    #[test]
    fn test_stop_ends_walk() {
        let mut ast = Ast::new();
        let stmt = tree(&mut ast);
        let mut trace = Trace {
            stop_at: Some("a"),
            ..Trace::default()
        };
        assert_eq!(ast.visit(stmt, &mut trace, &mut ()), VisitResult::Stop);
        assert_eq!(trace.events, vec!["visit binary", "visit a"]);
    }

    struct Names;

    impl ListVisitor<()> for Names {
        type Item = String;

        fn visit_simple_name(
            &mut self,
            _ast: &Ast,
            _id: NodeId,
            node: &SimpleName,
            _arg: &mut (),
        ) -> Vec<String> {
            vec![node.identifier().clone()]
        }
    }

    #[test]
    fn test_list_visitor_flattens_in_visit_order() {
        let mut ast = Ast::new();
        let stmt = tree(&mut ast);
        assert_eq!(ast.accept_list(stmt, &mut Names, &mut ()), vec!["a", "b"]);
    }

    struct Count;

    impl GenericVisitor<()> for Count {
        type Output = usize;

        fn visit_node(&mut self, ast: &Ast, id: NodeId, arg: &mut ()) -> usize {
            1 + ast.accept_children(id, self, arg).into_iter().sum::<usize>()
        }
    }

    #[test]
    fn test_generic_visitor_combines_children() {
        let mut ast = Ast::new();
        let stmt = tree(&mut ast);
        // stmt, binary, 2 x (name expr, simple name), comment
        assert_eq!(ast.accept(stmt, &mut Count, &mut ()), 7);
    }

    #[test]
    fn test_try_accept_stale_handle() {
        let mut ast = Ast::new();
        let stmt = tree(&mut ast);
        ast.collect_garbage(&[]);
        assert!(ast.try_accept(stmt, &mut Count, &mut ()).is_err());
    }
}
