// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definitions.
//!
//! Three traits share one dispatch: every node variant gets a method named
//! after it (`visit_if_stmt`, `visit_method_call_expr`, ...), generated from
//! the node catalogue.
//!
//! - [`GenericVisitor`] returns a value per node; every per-variant method
//!   defaults to the required `visit_node`.
//! - [`Visitor`] walks a subtree for side effects, with `visit_*` before
//!   children and `leave_*` after, steered by [`VisitResult`].
//! - [`ListVisitor`] collects items; the default for every variant is the
//!   concatenation of its children's items in visit order.

use crate::arena::NodeId;
use crate::ast::Ast;
use crate::nodes::*;

use super::dispatch::walk_list;

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// `leave_*` is still called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called.
    Stop,
}

macro_rules! define_visitor_traits {
    (
        $(
            $(#[$meta:meta])*
            $kind:ident ($snake:ident) : $cat:ident {
                $( $field:ident : $mode:ident $arg:ident ),* $(,)?
            }
        )*
    ) => {
        paste::paste! {
            /// Visitor returning a value for each node.
            pub trait GenericVisitor<A> {
                type Output;

                /// Fallback for every variant not overridden.
                fn visit_node(&mut self, ast: &Ast, id: NodeId, arg: &mut A) -> Self::Output;

                $(
                    #[doc = concat!("Visit a [`", stringify!($kind), "`] node.")]
                    #[allow(unused_variables)]
                    fn [<visit_ $snake>](
                        &mut self,
                        ast: &Ast,
                        id: NodeId,
                        node: &$kind,
                        arg: &mut A,
                    ) -> Self::Output {
                        self.visit_node(ast, id, arg)
                    }
                )*
            }

            /// Visitor walking a subtree for side effects.
            pub trait Visitor<A> {
                /// Called for every node before its `visit_*` method. Anything
                /// but `Continue` replaces the `visit_*` call.
                #[allow(unused_variables)]
                fn enter_node(&mut self, ast: &Ast, id: NodeId, arg: &mut A) -> VisitResult {
                    VisitResult::Continue
                }

                /// Called for every node after its `leave_*` method.
                #[allow(unused_variables)]
                fn exit_node(&mut self, ast: &Ast, id: NodeId, arg: &mut A) {}

                $(
                    #[doc = concat!("Visit a [`", stringify!($kind), "`] node.")]
                    #[doc = ""]
                    #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                    #[allow(unused_variables)]
                    fn [<visit_ $snake>](
                        &mut self,
                        ast: &Ast,
                        id: NodeId,
                        node: &$kind,
                        arg: &mut A,
                    ) -> VisitResult {
                        VisitResult::Continue
                    }

                    #[doc = concat!("Leave a [`", stringify!($kind), "`] node.")]
                    #[doc = ""]
                    #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                    #[allow(unused_variables)]
                    fn [<leave_ $snake>](
                        &mut self,
                        ast: &Ast,
                        id: NodeId,
                        node: &$kind,
                        arg: &mut A,
                    ) {}
                )*
            }

            /// Visitor collecting items from a subtree.
            pub trait ListVisitor<A> {
                type Item;

                $(
                    #[doc = concat!("Collect items from a [`", stringify!($kind), "`] node.")]
                    #[allow(unused_variables)]
                    fn [<visit_ $snake>](
                        &mut self,
                        ast: &Ast,
                        id: NodeId,
                        node: &$kind,
                        arg: &mut A,
                    ) -> Vec<Self::Item> {
                        walk_list(self, ast, id, arg)
                    }
                )*
            }

            pub(crate) fn dispatch_generic<A, V: GenericVisitor<A> + ?Sized>(
                visitor: &mut V,
                ast: &Ast,
                id: NodeId,
                kind: &NodeKind,
                arg: &mut A,
            ) -> V::Output {
                match kind {
                    $( NodeKind::$kind(node) => visitor.[<visit_ $snake>](ast, id, node, arg), )*
                }
            }

            pub(crate) fn dispatch_visit<A, V: Visitor<A> + ?Sized>(
                visitor: &mut V,
                ast: &Ast,
                id: NodeId,
                kind: &NodeKind,
                arg: &mut A,
            ) -> VisitResult {
                match kind {
                    $( NodeKind::$kind(node) => visitor.[<visit_ $snake>](ast, id, node, arg), )*
                }
            }

            pub(crate) fn dispatch_leave<A, V: Visitor<A> + ?Sized>(
                visitor: &mut V,
                ast: &Ast,
                id: NodeId,
                kind: &NodeKind,
                arg: &mut A,
            ) {
                match kind {
                    $( NodeKind::$kind(node) => visitor.[<leave_ $snake>](ast, id, node, arg), )*
                }
            }

            pub(crate) fn dispatch_list<A, V: ListVisitor<A> + ?Sized>(
                visitor: &mut V,
                ast: &Ast,
                id: NodeId,
                kind: &NodeKind,
                arg: &mut A,
            ) -> Vec<V::Item> {
                match kind {
                    $( NodeKind::$kind(node) => visitor.[<visit_ $snake>](ast, id, node, arg), )*
                }
            }
        }
    };
}

with_node_table!(define_visitor_traits);
