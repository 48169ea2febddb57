// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure for traversing and transforming syntax trees.
//!
//! # Traits
//!
//! - [`GenericVisitor`]: value-producing; [`Ast::accept`] dispatches a node to
//!   the method for its variant
//! - [`Visitor`]: side effects over a whole subtree; [`Ast::visit`] walks it
//! - [`ListVisitor`]: collects items; [`Ast::accept_list`] flattens the
//!   results of a subtree in visit order
//!
//! # Structural Visitors
//!
//! - [`EqualsVisitor`]: deep equality
//! - [`HashVisitor`]: deep hash consistent with equality
//! - [`CloneVisitor`]: deep copy via [`NodeTemplate`]
//! - [`OutlinePrinter`]: the default [`NodePrinter`]
//!
//! [`Ast::accept`]: crate::Ast::accept
//! [`Ast::visit`]: crate::Ast::visit
//! [`Ast::accept_list`]: crate::Ast::accept_list
//! [`NodePrinter`]: crate::context::NodePrinter

mod clone;
mod dispatch;
mod equals;
mod hash;
mod outline;
mod traits;

pub use clone::{CloneVisitor, NodeTemplate};
pub use dispatch::{walk_list, walk_node};
pub use equals::EqualsVisitor;
pub use hash::HashVisitor;
pub use outline::OutlinePrinter;
pub use traits::{GenericVisitor, ListVisitor, VisitResult, Visitor};
