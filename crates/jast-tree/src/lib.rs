// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A mutable, observable syntax tree for Java-shaped source.
//!
//! This crate provides the generic tree machinery:
//! - Arena storage of nodes and node lists behind generation-checked handles
//! - Ownership: every node has at most one parent, kept in sync by setters
//! - Change observers with three propagation modes
//! - Visitors (value, side-effect, list), structural equality, hash and copy
//! - Traversal iterators and queries
//! - Phantom classification of nodes without source backing
//!
//! # Quick Start
//!
//! ```
//! use jast_tree::nodes::{BinaryExpr, BinaryOperator, IntegerLiteralExpr};
//! use jast_tree::{Ast, TraversalOrder};
//!
//! let mut ast = Ast::new();
//! let one = ast.create(IntegerLiteralExpr::new("1".into())).unwrap();
//! let two = ast.create(IntegerLiteralExpr::new("2".into())).unwrap();
//! let sum = ast.create(BinaryExpr::new(one, two, BinaryOperator::Plus)).unwrap();
//!
//! assert_eq!(ast.parent(one), Some(sum));
//! let order: Vec<_> = ast.traverse(sum, TraversalOrder::PostOrder).collect();
//! assert_eq!(order, vec![one, two, sum]);
//! ```

// The catalogue macro must be in scope before the modules that expand it.
#[macro_use]
pub mod nodes;

mod arena;
mod ast;
pub mod context;
mod data;
mod list;
pub mod make;
mod node;
pub mod observer;
mod options;
mod ownership;
mod phantom;
pub mod query;
pub mod traversal;
pub mod visitor;

pub use arena::{NodeId, NodeListId};
pub use ast::Ast;
pub use context::{LineSeparatorKey, NodePrinter, PrinterKey, SymbolResolver, SymbolResolverKey};
pub use data::DataKey;
pub use node::{ListData, NodeData, ParseStatus};
pub use nodes::{AstNode, Category, NodeKind, Property, SyntaxKind};
pub use observer::{
    AstEvent, AstObserver, Deferred, EventRecorder, ListChange, ListChangeKind, ObserverId,
    ParentChange, Propagation, PropertyChange, PropertyValue,
};
pub use options::AstOptions;
pub use query::{AnyKind, KindFilter};
pub use traversal::TraversalOrder;
pub use visitor::{
    CloneVisitor, EqualsVisitor, GenericVisitor, HashVisitor, ListVisitor, NodeTemplate,
    OutlinePrinter, VisitResult, Visitor,
};

pub use jast_core::{
    AstError, AstResult, ErrorKind, LineSeparator, Position, TextRange, Token, TokenRange,
};
