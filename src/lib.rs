//! jast: mutable, observable syntax trees for Java-like languages.
//!
//! Nodes live in an arena owned by [`Ast`] and are addressed by
//! generation-checked handles. Every structural change goes through the
//! ownership layer, which keeps parent and child links symmetric and
//! notifies registered observers.
//!
//! ```
//! use jast::{make, Ast, TraversalOrder};
//!
//! let mut ast = Ast::new();
//! let x = make::name_expr(&mut ast, "x").unwrap();
//! let ret = make::return_stmt(&mut ast, Some(x)).unwrap();
//! assert_eq!(ast.parent(x), Some(ret));
//! assert_eq!(ast.traverse(ret, TraversalOrder::PreOrder).count(), 3);
//! ```

// Core primitives
pub use jast_core::{error, text, tokens};

// The tree, with the core types it re-exports
pub use jast_tree::*;

pub mod logging;
