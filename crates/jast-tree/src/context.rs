// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tree-wide context stored as extension data on a root.
//!
//! The line separator, the symbol resolver and the printer are recorded on
//! some node (normally the compilation unit) and found from any descendant
//! by walking up the parent chain.

use std::rc::Rc;

use jast_core::{AstError, AstResult, LineSeparator};

use crate::arena::NodeId;
use crate::ast::Ast;
use crate::data::DataKey;
use crate::visitor::OutlinePrinter;

/// Line separator detected in the source a tree was parsed from.
pub struct LineSeparatorKey;

impl DataKey for LineSeparatorKey {
    type Value = LineSeparator;
}

/// Resolves names to declarations. Implemented outside this crate.
pub trait SymbolResolver {
    /// The declaration `node` refers to, if it can be found.
    fn resolve_declaration(&self, ast: &Ast, node: NodeId) -> Option<NodeId>;
}

/// Symbol resolver available to a tree.
pub struct SymbolResolverKey;

impl DataKey for SymbolResolverKey {
    type Value = Rc<dyn SymbolResolver>;
}

/// Renders a node as text.
pub trait NodePrinter {
    fn print(&self, ast: &Ast, node: NodeId) -> String;
}

/// Printer used by [`Ast::render`].
pub struct PrinterKey;

impl DataKey for PrinterKey {
    type Value = Rc<dyn NodePrinter>;
}

impl Ast {
    /// Nearest value of `K` on `node` or one of its ancestors.
    pub fn find_inherited<K: DataKey>(&self, node: NodeId) -> Option<&K::Value> {
        std::iter::once(node)
            .chain(self.parents(node))
            .find_map(|id| self.find_data::<K>(id))
    }

    // ------------------------------------------------------------------------
    // Line separator
    // ------------------------------------------------------------------------

    pub fn set_line_separator(&mut self, node: NodeId, separator: LineSeparator) -> AstResult<()> {
        self.set_data::<LineSeparatorKey>(node, separator)
    }

    /// Line separator recorded on the nearest ancestor, if any.
    pub fn line_separator(&self, node: NodeId) -> Option<LineSeparator> {
        self.find_inherited::<LineSeparatorKey>(node).copied()
    }

    /// Line separator to use when emitting text for `node`.
    ///
    /// Falls back to the configured default when nothing was recorded or the
    /// recorded style is not a single standard separator.
    pub fn line_separator_or_default(&self, node: NodeId) -> LineSeparator {
        match self.line_separator(node) {
            Some(separator) if separator.is_standard_eol() => separator,
            _ => self.options.default_line_separator,
        }
    }

    // ------------------------------------------------------------------------
    // Symbol resolver
    // ------------------------------------------------------------------------

    pub fn set_symbol_resolver(
        &mut self,
        node: NodeId,
        resolver: Rc<dyn SymbolResolver>,
    ) -> AstResult<()> {
        self.set_data::<SymbolResolverKey>(node, resolver)
    }

    /// Symbol resolver of the tree holding `node`.
    ///
    /// Fails with `IllegalState` when no ancestor carries one.
    pub fn symbol_resolver(&self, node: NodeId) -> AstResult<Rc<dyn SymbolResolver>> {
        self.node(node)?;
        self.find_inherited::<SymbolResolverKey>(node)
            .cloned()
            .ok_or_else(|| {
                AstError::illegal_state(format!(
                    "the tree holding {node} has no symbol resolver"
                ))
            })
    }

    /// Resolve `node` through the tree's symbol resolver.
    pub fn resolve(&self, node: NodeId) -> AstResult<Option<NodeId>> {
        let resolver = self.symbol_resolver(node)?;
        Ok(resolver.resolve_declaration(self, node))
    }

    // ------------------------------------------------------------------------
    // Printing
    // ------------------------------------------------------------------------

    pub fn set_printer(&mut self, node: NodeId, printer: Rc<dyn NodePrinter>) -> AstResult<()> {
        self.set_data::<PrinterKey>(node, printer)
    }

    /// Render a node with the nearest printer, or the outline printer.
    pub fn render(&self, node: NodeId) -> String {
        match self.find_inherited::<PrinterKey>(node) {
            Some(printer) => printer.print(self, node),
            None => OutlinePrinter::new().print(self, node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{NameExpr, SimpleName};
    use crate::options::AstOptions;

    struct Fixed(NodeId);

    impl SymbolResolver for Fixed {
        fn resolve_declaration(&self, _ast: &Ast, _node: NodeId) -> Option<NodeId> {
            Some(self.0)
        }
    }

    fn tree(ast: &mut Ast) -> (NodeId, NodeId) {
        let name = ast.create(SimpleName::new("x".into())).unwrap();
        let expr = ast.create(NameExpr::new(name)).unwrap();
        (expr, name)
    }

    #[test]
    fn test_line_separator_is_inherited() {
        let mut ast = Ast::new();
        let (root, leaf) = tree(&mut ast);
        assert_eq!(ast.line_separator(leaf), None);
        ast.set_line_separator(root, LineSeparator::CrLf).unwrap();
        assert_eq!(ast.line_separator(leaf), Some(LineSeparator::CrLf));
    }

    #[test]
    fn test_mixed_separator_falls_back_to_default() {
        let mut ast =
            Ast::with_options(AstOptions::new().with_default_line_separator(LineSeparator::Lf));
        let (root, leaf) = tree(&mut ast);
        ast.set_line_separator(root, LineSeparator::Mixed).unwrap();
        assert_eq!(ast.line_separator_or_default(leaf), LineSeparator::Lf);
    }

    #[test]
    fn test_missing_resolver_is_illegal_state() {
        let mut ast = Ast::new();
        let (root, leaf) = tree(&mut ast);
        let err = ast.symbol_resolver(leaf).err().unwrap();
        assert_eq!(err.kind(), jast_core::ErrorKind::IllegalState);

        ast.set_symbol_resolver(root, Rc::new(Fixed(root))).unwrap();
        assert_eq!(ast.resolve(leaf).unwrap(), Some(root));
    }
}
