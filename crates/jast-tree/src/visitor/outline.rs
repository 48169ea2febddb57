// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Default printer: a one-line structural outline of a subtree.
//!
//! ```text
//! BinaryExpr(left=NameExpr(name=SimpleName(identifier="a")), right=IntegerLiteralExpr(value="1"), operator=Plus)
//! ```
//!
//! Absent optional properties are left out, lists print as `[a, b]`, and a
//! comment appears last as `comment=...`.

use super::traits::GenericVisitor;
use crate::arena::{NodeId, NodeListId};
use crate::ast::Ast;
use crate::context::NodePrinter;
use crate::nodes::SlotRef;

#[derive(Debug, Clone, Copy)]
pub struct OutlinePrinter {
    include_comments: bool,
}

impl Default for OutlinePrinter {
    fn default() -> Self {
        OutlinePrinter::new()
    }
}

impl OutlinePrinter {
    pub fn new() -> Self {
        OutlinePrinter {
            include_comments: true,
        }
    }

    pub fn without_comments() -> Self {
        OutlinePrinter {
            include_comments: false,
        }
    }

    fn list(&mut self, ast: &Ast, list: NodeListId) -> String {
        let items: Vec<String> = ast
            .items(list)
            .iter()
            .map(|item| ast.accept(*item, self, &mut ()))
            .collect();
        format!("[{}]", items.join(", "))
    }
}

impl GenericVisitor<()> for OutlinePrinter {
    type Output = String;

    fn visit_node(&mut self, ast: &Ast, id: NodeId, _arg: &mut ()) -> String {
        let data = &ast[id];
        let mut parts = Vec::new();
        for (property, slot) in data.kind.slots() {
            let value = match slot {
                SlotRef::Node(child) | SlotRef::OptNode(Some(child)) => {
                    ast.accept(child, self, &mut ())
                }
                SlotRef::List(list) | SlotRef::OptList(Some(list)) => self.list(ast, list),
                SlotRef::Attr(value) => format!("{value:?}"),
                SlotRef::OptNode(None) | SlotRef::OptList(None) => continue,
            };
            parts.push(format!("{property}={value}"));
        }
        if self.include_comments {
            if let Some(comment) = data.comment {
                parts.push(format!("comment={}", ast.accept(comment, self, &mut ())));
            }
        }
        let name = data.syntax_kind().name();
        if parts.is_empty() {
            name.to_string()
        } else {
            format!("{name}({})", parts.join(", "))
        }
    }
}

impl NodePrinter for OutlinePrinter {
    fn print(&self, ast: &Ast, node: NodeId) -> String {
        let mut printer = *self;
        match ast.get(node) {
            Some(_) => ast.accept(node, &mut printer, &mut ()),
            None => format!("<stale {node}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{
        BinaryExpr, BinaryOperator, EmptyStmt, IntegerLiteralExpr, LineComment, NameExpr,
        ReturnStmt, SimpleName,
    };

    #[test]
    fn test_outline() {
        let mut ast = Ast::new();
        let a = ast.create(SimpleName::new("a".into())).unwrap();
        let a = ast.create(NameExpr::new(a)).unwrap();
        let one = ast.create(IntegerLiteralExpr::new("1".into())).unwrap();
        let sum = ast
            .create(BinaryExpr::new(a, one, BinaryOperator::Plus))
            .unwrap();
        assert_eq!(
            ast.render(sum),
            r#"BinaryExpr(left=NameExpr(name=SimpleName(identifier="a")), right=IntegerLiteralExpr(value="1"), operator=Plus)"#
        );
    }

    #[test]
    fn test_outline_leaves_out_absent_properties() {
        let mut ast = Ast::new();
        let ret = ast.create(ReturnStmt::new(None)).unwrap();
        let empty = ast.create(EmptyStmt::new()).unwrap();
        assert_eq!(ast.render(ret), "ReturnStmt");
        assert_eq!(ast.render(empty), "EmptyStmt");
    }

    #[test]
    fn test_outline_comment() {
        let mut ast = Ast::new();
        let empty = ast.create(EmptyStmt::new()).unwrap();
        let comment = ast.create(LineComment::new(" hi".into())).unwrap();
        ast.set_comment(empty, Some(comment)).unwrap();
        assert_eq!(
            ast.render(empty),
            r#"EmptyStmt(comment=LineComment(content=" hi"))"#
        );
        assert_eq!(OutlinePrinter::without_comments().print(&ast, empty), "EmptyStmt");
    }
}
