// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Shorthand constructors for common node shapes.
//!
//! Each function allocates the nodes it needs in `ast` and returns the new
//! root. Arguments that are nodes are adopted like any other child.

use jast_core::AstResult;

use crate::arena::NodeId;
use crate::ast::Ast;
use crate::nodes::{
    BinaryExpr, BinaryOperator, BlockComment, BlockStmt, ExpressionStmt, IntegerLiteralExpr,
    LineComment, MethodCallExpr, NameExpr, ReturnStmt, SimpleName, StringLiteralExpr,
};

pub fn simple_name(ast: &mut Ast, identifier: &str) -> AstResult<NodeId> {
    ast.create(SimpleName::new(identifier.to_string()))
}

/// `identifier` used as an expression.
pub fn name_expr(ast: &mut Ast, identifier: &str) -> AstResult<NodeId> {
    let name = simple_name(ast, identifier)?;
    ast.create(NameExpr::new(name))
}

pub fn int_literal(ast: &mut Ast, value: i64) -> AstResult<NodeId> {
    ast.create(IntegerLiteralExpr::new(value.to_string()))
}

/// A string literal; `value` is stored without quotes.
pub fn string_literal(ast: &mut Ast, value: &str) -> AstResult<NodeId> {
    ast.create(StringLiteralExpr::new(value.to_string()))
}

pub fn line_comment(ast: &mut Ast, content: &str) -> AstResult<NodeId> {
    ast.create(LineComment::new(content.to_string()))
}

pub fn block_comment(ast: &mut Ast, content: &str) -> AstResult<NodeId> {
    ast.create(BlockComment::new(content.to_string()))
}

pub fn binary(
    ast: &mut Ast,
    left: NodeId,
    operator: BinaryOperator,
    right: NodeId,
) -> AstResult<NodeId> {
    ast.create(BinaryExpr::new(left, right, operator))
}

pub fn expr_stmt(ast: &mut Ast, expression: NodeId) -> AstResult<NodeId> {
    ast.create(ExpressionStmt::new(expression))
}

pub fn return_stmt(ast: &mut Ast, expression: Option<NodeId>) -> AstResult<NodeId> {
    ast.create(ReturnStmt::new(expression))
}

pub fn block_stmt(
    ast: &mut Ast,
    statements: impl IntoIterator<Item = NodeId>,
) -> AstResult<NodeId> {
    let statements = ast.new_list(statements)?;
    ast.create(BlockStmt::new(statements))
}

/// `scope.name(arguments)`, or `name(arguments)` without a scope.
pub fn method_call(
    ast: &mut Ast,
    scope: Option<NodeId>,
    name: &str,
    arguments: impl IntoIterator<Item = NodeId>,
) -> AstResult<NodeId> {
    let name = simple_name(ast, name)?;
    let arguments = ast.new_list(arguments)?;
    ast.create(MethodCallExpr::new(scope, None, name, arguments))
}
