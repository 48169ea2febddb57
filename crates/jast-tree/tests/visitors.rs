// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor dispatch, structural equality, hashing and copying.

use std::collections::BTreeMap;

use itertools::Itertools;
use jast_tree::make;
use jast_tree::nodes::{BinaryOperator, MethodCallExpr, ReturnStmt, SimpleName};
use jast_tree::{Ast, GenericVisitor, NodeId, SyntaxKind, VisitResult, Visitor};

/// `{ out.println(a OP 1); return a; }`
fn sample(ast: &mut Ast, name: &str, op: BinaryOperator) -> NodeId {
    let out = make::name_expr(ast, "out").unwrap();
    let a = make::name_expr(ast, name).unwrap();
    let one = make::int_literal(ast, 1).unwrap();
    let sum = make::binary(ast, a, op, one).unwrap();
    let call = make::method_call(ast, Some(out), "println", [sum]).unwrap();
    let print = make::expr_stmt(ast, call).unwrap();
    let a = make::name_expr(ast, name).unwrap();
    let ret = make::return_stmt(ast, Some(a)).unwrap();
    make::block_stmt(ast, [print, ret]).unwrap()
}

#[test]
fn equal_inputs_give_equal_trees_and_hashes() {
    let mut ast = Ast::new();
    let inputs = [
        ("a", BinaryOperator::Plus),
        ("a", BinaryOperator::Minus),
        ("b", BinaryOperator::Plus),
    ];
    let left = inputs.map(|(n, op)| sample(&mut ast, n, op));
    let right = inputs.map(|(n, op)| sample(&mut ast, n, op));

    for (l, r) in left.iter().cartesian_product(right.iter()) {
        let equal = ast.structurally_equal(*l, *r);
        assert_eq!(equal, ast.structurally_equal(*r, *l));
        if equal {
            assert_eq!(ast.structural_hash(*l), ast.structural_hash(*r));
        }
    }
    for (l, r) in left.iter().zip(&right) {
        assert!(ast.structurally_equal(*l, *l));
        assert!(ast.structurally_equal(*l, *r));
    }
    assert!(!ast.structurally_equal(left[0], left[1]));
    assert!(!ast.structurally_equal(left[0], left[2]));
}

#[test]
fn variants_never_compare_equal() {
    let mut ast = Ast::new();
    let ret = make::return_stmt(&mut ast, None).unwrap();
    let block = make::block_stmt(&mut ast, []).unwrap();
    assert!(!ast.structurally_equal(ret, block));
}

#[test]
fn clone_then_mutate_breaks_equality() {
    let mut ast = Ast::new();
    let original = sample(&mut ast, "a", BinaryOperator::Plus);
    let copy = ast.deep_clone(original).unwrap();
    assert!(ast.structurally_equal(original, copy));

    let ret = ast.find_all_of::<ReturnStmt>(copy)[0];
    ast.set_child(ret, ReturnStmt::EXPRESSION, None).unwrap();
    assert!(!ast.structurally_equal(original, copy));
    assert!(ast
        .child(ast.find_all_of::<ReturnStmt>(original)[0], ReturnStmt::EXPRESSION)
        .unwrap()
        .is_some());
}

/// Counts nodes per kind and collects method names.
#[derive(Default)]
struct Census {
    kinds: BTreeMap<SyntaxKind, usize>,
    methods: Vec<String>,
}

impl Visitor<()> for Census {
    fn enter_node(&mut self, ast: &Ast, id: NodeId, _arg: &mut ()) -> VisitResult {
        if let Some(kind) = ast.syntax_kind(id) {
            *self.kinds.entry(kind).or_default() += 1;
        }
        VisitResult::Continue
    }

    fn visit_method_call_expr(
        &mut self,
        ast: &Ast,
        _id: NodeId,
        node: &MethodCallExpr,
        _arg: &mut (),
    ) -> VisitResult {
        let name = ast.cast::<SimpleName>(node.name()).unwrap();
        self.methods.push(name.identifier().clone());
        VisitResult::Continue
    }
}

#[test]
fn void_visitor_sees_every_node() {
    let mut ast = Ast::new();
    let root = sample(&mut ast, "a", BinaryOperator::Plus);
    let mut census = Census::default();
    ast.visit(root, &mut census, &mut ());

    assert_eq!(census.methods, vec!["println"]);
    assert_eq!(census.kinds[&SyntaxKind::NameExpr], 3);
    assert_eq!(census.kinds[&SyntaxKind::SimpleName], 4);
    assert_eq!(
        census.kinds.values().sum::<usize>(),
        ast.pre_order(root).count()
    );
}

/// Depth of the deepest node, passing the current depth as the argument.
struct MaxDepth;

impl GenericVisitor<usize> for MaxDepth {
    type Output = usize;

    fn visit_node(&mut self, ast: &Ast, id: NodeId, depth: &mut usize) -> usize {
        let mut deepest = *depth;
        for child in ast.visit_order(id) {
            let mut child_depth = *depth + 1;
            deepest = deepest.max(ast.accept(child, self, &mut child_depth));
        }
        deepest
    }
}

#[test]
fn generic_visitor_threads_its_argument() {
    let mut ast = Ast::new();
    let root = sample(&mut ast, "a", BinaryOperator::Plus);
    // block > stmt > call > binary > name expr > simple name
    assert_eq!(ast.accept(root, &mut MaxDepth, &mut 0), 5);
}
