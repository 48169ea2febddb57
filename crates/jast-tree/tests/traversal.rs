// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Traversal completeness and ordering.

use itertools::Itertools;
use jast_tree::make;
use jast_tree::nodes::{BinaryOperator, Category, IntegerLiteralExpr, SimpleName};
use jast_tree::{AnyKind, Ast, NodeId, SyntaxKind, TraversalOrder};

/// `{ out.println(1 + 2); return x; }`
fn sample(ast: &mut Ast) -> NodeId {
    let out = make::name_expr(ast, "out").unwrap();
    let one = make::int_literal(ast, 1).unwrap();
    let two = make::int_literal(ast, 2).unwrap();
    let sum = make::binary(ast, one, BinaryOperator::Plus, two).unwrap();
    let call = make::method_call(ast, Some(out), "println", [sum]).unwrap();
    let print = make::expr_stmt(ast, call).unwrap();
    let x = make::name_expr(ast, "x").unwrap();
    let ret = make::return_stmt(ast, Some(x)).unwrap();
    make::block_stmt(ast, [print, ret]).unwrap()
}

fn descendants(ast: &Ast, node: NodeId) -> Vec<NodeId> {
    ast.pre_order(node).skip(1).collect()
}

#[test]
fn pre_order_visits_node_before_descendants() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let order: Vec<_> = ast.pre_order(root).collect();
    for (i, node) in order.iter().enumerate() {
        for d in descendants(&ast, *node) {
            let j = order.iter().position(|n| *n == d).unwrap();
            assert!(i < j);
        }
    }
}

#[test]
fn post_order_visits_node_after_descendants() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let order: Vec<_> = ast.post_order(root).collect();
    assert_eq!(order.last(), Some(&root));
    for (i, node) in order.iter().enumerate() {
        for d in descendants(&ast, *node) {
            let j = order.iter().position(|n| *n == d).unwrap();
            assert!(j < i);
        }
    }
}

#[test]
fn breadth_first_goes_level_by_level() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let depths = ast.breadth_first(root).map(|n| ast.depth(n)).collect_vec();
    assert!(depths.iter().tuple_windows().all(|(a, b)| a <= b));
    assert_eq!(depths.first(), Some(&0));
}

#[test]
fn every_order_covers_the_subtree_once() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let expected = ast.pre_order(root).sorted().collect_vec();
    assert_eq!(expected.len(), 12);
    for order in [
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::BreadthFirst,
    ] {
        let seen = ast.traverse(root, order).collect_vec();
        assert!(seen.iter().all_unique(), "{order} repeats a node");
        assert_eq!(seen.into_iter().sorted().collect_vec(), expected, "{order}");
    }
}

#[test]
fn iterators_are_single_pass() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    for order in [
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::BreadthFirst,
        TraversalOrder::Parents,
        TraversalOrder::DirectChildren,
    ] {
        let mut it = ast.traverse(root, order);
        for _ in it.by_ref() {}
        assert_eq!(it.next(), None, "{order}");
    }
}

#[test]
fn parents_and_direct_children() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let one = ast
        .find_first_of::<IntegerLiteralExpr>(root, |lit| lit.value() == "1")
        .unwrap();
    let chain = ast.parents(one).map(|n| ast.syntax_kind(n).unwrap()).collect_vec();
    assert_eq!(
        chain,
        vec![
            SyntaxKind::BinaryExpr,
            SyntaxKind::MethodCallExpr,
            SyntaxKind::ExpressionStmt,
            SyntaxKind::BlockStmt,
        ]
    );
    assert_eq!(ast.direct_children(root).count(), 2);
}

#[test]
fn queries() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let names = ast
        .find_all_of::<SimpleName>(root)
        .into_iter()
        .map(|n| ast.cast::<SimpleName>(n).unwrap().identifier().clone())
        .collect_vec();
    assert_eq!(names, vec!["out", "println", "x"]);

    assert_eq!(ast.find_all(root, Category::Statement).len(), 3);
    assert_eq!(ast.find_all(root, AnyKind).len(), 12);

    let post = ast.find_all_in(
        root,
        [SyntaxKind::ExpressionStmt, SyntaxKind::ReturnStmt],
        TraversalOrder::PostOrder,
    );
    assert_eq!(post.len(), 2);

    let literal_two = ast.find_all_matching(
        root,
        SyntaxKind::IntegerLiteralExpr,
        TraversalOrder::BreadthFirst,
        |ast, n| ast.cast::<IntegerLiteralExpr>(n).is_some_and(|l| l.value() == "2"),
    );
    assert_eq!(literal_two.len(), 1);

    let mut visited = 0;
    ast.walk(root, TraversalOrder::PreOrder, |_| visited += 1);
    assert_eq!(visited, 12);
}
