// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Phantom classification and its cache.

use jast_tree::make;
use jast_tree::nodes::ReturnStmt;
use jast_tree::{Ast, AstOptions, NodeId, TextRange};

fn with_range(ast: &mut Ast, node: NodeId, range: TextRange) -> NodeId {
    ast.set_range(node, Some(range)).unwrap();
    node
}

#[test]
fn reparenting_recomputes_classification() {
    let mut ast = Ast::new();
    let x = make::name_expr(&mut ast, "x").unwrap();
    with_range(&mut ast, x, TextRange::of(1, 8, 1, 8));
    let name = ast.children(x)[0];
    with_range(&mut ast, name, TextRange::of(1, 8, 1, 8));
    let p1 = make::return_stmt(&mut ast, Some(x)).unwrap();
    with_range(&mut ast, p1, TextRange::of(1, 1, 1, 9));
    let p2 = make::return_stmt(&mut ast, None).unwrap();
    with_range(&mut ast, p2, TextRange::of(5, 1, 5, 9));

    assert!(!ast.is_phantom(x).unwrap());
    assert!(ast.is_phantom_cached(x));

    ast.set_child(p2, ReturnStmt::EXPRESSION, Some(x)).unwrap();
    assert!(!ast.is_phantom_cached(x));
    assert!(ast.is_phantom(x).unwrap());

    ast.set_child(p1, ReturnStmt::EXPRESSION, Some(x)).unwrap();
    assert!(!ast.is_phantom(x).unwrap());
}

#[test]
fn phantom_ancestor_makes_descendants_phantom() {
    let mut ast = Ast::new();
    let x = make::name_expr(&mut ast, "x").unwrap();
    with_range(&mut ast, x, TextRange::of(20, 2, 20, 2));
    let inner = make::return_stmt(&mut ast, Some(x)).unwrap();
    // Escapes the block below.
    with_range(&mut ast, inner, TextRange::of(20, 1, 20, 3));
    let block = make::block_stmt(&mut ast, [inner]).unwrap();
    with_range(&mut ast, block, TextRange::of(1, 1, 10, 1));

    assert!(ast.is_phantom(inner).unwrap());
    assert!(ast.is_phantom(x).unwrap());
    assert!(!ast.is_phantom(block).unwrap());
}

#[test]
fn lookup_depth_is_configurable() {
    let mut ast = Ast::with_options(AstOptions::new().with_phantom_lookup_depth(0));
    let x = make::name_expr(&mut ast, "x").unwrap();
    with_range(&mut ast, x, TextRange::of(20, 2, 20, 2));
    let inner = make::return_stmt(&mut ast, Some(x)).unwrap();
    with_range(&mut ast, inner, TextRange::of(20, 1, 20, 3));
    let block = make::block_stmt(&mut ast, [inner]).unwrap();
    with_range(&mut ast, block, TextRange::of(1, 1, 10, 1));

    assert!(ast.is_phantom(inner).unwrap());
    assert!(!ast.is_phantom(x).unwrap());
}

#[test]
fn synthesized_nodes_are_phantom() {
    let mut ast = Ast::new();
    let x = make::name_expr(&mut ast, "x").unwrap();
    assert!(ast.is_phantom(x).unwrap());
}

#[test]
fn find_by_range_skips_phantom_nodes() {
    let mut ast = Ast::new();
    let x = make::name_expr(&mut ast, "x").unwrap();
    with_range(&mut ast, x, TextRange::of(1, 8, 1, 8));
    let name = ast.children(x)[0];
    with_range(&mut ast, name, TextRange::of(1, 8, 1, 8));
    let ret = make::return_stmt(&mut ast, Some(x)).unwrap();
    with_range(&mut ast, ret, TextRange::of(1, 1, 1, 9));

    let found = ast.find_by_range(ret, TextRange::of(1, 8, 1, 8)).unwrap();
    assert_eq!(found, Some(name));

    let outside = ast.find_by_range(ret, TextRange::of(3, 1, 3, 2)).unwrap();
    assert_eq!(outside, None);

    // Descent stops above a child without an extent.
    let y = make::name_expr(&mut ast, "y").unwrap();
    with_range(&mut ast, y, TextRange::of(2, 8, 2, 8));
    let other = make::return_stmt(&mut ast, Some(y)).unwrap();
    with_range(&mut ast, other, TextRange::of(2, 1, 2, 9));
    let found = ast.find_by_range(other, TextRange::of(2, 8, 2, 8)).unwrap();
    assert_eq!(found, Some(y));
}
