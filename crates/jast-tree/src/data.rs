// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Per-node extension data.
//!
//! Any component can hang typed values off a node without the node knowing
//! about them. Keys are types implementing [`DataKey`]; two keys never
//! collide because they are distinct types. The map is allocated on first
//! write, and writing data never emits change events.
//!
//! ```
//! use jast_tree::{Ast, DataKey, nodes::EmptyStmt};
//!
//! struct Visited;
//! impl DataKey for Visited {
//!     type Value = u32;
//! }
//!
//! let mut ast = Ast::new();
//! let stmt = ast.create(EmptyStmt::new()).unwrap();
//! ast.set_data::<Visited>(stmt, 2).unwrap();
//! assert_eq!(ast.data::<Visited>(stmt).unwrap(), &2);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;

use jast_core::{AstError, AstResult};

use crate::arena::NodeId;
use crate::ast::Ast;

/// Key of one kind of extension data.
pub trait DataKey: 'static {
    /// Type of the value stored under the key.
    type Value: 'static;
}

fn key_name<K: DataKey>() -> &'static str {
    let full = std::any::type_name::<K>();
    full.rsplit("::").next().unwrap_or(full)
}

impl Ast {
    /// The value stored under `K`, failing with `MissingData` if absent.
    pub fn data<K: DataKey>(&self, node: NodeId) -> AstResult<&K::Value> {
        self.find_data::<K>(node)
            .ok_or_else(|| AstError::missing_data(key_name::<K>()))
    }

    /// The value stored under `K`, if any. `None` for a stale handle too.
    pub fn find_data<K: DataKey>(&self, node: NodeId) -> Option<&K::Value> {
        self.get(node)?
            .data
            .as_ref()?
            .get(&TypeId::of::<K>())?
            .downcast_ref::<K::Value>()
    }

    /// Mutable access to the value stored under `K`.
    pub fn find_data_mut<K: DataKey>(&mut self, node: NodeId) -> Option<&mut K::Value> {
        self.nodes
            .get_mut(node)?
            .data
            .as_mut()?
            .get_mut(&TypeId::of::<K>())?
            .downcast_mut::<K::Value>()
    }

    /// Store a value under `K`, replacing any previous value.
    pub fn set_data<K: DataKey>(&mut self, node: NodeId, value: K::Value) -> AstResult<()> {
        let data = self.node_mut(node)?;
        data.data
            .get_or_insert_with(|| Box::new(HashMap::new()))
            .insert(TypeId::of::<K>(), Box::new(value) as Box<dyn Any>);
        Ok(())
    }

    /// Remove and return the value stored under `K`.
    pub fn remove_data<K: DataKey>(&mut self, node: NodeId) -> AstResult<Option<K::Value>> {
        let data = self.node_mut(node)?;
        let Some(map) = data.data.as_mut() else {
            return Ok(None);
        };
        let removed = map.remove(&TypeId::of::<K>());
        if map.is_empty() {
            data.data = None;
        }
        Ok(removed
            .and_then(|value| value.downcast::<K::Value>().ok())
            .map(|value| *value))
    }

    pub fn contains_data<K: DataKey>(&self, node: NodeId) -> bool {
        self.find_data::<K>(node).is_some()
    }

    /// Number of keys with data on the node.
    pub fn data_len(&self, node: NodeId) -> usize {
        self.get(node)
            .and_then(|d| d.data.as_ref())
            .map_or(0, |map| map.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::EmptyStmt;

    struct Count;
    impl DataKey for Count {
        type Value = usize;
    }

    struct Label;
    impl DataKey for Label {
        type Value = String;
    }

    #[test]
    fn test_missing_data_names_the_key() {
        let mut ast = Ast::new();
        let node = ast.create(EmptyStmt::new()).unwrap();
        let err = ast.data::<Count>(node).unwrap_err();
        assert_eq!(err, AstError::missing_data("Count"));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut ast = Ast::new();
        let node = ast.create(EmptyStmt::new()).unwrap();
        ast.set_data::<Count>(node, 1).unwrap();
        ast.set_data::<Label>(node, "hot".to_string()).unwrap();
        *ast.find_data_mut::<Count>(node).unwrap() += 1;
        assert_eq!(ast.data::<Count>(node).unwrap(), &2);
        assert_eq!(ast.data::<Label>(node).unwrap(), "hot");
        assert_eq!(ast.data_len(node), 2);
    }

    #[test]
    fn test_remove_data_frees_the_map() {
        let mut ast = Ast::new();
        let node = ast.create(EmptyStmt::new()).unwrap();
        assert_eq!(ast.remove_data::<Count>(node).unwrap(), None);
        ast.set_data::<Count>(node, 7).unwrap();
        assert_eq!(ast.remove_data::<Count>(node).unwrap(), Some(7));
        assert!(!ast.contains_data::<Count>(node));
        assert!(ast.get(node).unwrap().data.is_none());
    }
}
