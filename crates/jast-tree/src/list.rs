// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node lists: ordered child containers.
//!
//! A list is held by at most one property of one node (its owner). The
//! elements' parent is the owner, not the list; elements of a list nobody
//! holds have no parent. Every mutation emits one [`ListChange`] to the
//! observers registered on the list, tagged with the owning property.
//!
//! [`ListChange`]: crate::observer::ListChange

use std::collections::HashSet;

use jast_core::{AstError, AstResult};

use crate::arena::{NodeId, NodeListId};
use crate::ast::Ast;
use crate::nodes::{Category, Property};
use crate::observer::{AstEvent, ListChange, ListChangeKind};

impl Ast {
    /// Create a list nobody holds yet.
    ///
    /// Elements are taken out of wherever they currently sit and lose their
    /// parent until the list is stored in a node property.
    pub fn new_list(&mut self, items: impl IntoIterator<Item = NodeId>) -> AstResult<NodeListId> {
        let items: Vec<NodeId> = items.into_iter().collect();
        let mut seen = HashSet::new();
        for &item in &items {
            self.check_adoptable(None, item)?;
            if !seen.insert(item) {
                return Err(AstError::invalid_argument(format!(
                    "{item} appears more than once in a new list"
                )));
            }
        }
        let list = self.alloc_list();
        for item in items {
            self.vacate(item);
            self.reparent(item, None);
            if let Some(data) = self.lists.get_mut(list) {
                data.items.push(item);
            }
            if let Some(data) = self.nodes.get_mut(item) {
                data.container = Some(list);
            }
        }
        self.flush_events();
        Ok(list)
    }

    // ------------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------------

    pub fn list_owner(&self, list: NodeListId) -> Option<NodeId> {
        self.lists.get(list).and_then(|l| l.owner)
    }

    pub fn list_property(&self, list: NodeListId) -> Option<Property> {
        self.lists.get(list).and_then(|l| l.property)
    }

    pub fn list_len(&self, list: NodeListId) -> usize {
        self.items(list).len()
    }

    pub fn list_is_empty(&self, list: NodeListId) -> bool {
        self.items(list).is_empty()
    }

    pub fn list_get(&self, list: NodeListId, index: usize) -> Option<NodeId> {
        self.items(list).get(index).copied()
    }

    pub fn list_items(&self, list: NodeListId) -> &[NodeId] {
        self.items(list)
    }

    pub fn list_contains(&self, list: NodeListId, node: NodeId) -> bool {
        self.items(list).contains(&node)
    }

    pub fn list_index_of(&self, list: NodeListId, node: NodeId) -> Option<usize> {
        self.items(list).iter().position(|n| *n == node)
    }

    /// The list holding `node`, if any.
    pub fn containing_list(&self, node: NodeId) -> Option<NodeListId> {
        self.get(node).and_then(|d| d.container)
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    pub fn list_push(&mut self, list: NodeListId, node: NodeId) -> AstResult<()> {
        let len = self.list(list)?.len();
        self.list_insert(list, len, node)
    }

    pub fn list_push_front(&mut self, list: NodeListId, node: NodeId) -> AstResult<()> {
        self.list_insert(list, 0, node)
    }

    /// Append several nodes in order.
    pub fn list_extend(
        &mut self,
        list: NodeListId,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> AstResult<()> {
        for node in nodes {
            self.list_push(list, node)?;
        }
        Ok(())
    }

    /// Insert `node` at `index`, shifting later elements.
    pub fn list_insert(&mut self, list: NodeListId, index: usize, node: NodeId) -> AstResult<()> {
        let len = self.list(list)?.len();
        if index > len {
            return Err(AstError::invalid_argument(format!(
                "index {index} out of bounds for {list} of length {len}"
            )));
        }
        self.check_list_element(list, node)?;
        self.vacate(node);
        // Vacating can shrink this list only if the node was already in it,
        // which check_list_element rejects.
        self.insert_unchecked(list, index, node);
        self.flush_events();
        Ok(())
    }

    /// Insert `node` right before `anchor`.
    pub fn list_insert_before(
        &mut self,
        list: NodeListId,
        anchor: NodeId,
        node: NodeId,
    ) -> AstResult<()> {
        let index = self.anchor_index(list, anchor)?;
        self.list_insert(list, index, node)
    }

    /// Insert `node` right after `anchor`.
    pub fn list_insert_after(
        &mut self,
        list: NodeListId,
        anchor: NodeId,
        node: NodeId,
    ) -> AstResult<()> {
        let index = self.anchor_index(list, anchor)?;
        self.list_insert(list, index + 1, node)
    }

    /// Replace the element at `index`, returning the previous element.
    pub fn list_set(&mut self, list: NodeListId, index: usize, node: NodeId) -> AstResult<NodeId> {
        let data = self.list(list)?;
        let Some(old) = data.items.get(index).copied() else {
            return Err(AstError::invalid_argument(format!(
                "index {index} out of bounds for {list} of length {}",
                data.len()
            )));
        };
        if old == node {
            return Ok(old);
        }
        self.check_list_element(list, node)?;
        self.vacate(node);

        let (owner, property) = self.list_holder(list);
        self.notify_list(
            list,
            AstEvent::List(ListChange {
                list,
                owner,
                property,
                kind: ListChangeKind::Replacement { old },
                index,
                node,
            }),
        );
        if let Some(data) = self.lists.get_mut(list) {
            data.items[index] = node;
        }
        if let Some(data) = self.nodes.get_mut(old) {
            data.container = None;
        }
        if let Some(data) = self.nodes.get_mut(node) {
            data.container = Some(list);
        }
        self.reparent(old, None);
        self.propagate_from_list(list, node);
        self.reparent(node, owner);
        self.flush_events();
        Ok(old)
    }

    /// Remove and return the element at `index`.
    pub fn list_remove_at(&mut self, list: NodeListId, index: usize) -> AstResult<NodeId> {
        let len = self.list(list)?.len();
        if index >= len {
            return Err(AstError::invalid_argument(format!(
                "index {index} out of bounds for {list} of length {len}"
            )));
        }
        let node = self.remove_unchecked(list, index);
        self.flush_events();
        Ok(node)
    }

    /// Remove `node` from the list. Returns whether it was present.
    pub fn list_remove_node(&mut self, list: NodeListId, node: NodeId) -> AstResult<bool> {
        self.list(list)?;
        match self.list_index_of(list, node) {
            Some(index) => {
                self.list_remove_at(list, index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace `old` with `new`. Returns whether `old` was present.
    pub fn list_replace(&mut self, list: NodeListId, old: NodeId, new: NodeId) -> AstResult<bool> {
        self.list(list)?;
        match self.list_index_of(list, old) {
            Some(index) => {
                self.list_set(list, index, new)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every element, front to back, one event each.
    pub fn list_clear(&mut self, list: NodeListId) -> AstResult<()> {
        while !self.list(list)?.is_empty() {
            self.remove_unchecked(list, 0);
        }
        self.flush_events();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn list_holder(&self, list: NodeListId) -> (Option<NodeId>, Option<Property>) {
        self.lists
            .get(list)
            .map_or((None, None), |l| (l.owner, l.property))
    }

    fn anchor_index(&self, list: NodeListId, anchor: NodeId) -> AstResult<usize> {
        self.list(list)?;
        self.list_index_of(list, anchor).ok_or_else(|| {
            AstError::invalid_argument(format!("{anchor} is not an element of {list}"))
        })
    }

    /// Category accepted by the property holding the list.
    fn list_accepts(&self, list: NodeListId) -> Option<Category> {
        let (Some(owner), Some(property)) = self.list_holder(list) else {
            return None;
        };
        if property == Property::EXTENSION_COMMENTS {
            return Some(Category::Comment);
        }
        self.syntax_kind(owner)?
            .property(property)
            .and_then(|d| d.shape.accepts())
    }

    fn check_list_element(&self, list: NodeListId, node: NodeId) -> AstResult<()> {
        self.node(node)?;
        if self.list_contains(list, node) {
            return Err(AstError::invalid_argument(format!(
                "{node} is already an element of {list}"
            )));
        }
        let (owner, property) = self.list_holder(list);
        if let (Some(accepts), Some(property)) = (self.list_accepts(list), property) {
            self.check_category(accepts, node, property)?;
        }
        self.check_adoptable(owner, node)
    }

    fn insert_unchecked(&mut self, list: NodeListId, index: usize, node: NodeId) {
        let (owner, property) = self.list_holder(list);
        self.notify_list(
            list,
            AstEvent::List(ListChange {
                list,
                owner,
                property,
                kind: ListChangeKind::Addition,
                index,
                node,
            }),
        );
        if let Some(data) = self.lists.get_mut(list) {
            data.items.insert(index, node);
        }
        if let Some(data) = self.nodes.get_mut(node) {
            data.container = Some(list);
        }
        self.propagate_from_list(list, node);
        self.reparent(node, owner);
    }

    fn remove_unchecked(&mut self, list: NodeListId, index: usize) -> NodeId {
        let node = self.detach_list_item(list, index);
        self.reparent(node, None);
        node
    }

    /// Take the element at `index` out of the list, leaving its parent pointer.
    pub(crate) fn detach_list_item(&mut self, list: NodeListId, index: usize) -> NodeId {
        let (owner, property) = self.list_holder(list);
        let node = self.items(list)[index];
        self.notify_list(
            list,
            AstEvent::List(ListChange {
                list,
                owner,
                property,
                kind: ListChangeKind::Removal,
                index,
                node,
            }),
        );
        if let Some(data) = self.lists.get_mut(list) {
            data.items.remove(index);
        }
        if let Some(data) = self.nodes.get_mut(node) {
            data.container = None;
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{BlockStmt, EmptyStmt, SimpleName};

    fn stmt(ast: &mut Ast) -> NodeId {
        ast.create(EmptyStmt::new()).unwrap()
    }

    #[test]
    fn test_unowned_list_elements_have_no_parent() {
        let mut ast = Ast::new();
        let a = stmt(&mut ast);
        let list = ast.new_list([a]).unwrap();
        assert_eq!(ast.list_owner(list), None);
        assert_eq!(ast.parent(a), None);
        assert_eq!(ast.containing_list(a), Some(list));
    }

    #[test]
    fn test_elements_follow_the_owner() {
        let mut ast = Ast::new();
        let a = stmt(&mut ast);
        let list = ast.new_list([a]).unwrap();
        let block = ast.create(BlockStmt::new(list)).unwrap();
        assert_eq!(ast.parent(a), Some(block));
        assert_eq!(ast.list_property(list), Some(BlockStmt::STATEMENTS));

        let b = stmt(&mut ast);
        ast.list_push_front(list, b).unwrap();
        assert_eq!(ast.list_items(list), &[b, a]);
        assert_eq!(ast.parent(b), Some(block));
    }

    #[test]
    fn test_owned_list_checks_category() {
        let mut ast = Ast::new();
        let list = ast.new_list([]).unwrap();
        ast.create(BlockStmt::new(list)).unwrap();
        let name = ast.create(SimpleName::new("x".into())).unwrap();
        let err = ast.list_push(list, name).unwrap_err();
        assert_eq!(err.kind(), jast_core::ErrorKind::InvalidArgument);
        assert!(ast.list_is_empty(list));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut ast = Ast::new();
        let a = stmt(&mut ast);
        let list = ast.new_list([]).unwrap();
        assert!(ast.list_insert(list, 1, a).is_err());
        assert!(ast.list_remove_at(list, 0).is_err());
        assert!(ast.list_set(list, 0, a).is_err());
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut ast = Ast::new();
        let a = stmt(&mut ast);
        let list = ast.new_list([a]).unwrap();
        assert!(ast.list_push(list, a).is_err());
        assert!(ast.new_list([a, a]).is_err());
    }
}
