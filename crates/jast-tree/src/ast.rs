// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The [`Ast`] container: arena storage plus read access.
//!
//! Mutation lives in sibling modules, each adding an `impl Ast` block:
//! `ownership` (slots, comments, removal), `list` (node lists), `observer`
//! (registration and event delivery), `data` (extension data), `phantom`,
//! `traversal` and `query`.

use std::ops::Index;

use jast_core::{AstError, AstResult};
use tracing::debug;

use crate::arena::{NodeId, NodeListId, Store};
use crate::node::{ListData, NodeData};
use crate::nodes::{AstNode, NodeKind, SlotRef, SyntaxKind};
use crate::observer::ObserverTable;
use crate::options::AstOptions;

/// A mutable syntax tree forest.
///
/// One `Ast` owns any number of trees. Nodes and lists are addressed by
/// [`NodeId`] and [`NodeListId`] handles; a handle stays valid until the
/// value is collected by [`Ast::collect_garbage`].
pub struct Ast {
    pub(crate) nodes: Store<NodeData>,
    pub(crate) lists: Store<ListData>,
    pub(crate) observers: ObserverTable,
    pub(crate) options: AstOptions,
}

impl Default for Ast {
    fn default() -> Self {
        Ast::new()
    }
}

impl Ast {
    pub fn new() -> Self {
        Ast::with_options(AstOptions::default())
    }

    pub fn with_options(options: AstOptions) -> Self {
        Ast {
            nodes: Store::with_capacity(options.initial_capacity),
            lists: Store::with_capacity(options.initial_capacity / 4),
            observers: ObserverTable::default(),
            options,
        }
    }

    pub fn options(&self) -> &AstOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Handle access
    // ------------------------------------------------------------------------

    /// Borrow a node, or `None` if the handle is stale.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Borrow a node, failing on a stale handle.
    pub fn node(&self, id: NodeId) -> AstResult<&NodeData> {
        self.nodes.get(id).ok_or_else(|| AstError::stale(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> AstResult<&mut NodeData> {
        self.nodes.get_mut(id).ok_or_else(|| AstError::stale(id))
    }

    /// Borrow a node list, failing on a stale handle.
    pub fn list(&self, id: NodeListId) -> AstResult<&ListData> {
        self.lists.get(id).ok_or_else(|| AstError::stale(id))
    }

    pub(crate) fn list_mut(&mut self, id: NodeListId) -> AstResult<&mut ListData> {
        self.lists.get_mut(id).ok_or_else(|| AstError::stale(id))
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn is_live_list(&self, id: NodeListId) -> bool {
        self.lists.contains(id)
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live node lists.
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    // ------------------------------------------------------------------------
    // Shorthand readers
    // ------------------------------------------------------------------------

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    pub fn syntax_kind(&self, id: NodeId) -> Option<SyntaxKind> {
        self.get(id).map(|n| n.syntax_kind())
    }

    /// Typed view of a node's payload.
    pub fn cast<T: AstNode>(&self, id: NodeId) -> Option<&T> {
        self.get(id).and_then(|n| n.cast::<T>())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children in order of arrival; empty for a stale handle.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn has_parent(&self, id: NodeId) -> bool {
        self.parent(id).is_some()
    }

    pub fn comment(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.comment)
    }

    pub fn orphan_comments(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|n| n.orphan_comments.as_slice())
            .unwrap_or(&[])
    }

    /// Items of a list; empty for a stale handle.
    pub fn items(&self, list: NodeListId) -> &[NodeId] {
        self.lists
            .get(list)
            .map(|l| l.items.as_slice())
            .unwrap_or(&[])
    }

    /// Child nodes in visit order: declared slots in order (list slots
    /// expanded), then extension comments, then the comment.
    pub fn visit_order(&self, id: NodeId) -> Vec<NodeId> {
        let Some(data) = self.get(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (_, slot) in data.kind.slots() {
            match slot {
                SlotRef::Node(child) | SlotRef::OptNode(Some(child)) => out.push(child),
                SlotRef::List(list) | SlotRef::OptList(Some(list)) => {
                    out.extend_from_slice(self.items(list))
                }
                SlotRef::OptNode(None) | SlotRef::OptList(None) | SlotRef::Attr(_) => {}
            }
        }
        if let Some(list) = data.extension_comments {
            out.extend_from_slice(self.items(list));
        }
        out.extend(data.comment);
        out
    }

    // ------------------------------------------------------------------------
    // Garbage collection
    // ------------------------------------------------------------------------

    /// Free every node and list not reachable from the trees holding `roots`.
    ///
    /// Reachability starts at the root of each given node's tree, so passing
    /// any node of a tree keeps the whole tree alive. Returns the number of
    /// nodes freed. Lists not held by a reachable node are freed too.
    pub fn collect_garbage(&mut self, roots: &[NodeId]) -> usize {
        let mut marked = std::collections::HashSet::new();
        let mut marked_lists = std::collections::HashSet::new();
        let mut stack: Vec<NodeId> = roots
            .iter()
            .filter(|r| self.is_live(**r))
            .map(|r| self.find_root(*r))
            .collect();
        while let Some(id) = stack.pop() {
            if !marked.insert(id) {
                continue;
            }
            let Some(data) = self.get(id) else { continue };
            stack.extend_from_slice(&data.children);
            for (_, slot) in data.kind.slots() {
                if let Some(list) = slot.list() {
                    marked_lists.insert(list);
                }
            }
            if let Some(list) = data.extension_comments {
                marked_lists.insert(list);
            }
        }

        let mut freed = 0;
        for id in self.nodes.handles::<NodeId>() {
            if !marked.contains(&id) {
                self.nodes.remove(id);
                freed += 1;
            }
        }
        for id in self.lists.handles::<NodeListId>() {
            if !marked_lists.contains(&id) {
                if let Some(list) = self.lists.remove(id) {
                    for item in list.items {
                        if let Some(data) = self.nodes.get_mut(item) {
                            data.container = None;
                        }
                    }
                }
            }
        }
        debug!(
            "collect_garbage: freed {} nodes, {} remain",
            freed,
            self.nodes.len()
        );
        freed
    }
}

impl Index<NodeId> for Ast {
    type Output = NodeData;

    /// # Panics
    ///
    /// Panics if the handle is stale.
    fn index(&self, id: NodeId) -> &NodeData {
        match self.nodes.get(id) {
            Some(data) => data,
            None => panic!("stale handle {id}"),
        }
    }
}

impl Index<NodeListId> for Ast {
    type Output = ListData;

    /// # Panics
    ///
    /// Panics if the handle is stale.
    fn index(&self, id: NodeListId) -> &ListData {
        match self.lists.get(id) {
            Some(data) => data,
            None => panic!("stale handle {id}"),
        }
    }
}

impl std::fmt::Debug for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ast")
            .field("nodes", &self.nodes.len())
            .field("lists", &self.lists.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
