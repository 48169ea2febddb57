// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Per-node and per-list records stored in the arena.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use jast_core::{TextRange, TokenRange};

use crate::arena::{NodeId, NodeListId};
use crate::nodes::{AstNode, Category, NodeKind, SyntaxKind};
use crate::observer::Registration;

/// Whether a node came out of the parser intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseStatus {
    #[default]
    Parsed,
    /// The node stands in for source the parser could not recognize.
    Unparsable,
}

/// Extension data bag, allocated on first write.
pub(crate) type DataMap = Option<Box<HashMap<TypeId, Box<dyn Any>>>>;

/// Everything the arena stores for one node.
///
/// The variant payload lives in [`NodeData::kind`]; the remaining fields are
/// the state every node carries regardless of variant.
pub struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    /// Every node whose parent is this node, in order of arrival.
    pub(crate) children: Vec<NodeId>,
    /// The list currently holding this node, if any.
    pub(crate) container: Option<NodeListId>,
    pub(crate) range: Option<TextRange>,
    pub(crate) token_range: Option<TokenRange>,
    pub(crate) comment: Option<NodeId>,
    pub(crate) orphan_comments: Vec<NodeId>,
    pub(crate) extension_comments: Option<NodeListId>,
    pub(crate) parse_status: ParseStatus,
    pub(crate) data: DataMap,
    pub(crate) registrations: Vec<Registration>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        NodeData {
            kind,
            parent: None,
            children: Vec::new(),
            container: None,
            range: None,
            token_range: None,
            comment: None,
            orphan_comments: Vec::new(),
            extension_comments: None,
            parse_status: ParseStatus::Parsed,
            data: None,
            registrations: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        self.kind.syntax_kind()
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Typed view of the payload.
    pub fn cast<T: AstNode>(&self) -> Option<&T> {
        T::cast(&self.kind)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in order of arrival (not declaration order).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    pub fn token_range(&self) -> Option<&TokenRange> {
        self.token_range.as_ref()
    }

    pub fn comment(&self) -> Option<NodeId> {
        self.comment
    }

    pub fn orphan_comments(&self) -> &[NodeId] {
        &self.orphan_comments
    }

    pub fn extension_comments(&self) -> Option<NodeListId> {
        self.extension_comments
    }

    pub fn parse_status(&self) -> ParseStatus {
        self.parse_status
    }

    pub fn is_comment(&self) -> bool {
        self.category() == Category::Comment
    }
}

impl std::fmt::Debug for NodeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeData")
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("range", &self.range)
            .field("comment", &self.comment)
            .field("parse_status", &self.parse_status)
            .finish_non_exhaustive()
    }
}

/// Everything the arena stores for one node list.
pub struct ListData {
    /// Node holding the list in one of its slots.
    pub(crate) owner: Option<NodeId>,
    /// Slot of `owner` holding the list.
    pub(crate) property: Option<crate::nodes::Property>,
    pub(crate) items: Vec<NodeId>,
    pub(crate) registrations: Vec<Registration>,
}

impl ListData {
    pub(crate) fn new(items: Vec<NodeId>) -> Self {
        ListData {
            owner: None,
            property: None,
            items,
            registrations: Vec::new(),
        }
    }

    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    pub fn property(&self) -> Option<crate::nodes::Property> {
        self.property
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl std::fmt::Debug for ListData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListData")
            .field("owner", &self.owner)
            .field("property", &self.property)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
