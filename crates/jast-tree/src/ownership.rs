// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node ownership: creating nodes, setting properties, removing and
//! replacing children, comments, source extents and parse status.
//!
//! ## Setter discipline
//!
//! Every property setter follows the same sequence:
//!
//! 1. validate: required slots reject absence (`NullArgument`); wrong
//!    property, wrong category or a would-be cycle is `InvalidArgument`;
//!    taking a node out of another node's required slot is `InvalidState`
//! 2. return early if the new value is the current one (by identity)
//! 3. emit exactly one property-change event
//! 4. unparent the old value
//! 5. store the new value
//! 6. parent the new value
//!
//! A node adopted from somewhere else is first removed from its previous
//! slot, which emits that slot's own change event. Nothing is mutated when
//! validation fails.

use std::any::TypeId;
use std::collections::HashSet;

use jast_core::{AstError, AstResult, TextRange, TokenRange};
use tracing::trace;

use crate::arena::{NodeId, NodeListId};
use crate::ast::Ast;
use crate::node::{ListData, NodeData, ParseStatus};
use crate::nodes::{Attribute, Category, NodeKind, Property, SlotMut, SlotRef, SlotShape};
use crate::observer::{AstEvent, ParentChange, PropertyValue};

/// Where a node sits inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    /// A declared single-node slot.
    Slot { property: Property, required: bool },
    /// An element of a node list.
    List { list: NodeListId, index: usize },
    /// The comment slot.
    Comment,
    /// The orphan comment bag.
    Orphan { index: usize },
}

impl Ast {
    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    /// Allocate a node and adopt every child its payload refers to.
    ///
    /// Children are checked like setter arguments: each must have the
    /// category its slot accepts, must not be held by another node's required
    /// slot, and may appear only once. Lists must not be held by another node.
    pub fn create(&mut self, kind: impl Into<NodeKind>) -> AstResult<NodeId> {
        let kind = kind.into();
        let syntax = kind.syntax_kind();
        let mut seen = HashSet::new();
        let mut children = Vec::new();
        let mut lists = Vec::new();

        for ((property, slot), descriptor) in kind.slots().into_iter().zip(syntax.properties()) {
            let Some(accepts) = descriptor.shape.accepts() else {
                continue;
            };
            match slot {
                SlotRef::Node(child) | SlotRef::OptNode(Some(child)) => {
                    self.check_category(accepts, child, property)?;
                    self.check_adoptable(None, child)?;
                    if !seen.insert(child) {
                        return Err(AstError::invalid_argument(format!(
                            "{child} appears more than once in a new {syntax}"
                        )));
                    }
                    children.push(child);
                }
                SlotRef::List(list) | SlotRef::OptList(Some(list)) => {
                    let data = self.list(list)?;
                    if let Some(owner) = data.owner {
                        return Err(AstError::invalid_argument(format!(
                            "{list} is already held by {owner}"
                        )));
                    }
                    for &item in &data.items {
                        self.check_category(accepts, item, property)?;
                        if !seen.insert(item) {
                            return Err(AstError::invalid_argument(format!(
                                "{item} appears more than once in a new {syntax}"
                            )));
                        }
                    }
                    if lists.iter().any(|(_, l)| *l == list) {
                        return Err(AstError::invalid_argument(format!(
                            "{list} appears more than once in a new {syntax}"
                        )));
                    }
                    lists.push((property, list));
                }
                SlotRef::OptNode(None) | SlotRef::OptList(None) | SlotRef::Attr(_) => {}
            }
        }

        let id = self.nodes.insert(NodeData::new(kind));
        for child in children {
            self.vacate(child);
            self.reparent(child, Some(id));
        }
        for (property, list) in lists {
            self.adopt_list(id, property, list);
        }
        trace!("create {} {}", syntax, id);
        self.flush_events();
        Ok(id)
    }

    // ------------------------------------------------------------------------
    // Parent
    // ------------------------------------------------------------------------

    /// Move a node to a new parent, or detach it.
    ///
    /// A node gains a parent through one of the parent's properties, so
    /// attaching directly is only possible for comments, which become orphan
    /// comments of the new parent. Detaching clears whichever optional slot,
    /// list or comment slot held the node; a node held by a required slot
    /// cannot be detached (`InvalidState`).
    pub fn set_parent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> AstResult<()> {
        let current = self.node(node)?.parent;
        if current == new_parent {
            return Ok(());
        }
        match new_parent {
            Some(parent) => {
                if !self.node(node)?.is_comment() {
                    return Err(AstError::invalid_state(format!(
                        "{node} can only be attached to {parent} through one of its properties"
                    )));
                }
                self.add_orphan_comment(parent, node)
            }
            None => {
                self.check_adoptable(None, node)?;
                self.vacate(node);
                self.reparent(node, None);
                self.flush_events();
                Ok(())
            }
        }
    }

    /// Update the parent/children relation and emit the parent-change event.
    ///
    /// Slots are not touched; callers keep them consistent.
    pub(crate) fn reparent(&mut self, child: NodeId, new_parent: Option<NodeId>) {
        let Some(old_parent) = self.get(child).map(|d| d.parent) else {
            return;
        };
        if old_parent == new_parent {
            return;
        }
        self.notify_node(
            child,
            AstEvent::Parent(ParentChange {
                node: child,
                old_parent,
                new_parent,
            }),
        );
        if let Some(old) = old_parent.and_then(|p| self.nodes.get_mut(p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = new_parent;
        }
        if let Some(new) = new_parent.and_then(|p| self.nodes.get_mut(p)) {
            new.children.push(child);
        }
        trace!("reparent {}: {:?} -> {:?}", child, old_parent, new_parent);
    }

    /// Find where `child` is held.
    pub(crate) fn location_of(&self, child: NodeId) -> Option<Location> {
        let data = self.get(child)?;
        if let Some(list) = data.container {
            let index = self.lists.get(list)?.items.iter().position(|i| *i == child)?;
            return Some(Location::List { list, index });
        }
        let parent = self.get(data.parent?)?;
        if parent.comment == Some(child) {
            return Some(Location::Comment);
        }
        for (property, slot) in parent.kind.slots() {
            match slot {
                SlotRef::Node(id) if id == child => {
                    return Some(Location::Slot {
                        property,
                        required: true,
                    })
                }
                SlotRef::OptNode(Some(id)) if id == child => {
                    return Some(Location::Slot {
                        property,
                        required: false,
                    })
                }
                _ => {}
            }
        }
        parent
            .orphan_comments
            .iter()
            .position(|c| *c == child)
            .map(|index| Location::Orphan { index })
    }

    /// Check that `child` may move under `new_parent`.
    pub(crate) fn check_adoptable(&self, new_parent: Option<NodeId>, child: NodeId) -> AstResult<()> {
        self.node(child)?;
        if let Some(parent) = new_parent {
            if parent == child || self.is_ancestor_of(child, parent) {
                return Err(AstError::invalid_argument(format!(
                    "adopting {child} under {parent} would create a cycle"
                )));
            }
        }
        if let Some(Location::Slot {
            property,
            required: true,
        }) = self.location_of(child)
        {
            return Err(AstError::invalid_state(format!(
                "{child} is held by required property '{property}' of {}; replace it there first",
                self.parent(child).map_or_else(|| "?".to_string(), |p| p.to_string())
            )));
        }
        Ok(())
    }

    pub(crate) fn check_category(
        &self,
        accepts: Category,
        child: NodeId,
        property: Property,
    ) -> AstResult<()> {
        let kind = self.node(child)?.syntax_kind();
        if accepts.accepts(kind) {
            Ok(())
        } else {
            Err(AstError::invalid_argument(format!(
                "property '{property}' accepts {accepts} nodes, got {kind}"
            )))
        }
    }

    /// Remove `child` from whatever slot holds it, leaving its parent pointer.
    ///
    /// Callers have already rejected required slots.
    pub(crate) fn vacate(&mut self, child: NodeId) {
        let Some(location) = self.location_of(child) else {
            return;
        };
        let parent = self.parent(child);
        match location {
            Location::List { list, index } => {
                self.detach_list_item(list, index);
            }
            Location::Comment => {
                if let Some(parent) = parent {
                    self.notify_property(
                        parent,
                        Property::COMMENT,
                        PropertyValue::Node(child),
                        PropertyValue::Absent,
                    );
                    if let Some(data) = self.nodes.get_mut(parent) {
                        data.comment = None;
                    }
                }
            }
            Location::Slot {
                property,
                required: false,
            } => {
                if let Some(parent) = parent {
                    self.notify_property(
                        parent,
                        property,
                        PropertyValue::Node(child),
                        PropertyValue::Absent,
                    );
                    let cleared = self.write_node_slot(parent, property, None);
                    debug_assert!(cleared.is_ok(), "optional slot '{property}' refused absence");
                }
            }
            Location::Slot { required: true, .. } => {
                debug_assert!(false, "vacate called on a required slot");
            }
            Location::Orphan { index } => {
                if let Some(data) = parent.and_then(|p| self.nodes.get_mut(p)) {
                    data.orphan_comments.remove(index);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Property access
    // ------------------------------------------------------------------------

    fn read_slot(&self, node: NodeId, property: Property) -> AstResult<SlotRef<'_>> {
        let data = self.node(node)?;
        data.kind
            .slots()
            .into_iter()
            .find(|(p, _)| *p == property)
            .map(|(_, slot)| slot)
            .ok_or_else(|| {
                AstError::invalid_argument(format!(
                    "{} has no property '{property}'",
                    data.syntax_kind()
                ))
            })
    }

    fn write_node_slot(
        &mut self,
        node: NodeId,
        property: Property,
        value: Option<NodeId>,
    ) -> AstResult<()> {
        let data = self.node_mut(node)?;
        for (p, slot) in data.kind.slots_mut() {
            if p != property {
                continue;
            }
            match (slot, value) {
                (SlotMut::Node(slot), Some(value)) => *slot = value,
                (SlotMut::OptNode(slot), value) => *slot = value,
                _ => break,
            }
            return Ok(());
        }
        Err(AstError::invalid_argument(format!(
            "cannot store {value:?} in property '{property}'"
        )))
    }

    fn write_list_slot(
        &mut self,
        node: NodeId,
        property: Property,
        value: Option<NodeListId>,
    ) -> AstResult<()> {
        let data = self.node_mut(node)?;
        if property == Property::EXTENSION_COMMENTS {
            data.extension_comments = value;
            return Ok(());
        }
        for (p, slot) in data.kind.slots_mut() {
            if p != property {
                continue;
            }
            match (slot, value) {
                (SlotMut::List(slot), Some(value)) => *slot = value,
                (SlotMut::OptList(slot), value) => *slot = value,
                _ => break,
            }
            return Ok(());
        }
        Err(AstError::invalid_argument(format!(
            "cannot store {value:?} in property '{property}'"
        )))
    }

    /// The node held by a single-node property.
    pub fn child(&self, node: NodeId, property: Property) -> AstResult<Option<NodeId>> {
        if property == Property::COMMENT {
            return Ok(self.node(node)?.comment);
        }
        match self.read_slot(node, property)? {
            SlotRef::Node(id) => Ok(Some(id)),
            SlotRef::OptNode(id) => Ok(id),
            _ => Err(AstError::invalid_argument(format!(
                "property '{property}' does not hold a single node"
            ))),
        }
    }

    /// The list held by a list property.
    pub fn child_list(&self, node: NodeId, property: Property) -> AstResult<Option<NodeListId>> {
        if property == Property::EXTENSION_COMMENTS {
            return Ok(self.node(node)?.extension_comments);
        }
        match self.read_slot(node, property)? {
            SlotRef::List(id) => Ok(Some(id)),
            SlotRef::OptList(id) => Ok(id),
            _ => Err(AstError::invalid_argument(format!(
                "property '{property}' does not hold a node list"
            ))),
        }
    }

    /// The value of an attribute property.
    pub fn attr<T: 'static>(&self, node: NodeId, property: Property) -> AstResult<&T> {
        match self.read_slot(node, property)? {
            SlotRef::Attr(value) => {
                let type_name = value.attr_type_name();
                value.as_any().downcast_ref::<T>().ok_or_else(|| {
                    AstError::invalid_argument(format!(
                        "property '{property}' holds {type_name}, not {}",
                        std::any::type_name::<T>()
                    ))
                })
            }
            _ => Err(AstError::invalid_argument(format!(
                "property '{property}' is not an attribute"
            ))),
        }
    }

    /// Any property as a [`PropertyValue`].
    pub fn property_value(&self, node: NodeId, property: Property) -> AstResult<PropertyValue> {
        if property == Property::COMMENT {
            return Ok(self.node(node)?.comment.into());
        }
        if property == Property::EXTENSION_COMMENTS {
            return Ok(self.node(node)?.extension_comments.into());
        }
        Ok(match self.read_slot(node, property)? {
            SlotRef::Node(id) => PropertyValue::Node(id),
            SlotRef::OptNode(id) => id.into(),
            SlotRef::List(id) => PropertyValue::List(id),
            SlotRef::OptList(id) => id.into(),
            SlotRef::Attr(value) => PropertyValue::Attr(format!("{value:?}")),
        })
    }

    // ------------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------------

    /// Set a single-node property. `None` clears an optional property.
    pub fn set_child(
        &mut self,
        node: NodeId,
        property: Property,
        value: Option<NodeId>,
    ) -> AstResult<()> {
        if property == Property::COMMENT {
            return self.set_comment(node, value);
        }
        let kind = self.node(node)?.syntax_kind();
        let shape = kind
            .property(property)
            .map(|d| d.shape)
            .ok_or_else(|| {
                AstError::invalid_argument(format!("{kind} has no property '{property}'"))
            })?;
        let accepts = match shape {
            SlotShape::Node(c) | SlotShape::OptNode(c) => c,
            _ => {
                return Err(AstError::invalid_argument(format!(
                    "property '{property}' of {kind} does not hold a single node"
                )))
            }
        };
        if value.is_none() && shape.is_required() {
            return Err(AstError::null_argument(property.name()));
        }
        let current = self.read_slot(node, property)?.node();
        if current == value {
            return Ok(());
        }
        if let Some(child) = value {
            self.check_category(accepts, child, property)?;
            self.check_adoptable(Some(node), child)?;
        }

        self.notify_property(node, property, current.into(), value.into());
        if let Some(child) = value {
            self.vacate(child);
        }
        if let Some(old) = current {
            self.reparent(old, None);
        }
        self.write_node_slot(node, property, value)?;
        if let Some(child) = value {
            self.propagate_from_node(node, child);
            self.reparent(child, Some(node));
        }
        self.flush_events();
        Ok(())
    }

    /// Set a list property. `None` clears an optional list property.
    ///
    /// The new list must not be held by any other node. Elements of the old
    /// list lose their parent; elements of the new list gain this node.
    pub fn set_list(
        &mut self,
        node: NodeId,
        property: Property,
        value: Option<NodeListId>,
    ) -> AstResult<()> {
        let kind = self.node(node)?.syntax_kind();
        let (accepts, required) = if property == Property::EXTENSION_COMMENTS {
            (Category::Comment, false)
        } else {
            match kind.property(property).map(|d| d.shape) {
                Some(SlotShape::List(c)) => (c, true),
                Some(SlotShape::OptList(c)) => (c, false),
                Some(_) => {
                    return Err(AstError::invalid_argument(format!(
                        "property '{property}' of {kind} does not hold a node list"
                    )))
                }
                None => {
                    return Err(AstError::invalid_argument(format!(
                        "{kind} has no property '{property}'"
                    )))
                }
            }
        };
        if value.is_none() && required {
            return Err(AstError::null_argument(property.name()));
        }
        let current = self.child_list(node, property)?;
        if current == value {
            return Ok(());
        }
        if let Some(list) = value {
            let data = self.list(list)?;
            if let Some(owner) = data.owner {
                return Err(AstError::invalid_argument(format!(
                    "{list} is already held by {owner}"
                )));
            }
            for &item in &data.items {
                self.check_category(accepts, item, property)?;
                if item == node || self.is_ancestor_of(item, node) {
                    return Err(AstError::invalid_argument(format!(
                        "adopting {item} under {node} would create a cycle"
                    )));
                }
            }
        }

        self.notify_property(node, property, current.into(), value.into());
        if let Some(old) = current {
            self.release_list(old);
        }
        self.write_list_slot(node, property, value)?;
        if let Some(list) = value {
            self.adopt_list(node, property, list);
        }
        self.flush_events();
        Ok(())
    }

    /// Set the extension comment list.
    pub fn set_extension_comments(
        &mut self,
        node: NodeId,
        value: Option<NodeListId>,
    ) -> AstResult<()> {
        self.set_list(node, Property::EXTENSION_COMMENTS, value)
    }

    /// Set an attribute property. The value type must match the declared type.
    pub fn set_attr<T: Attribute>(&mut self, node: NodeId, property: Property, value: T) -> AstResult<()> {
        let (old, unchanged) = match self.read_slot(node, property)? {
            SlotRef::Attr(current) => {
                if current.attr_type() != TypeId::of::<T>() {
                    return Err(AstError::invalid_argument(format!(
                        "property '{property}' holds {}, not {}",
                        current.attr_type_name(),
                        std::any::type_name::<T>()
                    )));
                }
                (format!("{current:?}"), current.attr_eq(&value))
            }
            _ => {
                return Err(AstError::invalid_argument(format!(
                    "property '{property}' is not an attribute"
                )))
            }
        };
        if unchanged {
            return Ok(());
        }
        self.notify_property(
            node,
            property,
            PropertyValue::Attr(old),
            PropertyValue::Attr(format!("{value:?}")),
        );
        let data = self.node_mut(node)?;
        for (p, slot) in data.kind.slots_mut() {
            if p != property {
                continue;
            }
            if let SlotMut::Attr(slot) = slot {
                if let Some(slot) = slot.as_any_mut().downcast_mut::<T>() {
                    *slot = value;
                }
            }
            break;
        }
        self.flush_events();
        Ok(())
    }

    /// Detach every element of a list from the node that held it.
    pub(crate) fn release_list(&mut self, list: NodeListId) {
        let items = match self.lists.get_mut(list) {
            Some(data) => {
                data.owner = None;
                data.property = None;
                data.items.clone()
            }
            None => return,
        };
        for item in items {
            self.reparent(item, None);
        }
    }

    /// Make `owner` the holder of `list` under `property`.
    pub(crate) fn adopt_list(&mut self, owner: NodeId, property: Property, list: NodeListId) {
        let items = match self.lists.get_mut(list) {
            Some(data) => {
                data.owner = Some(owner);
                data.property = Some(property);
                data.items.clone()
            }
            None => return,
        };
        self.propagate_list_from_node(owner, list);
        for item in items {
            self.reparent(item, Some(owner));
        }
    }

    // ------------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------------

    /// Attach a comment, or remove it with `None`.
    ///
    /// The comment's parent becomes the commented node. A comment already
    /// attached elsewhere moves here.
    pub fn set_comment(&mut self, node: NodeId, comment: Option<NodeId>) -> AstResult<()> {
        let data = self.node(node)?;
        let current = data.comment;
        if let Some(comment) = comment {
            if data.is_comment() {
                return Err(AstError::illegal_state(format!(
                    "{node} is a comment and cannot carry a comment"
                )));
            }
            self.check_category(Category::Comment, comment, Property::COMMENT)?;
        }
        if current == comment {
            return Ok(());
        }
        if let Some(comment) = comment {
            self.check_adoptable(Some(node), comment)?;
        }

        self.notify_property(node, Property::COMMENT, current.into(), comment.into());
        if let Some(comment) = comment {
            self.vacate(comment);
        }
        if let Some(old) = current {
            self.reparent(old, None);
        }
        self.node_mut(node)?.comment = comment;
        if let Some(comment) = comment {
            self.propagate_from_node(node, comment);
            self.reparent(comment, Some(node));
        }
        self.flush_events();
        Ok(())
    }

    /// Remove the comment of a node. Returns whether there was one.
    pub fn remove_comment(&mut self, node: NodeId) -> AstResult<bool> {
        if self.node(node)?.comment.is_none() {
            return Ok(false);
        }
        self.set_comment(node, None)?;
        Ok(true)
    }

    /// The node a comment is attached to.
    pub fn commented_node(&self, comment: NodeId) -> Option<NodeId> {
        let parent = self.parent(comment)?;
        (self.comment(parent) == Some(comment)).then_some(parent)
    }

    /// Keep a comment under `node` without attaching it to any node.
    ///
    /// Orphan comments are not observable.
    pub fn add_orphan_comment(&mut self, node: NodeId, comment: NodeId) -> AstResult<()> {
        self.node(node)?;
        self.check_category(Category::Comment, comment, Property::COMMENT)?;
        if self.node(node)?.orphan_comments.contains(&comment) {
            return Ok(());
        }
        self.check_adoptable(Some(node), comment)?;
        self.vacate(comment);
        self.node_mut(node)?.orphan_comments.push(comment);
        self.reparent(comment, Some(node));
        self.flush_events();
        Ok(())
    }

    /// Remove an orphan comment. Returns whether it was present.
    pub fn remove_orphan_comment(&mut self, node: NodeId, comment: NodeId) -> AstResult<bool> {
        let data = self.node_mut(node)?;
        let Some(index) = data.orphan_comments.iter().position(|c| *c == comment) else {
            return Ok(false);
        };
        data.orphan_comments.remove(index);
        self.reparent(comment, None);
        self.flush_events();
        Ok(true)
    }

    /// Every comment inside the subtree of `node`, in pre-order.
    pub fn all_contained_comments(&self, node: NodeId) -> Vec<NodeId> {
        self.pre_order(node)
            .skip(1)
            .filter(|id| self.get(*id).is_some_and(|d| d.is_comment()))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Removal and replacement
    // ------------------------------------------------------------------------

    /// Detach `child` from `parent`.
    ///
    /// Returns `false` when `child` is not a child of `parent` or sits in a
    /// required property.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> AstResult<bool> {
        self.node(parent)?;
        if self.parent(child) != Some(parent) {
            return Ok(false);
        }
        match self.location_of(child) {
            Some(Location::Slot {
                property,
                required: false,
            }) => {
                self.set_child(parent, property, None)?;
                Ok(true)
            }
            Some(Location::Slot { required: true, .. }) | None => Ok(false),
            Some(Location::List { list, index }) => {
                self.list_remove_at(list, index)?;
                Ok(true)
            }
            Some(Location::Comment) => {
                self.set_comment(parent, None)?;
                Ok(true)
            }
            Some(Location::Orphan { .. }) => self.remove_orphan_comment(parent, child),
        }
    }

    /// Detach a node from its parent. Returns `false` for a root or a node
    /// held by a required property.
    pub fn remove(&mut self, node: NodeId) -> AstResult<bool> {
        match self.node(node)?.parent {
            Some(parent) => self.remove_child(parent, node),
            None => Ok(false),
        }
    }

    /// Remove the node, or failing that the nearest ancestor that can be
    /// removed. Does nothing if no ancestor can be removed.
    pub fn remove_forced(&mut self, node: NodeId) -> AstResult<()> {
        let mut current = node;
        loop {
            if self.remove(current)? {
                return Ok(());
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return Ok(()),
            }
        }
    }

    /// Put `new` where `old` sits in `parent`.
    ///
    /// Works for required properties too. Returns `false` when `old` is not
    /// a child of `parent`.
    pub fn replace(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> AstResult<bool> {
        self.node(parent)?;
        self.node(new)?;
        if self.parent(old) != Some(parent) {
            return Ok(false);
        }
        if old == new {
            return Ok(true);
        }
        match self.location_of(old) {
            Some(Location::Slot { property, .. }) => {
                self.set_child(parent, property, Some(new))?;
                Ok(true)
            }
            Some(Location::List { list, index }) => {
                self.list_set(list, index, new)?;
                Ok(true)
            }
            Some(Location::Comment) => {
                self.set_comment(parent, Some(new))?;
                Ok(true)
            }
            Some(Location::Orphan { .. }) => {
                self.check_category(Category::Comment, new, Property::COMMENT)?;
                self.check_adoptable(Some(parent), new)?;
                self.vacate(new);
                if let Some(data) = self.nodes.get_mut(parent) {
                    if let Some(slot) = data.orphan_comments.iter_mut().find(|c| **c == old) {
                        *slot = new;
                    }
                }
                self.reparent(old, None);
                self.reparent(new, Some(parent));
                self.flush_events();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Put `new` where `old` sits in its parent. Returns `false` for a root.
    pub fn replace_node(&mut self, old: NodeId, new: NodeId) -> AstResult<bool> {
        match self.node(old)?.parent {
            Some(parent) => self.replace(parent, old, new),
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------------
    // Source extent and parse status
    // ------------------------------------------------------------------------

    pub fn set_range(&mut self, node: NodeId, range: Option<TextRange>) -> AstResult<()> {
        self.node_mut(node)?.range = range;
        Ok(())
    }

    /// Set the token range; the text range follows it, and is absent unless
    /// both endpoint tokens carry a position.
    pub fn set_token_range(&mut self, node: NodeId, tokens: Option<TokenRange>) -> AstResult<()> {
        let data = self.node_mut(node)?;
        data.range = tokens.as_ref().and_then(TokenRange::to_range);
        data.token_range = tokens;
        Ok(())
    }

    pub fn range(&self, node: NodeId) -> Option<TextRange> {
        self.get(node).and_then(|d| d.range)
    }

    pub fn token_range(&self, node: NodeId) -> Option<&TokenRange> {
        self.get(node).and_then(|d| d.token_range.as_ref())
    }

    pub fn has_range(&self, node: NodeId) -> bool {
        self.range(node).is_some()
    }

    /// Whether the extent of `other` lies inside the extent of `node`.
    /// `false` when either has no extent.
    pub fn contains_within_range(&self, node: NodeId, other: NodeId) -> bool {
        match (self.range(node), self.range(other)) {
            (Some(outer), Some(inner)) => outer.contains(&inner),
            _ => false,
        }
    }

    /// Record whether the node came out of the parser intact. Not observable.
    pub fn set_parse_status(&mut self, node: NodeId, status: ParseStatus) -> AstResult<()> {
        self.node_mut(node)?.parse_status = status;
        Ok(())
    }

    pub fn parse_status(&self, node: NodeId) -> Option<ParseStatus> {
        self.get(node).map(|d| d.parse_status)
    }

    /// Lists held by a node: declared list slots in order, then extension comments.
    pub fn node_lists(&self, node: NodeId) -> Vec<NodeListId> {
        let mut lists = self.slot_lists(node);
        lists.extend(self.get(node).and_then(|d| d.extension_comments));
        lists
    }

    /// Allocate a list record without validation. Used by the list module.
    pub(crate) fn alloc_list(&mut self) -> NodeListId {
        self.lists.insert(ListData::new(Vec::new()))
    }
}
