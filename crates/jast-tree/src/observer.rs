// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Change observers.
//!
//! Observers are owned by the [`Ast`] and addressed by [`ObserverId`]. A
//! registration attaches an observer to one node or one list; every change
//! to that node or list is reported to it.
//!
//! ## Delivery
//!
//! Events are queued while a mutation runs and delivered, in order, before
//! the mutating call returns. Callbacks receive the tree read-only. To
//! mutate in response to an event, push a command onto the [`Deferred`]
//! sink; commands run after the queue drains, and any events they cause are
//! delivered in the same way before the original call returns.
//!
//! ## Propagation
//!
//! ```text
//! JustThisNode                    the node only
//! ThisNodeAndExistingDescendants  the node, its current descendants and their lists
//! SelfPropagating                 as above, and every subtree attached later
//! ```
//!
//! A self-propagating registration is copied onto new subtrees at the moment
//! they are attached, so the observer sees changes made to a subtree in the
//! same call that attached it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use jast_core::{AstError, AstResult};
use tracing::{trace, warn};

use crate::arena::{NodeId, NodeListId};
use crate::ast::Ast;
use crate::nodes::Property;

// ============================================================================
// Events
// ============================================================================

/// Value of a property before or after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Absent,
    Node(NodeId),
    List(NodeListId),
    /// Debug rendering of an attribute value.
    Attr(String),
}

impl From<Option<NodeId>> for PropertyValue {
    fn from(value: Option<NodeId>) -> Self {
        value.map_or(PropertyValue::Absent, PropertyValue::Node)
    }
}

impl From<Option<NodeListId>> for PropertyValue {
    fn from(value: Option<NodeListId>) -> Self {
        value.map_or(PropertyValue::Absent, PropertyValue::List)
    }
}

/// A property of a node changed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    pub node: NodeId,
    pub property: Property,
    pub old: PropertyValue,
    pub new: PropertyValue,
}

/// A node moved to a different parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentChange {
    pub node: NodeId,
    pub old_parent: Option<NodeId>,
    pub new_parent: Option<NodeId>,
}

/// What happened to a list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChangeKind {
    Addition,
    Removal,
    /// The element at the index was replaced; `node` is the new element.
    Replacement { old: NodeId },
}

/// A list gained, lost or replaced an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChange {
    pub list: NodeListId,
    /// Node holding the list, if any.
    pub owner: Option<NodeId>,
    /// Slot of `owner` holding the list.
    pub property: Option<Property>,
    pub kind: ListChangeKind,
    pub index: usize,
    pub node: NodeId,
}

/// Any change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstEvent {
    Property(PropertyChange),
    Parent(ParentChange),
    List(ListChange),
}

// ============================================================================
// Observers
// ============================================================================

/// Handle of an observer owned by an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u32);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({})", self.0)
    }
}

/// Receiver of change notifications.
///
/// All methods default to doing nothing.
pub trait AstObserver {
    #[allow(unused_variables)]
    fn property_change(&mut self, ast: &Ast, change: &PropertyChange, deferred: &mut Deferred) {}

    #[allow(unused_variables)]
    fn parent_change(&mut self, ast: &Ast, change: &ParentChange, deferred: &mut Deferred) {}

    #[allow(unused_variables)]
    fn list_change(&mut self, ast: &Ast, change: &ListChange, deferred: &mut Deferred) {}
}

/// How far a registration reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Propagation {
    JustThisNode,
    ThisNodeAndExistingDescendants,
    SelfPropagating,
}

impl FromStr for Propagation {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "justthisnode" => Ok(Propagation::JustThisNode),
            "thisnodeandexistingdescendants" => Ok(Propagation::ThisNodeAndExistingDescendants),
            "selfpropagating" => Ok(Propagation::SelfPropagating),
            _ => Err(AstError::invalid_argument(format!(
                "unknown observer registration mode '{s}'"
            ))),
        }
    }
}

type Command = Box<dyn FnOnce(&mut Ast) -> AstResult<()>>;

/// Sink for tree mutations requested from inside an observer callback.
#[derive(Default)]
pub struct Deferred {
    commands: Vec<Command>,
}

impl Deferred {
    /// Queue a mutation to run once the current event queue has drained.
    ///
    /// A command that fails is logged and dropped.
    pub fn push<F>(&mut self, command: F)
    where
        F: FnOnce(&mut Ast) -> AstResult<()> + 'static,
    {
        self.commands.push(Box::new(command));
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Observer that records every event it receives.
///
/// Clones share the same record, so keep one clone and hand the other to
/// [`Ast::add_observer`].
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<AstEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<AstEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return the events received so far.
    pub fn take(&self) -> Vec<AstEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl AstObserver for EventRecorder {
    fn property_change(&mut self, _ast: &Ast, change: &PropertyChange, _deferred: &mut Deferred) {
        self.events
            .borrow_mut()
            .push(AstEvent::Property(change.clone()));
    }

    fn parent_change(&mut self, _ast: &Ast, change: &ParentChange, _deferred: &mut Deferred) {
        self.events.borrow_mut().push(AstEvent::Parent(change.clone()));
    }

    fn list_change(&mut self, _ast: &Ast, change: &ListChange, _deferred: &mut Deferred) {
        self.events.borrow_mut().push(AstEvent::List(change.clone()));
    }
}

// ============================================================================
// Observer Table
// ============================================================================

/// One observer attached to one node or list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Registration {
    pub(crate) observer: ObserverId,
    /// Copy this registration onto subtrees attached later.
    pub(crate) propagating: bool,
}

/// Observer storage and the pending event queue.
#[derive(Default)]
pub(crate) struct ObserverTable {
    /// `None` while an observer is being called, or after it was taken.
    slots: Vec<Option<Box<dyn AstObserver>>>,
    pending: VecDeque<(ObserverId, AstEvent)>,
    deferred: Vec<Command>,
    flushing: bool,
    pub(crate) phantom_invalidator: Option<ObserverId>,
}

impl ObserverTable {
    /// Whether `id` names an observer the tree still owns.
    fn contains(&self, id: ObserverId) -> bool {
        self.slots
            .get(id.0 as usize)
            .is_some_and(Option::is_some)
    }
}

fn add_registration(registrations: &mut Vec<Registration>, registration: Registration) {
    match registrations
        .iter_mut()
        .find(|r| r.observer == registration.observer)
    {
        Some(existing) => existing.propagating |= registration.propagating,
        None => registrations.push(registration),
    }
}

impl Ast {
    // ------------------------------------------------------------------------
    // Observer ownership
    // ------------------------------------------------------------------------

    /// Hand an observer to the tree. It receives nothing until registered.
    pub fn add_observer<O: AstObserver + 'static>(&mut self, observer: O) -> ObserverId {
        let id = ObserverId(self.observers.slots.len() as u32);
        self.observers.slots.push(Some(Box::new(observer)));
        id
    }

    /// Take an observer back, dropping all of its registrations.
    ///
    /// Returns `None` for unknown ids and for observers the tree installs
    /// for itself.
    pub fn take_observer(&mut self, id: ObserverId) -> Option<Box<dyn AstObserver>> {
        if self.observers.phantom_invalidator == Some(id) {
            return None;
        }
        let observer = self.observers.slots.get_mut(id.0 as usize)?.take()?;
        for node in self.nodes.handles::<NodeId>() {
            if let Some(data) = self.nodes.get_mut(node) {
                data.registrations.retain(|r| r.observer != id);
            }
        }
        for list in self.lists.handles::<NodeListId>() {
            if let Some(data) = self.lists.get_mut(list) {
                data.registrations.retain(|r| r.observer != id);
            }
        }
        Some(observer)
    }

    fn check_observer(&self, id: ObserverId) -> AstResult<()> {
        if self.observers.contains(id) {
            Ok(())
        } else {
            Err(AstError::invalid_argument(format!("unknown observer {id}")))
        }
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register an observer on one node.
    pub fn register(&mut self, node: NodeId, observer: ObserverId) -> AstResult<()> {
        self.observe(node, observer, Propagation::JustThisNode)
    }

    /// Register an observer on one list.
    pub fn register_list(&mut self, list: NodeListId, observer: ObserverId) -> AstResult<()> {
        self.observe_list(list, observer, Propagation::JustThisNode)
    }

    /// Register an observer on a list, reaching as far as `mode` says.
    ///
    /// `JustThisNode` covers the list alone. The other modes also cover the
    /// subtree of every current element; `SelfPropagating` additionally
    /// reaches elements inserted later.
    pub fn observe_list(
        &mut self,
        list: NodeListId,
        observer: ObserverId,
        mode: Propagation,
    ) -> AstResult<()> {
        self.check_observer(observer)?;
        let propagating = mode == Propagation::SelfPropagating;
        add_registration(
            &mut self.list_mut(list)?.registrations,
            Registration {
                observer,
                propagating,
            },
        );
        trace!("observe {} on {} ({:?})", observer, list, mode);
        if mode != Propagation::JustThisNode {
            for item in self.items(list).to_vec() {
                self.register_subtree(item, &[observer], propagating);
            }
        }
        Ok(())
    }

    /// Register an observer on a node, reaching as far as `mode` says.
    pub fn observe(
        &mut self,
        node: NodeId,
        observer: ObserverId,
        mode: Propagation,
    ) -> AstResult<()> {
        self.check_observer(observer)?;
        self.node(node)?;
        trace!("observe {} on {} ({:?})", observer, node, mode);
        match mode {
            Propagation::JustThisNode => {
                add_registration(
                    &mut self.node_mut(node)?.registrations,
                    Registration {
                        observer,
                        propagating: false,
                    },
                );
            }
            Propagation::ThisNodeAndExistingDescendants => {
                self.register_subtree(node, &[observer], false);
            }
            Propagation::SelfPropagating => {
                self.register_subtree(node, &[observer], true);
            }
        }
        Ok(())
    }

    /// Remove an observer from one node. Descendants keep their registrations.
    pub fn unregister(&mut self, node: NodeId, observer: ObserverId) -> AstResult<()> {
        self.node_mut(node)?
            .registrations
            .retain(|r| r.observer != observer);
        Ok(())
    }

    /// Remove an observer from one list.
    pub fn unregister_list(&mut self, list: NodeListId, observer: ObserverId) -> AstResult<()> {
        self.list_mut(list)?
            .registrations
            .retain(|r| r.observer != observer);
        Ok(())
    }

    pub fn is_registered(&self, node: NodeId, observer: ObserverId) -> bool {
        self.get(node)
            .is_some_and(|n| n.registrations.iter().any(|r| r.observer == observer))
    }

    pub fn is_registered_list(&self, list: NodeListId, observer: ObserverId) -> bool {
        self.lists
            .get(list)
            .is_some_and(|l| l.registrations.iter().any(|r| r.observer == observer))
    }

    /// Observers registered directly on a node, excluding internal ones.
    pub fn observers_of(&self, node: NodeId) -> Vec<ObserverId> {
        let internal = self.observers.phantom_invalidator;
        self.get(node)
            .map(|n| {
                n.registrations
                    .iter()
                    .map(|r| r.observer)
                    .filter(|id| Some(*id) != internal)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Register on every node of the subtree and on every list they hold.
    fn register_subtree(&mut self, root: NodeId, observers: &[ObserverId], propagating: bool) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(data) = self.nodes.get_mut(id) else {
                continue;
            };
            for &observer in observers {
                add_registration(
                    &mut data.registrations,
                    Registration {
                        observer,
                        propagating,
                    },
                );
            }
            stack.extend_from_slice(&data.children);
            let mut lists: Vec<NodeListId> =
                data.kind.slots().iter().filter_map(|(_, s)| s.list()).collect();
            lists.extend(data.extension_comments);
            for list in lists {
                if let Some(list) = self.lists.get_mut(list) {
                    for &observer in observers {
                        add_registration(
                            &mut list.registrations,
                            Registration {
                                observer,
                                propagating,
                            },
                        );
                    }
                }
            }
        }
    }

    fn propagating_observers(registrations: &[Registration]) -> Vec<ObserverId> {
        registrations
            .iter()
            .filter(|r| r.propagating)
            .map(|r| r.observer)
            .collect()
    }

    /// Copy self-propagating registrations of `owner` onto a newly attached subtree.
    pub(crate) fn propagate_from_node(&mut self, owner: NodeId, subtree: NodeId) {
        let observers = match self.get(owner) {
            Some(data) => Self::propagating_observers(&data.registrations),
            None => return,
        };
        if !observers.is_empty() {
            self.register_subtree(subtree, &observers, true);
        }
    }

    /// Copy self-propagating registrations of `owner` onto a newly attached list.
    pub(crate) fn propagate_list_from_node(&mut self, owner: NodeId, list: NodeListId) {
        let observers = match self.get(owner) {
            Some(data) => Self::propagating_observers(&data.registrations),
            None => return,
        };
        if observers.is_empty() {
            return;
        }
        if let Some(data) = self.lists.get_mut(list) {
            for &observer in &observers {
                add_registration(
                    &mut data.registrations,
                    Registration {
                        observer,
                        propagating: true,
                    },
                );
            }
        }
        for item in self.items(list).to_vec() {
            self.register_subtree(item, &observers, true);
        }
    }

    /// Copy self-propagating registrations of `list` onto a newly added element.
    pub(crate) fn propagate_from_list(&mut self, list: NodeListId, subtree: NodeId) {
        let observers = match self.lists.get(list) {
            Some(data) => Self::propagating_observers(&data.registrations),
            None => return,
        };
        if !observers.is_empty() {
            self.register_subtree(subtree, &observers, true);
        }
    }

    // ------------------------------------------------------------------------
    // Emission and delivery
    // ------------------------------------------------------------------------

    /// Queue an event for the observers registered on `node`.
    pub(crate) fn notify_node(&mut self, node: NodeId, event: AstEvent) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        for registration in &data.registrations {
            self.observers
                .pending
                .push_back((registration.observer, event.clone()));
        }
    }

    /// Queue an event for the observers registered on `list`.
    pub(crate) fn notify_list(&mut self, list: NodeListId, event: AstEvent) {
        let Some(data) = self.lists.get(list) else {
            return;
        };
        for registration in &data.registrations {
            self.observers
                .pending
                .push_back((registration.observer, event.clone()));
        }
    }

    pub(crate) fn notify_property(
        &mut self,
        node: NodeId,
        property: Property,
        old: PropertyValue,
        new: PropertyValue,
    ) {
        self.notify_node(
            node,
            AstEvent::Property(PropertyChange {
                node,
                property,
                old,
                new,
            }),
        );
    }

    /// Deliver queued events, then run deferred commands, until both are empty.
    ///
    /// Re-entrant calls (from deferred commands) return immediately; the
    /// outermost call keeps draining.
    pub(crate) fn flush_events(&mut self) {
        if self.observers.flushing {
            return;
        }
        self.observers.flushing = true;
        loop {
            while let Some((id, event)) = self.observers.pending.pop_front() {
                let Some(mut observer) = self
                    .observers
                    .slots
                    .get_mut(id.0 as usize)
                    .and_then(Option::take)
                else {
                    continue;
                };
                let mut deferred = Deferred::default();
                match &event {
                    AstEvent::Property(change) => observer.property_change(self, change, &mut deferred),
                    AstEvent::Parent(change) => observer.parent_change(self, change, &mut deferred),
                    AstEvent::List(change) => observer.list_change(self, change, &mut deferred),
                }
                if let Some(slot) = self.observers.slots.get_mut(id.0 as usize) {
                    *slot = Some(observer);
                }
                self.observers.deferred.extend(deferred.commands);
            }
            if self.observers.deferred.is_empty() {
                break;
            }
            let commands = std::mem::take(&mut self.observers.deferred);
            trace!("running {} deferred commands", commands.len());
            for command in commands {
                if let Err(err) = command(self) {
                    warn!("deferred observer command failed: {}", err);
                }
            }
        }
        self.observers.flushing = false;
    }

    /// Lists held in the declared slots of a node.
    pub(crate) fn slot_lists(&self, node: NodeId) -> Vec<NodeListId> {
        self.get(node)
            .map(|data| {
                data.kind
                    .slots()
                    .into_iter()
                    .filter_map(|(_, slot)| slot.list())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propagation_from_str() {
        assert_eq!(
            "self_propagating".parse::<Propagation>(),
            Ok(Propagation::SelfPropagating)
        );
        assert_eq!(
            "THIS_NODE_AND_EXISTING_DESCENDANTS".parse::<Propagation>(),
            Ok(Propagation::ThisNodeAndExistingDescendants)
        );
        assert!("everything".parse::<Propagation>().is_err());
    }

    #[test]
    fn test_add_registration_dedupes() {
        let mut registrations = Vec::new();
        let id = ObserverId(0);
        add_registration(
            &mut registrations,
            Registration {
                observer: id,
                propagating: false,
            },
        );
        add_registration(
            &mut registrations,
            Registration {
                observer: id,
                propagating: true,
            },
        );
        assert_eq!(registrations.len(), 1);
        assert!(registrations[0].propagating);
    }

    #[test]
    fn test_deferred_counts_commands() {
        let mut deferred = Deferred::default();
        assert!(deferred.is_empty());
        deferred.push(|_ast| Ok(()));
        assert_eq!(deferred.len(), 1);
    }
}
