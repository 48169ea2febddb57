// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core traits and types describing node property slots.
//!
//! # Property Slots
//!
//! Every node variant declares an ordered list of property slots. A slot has
//! one of five shapes:
//!
//! ```text
//! node      required child node          NodeId
//! opt_node  optional child node          Option<NodeId>
//! list      required node list           NodeListId
//! opt_list  optional node list           Option<NodeListId>
//! attr      plain value (no ownership)   String, bool, operators, ...
//! ```
//!
//! The declared order is load-bearing: visitors, equality and hashing all walk
//! slots in this order, followed by the universal extension-comment and
//! comment slots.

use std::any::{Any, TypeId};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{NodeKind, SyntaxKind};
use crate::arena::{NodeId, NodeListId};

// ============================================================================
// Categories
// ============================================================================

/// Coarse classification of node variants.
///
/// Child slots name the category they accept; setters reject children of
/// any other category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CompilationUnit,
    Package,
    Import,
    Declaration,
    Parameter,
    Variable,
    Type,
    Statement,
    CatchClause,
    SwitchEntry,
    Expression,
    MemberValuePair,
    Name,
    Comment,
    /// Accepts nodes of every category.
    Any,
}

impl Category {
    /// Returns whether a slot of this category accepts a node of `kind`.
    pub fn accepts(self, kind: SyntaxKind) -> bool {
        self == Category::Any || kind.category() == self
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ============================================================================
// Properties
// ============================================================================

/// Tag naming one property slot of a node.
///
/// Tags compare by name. The universal slots shared by every node are
/// [`Property::COMMENT`] and [`Property::EXTENSION_COMMENTS`]; per-variant
/// tags are associated constants such as `MethodCallExpr::SCOPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Property(&'static str);

impl Property {
    /// The comment attached to a node.
    pub const COMMENT: Property = Property("comment");

    /// Comments kept for downstream extensions.
    pub const EXTENSION_COMMENTS: Property = Property("extension_comments");

    /// Create a property tag.
    pub const fn new(name: &'static str) -> Self {
        Property(name)
    }

    /// The property name.
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Returns whether this is one of the slots every node carries.
    pub fn is_universal(&self) -> bool {
        *self == Property::COMMENT || *self == Property::EXTENSION_COMMENTS
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Shape of a property slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotShape {
    Node(Category),
    OptNode(Category),
    List(Category),
    OptList(Category),
    Attr,
}

impl SlotShape {
    /// Required slots never hold an absent value.
    pub fn is_required(&self) -> bool {
        matches!(self, SlotShape::Node(_) | SlotShape::List(_))
    }

    /// Returns whether the slot holds a node list.
    pub fn is_list(&self) -> bool {
        matches!(self, SlotShape::List(_) | SlotShape::OptList(_))
    }

    /// Returns whether the slot holds a single node.
    pub fn is_node(&self) -> bool {
        matches!(self, SlotShape::Node(_) | SlotShape::OptNode(_))
    }

    /// Category accepted by a node or list slot.
    pub fn accepts(&self) -> Option<Category> {
        match self {
            SlotShape::Node(c) | SlotShape::OptNode(c) | SlotShape::List(c) | SlotShape::OptList(c) => {
                Some(*c)
            }
            SlotShape::Attr => None,
        }
    }
}

/// Static description of one property slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyDescriptor {
    pub property: Property,
    pub shape: SlotShape,
}

impl PropertyDescriptor {
    /// Create a descriptor.
    pub const fn new(property: Property, shape: SlotShape) -> Self {
        PropertyDescriptor { property, shape }
    }
}

// ============================================================================
// Slot Views
// ============================================================================

/// Read view of one property slot of a node.
#[derive(Debug, Clone, Copy)]
pub enum SlotRef<'a> {
    Node(NodeId),
    OptNode(Option<NodeId>),
    List(NodeListId),
    OptList(Option<NodeListId>),
    Attr(&'a dyn Attribute),
}

impl SlotRef<'_> {
    /// The child node held by a node slot, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            SlotRef::Node(id) => Some(*id),
            SlotRef::OptNode(id) => *id,
            _ => None,
        }
    }

    /// The node list held by a list slot, if any.
    pub fn list(&self) -> Option<NodeListId> {
        match self {
            SlotRef::List(id) => Some(*id),
            SlotRef::OptList(id) => *id,
            _ => None,
        }
    }
}

/// Write view of one property slot of a node.
pub enum SlotMut<'a> {
    Node(&'a mut NodeId),
    OptNode(&'a mut Option<NodeId>),
    List(&'a mut NodeListId),
    OptList(&'a mut Option<NodeListId>),
    Attr(&'a mut dyn Attribute),
}

// ============================================================================
// Attributes
// ============================================================================

/// Plain value stored in an `attr` slot.
///
/// Implemented for every `'static` type with `Debug`, `PartialEq` and `Hash`,
/// which lets equality and hashing treat attributes uniformly.
pub trait Attribute: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Value equality against another attribute of possibly different type.
    fn attr_eq(&self, other: &dyn Attribute) -> bool;
    /// Deterministic hash of the value.
    fn attr_hash(&self) -> u64;
    fn attr_type(&self) -> TypeId;
    fn attr_type_name(&self) -> &'static str;
}

impl<T> Attribute for T
where
    T: Any + fmt::Debug + PartialEq + Hash,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn attr_eq(&self, other: &dyn Attribute) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn attr_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn attr_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn attr_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

// ============================================================================
// Typed Node Access
// ============================================================================

/// Implemented by every node variant payload.
pub trait AstNode: Into<NodeKind> + Sized {
    /// Tag of this variant.
    const KIND: SyntaxKind;

    /// Borrow the payload if `kind` is this variant.
    fn cast(kind: &NodeKind) -> Option<&Self>;
}
