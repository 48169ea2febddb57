// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Macros that expand the node catalogue into types.
//!
//! The catalogue is a single table (see `with_node_table!` in the parent
//! module). Each entry reads:
//!
//! ```text
//! Kind (snake_name) : Category { field: mode arg, ... }
//! ```
//!
//! where `mode` is one of `node`, `opt_node`, `list`, `opt_list` or `attr`,
//! and `arg` is the accepted category for the first four and the value type
//! for `attr`. Consumers match the full table grammar and use the parts they
//! need.

/// Storage type of a field.
macro_rules! field_ty {
    (node $cat:ident) => { NodeId };
    (opt_node $cat:ident) => { Option<NodeId> };
    (list $cat:ident) => { NodeListId };
    (opt_list $cat:ident) => { Option<NodeListId> };
    (attr $ty:ident) => { $ty };
}

/// Slot shape of a field.
macro_rules! field_shape {
    (node $cat:ident) => { SlotShape::Node(Category::$cat) };
    (opt_node $cat:ident) => { SlotShape::OptNode(Category::$cat) };
    (list $cat:ident) => { SlotShape::List(Category::$cat) };
    (opt_list $cat:ident) => { SlotShape::OptList(Category::$cat) };
    (attr $ty:ident) => { SlotShape::Attr };
}

/// Public getter of a field.
macro_rules! field_getter {
    ($field:ident, node $cat:ident) => {
        pub fn $field(&self) -> NodeId {
            self.$field
        }
    };
    ($field:ident, opt_node $cat:ident) => {
        pub fn $field(&self) -> Option<NodeId> {
            self.$field
        }
    };
    ($field:ident, list $cat:ident) => {
        pub fn $field(&self) -> NodeListId {
            self.$field
        }
    };
    ($field:ident, opt_list $cat:ident) => {
        pub fn $field(&self) -> Option<NodeListId> {
            self.$field
        }
    };
    ($field:ident, attr $ty:ident) => {
        pub fn $field(&self) -> &$ty {
            &self.$field
        }
    };
}

/// Read view of a field.
macro_rules! slot_ref {
    ($value:expr, node $cat:ident) => { SlotRef::Node($value) };
    ($value:expr, opt_node $cat:ident) => { SlotRef::OptNode($value) };
    ($value:expr, list $cat:ident) => { SlotRef::List($value) };
    ($value:expr, opt_list $cat:ident) => { SlotRef::OptList($value) };
    ($value:expr, attr $ty:ident) => { SlotRef::Attr(&$value) };
}

/// Write view of a field.
macro_rules! slot_mut {
    ($value:expr, node $cat:ident) => { SlotMut::Node(&mut $value) };
    ($value:expr, opt_node $cat:ident) => { SlotMut::OptNode(&mut $value) };
    ($value:expr, list $cat:ident) => { SlotMut::List(&mut $value) };
    ($value:expr, opt_list $cat:ident) => { SlotMut::OptList(&mut $value) };
    ($value:expr, attr $ty:ident) => { SlotMut::Attr(&mut $value) };
}

/// Expand the catalogue into payload structs, `SyntaxKind` and `NodeKind`.
macro_rules! define_nodes {
    (
        $(
            $(#[$meta:meta])*
            $kind:ident ($snake:ident) : $cat:ident {
                $( $field:ident : $mode:ident $arg:ident ),* $(,)?
            }
        )*
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[derive(Debug, Clone)]
                pub struct $kind {
                    $( pub(crate) $field: field_ty!($mode $arg), )*
                }

                impl $kind {
                    $(
                        #[doc = concat!("Tag of the `", stringify!($field), "` property.")]
                        pub const [<$field:upper>]: Property = Property::new(stringify!($field));
                    )*

                    /// Property slots in declaration order.
                    pub const PROPERTIES: &'static [PropertyDescriptor] = &[
                        $( PropertyDescriptor::new(Property::new(stringify!($field)), field_shape!($mode $arg)), )*
                    ];

                    #[allow(clippy::too_many_arguments, clippy::new_without_default)]
                    pub fn new($( $field: field_ty!($mode $arg) ),*) -> Self {
                        Self { $( $field ),* }
                    }

                    $( field_getter!($field, $mode $arg); )*

                    pub(crate) fn slots(&self) -> Vec<(Property, SlotRef<'_>)> {
                        vec![ $( (Self::[<$field:upper>], slot_ref!(self.$field, $mode $arg)) ),* ]
                    }

                    pub(crate) fn slots_mut(&mut self) -> Vec<(Property, SlotMut<'_>)> {
                        vec![ $( (Self::[<$field:upper>], slot_mut!(self.$field, $mode $arg)) ),* ]
                    }
                }

                impl AstNode for $kind {
                    const KIND: SyntaxKind = SyntaxKind::$kind;

                    fn cast(kind: &NodeKind) -> Option<&Self> {
                        match kind {
                            NodeKind::$kind(node) => Some(node),
                            _ => None,
                        }
                    }
                }

                impl From<$kind> for NodeKind {
                    fn from(node: $kind) -> Self {
                        NodeKind::$kind(node)
                    }
                }
            )*

            /// Tag of every node variant.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub enum SyntaxKind {
                $( $kind, )*
            }

            impl SyntaxKind {
                /// Every variant, in catalogue order.
                pub const ALL: &'static [SyntaxKind] = &[ $( SyntaxKind::$kind, )* ];

                /// Variant name, e.g. `"MethodCallExpr"`.
                pub fn name(self) -> &'static str {
                    match self {
                        $( SyntaxKind::$kind => stringify!($kind), )*
                    }
                }

                /// Snake-case variant name, e.g. `"method_call_expr"`.
                pub fn snake_name(self) -> &'static str {
                    match self {
                        $( SyntaxKind::$kind => stringify!($snake), )*
                    }
                }

                pub fn category(self) -> Category {
                    match self {
                        $( SyntaxKind::$kind => Category::$cat, )*
                    }
                }

                /// Declared property slots, in order.
                pub fn properties(self) -> &'static [PropertyDescriptor] {
                    match self {
                        $( SyntaxKind::$kind => $kind::PROPERTIES, )*
                    }
                }
            }

            /// Payload of a node: one variant per syntax kind.
            #[derive(Debug, Clone)]
            pub enum NodeKind {
                $( $kind($kind), )*
            }

            impl NodeKind {
                pub fn syntax_kind(&self) -> SyntaxKind {
                    match self {
                        $( NodeKind::$kind(_) => SyntaxKind::$kind, )*
                    }
                }

                /// Read views of the declared slots, in order.
                pub fn slots(&self) -> Vec<(Property, SlotRef<'_>)> {
                    match self {
                        $( NodeKind::$kind(node) => node.slots(), )*
                    }
                }

                pub(crate) fn slots_mut(&mut self) -> Vec<(Property, SlotMut<'_>)> {
                    match self {
                        $( NodeKind::$kind(node) => node.slots_mut(), )*
                    }
                }
            }
        }
    };
}
