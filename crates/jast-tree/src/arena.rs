// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Generational arena storage for nodes and node lists.
//!
//! Nodes refer to each other through [`NodeId`] and [`NodeListId`] handles
//! instead of pointers. A handle pairs a slot index with the generation the
//! slot had when the value was stored; freeing a slot bumps its generation,
//! so a handle to a freed value is detected as stale instead of silently
//! aliasing whatever reused the slot.

use std::fmt;

/// Handle of a node stored in an [`Ast`](crate::Ast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Handle of a node list stored in an [`Ast`](crate::Ast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeListId {
    index: u32,
    generation: u32,
}

/// Common shape of arena handles.
pub(crate) trait Handle: Copy {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn index(self) -> u32;
    fn generation(self) -> u32;
}

macro_rules! impl_handle {
    ($($name:ident => $tag:literal),* $(,)?) => {
        $(
            impl Handle for $name {
                fn from_parts(index: u32, generation: u32) -> Self {
                    $name { index, generation }
                }

                fn index(self) -> u32 {
                    self.index
                }

                fn generation(self) -> u32 {
                    self.generation
                }
            }

            impl $name {
                /// Slot index inside the arena.
                pub fn index(self) -> u32 {
                    self.index
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($tag, "({}v{})"), self.index, self.generation)
                }
            }
        )*
    };
}

impl_handle!(NodeId => "NodeId", NodeListId => "NodeListId");

// ============================================================================
// Store
// ============================================================================

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with free-list reuse.
pub(crate) struct Store<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Store<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Store {
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn insert<H: Handle>(&mut self, value: T) -> H {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.value = Some(value);
            return H::from_parts(index, entry.generation);
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            value: Some(value),
        });
        H::from_parts(index, 0)
    }

    pub(crate) fn get<H: Handle>(&self, handle: H) -> Option<&T> {
        self.entries
            .get(handle.index() as usize)
            .filter(|e| e.generation == handle.generation())
            .and_then(|e| e.value.as_ref())
    }

    pub(crate) fn get_mut<H: Handle>(&mut self, handle: H) -> Option<&mut T> {
        self.entries
            .get_mut(handle.index() as usize)
            .filter(|e| e.generation == handle.generation())
            .and_then(|e| e.value.as_mut())
    }

    pub(crate) fn contains<H: Handle>(&self, handle: H) -> bool {
        self.get(handle).is_some()
    }

    pub(crate) fn remove<H: Handle>(&mut self, handle: H) -> Option<T> {
        let entry = self.entries.get_mut(handle.index() as usize)?;
        if entry.generation != handle.generation() {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.index());
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Handles of every live value, in slot order.
    pub(crate) fn handles<H: Handle>(&self) -> Vec<H> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.value.is_some())
            .map(|(i, e)| H::from_parts(i as u32, e.generation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freed_slot_is_reused_with_new_generation() {
        let mut store: Store<&str> = Store::with_capacity(4);
        let a: NodeId = store.insert("a");
        let b: NodeId = store.insert("b");
        assert_eq!(store.remove(a), Some("a"));
        assert!(!store.contains(a));

        let c: NodeId = store.insert("c");
        assert_eq!(c.index(), a.index());
        assert_ne!(c, a);
        assert_eq!(store.get(a), None);
        assert_eq!(store.get(c), Some(&"c"));
        assert_eq!(store.get(b), Some(&"b"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_double_remove_is_none() {
        let mut store: Store<u8> = Store::with_capacity(0);
        let a: NodeListId = store.insert(1);
        assert_eq!(store.remove(a), Some(1));
        assert_eq!(store.remove(a), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_handle_display() {
        let mut store: Store<u8> = Store::with_capacity(0);
        let a: NodeId = store.insert(1);
        assert_eq!(a.to_string(), "NodeId(0v0)");
    }
}
