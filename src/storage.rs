//! Arena storage for heap nodes
//!
//! Nodes live in a [`SlotMap`] and refer to each other through [`NodeKey`]s rather
//! than pointers. A key carries a generation counter, so a key to a removed node
//! never resolves to whatever later reuses its slot; lookups just return `None`.
//!
//! "Ownership" of a node is modelled by which [`KeyList`] holds its key: the root
//! list of the heap, or the child list of exactly one other node. Moving a node is
//! removing its key from one list and pushing it onto another.

use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Generation-checked index of a node in a [`NodeArena`]
    pub(crate) struct NodeKey;
}

/// Implemented by arena nodes that remember where their key sits inside the
/// [`KeyList`] currently holding them, which is what makes removal O(1).
pub(crate) trait Tracked {
    fn slot(&self) -> usize;
    fn set_slot(&mut self, slot: usize);
}

/// Contiguous node storage with generational keys
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> NodeArena<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    #[inline]
    pub(crate) fn insert(&mut self, node: N) -> NodeKey {
        self.nodes.insert(node)
    }

    #[inline]
    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<N> {
        self.nodes.remove(key)
    }

    #[inline]
    pub(crate) fn get(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.nodes.get_mut(key)
    }

    #[inline]
    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}

// Indexing is for keys the heap itself keeps in its lists; those are always live.
impl<N> Index<NodeKey> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }
}

impl<N> IndexMut<NodeKey> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }
}

/// An unordered list of node keys with O(1) push and O(1) removal by key
///
/// Each member node records its index in the list (see [`Tracked`]); removal
/// swaps the last key into the hole and patches that node's recorded index.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyList {
    keys: Vec<NodeKey>,
}

impl KeyList {
    pub(crate) fn push<N: Tracked>(&mut self, arena: &mut NodeArena<N>, key: NodeKey) {
        arena[key].set_slot(self.keys.len());
        self.keys.push(key);
    }

    pub(crate) fn remove<N: Tracked>(&mut self, arena: &mut NodeArena<N>, key: NodeKey) {
        let slot = arena[key].slot();
        debug_assert_eq!(self.keys[slot], key);
        self.remove_slot(arena, slot);
    }

    /// Removes whatever key sits at `slot`. Unlike [`KeyList::remove`] this does
    /// not look the removed node up, so it works after the node left the arena.
    pub(crate) fn remove_slot<N: Tracked>(&mut self, arena: &mut NodeArena<N>, slot: usize) -> NodeKey {
        let removed = self.keys.swap_remove(slot);
        if let Some(&moved) = self.keys.get(slot) {
            arena[moved].set_slot(slot);
        }
        removed
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.keys.iter().copied()
    }

    /// Empties the list, handing back its keys in list order
    pub(crate) fn take(&mut self) -> Vec<NodeKey> {
        std::mem::take(&mut self.keys)
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
    }
}
