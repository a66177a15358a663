//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized extract_min
//!
//! The structure is a forest of heap-ordered trees. All nodes live in a
//! generational arena and point at each other by key: a node holds the keys of
//! its children and the key of its parent, and the heap holds the keys of the
//! roots plus the key of the minimum root.
//!
//! The root list is only touched by `attach_root`, by the removal at the start
//! of extract_min and by `consolidate`. Each of them leaves the minimum pointer
//! correct.

use crate::storage::{KeyList, NodeArena, NodeKey, Tracked};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use std::fmt;
use tracing::{debug, trace};

/// Handle to an element in a Fibonacci heap
///
/// Handles are generation-checked: once the element is extracted (or the heap
/// is cleared), every operation given this handle fails with
/// [`HeapError::StaleHandle`]. A handle is only meaningful for the heap that
/// issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

#[derive(Clone)]
struct Node<T, K> {
    key: K,
    item: T,
    parent: Option<NodeKey>,
    children: KeyList,
    /// Index of this node inside whichever list holds it (roots or the
    /// parent's children)
    slot: usize,
    /// Lost a child since it last became a child. Always false on roots.
    marked: bool,
}

impl<T, K> Tracked for Node<T, K> {
    #[inline]
    fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    fn set_slot(&mut self, slot: usize) {
        self.slot = slot;
    }
}

/// Fibonacci Heap
///
/// `T` is the payload carried alongside each key; `K` is the ordering key.
///
/// # Example
///
/// ```rust
/// use fibonacci_arena_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert("item", 5);
/// heap.insert("other", 3);
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.extract_min(), Ok("item"));
/// assert_eq!(heap.extract_min(), Ok("other"));
/// assert!(heap.is_empty());
/// ```
#[derive(Clone)]
pub struct FibonacciHeap<T, K: Ord> {
    nodes: NodeArena<Node<T, K>>,
    roots: KeyList,
    min: Option<NodeKey>,
}

impl<T, K: Ord> Default for FibonacciHeap<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Ord> FibonacciHeap<T, K> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::default(),
            roots: KeyList::default(),
            min: None,
        }
    }

    /// Creates an empty heap with room for `capacity` elements before the
    /// node arena reallocates
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            roots: KeyList::default(),
            min: None,
        }
    }

    /// Returns true if the heap holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts `item` with the given `key` as a new single-node tree
    ///
    /// The returned handle stays valid until the element is extracted.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, item: T, key: K) -> FibonacciHandle {
        let node = self.nodes.insert(Node {
            key,
            item,
            parent: None,
            children: KeyList::default(),
            slot: 0,
            marked: false,
        });
        self.attach_root(node);
        FibonacciHandle { node }
    }

    /// Returns the minimum key and its item without removing them
    pub fn peek(&self) -> Option<(&K, &T)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.key, &node.item)
        })
    }

    /// Returns the current key and item of a live element
    ///
    /// # Errors
    /// [`HeapError::StaleHandle`] if the element was extracted.
    pub fn get(&self, handle: &FibonacciHandle) -> Result<(&K, &T), HeapError> {
        self.nodes
            .get(handle.node)
            .map(|node| (&node.key, &node.item))
            .ok_or(HeapError::StaleHandle)
    }

    /// Returns true while the element behind `handle` is still in the heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.nodes.contains(handle.node)
    }

    /// Removes every element. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.min = None;
    }

    /// Lowers the key of the element behind `handle` to `new_key`
    ///
    /// If the element now violates heap order it is cut to the root list,
    /// and every marked ancestor above it is cut as well (cascading cut). The
    /// first unmarked non-root ancestor is marked.
    ///
    /// A `new_key` equal to the current key is accepted and changes nothing.
    ///
    /// # Errors
    /// - [`HeapError::StaleHandle`] if the element was extracted
    /// - [`HeapError::InvalidKeyIncrease`] if `new_key` is greater than the
    ///   current key
    ///
    /// The heap is left untouched on error.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let x = handle.node;
        let Some(node) = self.nodes.get_mut(x) else {
            debug!("decrease_key rejected: stale handle");
            return Err(HeapError::StaleHandle);
        };
        if new_key > node.key {
            debug!("decrease_key rejected: key increase");
            return Err(HeapError::InvalidKeyIncrease);
        }
        node.key = new_key;
        let parent = node.parent;

        match parent {
            None => self.update_min(x),
            Some(parent) => {
                if self.nodes[x].key < self.nodes[parent].key {
                    self.cut(x);
                    self.cascading_cut(parent);
                }
            }
        }
        Ok(())
    }

    /// Removes the minimum element and returns its item
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if there is nothing to extract.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        self.extract_min_entry().map(|(_, item)| item)
    }

    /// Like [`extract_min`](Self::extract_min), but also returns the key
    pub fn extract_min_entry(&mut self) -> Result<(K, T), HeapError> {
        let Some(node) = self.min.and_then(|min| self.nodes.remove(min)) else {
            debug!("extract_min rejected: empty heap");
            return Err(HeapError::EmptyHeap);
        };
        let Node {
            key,
            item,
            children,
            slot,
            ..
        } = node;

        self.min = None;
        self.roots.remove_slot(&mut self.nodes, slot);
        for child in children.iter() {
            self.attach_root(child);
        }

        if !self.roots.is_empty() {
            self.consolidate();
        }
        Ok((key, item))
    }

    /// Makes `x` a root: clears its parent and mark, appends it to the root
    /// list and lets it become the minimum if its key is smaller.
    fn attach_root(&mut self, x: NodeKey) {
        let node = &mut self.nodes[x];
        node.parent = None;
        node.marked = false;
        self.roots.push(&mut self.nodes, x);
        self.update_min(x);
    }

    /// `x` must be a root.
    #[inline]
    fn update_min(&mut self, x: NodeKey) {
        let smaller = match self.min {
            None => true,
            Some(min) => self.nodes[x].key < self.nodes[min].key,
        };
        if smaller {
            self.min = Some(x);
        }
    }

    /// Detaches `x` from its parent's child list and makes it a root
    fn cut(&mut self, x: NodeKey) {
        let Some(parent) = self.nodes[x].parent else {
            return;
        };
        self.with_children(parent, |children, nodes| children.remove(nodes, x));
        self.attach_root(x);
    }

    /// Walks up from `y`, which just lost a child: marked non-roots are cut
    /// and unmarked, the first unmarked non-root is marked, and a root stops
    /// the walk unmarked.
    fn cascading_cut(&mut self, mut y: NodeKey) {
        let mut cascaded = 0usize;
        while let Some(parent) = self.nodes[y].parent {
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                break;
            }
            self.cut(y);
            cascaded += 1;
            y = parent;
        }
        if cascaded > 0 {
            trace!(cascaded, "cascading cut");
        }
    }

    /// Links equal-degree roots until every root has a distinct degree, then
    /// rebuilds the root list and recomputes the minimum.
    fn consolidate(&mut self) {
        let roots = self.roots.take();
        let before = roots.len();
        let mut links = 0usize;
        let mut by_degree: Vec<Option<NodeKey>> = Vec::new();

        for root in roots {
            let mut tree = root;
            loop {
                let degree = self.nodes[tree].children.len();
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    None => {
                        by_degree[degree] = Some(tree);
                        break;
                    }
                    Some(other) => {
                        tree = self.link(other, tree);
                        links += 1;
                    }
                }
            }
        }

        for root in by_degree.into_iter().flatten() {
            self.roots.push(&mut self.nodes, root);
        }
        self.recompute_min();
        trace!(before, after = self.roots.len(), links, "consolidated root list");
    }

    /// Makes the root with the larger key a child of the other and returns the
    /// surviving root. On equal keys `a` survives; callers must not rely on
    /// which one does.
    fn link(&mut self, a: NodeKey, b: NodeKey) -> NodeKey {
        let (parent, child) = if self.nodes[b].key < self.nodes[a].key {
            (b, a)
        } else {
            (a, b)
        };
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;
        self.with_children(parent, |children, nodes| children.push(nodes, child));
        parent
    }

    fn recompute_min(&mut self) {
        let nodes = &self.nodes;
        self.min = self.roots.iter().min_by(|&a, &b| nodes[a].key.cmp(&nodes[b].key));
    }

    /// Runs `f` on the child list of `parent` while still allowing it to
    /// update slots in the arena.
    fn with_children<R>(
        &mut self,
        parent: NodeKey,
        f: impl FnOnce(&mut KeyList, &mut NodeArena<Node<T, K>>) -> R,
    ) -> R {
        let mut children = std::mem::take(&mut self.nodes[parent].children);
        let result = f(&mut children, &mut self.nodes);
        self.nodes[parent].children = children;
        result
    }
}

impl<T, K: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len())
            .field("roots", &self.roots.len())
            .field("min", &self.peek().map(|(key, _)| key))
            .finish()
    }
}

impl<T, K: Ord> Extend<(K, T)> for FibonacciHeap<T, K> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, item) in iter {
            self.insert(item, key);
        }
    }
}

impl<T, K: Ord> FromIterator<(K, T)> for FibonacciHeap<T, K> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(item, priority);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        FibonacciHeap::peek(self)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min_entry().ok()
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(item, priority)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }
}
