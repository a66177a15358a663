//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait with the `BinaryHeap`-like surface (`push`, `peek`, `pop`)
//! - [`DecreaseKeyHeap`]: Extended trait adding handle-based `decrease_key`
//!
//! Generic code such as [`crate::pathfinding`] is written against these traits
//! rather than against [`crate::fibonacci::FibonacciHeap`] directly.

use thiserror::Error;

/// Error type for heap operations
///
/// Every fallible operation checks its arguments before touching the heap, so an
/// `Err` always means the heap is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `extract_min` was called on a heap with no elements
    #[error("cannot extract the minimum of an empty heap")]
    EmptyHeap,
    /// `decrease_key` was given a key greater than the element's current key
    #[error("new key is greater than the current key")]
    InvalidKeyIncrease,
    /// The handle refers to an element that has already been extracted
    #[error("handle is no longer valid (element was extracted)")]
    StaleHandle,
}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
/// They are min-heaps.
///
/// # Example
///
/// ```rust
/// use fibonacci_arena_heap::Heap;
/// use fibonacci_arena_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use fibonacci_arena_heap::{DecreaseKeyHeap, Heap};
/// use fibonacci_arena_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    ///
    /// The handle stays valid until the element is popped.
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element identified by `handle`
    ///
    /// # Errors
    /// - [`HeapError::StaleHandle`] if the element was already popped
    /// - [`HeapError::InvalidKeyIncrease`] if `new_priority` is greater than the
    ///   current priority
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
