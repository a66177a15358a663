//! Fibonacci Heap for Rust
//!
//! This crate provides a Fibonacci heap with an efficient `decrease_key`, the
//! operation that makes the structure worthwhile for graph algorithms such as
//! Dijkstra's shortest paths and Prim's minimum spanning tree.
//!
//! # Features
//!
//! - **O(1)** amortized `insert` and `decrease_key`
//! - **O(log n)** amortized `extract_min`
//! - **Safe handles**: nodes live in a generational arena, so a handle to an
//!   extracted element is reported as [`HeapError::StaleHandle`] instead of
//!   dangling
//! - **Explicit errors**: extracting from an empty heap or raising a key through
//!   `decrease_key` return a [`HeapError`]; the heap is untouched on error
//!
//! # Example
//!
//! ```rust
//! use fibonacci_arena_heap::fibonacci::FibonacciHeap;
//! use fibonacci_arena_heap::HeapError;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert("item1", 5);
//! heap.insert("item2", 3);
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek(), Some((&1, &"item1")));
//!
//! assert_eq!(heap.extract_min(), Ok("item1"));
//! assert_eq!(heap.decrease_key(&handle1, 0), Err(HeapError::StaleHandle));
//! ```
//!
//! # Logging
//!
//! Consolidation, cascading cuts and rejected operations emit [`tracing`]
//! events at `trace`/`debug` level. The crate never installs a subscriber.

pub mod fibonacci;
pub mod pathfinding;
mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
