//! Dijkstra's shortest path algorithm on top of `decrease_key`
//!
//! This is the workload Fibonacci heaps exist for: every time a shorter
//! tentative distance to a vertex is found, its heap entry is lowered in place
//! with [`DecreaseKeyHeap::decrease_key`] instead of pushing a duplicate.
//!
//! Two entry points are provided:
//!
//! - [`dijkstra`]: implicit graphs described by a [`SearchNode`] type, searched
//!   until a goal is reached, with path reconstruction
//! - [`shortest_distances`]: explicit adjacency lists, single-source distances
//!   to every vertex
//!
//! # Example
//!
//! ```rust
//! use fibonacci_arena_heap::pathfinding::{SearchNode, dijkstra};
//! use fibonacci_arena_heap::fibonacci::FibonacciHeap;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         let step = |x, y| GridPos { x, y, goal_x: self.goal_x, goal_y: self.goal_y };
//!         vec![
//!             (step(self.x + 1, self.y), 1),
//!             (step(self.x - 1, self.y), 1),
//!             (step(self.x, self.y + 1), 1),
//!             (step(self.x, self.y - 1), 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//! let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use crate::fibonacci::{FibonacciHandle, FibonacciHeap};
use crate::traits::DecreaseKeyHeap;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use tracing::trace;

/// Trait for types that can be used as path costs.
///
/// `Default` must be the zero cost. A path whose cost does not fit in the
/// type (`checked_add` returns `None`) is treated as unusable and skipped.
pub trait Cost: Ord + Copy + Default {
    /// Adds two costs, or returns `None` on overflow.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_cost!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate its successors and to tell
/// whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Lightweight index stored in the heap instead of the node itself.
pub type NodeIndex = usize;

struct NodeEntry<N: SearchNode, H> {
    node: N,
    distance: N::Cost,
    /// Heap handle while the node is still in the open set
    handle: Option<H>,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Open/closed bookkeeping for one search.
struct PathFinder<N: SearchNode, H> {
    entries: Vec<NodeEntry<N, H>>,
    index_of: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode, H> PathFinder<N, H> {
    fn new() -> Self {
        PathFinder {
            entries: Vec::new(),
            index_of: FxHashMap::default(),
        }
    }

    /// Returns the index for `node`, and whether it was seen for the first time.
    fn index_for(&mut self, node: N, distance: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.index_of.get(&node) {
            return (index, false);
        }
        let index = self.entries.len();
        self.index_of.insert(node.clone(), index);
        self.entries.push(NodeEntry {
            node,
            distance,
            handle: None,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[current].node.clone()];
        while let Some(prev) = self.entries[current].came_from {
            path.push(self.entries[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from `start` until a node's `is_goal()` is true.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` when
/// every reachable node was explored without finding a goal.
///
/// # Type Parameters
/// - `N`: The node type implementing [`SearchNode`]
/// - `H`: The heap type, e.g. `FibonacciHeap<_, _>`
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, N::Cost>,
{
    let mut heap = H::new();
    let mut finder: PathFinder<N, H::Handle> = PathFinder::new();

    let (start_index, _) = finder.index_for(start.clone(), N::Cost::default());
    finder.entries[start_index].handle = Some(heap.push_with_handle(N::Cost::default(), start_index));

    let mut explored = 0usize;
    while let Some((distance, current)) = heap.pop() {
        let entry = &mut finder.entries[current];
        entry.closed = true;
        entry.handle = None;
        explored += 1;

        if entry.node.is_goal() {
            trace!(explored, "dijkstra reached goal");
            return Some((finder.reconstruct_path(current), distance));
        }

        for (neighbor, edge_cost) in entry.node.successors() {
            let Some(tentative) = Cost::checked_add(distance, edge_cost) else {
                trace!("dijkstra skipped an edge: path cost overflows");
                continue;
            };
            let (index, is_new) = finder.index_for(neighbor, tentative);
            let neighbor_entry = &mut finder.entries[index];

            if is_new {
                neighbor_entry.came_from = Some(current);
                neighbor_entry.handle = Some(heap.push_with_handle(tentative, index));
            } else if !neighbor_entry.closed && tentative < neighbor_entry.distance {
                neighbor_entry.distance = tentative;
                neighbor_entry.came_from = Some(current);
                if let Some(handle) = &neighbor_entry.handle {
                    let lowered = heap.decrease_key(handle, tentative);
                    debug_assert!(lowered.is_ok(), "open node not lowered: {lowered:?}");
                }
            }
        }
    }

    trace!(explored, "dijkstra exhausted the graph");
    None
}

/// Single-source shortest distances over an adjacency list.
///
/// `adjacency[v]` lists `(target, weight)` edges leaving `v`. The result holds
/// the distance from `source` to every vertex, `None` where unreachable. Edges
/// pointing outside the graph are ignored, and an out-of-range `source` yields
/// all `None`. A path whose total weight exceeds `u64::MAX` is never taken, so
/// a vertex reachable only through such paths is reported as `None`.
///
/// # Example
///
/// ```rust
/// use fibonacci_arena_heap::pathfinding::shortest_distances;
///
/// let graph = vec![
///     vec![(1, 4), (2, 1)],
///     vec![(3, 1)],
///     vec![(1, 2), (3, 5)],
///     vec![],
///     vec![(0, 1)],
/// ];
/// assert_eq!(
///     shortest_distances(&graph, 0),
///     vec![Some(0), Some(3), Some(1), Some(4), None]
/// );
/// ```
pub fn shortest_distances(adjacency: &[Vec<(usize, u64)>], source: usize) -> Vec<Option<u64>> {
    let n = adjacency.len();
    let mut distance: Vec<Option<u64>> = vec![None; n];
    if source >= n {
        return distance;
    }

    let mut heap: FibonacciHeap<usize, u64> = FibonacciHeap::with_capacity(n);
    let mut handles: Vec<Option<FibonacciHandle>> = vec![None; n];
    let mut settled = vec![false; n];

    distance[source] = Some(0);
    handles[source] = Some(heap.insert(source, 0));

    while let Ok((d, v)) = heap.extract_min_entry() {
        settled[v] = true;
        for &(w, weight) in &adjacency[v] {
            if w >= n || settled[w] {
                continue;
            }
            let Some(candidate) = d.checked_add(weight) else {
                trace!(from = v, to = w, "edge skipped: path cost overflows u64");
                continue;
            };
            match (distance[w], handles[w]) {
                (Some(current), Some(handle)) if candidate < current => {
                    distance[w] = Some(candidate);
                    let lowered = heap.decrease_key(&handle, candidate);
                    debug_assert!(lowered.is_ok(), "open vertex not lowered: {lowered:?}");
                }
                (None, _) => {
                    distance[w] = Some(candidate);
                    handles[w] = Some(heap.insert(w, candidate));
                }
                _ => {}
            }
        }
    }

    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Line {
        value: i32,
        goal: i32,
    }

    impl SearchNode for Line {
        type Cost = u32;

        fn successors(&self) -> Vec<(Self, u32)> {
            if self.value < 100 {
                vec![(Line { value: self.value + 1, goal: self.goal }, 1)]
            } else {
                vec![]
            }
        }

        fn is_goal(&self) -> bool {
            self.value == self.goal
        }
    }

    #[test]
    fn test_line_graph() {
        let start = Line { value: 0, goal: 5 };
        let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();
        assert_eq!(cost, 5);
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last().map(|n| n.value), Some(5));
    }

    #[test]
    fn test_unreachable_goal() {
        let start = Line { value: 0, goal: 500 };
        assert!(dijkstra::<_, FibonacciHeap<_, _>>(&start).is_none());
    }

    #[test]
    fn test_start_is_goal() {
        let start = Line { value: 3, goal: 3 };
        let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();
        assert_eq!(cost, 0);
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn test_shortest_distances_uses_cheaper_detour() {
        // direct edge 0->1 costs 10, detour via 2 costs 3
        let graph = vec![vec![(1, 10), (2, 1)], vec![], vec![(1, 2)]];
        assert_eq!(shortest_distances(&graph, 0), vec![Some(0), Some(3), Some(1)]);
    }

    #[test]
    fn test_shortest_distances_bad_input() {
        let graph = vec![vec![(7, 1)], vec![]];
        assert_eq!(shortest_distances(&graph, 0), vec![Some(0), None]);
        assert_eq!(shortest_distances(&graph, 9), vec![None, None]);
        assert_eq!(shortest_distances(&[], 0), Vec::<Option<u64>>::new());
    }

    #[test]
    fn test_shortest_distances_overflowing_paths() {
        let graph = vec![vec![(1, u64::MAX)], vec![(2, 1)], vec![]];
        assert_eq!(shortest_distances(&graph, 0), vec![Some(0), Some(u64::MAX), None]);

        let graph = vec![vec![(1, u64::MAX), (2, 5)], vec![(3, 1)], vec![(3, 5)], vec![]];
        assert_eq!(
            shortest_distances(&graph, 0),
            vec![Some(0), Some(u64::MAX), Some(5), Some(10)]
        );
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Costly(u8);

    impl SearchNode for Costly {
        type Cost = u8;

        fn successors(&self) -> Vec<(Self, u8)> {
            match self.0 {
                0 => vec![(Costly(1), 200), (Costly(2), 210)],
                1 => vec![(Costly(3), 100)],
                2 => vec![(Costly(3), 40)],
                4 => vec![(Costly(1), 200)],
                _ => vec![],
            }
        }

        fn is_goal(&self) -> bool {
            self.0 == 3
        }
    }

    #[test]
    fn test_dijkstra_skips_overflowing_edges() {
        let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&Costly(0)).unwrap();
        assert_eq!(cost, 250);
        assert_eq!(path, vec![Costly(0), Costly(2), Costly(3)]);

        // the only route to the goal costs 300, which does not fit in u8
        assert!(dijkstra::<_, FibonacciHeap<_, _>>(&Costly(4)).is_none());
    }
}
