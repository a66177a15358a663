//! Tests for the pathfinding algorithms
//!
//! Tests cover:
//! - Basic functionality on implicit graphs
//! - Edge cases (unreachable goals, cycles)
//! - Correctness in scenarios that require decrease_key
//! - Agreement between `dijkstra` and `shortest_distances`

use fibonacci_arena_heap::fibonacci::FibonacciHeap;
use fibonacci_arena_heap::pathfinding::{dijkstra, shortest_distances, SearchNode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BinaryHeap;
use std::cmp::Reverse;

/// Grid with walls, carrying its goal
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct GridNode {
    x: i32,
    y: i32,
    goal: (i32, i32),
}

const WALLS: &[(i32, i32)] = &[(1, 0), (1, 1), (1, 2), (3, 1), (3, 2), (3, 3)];
const SIZE: i32 = 5;

impl SearchNode for GridNode {
    type Cost = u32;

    fn successors(&self) -> Vec<(Self, u32)> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .filter(|&(x, y)| (0..SIZE).contains(&x) && (0..SIZE).contains(&y))
            .filter(|p| !WALLS.contains(p))
            .map(|(x, y)| (GridNode { x, y, goal: self.goal }, 1))
            .collect()
    }

    fn is_goal(&self) -> bool {
        (self.x, self.y) == self.goal
    }
}

/// Node in an explicit weighted graph, built so that the first route found
/// to the target is not the cheapest one
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Weighted(usize);

impl SearchNode for Weighted {
    type Cost = u64;

    fn successors(&self) -> Vec<(Self, u64)> {
        match self.0 {
            0 => vec![(Weighted(1), 1), (Weighted(4), 10)],
            1 => vec![(Weighted(2), 1)],
            2 => vec![(Weighted(3), 1)],
            3 => vec![(Weighted(4), 1)],
            _ => vec![],
        }
    }

    fn is_goal(&self) -> bool {
        self.0 == 4
    }
}

#[test]
fn test_grid_around_walls() {
    let start = GridNode { x: 0, y: 0, goal: (4, 0) };
    let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();

    assert_eq!(cost as usize, path.len() - 1);
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last().map(|n| (n.x, n.y)), Some((4, 0)));
    for pair in path.windows(2) {
        let d = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
        assert_eq!(d, 1, "path must move one cell at a time");
        assert!(!WALLS.contains(&(pair[1].x, pair[1].y)));
    }
    // down to y=3 to pass the first wall, back up to y=0 to pass the second
    assert_eq!(cost, 10);
}

#[test]
fn test_walled_off_goal() {
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Island(u8);

    impl SearchNode for Island {
        type Cost = u32;

        fn successors(&self) -> Vec<(Self, u32)> {
            // 0 <-> 1 <-> 2 cycle, 3 unreachable
            vec![(Island((self.0 + 1) % 3), 1)]
        }

        fn is_goal(&self) -> bool {
            self.0 == 3
        }
    }

    assert!(dijkstra::<_, FibonacciHeap<_, _>>(&Island(0)).is_none());
}

#[test]
fn test_decrease_key_finds_cheaper_route() {
    let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&Weighted(0)).unwrap();
    assert_eq!(cost, 4);
    assert_eq!(
        path,
        vec![Weighted(0), Weighted(1), Weighted(2), Weighted(3), Weighted(4)]
    );
}

/// Reference distances with a lazy-deletion binary heap
fn reference_distances(adjacency: &[Vec<(usize, u64)>], source: usize) -> Vec<Option<u64>> {
    let mut dist = vec![None; adjacency.len()];
    let mut queue = BinaryHeap::new();
    queue.push(Reverse((0u64, source)));
    while let Some(Reverse((d, v))) = queue.pop() {
        if dist[v].is_some() {
            continue;
        }
        dist[v] = Some(d);
        for &(w, weight) in &adjacency[v] {
            if dist[w].is_none() {
                queue.push(Reverse((d + weight, w)));
            }
        }
    }
    dist
}

#[test]
fn test_random_graphs_match_reference() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..20 {
        let n = rng.gen_range(1..200);
        let edges = rng.gen_range(0..n * 4);
        let mut adjacency = vec![Vec::new(); n];
        for _ in 0..edges {
            let from = rng.gen_range(0..n);
            let to = rng.gen_range(0..n);
            adjacency[from].push((to, rng.gen_range(0..100)));
        }
        let source = rng.gen_range(0..n);
        assert_eq!(
            shortest_distances(&adjacency, source),
            reference_distances(&adjacency, source)
        );
    }
}
