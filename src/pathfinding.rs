//! Breadth-first reachability over the tile grid
//!
//! All queries walk 4-directional adjacency (no diagonals) under a
//! single policy switch: whether door tiles count as passable. Walls
//! never pass. Nothing here mutates the grid.
//!
//! The generator runs these against the static tile codes while a maze
//! is under construction; the game client runs the same queries at
//! play time with the current door state to decide move legality.
//!
//! Positions handed in are expected to be validated by the caller;
//! out-of-bounds endpoints simply find nothing.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{Grid, GridPosition};

// Neighbor expansion order: up, down, left, right. BFS tie-breaking
// among equal-length paths follows from this order, so results are
// deterministic for a fixed grid and door policy.
const DX: [i32; 4] = [0, 0, -1, 1];
const DY: [i32; 4] = [-1, 1, 0, 0];

/// The four axis-aligned neighbors of a position, in expansion order,
/// skipping coordinate underflow.
fn neighbors(pos: GridPosition) -> impl Iterator<Item = GridPosition> {
    (0..4).filter_map(move |dir| {
        let nx = pos.x as i32 + DX[dir];
        let ny = pos.y as i32 + DY[dir];
        if nx < 0 || ny < 0 {
            return None;
        }
        Some(GridPosition::new(nx as usize, ny as usize))
    })
}

/// Whether a walkable path connects `start` to `end` under the given
/// door policy. Trivially true when `start == end`.
pub fn path_exists(grid: &Grid, start: GridPosition, end: GridPosition, doors_open: bool) -> bool {
    find_path(grid, start, end, doors_open).is_some()
}

/// Shortest path from `start` to `end` inclusive of both endpoints,
/// or `None` if unreachable
///
/// BFS guarantees the path is shortest by edge count. Among
/// equal-length paths the result is whatever the fixed expansion order
/// yields.
pub fn find_path(
    grid: &Grid,
    start: GridPosition,
    end: GridPosition,
    doors_open: bool,
) -> Option<Vec<GridPosition>> {
    if start == end {
        return Some(vec![start]);
    }

    let mut visited: HashSet<GridPosition> = HashSet::new();
    let mut parent: HashMap<GridPosition, GridPosition> = HashMap::new();
    let mut queue: VecDeque<GridPosition> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if visited.contains(&next) || !grid.is_walkable(next, doors_open) {
                continue;
            }
            visited.insert(next);
            parent.insert(next, current);

            if next == end {
                return Some(reconstruct(&parent, start, end));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Every position reachable from `start` under the given door policy,
/// including `start` itself
pub fn reachable_positions(
    grid: &Grid,
    start: GridPosition,
    doors_open: bool,
) -> HashSet<GridPosition> {
    let mut visited: HashSet<GridPosition> = HashSet::new();
    let mut queue: VecDeque<GridPosition> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if visited.contains(&next) || !grid.is_walkable(next, doors_open) {
                continue;
            }
            visited.insert(next);
            queue.push_back(next);
        }
    }

    visited
}

fn reconstruct(
    parent: &HashMap<GridPosition, GridPosition>,
    start: GridPosition,
    end: GridPosition,
) -> Vec<GridPosition> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = parent[&current];
        path.push(current);
    }
    path.reverse();
    path
}
