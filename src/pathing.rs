//! Breadth-first shortest paths over maze grids.

use crate::grid::Grid;
use nalgebra::Point2;
use std::collections::{HashMap, HashSet, VecDeque};

/// Neighbor exploration order. Any order gives a minimal-length path; fixing
/// it makes the returned path reproducible when several are minimal.
const NEIGHBOR_ORDER: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Returns the in-bounds, non-obstacle neighbors of `p` in exploration order.
pub fn traversable_neighbors(grid: &Grid, p: Point2<usize>) -> Vec<Point2<usize>> {
    let mut neighbors = Vec::new();
    for (dx, dy) in NEIGHBOR_ORDER {
        let x = p.x as isize + dx;
        let y = p.y as isize + dy;
        if x < 0 || y < 0 {
            continue;
        }
        let (x, y) = (x as usize, y as usize);
        if let Some(cell) = grid.get(y).and_then(|row| row.get(x)) {
            if cell.walkable() {
                neighbors.push(Point2::new(x, y));
            }
        }
    }
    neighbors
}

/// Returns the shortest path, if one exists, from `start` to `end`.
///
/// The path includes both `start` and `end`; if they are equal it is a single
/// cell. Only the cells stepped through are checked against the grid, never
/// `start` itself, so a search may leave a start cell that sits under an
/// obstacle.
///
/// A cell is marked visited when it is dequeued for expansion, not when it is
/// first discovered; the parent recorded at first discovery wins. Together
/// with the fixed exploration order this reproduces the reference path of the
/// queue-carried-path formulation without its memory cost.
pub fn shortest_path(
    grid: &Grid,
    start: Point2<usize>,
    end: Point2<usize>,
) -> Option<Vec<Point2<usize>>> {
    let mut prev: HashMap<Point2<usize>, Option<Point2<usize>>> = HashMap::new();
    let mut visited: HashSet<Point2<usize>> = HashSet::new();
    let mut queue: VecDeque<Point2<usize>> = VecDeque::new();
    prev.insert(start, None);
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        if current == end {
            let mut path = vec![end];
            let mut next = end;
            while let Some(Some(before_next)) = prev.get(&next) {
                path.insert(0, *before_next);
                next = *before_next;
            }
            return Some(path);
        }
        if !visited.insert(current) {
            continue;
        }
        for neighbor in traversable_neighbors(grid, current) {
            prev.entry(neighbor).or_insert(Some(current));
            if !visited.contains(&neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    None
}
