//! Candidate path validity and grid compatibility checks.

use crate::grid::{Cell, Grid};
use nalgebra::Point2;

/// Returns whether two cells are exactly one 4-connected step apart.
pub fn are_adjacent(a: Point2<usize>, b: Point2<usize>) -> bool {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y) == 1
}

/// Checks that `start`, the waypoints of `path` in order, and `end` form an
/// unbroken chain of unit steps. Obstacles are not consulted; this is the
/// reject-fast gate run before any search is attempted.
///
/// An empty `path` is continuous only when `start == end`.
pub fn is_continuous(path: &[Point2<usize>], start: Point2<usize>, end: Point2<usize>) -> bool {
    if path.is_empty() {
        return start == end;
    }
    let mut current = start;
    for &point in path {
        if !are_adjacent(current, point) {
            return false;
        }
        current = point;
    }
    are_adjacent(current, end)
}

/// Full validity check for candidate waypoints: the chain from `start`
/// through `path` to `end` must be continuous, and no waypoint may sit on an
/// obstacle of the reference `grid`. Waypoints outside the grid are invalid.
/// An empty `path` is valid when `start` and `end` are identical or adjacent.
///
/// Revisiting a cell does not invalidate a path.
pub fn is_valid_path(
    path: &[Point2<usize>],
    start: Point2<usize>,
    end: Point2<usize>,
    grid: &Grid,
) -> bool {
    if path.is_empty() {
        return start == end || are_adjacent(start, end);
    }
    let mut current = start;
    for &point in path {
        let cell = match grid.get(point.y).and_then(|row| row.get(point.x)) {
            Some(cell) => *cell,
            None => return false,
        };
        if !are_adjacent(current, point) || cell == Cell::Obstacle {
            return false;
        }
        current = point;
    }
    are_adjacent(current, end)
}

/// Checks that `candidate` preserves every marker and obstacle of `original`.
///
/// The implication is one-directional: wherever the original is empty, the
/// candidate may put anything, including path marks or new obstacles.
/// A candidate cell missing (out of bounds) counts as incompatible.
pub fn are_compatible(original: &Grid, candidate: &Grid) -> bool {
    for (y, row) in original.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let other = match candidate.get(y).and_then(|r| r.get(x)) {
                Some(&other) => other,
                None => return false,
            };
            if cell == Cell::Marker && other != Cell::Marker {
                return false;
            }
            if cell == Cell::Obstacle && other != Cell::Obstacle {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_grid;

    fn open_grid(size: usize) -> Grid {
        vec![vec![Cell::Empty; size]; size]
    }

    fn p(x: usize, y: usize) -> Point2<usize> {
        Point2::new(x, y)
    }

    #[test]
    fn adjacency_is_unit_manhattan_distance() {
        assert!(are_adjacent(p(1, 1), p(2, 1)));
        assert!(are_adjacent(p(1, 1), p(1, 0)));
        assert!(!are_adjacent(p(1, 1), p(2, 2)));
        assert!(!are_adjacent(p(1, 1), p(1, 1)));
        assert!(!are_adjacent(p(1, 1), p(3, 1)));
    }

    #[test]
    fn continuity_of_empty_path() {
        assert!(is_continuous(&[], p(1, 1), p(1, 1)));
        // adjacent endpoints are not enough without a waypoint between checks
        assert!(!is_continuous(&[], p(1, 1), p(1, 2)));
    }

    #[test]
    fn continuity_of_chains() {
        assert!(is_continuous(&[p(1, 0), p(1, 1)], p(0, 0), p(1, 2)));
        assert!(!is_continuous(&[p(1, 0), p(2, 1)], p(0, 0), p(2, 2)));
        // chain must also connect to the end
        assert!(!is_continuous(&[p(1, 0)], p(0, 0), p(3, 0)));
    }

    #[test]
    fn valid_path_accepts_empty_path_between_adjacent_or_identical_endpoints() {
        let grid = open_grid(3);
        assert!(is_valid_path(&[], p(0, 0), p(0, 1), &grid));
        assert!(is_valid_path(&[], p(0, 0), p(0, 0), &grid));
        assert!(!is_valid_path(&[], p(0, 0), p(0, 2), &grid));
    }

    #[test]
    fn valid_path_rejects_obstacle_waypoints() {
        let mut grid = open_grid(3);
        grid[0][1] = Cell::Obstacle;
        assert!(!is_valid_path(&[p(1, 0)], p(0, 0), p(2, 0), &grid));
        assert!(is_valid_path(
            &[p(0, 1), p(1, 1), p(2, 1)],
            p(0, 0),
            p(2, 0),
            &grid
        ));
    }

    #[test]
    fn valid_path_rejects_out_of_bounds_waypoints() {
        let grid = open_grid(2);
        assert!(!is_valid_path(&[p(2, 0)], p(1, 0), p(1, 1), &grid));
    }

    #[test]
    fn revisiting_a_cell_is_not_rejected() {
        // current behavior, kept for compatibility: a chain may walk back
        // over a cell it already used
        let grid = open_grid(4);
        let path = [p(1, 0), p(1, 1), p(1, 0), p(2, 0)];
        assert!(is_valid_path(&path, p(0, 0), p(3, 0), &grid));
        assert!(is_continuous(&path, p(0, 0), p(3, 0)));
    }

    #[test]
    fn compatibility_requires_preserved_markers_and_obstacles() {
        let original = parse_grid("| X | - |\n| . | X |").unwrap();
        let same = parse_grid("| X | - |\n| = | X |").unwrap();
        let moved_obstacle = parse_grid("| X | . |\n| - | X |").unwrap();
        let dropped_marker = parse_grid("| X | - |\n| . | . |").unwrap();
        assert!(are_compatible(&original, &same));
        assert!(!are_compatible(&original, &moved_obstacle));
        assert!(!are_compatible(&original, &dropped_marker));
    }

    #[test]
    fn compatibility_is_one_directional() {
        // the candidate may add obstacles or markers where the original
        // leaves the cell empty
        let original = parse_grid("| X | . |\n| . | X |").unwrap();
        let added = parse_grid("| X | - |\n| X | X |").unwrap();
        assert!(are_compatible(&original, &added));
        assert!(!are_compatible(&added, &original));
    }
}
