//! Random solvable maze generation for dataset construction.

use crate::grid::{grid_to_string, Cell, Grid};
use crate::pathing::shortest_path;
use log::debug;
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters for [`generate`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Side length of the square maze
    pub size: usize,
    /// How many times to resample the end cell before the minimum-distance
    /// constraint is dropped; keeps generation terminating on tiny grids
    pub placement_attempts: usize,
}

impl GeneratorConfig {
    /// A config for mazes of the given side length with the default retry
    /// bound.
    pub fn new(size: usize) -> Self {
        GeneratorConfig {
            size,
            placement_attempts: 100,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::new(8)
    }
}

/// A generated maze plus its canonical shortest-path solution.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MazeRecord {
    /// Side length
    pub size: usize,
    /// Start cell
    pub start: Point2<usize>,
    /// End cell
    pub end: Point2<usize>,
    /// Every obstacle cell, in row-major scan order
    pub obstacles: Vec<Point2<usize>>,
    /// Shortest path from start to end, both included, or `None` when the
    /// obstacles cut the maze in two
    pub solution: Option<Vec<Point2<usize>>>,
    grid: Grid,
}

impl MazeRecord {
    /// The underlying [`Grid`].
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The maze as pipe-delimited text.
    pub fn grid_text(&self) -> String {
        grid_to_string(&self.grid)
    }

    /// The maze with the solution's interior cells path-marked, or `None`
    /// for an unsolvable maze.
    pub fn solution_grid_text(&self) -> Option<String> {
        let path = self.solution.as_ref()?;
        let mut grid = self.grid.clone();
        for p in path {
            if *p != self.start && *p != self.end {
                grid[p.y][p.x] = Cell::PathMark;
            }
        }
        Some(grid_to_string(&grid))
    }
}

/// Generates one random maze and solves it.
///
/// The start cell is uniform. The end cell is resampled until it sits at
/// least `max(2, size / 4)` away from the start (Euclidean); after
/// [`GeneratorConfig::placement_attempts`] failures the distance constraint
/// is dropped and any other cell is used, so generation terminates on grids
/// too small to satisfy it. Obstacles are straight horizontal or vertical
/// segments placed at random offsets; they may overlap each other and may
/// overwrite cells already placed, including the markers. An unsolvable maze
/// is still returned, with `solution` absent, leaving the discard or retry
/// policy to the caller.
///
/// # Panics
///
/// Panics if `config.size` is zero.
///
/// # Examples
///
/// ```
/// use gridmaze::generator::{generate, GeneratorConfig};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let record = generate(&GeneratorConfig::new(8), &mut rng);
/// assert_eq!(record.size, 8);
/// ```
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> MazeRecord {
    let size = config.size;
    assert!(size > 0, "maze size must be positive");

    let mut grid: Grid = vec![vec![Cell::Empty; size]; size];

    let start = Point2::new(rng.gen_range(0..size), rng.gen_range(0..size));
    grid[start.y][start.x] = Cell::Marker;

    let end = place_end(size, start, config.placement_attempts, rng);
    grid[end.y][end.x] = Cell::Marker;

    let min_obstacles = (size / 4).max(1);
    let max_obstacles = (size / 2).max(2);
    let num_obstacles = rng.gen_range(min_obstacles..=max_obstacles);
    for _ in 0..num_obstacles {
        draw_obstacle(&mut grid, size, rng);
    }

    let mut obstacles = Vec::new();
    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell == Cell::Obstacle {
                obstacles.push(Point2::new(x, y));
            }
        }
    }

    let solution = shortest_path(&grid, start, end);
    if solution.is_none() {
        debug!(
            "generated {0}x{0} maze with no path from {1:?} to {2:?}",
            size, start, end
        );
    }

    MazeRecord {
        size,
        start,
        end,
        obstacles,
        solution,
        grid,
    }
}

/// Generates `count` independent mazes in parallel.
///
/// Each record draws from its own [`StdRng`] derived from `seed` and its
/// index, so a given `(config, count, seed)` triple always produces the same
/// records, in the same order, regardless of how the work is scheduled.
pub fn generate_batch(config: &GeneratorConfig, count: usize, seed: u64) -> Vec<MazeRecord> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            generate(config, &mut rng)
        })
        .collect()
}

fn distance(a: Point2<usize>, b: Point2<usize>) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (dx * dx + dy * dy).sqrt()
}

fn place_end<R: Rng + ?Sized>(
    size: usize,
    start: Point2<usize>,
    attempts: usize,
    rng: &mut R,
) -> Point2<usize> {
    let min_distance = (size / 4).max(2) as f64;
    for _ in 0..attempts {
        let end = Point2::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if distance(start, end) >= min_distance {
            return end;
        }
    }
    // the constraint is unsatisfiable (or very unlucky) on small grids;
    // fall back to any other cell so generation always terminates
    debug!(
        "end placement distance constraint dropped after {} attempts",
        attempts
    );
    if size == 1 {
        return start;
    }
    let start_index = start.y * size + start.x;
    let mut index = rng.gen_range(0..size * size - 1);
    if index >= start_index {
        index += 1;
    }
    Point2::new(index % size, index / size)
}

fn draw_obstacle<R: Rng + ?Sized>(grid: &mut Grid, size: usize, rng: &mut R) {
    let min_len = (size / 8).max(1);
    let max_len = (size / 4).max(2).min(size);
    let len = rng.gen_range(min_len..=max_len);
    if rng.gen_bool(0.5) {
        // vertical segment
        let x = rng.gen_range(0..size);
        let y = rng.gen_range(0..=size - len);
        for i in 0..len {
            grid[y + i][x] = Cell::Obstacle;
        }
    } else {
        let x = rng.gen_range(0..=size - len);
        let y = rng.gen_range(0..size);
        for i in 0..len {
            grid[y][x + i] = Cell::Obstacle;
        }
    }
}
