//! Tiered grading of candidate maze solutions.

use crate::grid::{marked_path, parse_grid, Maze};
use crate::validation::{are_compatible, is_continuous, is_valid_path};
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of grading a candidate solution grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Score {
    /// Continuous claimed path of minimal length
    Optimal,
    /// Continuous, obstacle-free claimed path, longer than the minimum
    ValidPath,
    /// Grid structure preserved but the claimed path is not valid
    CompatibleGrid,
    /// Malformed input, broken chain, unreachable maze, or corrupted grid
    Invalid,
}

impl Score {
    /// The numeric value of this [`Score`].
    pub fn value(self) -> f64 {
        match self {
            Score::Optimal => 1.0,
            Score::ValidPath => 0.5,
            Score::CompatibleGrid => 0.25,
            Score::Invalid => 0.0,
        }
    }
}

/// Grades a candidate solution grid against the original maze.
///
/// The candidate's claimed path is its path-marked cells in row-major scan
/// order, walked from the original's start to its end. Checked in order,
/// short-circuiting:
///
/// 1. both grids must parse and have matching dimensions, and the original
///    must carry its start/end pair,
/// 2. the claimed path must be an unbroken chain of unit steps,
/// 3. the original must be solvable at all,
/// 4. the candidate must preserve every marker and obstacle of the original;
///    a grid that moves an obstacle or drops a marker scores nothing, no
///    matter what path it claims,
/// 5. a claimed path with as many interior cells as the shortest path is
///    [`Score::Optimal`]; a longer one that avoids the original's obstacles
///    is [`Score::ValidPath`]; otherwise the grid alone is worth
///    [`Score::CompatibleGrid`].
pub fn grade(original_text: &str, candidate_text: &str) -> Score {
    let original = match Maze::parse(original_text) {
        Ok(maze) => maze,
        Err(err) => {
            debug!("original grid rejected: {}", err);
            return Score::Invalid;
        }
    };
    let candidate = match parse_grid(candidate_text) {
        Ok(grid) => grid,
        Err(err) => {
            debug!("candidate grid rejected: {}", err);
            return Score::Invalid;
        }
    };
    if candidate.len() != original.size() || candidate[0].len() != original.size() {
        debug!(
            "candidate is {}x{}, original is {}x{}",
            candidate.len(),
            candidate[0].len(),
            original.size(),
            original.size(),
        );
        return Score::Invalid;
    }

    let path = marked_path(&candidate);
    if !is_continuous(&path, original.start(), original.end()) {
        return Score::Invalid;
    }
    let shortest = match original.solve() {
        Ok(path) => path,
        Err(_) => return Score::Invalid,
    };
    if !are_compatible(original.grid(), &candidate) {
        return Score::Invalid;
    }

    // the claimed path excludes start and end; the reference path includes them
    if path.len() + 2 == shortest.len() {
        Score::Optimal
    } else if is_valid_path(&path, original.start(), original.end(), original.grid()) {
        Score::ValidPath
    } else {
        Score::CompatibleGrid
    }
}

/// Evaluates a candidate solution grid against the original maze, returning
/// `1.0`, `0.5`, `0.25`, or `0.0`.
///
/// This never fails: every error condition, from malformed text to an
/// unsolvable maze, collapses to `0.0`.
///
/// # Examples
///
/// ```
/// let original = "
/// | . | . | . | . |
/// | X | . | - | . |
/// | . | . | - | . |
/// | . | . | . | X |
/// ";
/// let solution = "
/// | . | . | . | . |
/// | X | = | - | . |
/// | . | = | - | . |
/// | . | = | = | X |
/// ";
/// assert_eq!(gridmaze::grading::evaluate(original, solution), 1.0);
/// ```
pub fn evaluate(original_text: &str, candidate_text: &str) -> f64 {
    grade(original_text, candidate_text).value()
}
