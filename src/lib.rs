#![warn(missing_docs)]
//! Grid-maze generation and tiered grading of candidate solutions.
//!
//! [`generator`] produces random solvable mazes together with their
//! canonical shortest-path solutions, for dataset construction. [`grading`]
//! scores an arbitrary candidate solution grid against an original maze,
//! always returning a number in `{1.0, 0.5, 0.25, 0.0}`.

pub mod generator;
pub mod grading;
pub mod grid;
pub mod pathing;
pub mod validation;
