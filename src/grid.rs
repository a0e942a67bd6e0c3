//! Logical grid structs and the textual maze codec.

use nalgebra::Point2;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delimiter between cell tokens; every row also begins and ends with it.
pub const CELL_DELIMITER: char = '|';

/// Enum for [`Grid`] cell values.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Cell {
    /// Open space
    Empty = 1,
    /// Start or end marker; which of the two is decided by scan order, see [`Maze`]
    Marker = 2,
    /// Impassable cell
    Obstacle = 3,
    /// Cell claimed as part of a candidate solution path
    PathMark = 4,
}

impl Cell {
    /// Returns whether a path may pass through this [`Cell`].
    pub fn walkable(self) -> bool {
        self != Cell::Obstacle
    }

    /// Maps a cell token to its [`Cell`] by substring, so extra padding or
    /// stray characters around a glyph are tolerated. Precedence when a token
    /// carries several glyphs: marker, then obstacle, then path mark.
    fn from_token(token: &str) -> Self {
        if token.contains('X') {
            Cell::Marker
        } else if token.contains('-') {
            Cell::Obstacle
        } else if token.contains('=') {
            Cell::PathMark
        } else {
            Cell::Empty
        }
    }

    fn token(self) -> &'static str {
        match self {
            Cell::Empty => " . ",
            Cell::Marker => " X ",
            Cell::Obstacle => " - ",
            Cell::PathMark => " = ",
        }
    }
}

/// A 2D grid of [`Cell`]s, indexed by `grid[row][col]`.
pub type Grid = Vec<Vec<Cell>>;

/// Errors produced while parsing or validating maze grids.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GridError {
    /// The text contained no cells at all
    #[error("grid is empty")]
    EmptyGrid,
    /// A row's cell count disagrees with the first row's
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Cell count of the first row
        expected: usize,
        /// Cell count actually found
        found: usize,
    },
    /// Row and column counts disagree
    #[error("grid is {rows}x{cols}, expected a square grid")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },
    /// A maze needs exactly one start and one end marker
    #[error("expected exactly 2 start/end markers, found {0}")]
    MarkerCount(usize),
    /// No path exists between start and end
    #[error("no path between start and end")]
    Unreachable,
}

/// Parses pipe-delimited grid text into a [`Grid`].
///
/// Rows are separated by newlines; within a row, everything before the first
/// delimiter and after the last is discarded. Leading and trailing whitespace
/// is tolerated per line and per token. Fails if the text contains no cells
/// or if rows have inconsistent lengths; marker counts are not checked here,
/// so candidate grids with any number of markers parse fine.
pub fn parse_grid(text: &str) -> Result<Grid, GridError> {
    let mut grid: Grid = Vec::new();
    for line in text.trim().lines() {
        let tokens: Vec<&str> = line.trim().split(CELL_DELIMITER).collect();
        let row: Vec<Cell> = if tokens.len() < 2 {
            Vec::new()
        } else {
            tokens[1..tokens.len() - 1]
                .iter()
                .map(|token| Cell::from_token(token))
                .collect()
        };
        grid.push(row);
    }
    if grid.is_empty() || grid[0].is_empty() {
        return Err(GridError::EmptyGrid);
    }
    let expected = grid[0].len();
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != expected {
            return Err(GridError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(grid)
}

/// Serializes a [`Grid`] back to pipe-delimited text, one fixed-width token
/// per cell. Re-parsing the output yields the identical cell matrix.
pub fn grid_to_string(grid: &Grid) -> String {
    grid.iter()
        .map(|row| {
            let cells: Vec<&str> = row.iter().map(|cell| cell.token()).collect();
            format!("|{}|", cells.join("|"))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Returns the coordinates of all [`Cell::PathMark`] cells in row-major scan
/// order. This scan, not any graph traversal, is how a candidate's claimed
/// path is read out of its grid.
pub fn marked_path(grid: &Grid) -> Vec<Point2<usize>> {
    let mut path = Vec::new();
    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell == Cell::PathMark {
                path.push(Point2::new(x, y));
            }
        }
    }
    path
}

/// A validated square [`Grid`] with its start and end resolved.
///
/// The text format writes start and end with the same glyph, so the
/// distinction is positional: the first marker in row-major scan order is
/// the start, the second is the end. That resolution happens exactly once,
/// here, rather than being re-inferred by callers.
///
/// # Examples
///
/// ```
/// use gridmaze::grid::Maze;
/// use nalgebra::Point2;
///
/// let maze = Maze::parse("| X | . |\n| - | X |").unwrap();
/// assert_eq!(maze.start(), Point2::new(0, 0));
/// assert_eq!(maze.end(), Point2::new(1, 1));
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    grid: Grid,
    size: usize,
    start: Point2<usize>,
    end: Point2<usize>,
}

impl TryFrom<Grid> for Maze {
    type Error = GridError;

    fn try_from(grid: Grid) -> Result<Self, Self::Error> {
        if grid.is_empty() || grid[0].is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let size = grid.len();
        let expected = grid[0].len();
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != expected {
                return Err(GridError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        if expected != size {
            return Err(GridError::NotSquare {
                rows: size,
                cols: expected,
            });
        }

        let mut markers: Vec<Point2<usize>> = Vec::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if *cell == Cell::Marker {
                    markers.push(Point2::new(x, y));
                }
            }
        }
        if markers.len() != 2 {
            return Err(GridError::MarkerCount(markers.len()));
        }

        Ok(Maze {
            grid,
            size,
            start: markers[0],
            end: markers[1],
        })
    }
}

impl Maze {
    /// Parses maze text into a validated [`Maze`].
    pub fn parse(text: &str) -> Result<Self, GridError> {
        Maze::try_from(parse_grid(text)?)
    }

    /// Returns the underlying [`Grid`].
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Side length of the maze.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The start cell, the first marker in row-major scan order.
    pub fn start(&self) -> Point2<usize> {
        self.start
    }

    /// The end cell, the second marker in row-major scan order.
    pub fn end(&self) -> Point2<usize> {
        self.end
    }

    /// Returns the [`Cell`] at the given position, or `None` if the position
    /// is out of bounds.
    pub fn at(&self, p: &Point2<usize>) -> Option<Cell> {
        self.grid.get(p.y)?.get(p.x).copied()
    }

    /// Returns the shortest path from start to end, both included, or
    /// [`GridError::Unreachable`] if the obstacles cut the maze in two.
    pub fn solve(&self) -> Result<Vec<Point2<usize>>, GridError> {
        crate::pathing::shortest_path(&self.grid, self.start, self.end)
            .ok_or(GridError::Unreachable)
    }

    /// Serializes the maze back to pipe-delimited text.
    pub fn to_text(&self) -> String {
        grid_to_string(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_resolves_markers_in_scan_order() {
        let maze = Maze::parse("| X | . |\n| - | X |").unwrap();
        assert_eq!(maze.size(), 2);
        assert_eq!(maze.start(), Point2::new(0, 0));
        assert_eq!(maze.end(), Point2::new(1, 1));
        assert_eq!(maze.at(&Point2::new(0, 1)), Some(Cell::Obstacle));
        assert_eq!(maze.at(&Point2::new(1, 0)), Some(Cell::Empty));
        assert_eq!(maze.at(&Point2::new(2, 0)), None);
    }

    #[test]
    fn parse_tolerates_whitespace_and_matches_substrings() {
        let text = "   | X  |.|\n|  =  | -- |   ";
        let grid = parse_grid(text).unwrap();
        assert_eq!(
            grid,
            vec![
                vec![Cell::Marker, Cell::Empty],
                vec![Cell::PathMark, Cell::Obstacle],
            ]
        );
    }

    #[test]
    fn token_glyph_precedence() {
        // a token carrying several glyphs resolves to one cell type
        assert_eq!(Cell::from_token(" -= "), Cell::Obstacle);
        assert_eq!(Cell::from_token(" X- "), Cell::Marker);
        assert_eq!(Cell::from_token(" ?! "), Cell::Empty);
    }

    #[test]
    fn serialize_then_parse_is_identity() {
        let grid = vec![
            vec![Cell::Empty, Cell::Marker, Cell::PathMark],
            vec![Cell::Obstacle, Cell::Empty, Cell::Empty],
            vec![Cell::PathMark, Cell::Marker, Cell::Obstacle],
        ];
        let text = grid_to_string(&grid);
        assert_eq!(parse_grid(&text).unwrap(), grid);
    }

    #[test]
    fn maze_round_trips_through_text() {
        let maze = Maze::parse("| X | . |\n| - | X |").unwrap();
        assert_eq!(Maze::parse(&maze.to_text()).unwrap(), maze);
    }

    #[test]
    fn parse_rejects_empty_text() {
        assert_eq!(parse_grid("   \n  "), Err(GridError::EmptyGrid));
        assert_eq!(parse_grid("no delimiters here"), Err(GridError::EmptyGrid));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert_eq!(
            parse_grid("| . | . |\n| . |"),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn maze_requires_exactly_two_markers() {
        assert_eq!(
            Maze::parse("| . | . |\n| . | X |"),
            Err(GridError::MarkerCount(1))
        );
        assert_eq!(
            Maze::parse("| X | X |\n| . | X |"),
            Err(GridError::MarkerCount(3))
        );
    }

    #[test]
    fn maze_requires_square_grid() {
        assert_eq!(
            Maze::parse("| . | X | . |\n| . | X | . |"),
            Err(GridError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn marked_path_is_row_major() {
        let grid = parse_grid("| . | = |\n| = | = |").unwrap();
        assert_eq!(
            marked_path(&grid),
            vec![Point2::new(1, 0), Point2::new(0, 1), Point2::new(1, 1)]
        );
    }

    #[test]
    fn cell_u8_round_trip() {
        for cell in [Cell::Empty, Cell::Marker, Cell::Obstacle, Cell::PathMark] {
            assert_eq!(Cell::try_from(u8::from(cell)).unwrap(), cell);
        }
        assert!(Cell::try_from(0u8).is_err());
    }
}
