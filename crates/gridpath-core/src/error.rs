use std::fmt;

use crate::geom::Point;

/// Why a set of rows could not become an [`OccupancyGrid`](crate::OccupancyGrid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidGridReason {
    /// No rows, or rows with no cells.
    Empty,
    /// Row `row` has `found` cells where the first row has `expected`.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A text picture contains a character that is neither free nor blocked.
    BadChar { ch: char, pos: Point },
}

/// Errors raised by grid construction and coordinate lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid is empty or not rectangular.
    InvalidGrid(InvalidGridReason),
    /// A coordinate lies outside the grid bounds.
    UnknownCell(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid(InvalidGridReason::Empty) => write!(f, "invalid grid: no cells"),
            Self::InvalidGrid(InvalidGridReason::Ragged {
                row,
                expected,
                found,
            }) => write!(
                f,
                "invalid grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidGrid(InvalidGridReason::BadChar { ch, pos }) => {
                write!(f, "invalid grid: unexpected character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::UnknownCell(p) => write!(f, "unknown cell {p}: outside grid bounds"),
        }
    }
}

impl std::error::Error for GridError {}
