//! The [`OccupancyGrid`] type — a rectangular map of integer [`Tag`]s.
//!
//! Tag `0` is traversable; any other value is blocked. The grid is the only
//! mutable input of the system: every effective edit bumps a revision
//! counter, which lets a graph built from an earlier revision detect that it
//! has gone stale.

use crate::error::{GridError, InvalidGridReason};
use crate::geom::{Point, Range};

/// A cell tag, wrapping an `i32`. Zero means free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(pub i32);

impl Tag {
    pub const FREE: Tag = Tag(0);
    pub const WALL: Tag = Tag(1);

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether a cell with this tag can be entered.
    #[inline]
    pub const fn is_free(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Tag {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<Tag> for i32 {
    fn from(t: Tag) -> Self {
        t.0
    }
}

// ---------------------------------------------------------------------------
// OccupancyGrid
// ---------------------------------------------------------------------------

/// A non-empty rectangular grid of [`Tag`]s, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")
)]
pub struct OccupancyGrid {
    cells: Vec<Tag>,
    bounds: Range,
    revision: u64,
}

impl OccupancyGrid {
    /// Create a `width` x `height` grid with every cell free.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidGrid(InvalidGridReason::Empty));
        }
        let bounds = Range::sized(width, height);
        Ok(Self {
            cells: vec![Tag::FREE; bounds.len()],
            bounds,
            revision: 0,
        })
    }

    /// Build a grid from rows of tags; row `y` holds the cells `(0..w, y)`.
    ///
    /// Fails with [`GridError::InvalidGrid`] when there are no cells or the
    /// rows differ in length.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[T]>,
        T: Copy + Into<i32>,
    {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        if expected == 0 {
            return Err(GridError::InvalidGrid(InvalidGridReason::Empty));
        }
        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != expected {
                return Err(GridError::InvalidGrid(InvalidGridReason::Ragged {
                    row,
                    expected,
                    found: r.len(),
                }));
            }
            cells.extend(r.iter().map(|&v| Tag(v.into())));
        }
        Ok(Self {
            cells,
            bounds: Range::sized(expected as i32, rows.len() as i32),
            revision: 0,
        })
    }

    /// Parse a text picture, one line per row.
    ///
    /// `.` and `0` are free; `#` and the digits `1`-`9` are blocked (digits
    /// keep their value as the tag). Surrounding blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<i32>> = Vec::new();
        for (y, line) in text.trim_matches('\n').lines().enumerate() {
            let line = line.trim_end();
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let tag = match ch {
                    '.' | '0' => 0,
                    '#' => 1,
                    '1'..='9' => ch as i32 - '0' as i32,
                    _ => {
                        return Err(GridError::InvalidGrid(InvalidGridReason::BadChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        }));
                    }
                };
                row.push(tag);
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// Returns the bounding range `[0, w) x [0, h)`.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells, free or blocked.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the grid contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Get the tag at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tag> {
        self.bounds.index_of(p).map(|i| self.cells[i])
    }

    /// Whether `p` is inside the grid and free.
    pub fn is_free(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tag::is_free)
    }

    /// Set the tag at a point.
    ///
    /// Writing the value already present is not an edit and leaves the
    /// revision unchanged.
    pub fn set(&mut self, p: Point, tag: impl Into<Tag>) -> Result<(), GridError> {
        let i = self.bounds.index_of(p).ok_or(GridError::UnknownCell(p))?;
        let tag = tag.into();
        if self.cells[i] != tag {
            self.cells[i] = tag;
            self.revision += 1;
        }
        Ok(())
    }

    /// Fill the entire grid with the given tag.
    pub fn fill(&mut self, tag: impl Into<Tag>) {
        let tag = tag.into();
        if self.cells.iter().any(|&c| c != tag) {
            self.cells.fill(tag);
            self.revision += 1;
        }
    }

    /// Edit counter; increases on every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Count free cells.
    pub fn count_free(&self) -> usize {
        self.cells.iter().filter(|c| c.is_free()).count()
    }

    /// Iterate over `(Point, Tag)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tag)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Copy the grid back out as rows of raw tag values.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.bounds.width() as usize)
            .map(|row| row.iter().map(|t| t.0).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<i32>>> for OccupancyGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        Self::from_rows(&rows)
    }
}

impl From<OccupancyGrid> for Vec<Vec<i32>> {
    fn from(g: OccupancyGrid) -> Self {
        g.to_rows()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_serializes_as_rows() {
        let g = OccupancyGrid::from_rows(&[[0, 1], [0, 0]]).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[0,1],[0,0]]");
        let back: OccupancyGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn ragged_rows_fail_to_deserialize() {
        let res: Result<OccupancyGrid, _> = serde_json::from_str("[[0,1],[0]]");
        assert!(res.is_err());
    }
}
