//! Grid graph builder.
//!
//! A [`Graph`] is a flat, index-keyed snapshot of an [`OccupancyGrid`]: one
//! [`GraphNode`] per cell, with unit-weight edges pointing into orthogonal
//! neighbours that are free. Blocked cells are nodes too, but no edge ever
//! leads into one.

use gridpath_core::{GridError, InvalidGridReason, OccupancyGrid, Point, Range};

/// Weight of every edge on the unit grid.
pub const UNIT_WEIGHT: i32 = 1;

/// A directed edge into `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: Point,
    pub weight: i32,
}

/// One grid cell as a graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub coord: Point,
    /// Outgoing edges by ascending weight, then scan order
    /// (east, north, west, south).
    pub neighbors: Vec<Edge>,
}

/// Adjacency snapshot of an occupancy grid.
///
/// The graph carries no search state, so any number of searches can borrow
/// the same graph at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    bounds: Range,
    nodes: Vec<GraphNode>,
    free: Vec<bool>,
    revision: u64,
}

impl Graph {
    /// Build the graph for `grid`.
    ///
    /// Identical grids always yield identical adjacency ordering.
    pub fn build(grid: &OccupancyGrid) -> Result<Self, GridError> {
        let bounds = grid.bounds();
        if bounds.is_empty() {
            return Err(GridError::InvalidGrid(InvalidGridReason::Empty));
        }

        let free: Vec<bool> = grid.iter().map(|(_, tag)| tag.is_free()).collect();
        let mut edges = 0;
        let nodes: Vec<GraphNode> = bounds
            .iter()
            .map(|p| {
                let mut neighbors: Vec<Edge> = p
                    .cardinal()
                    .into_iter()
                    .filter(|&n| grid.is_free(n))
                    .map(|n| Edge {
                        to: n,
                        weight: UNIT_WEIGHT,
                    })
                    .collect();
                // Stable: equal weights keep scan order.
                neighbors.sort_by_key(|e| e.weight);
                edges += neighbors.len();
                GraphNode { coord: p, neighbors }
            })
            .collect();

        log::debug!(
            "built graph {}x{}: {} nodes, {} edges (grid revision {})",
            bounds.width(),
            bounds.height(),
            nodes.len(),
            edges,
            grid.revision()
        );

        Ok(Self {
            bounds,
            nodes,
            free,
            revision: grid.revision(),
        })
    }

    /// Validate `rows` as a grid and build its graph in one go.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[T]>,
        T: Copy + Into<i32>,
    {
        Self::build(&OccupancyGrid::from_rows(rows)?)
    }

    /// The grid rectangle this graph covers.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of nodes (= grid cells).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum()
    }

    /// Convert a `Point` to a node index. Returns `None` if out of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds.index_of(p)
    }

    /// Convert a node index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.bounds.point_at(idx)
    }

    /// Like [`Graph::index`], but failing with [`GridError::UnknownCell`].
    pub fn checked_index(&self, p: Point) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::UnknownCell(p))
    }

    pub fn node(&self, p: Point) -> Option<&GraphNode> {
        self.index(p).map(|i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Outgoing edges of the node at `p`.
    pub fn neighbors(&self, p: Point) -> Result<&[Edge], GridError> {
        let i = self.checked_index(p)?;
        Ok(&self.nodes[i].neighbors)
    }

    #[inline]
    pub(crate) fn edges_at(&self, idx: usize) -> &[Edge] {
        &self.nodes[idx].neighbors
    }

    /// Whether the cell at `p` was free when the graph was built.
    pub fn is_free(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.free[i])
    }

    /// Revision of the grid this graph was built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `grid` has been edited (or resized) since this graph was built.
    pub fn is_stale(&self, grid: &OccupancyGrid) -> bool {
        grid.revision() != self.revision || grid.bounds() != self.bounds
    }
}
