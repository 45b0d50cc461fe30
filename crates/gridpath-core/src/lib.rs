//! **gridpath-core** — core types for stepwise grid pathfinding.
//!
//! This crate provides the foundational types used across the *gridpath*
//! workspace: geometry primitives, the occupancy grid that callers edit, and
//! the error type shared by grid construction and coordinate lookups.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::{GridError, InvalidGridReason};
pub use geom::{Point, Range, RangeIter};
pub use grid::{OccupancyGrid, Tag};
