use std::fmt;

use gridpath_core::{Point, Range};

use crate::engine::UNREACHABLE;
use crate::error::SearchError;

/// Per-cell view of a search at one moment, for display.
///
/// Vectors are row-major over `bounds`. Deserializing checks that each one
/// has exactly one entry per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSnapshot")
)]
pub struct StatusSnapshot {
    pub bounds: Range,
    pub costs: Vec<i32>,
    pub estimates: Vec<i32>,
    pub visited: Vec<bool>,
    /// Number of closed nodes, start included.
    pub closed: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSnapshot {
    bounds: Range,
    costs: Vec<i32>,
    estimates: Vec<i32>,
    visited: Vec<bool>,
    closed: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSnapshot> for StatusSnapshot {
    type Error = SearchError;

    fn try_from(raw: RawSnapshot) -> Result<Self, SearchError> {
        let snapshot = Self {
            bounds: raw.bounds,
            costs: raw.costs,
            estimates: raw.estimates,
            visited: raw.visited,
            closed: raw.closed,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl StatusSnapshot {
    /// Check that every per-cell vector covers `bounds` exactly.
    pub fn validate(&self) -> Result<(), SearchError> {
        let cells = self.bounds.len();
        for found in [self.costs.len(), self.estimates.len(), self.visited.len()] {
            if found != cells {
                return Err(SearchError::SnapshotMismatch { cells, found });
            }
        }
        Ok(())
    }

    /// Tentative cost at `p`; [`UNREACHABLE`] if unknown or out of range.
    pub fn cost_at(&self, p: Point) -> i32 {
        self.bounds
            .index_of(p)
            .and_then(|i| self.costs.get(i).copied())
            .unwrap_or(UNREACHABLE)
    }

    /// Heuristic estimate at `p`; [`UNREACHABLE`] if not computed.
    pub fn estimate_at(&self, p: Point) -> i32 {
        self.bounds
            .index_of(p)
            .and_then(|i| self.estimates.get(i).copied())
            .unwrap_or(UNREACHABLE)
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.bounds
            .index_of(p)
            .and_then(|i| self.visited.get(i).copied())
            .unwrap_or(false)
    }

    /// Costs as rows, `None` where unreached.
    pub fn cost_rows(&self) -> Vec<Vec<Option<i32>>> {
        self.costs
            .chunks(self.bounds.width().max(1) as usize)
            .map(|row| {
                row.iter()
                    .map(|&c| (c != UNREACHABLE).then_some(c))
                    .collect()
            })
            .collect()
    }

    /// Visited cells in row-major order.
    pub fn visited_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds
            .iter()
            .zip(self.visited.iter())
            .filter_map(|(p, &v)| v.then_some(p))
    }
}

impl fmt::Display for StatusSnapshot {
    /// The cost table, one grid row per line, `∞` where unreached.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .costs
            .iter()
            .filter(|&&c| c != UNREACHABLE)
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);
        for (y, row) in self.cost_rows().iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, c) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                match c {
                    Some(c) => write!(f, "{c:>width$}")?,
                    None => write!(f, "{:>width$}", "∞")?,
                }
            }
        }
        Ok(())
    }
}
