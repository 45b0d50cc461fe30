use std::fmt;

use gridpath_core::GridError;

use crate::strategy::StrategyKind;

/// Errors raised while setting up a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Invalid grid or out-of-bounds coordinate.
    Grid(GridError),
    /// A heuristic strategy was requested without a goal to aim at.
    MissingGoal(StrategyKind),
    /// A strategy name that does not parse.
    UnknownStrategy(String),
    /// A status snapshot whose per-cell vectors do not match its bounds.
    SnapshotMismatch { cells: usize, found: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => e.fmt(f),
            Self::MissingGoal(kind) => write!(f, "{kind} search needs a goal"),
            Self::UnknownStrategy(name) => write!(
                f,
                "unknown strategy \u{201c}{name}\u{201d} (expected dijkstra, greedy or astar)"
            ),
            Self::SnapshotMismatch { cells, found } => write!(
                f,
                "status snapshot has {found} entries for a grid of {cells} cells"
            ),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
