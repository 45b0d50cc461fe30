//! Run-time strategy selection.

use std::fmt;
use std::str::FromStr;

use gridpath_core::{GridError, Point};

use crate::astar::AStar;
use crate::dijkstra::Dijkstra;
use crate::error::SearchError;
use crate::graph::Graph;
use crate::greedy::Greedy;
use crate::status::StatusSnapshot;
use crate::traits::SearchStrategy;

/// The three interchangeable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum StrategyKind {
    /// Uniform-cost search.
    #[default]
    Dijkstra,
    /// Greedy best-first search on the heuristic alone.
    Greedy,
    /// Heuristic-guided optimal search.
    AStar,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::Dijkstra, Self::Greedy, Self::AStar];

    /// Whether the strategy cannot run without a goal.
    pub const fn needs_goal(self) -> bool {
        !matches!(self, Self::Dijkstra)
    }

    /// Whether the reported paths are always shortest.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Greedy)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dijkstra => "dijkstra",
            Self::Greedy => "greedy",
            Self::AStar => "astar",
        })
    }
}

impl FromStr for StrategyKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, SearchError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" | "ucs" => Ok(Self::Dijkstra),
            "greedy" => Ok(Self::Greedy),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Any of the three searches, chosen at run time.
pub enum Search<'g> {
    Dijkstra(Dijkstra<'g>),
    Greedy(Greedy<'g>),
    AStar(AStar<'g>),
}

impl<'g> Search<'g> {
    /// Create an unseeded search of the given kind.
    ///
    /// `goal` is optional for Dijkstra and required by the heuristic
    /// strategies.
    pub fn new(kind: StrategyKind, graph: &'g Graph, goal: Option<Point>) -> Result<Self, SearchError> {
        Ok(match (kind, goal) {
            (StrategyKind::Dijkstra, None) => Self::Dijkstra(Dijkstra::new(graph)),
            (StrategyKind::Dijkstra, Some(g)) => Self::Dijkstra(Dijkstra::with_goal(graph, g)?),
            (StrategyKind::Greedy, Some(g)) => Self::Greedy(Greedy::new(graph, g)?),
            (StrategyKind::AStar, Some(g)) => Self::AStar(AStar::new(graph, g)?),
            (kind, None) => return Err(SearchError::MissingGoal(kind)),
        })
    }

    /// A fresh, unseeded search of another kind over the same graph and goal.
    pub fn restart_as(&self, kind: StrategyKind) -> Result<Search<'g>, SearchError> {
        let graph = match self {
            Self::Dijkstra(s) => s.graph_ref(),
            Self::Greedy(s) => s.graph_ref(),
            Self::AStar(s) => s.graph_ref(),
        };
        Search::new(kind, graph, self.goal())
    }
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Search::Dijkstra($s) => $body,
            Search::Greedy($s) => $body,
            Search::AStar($s) => $body,
        }
    };
}

impl SearchStrategy for Search<'_> {
    fn kind(&self) -> StrategyKind {
        dispatch!(self, s => s.kind())
    }

    fn graph(&self) -> &Graph {
        dispatch!(self, s => s.graph())
    }

    fn seed(&mut self, start: Point) -> Result<(), GridError> {
        dispatch!(self, s => s.seed(start))
    }

    fn step(&mut self) -> bool {
        dispatch!(self, s => s.step())
    }

    fn path(&self, target: Point) -> Result<Vec<Point>, GridError> {
        dispatch!(self, s => s.path(target))
    }

    fn cost_at(&self, p: Point) -> i32 {
        dispatch!(self, s => s.cost_at(p))
    }

    fn estimate_at(&self, p: Point) -> i32 {
        dispatch!(self, s => s.estimate_at(p))
    }

    fn is_visited(&self, p: Point) -> bool {
        dispatch!(self, s => s.is_visited(p))
    }

    fn closed(&self) -> Vec<Point> {
        dispatch!(self, s => s.closed())
    }

    fn is_converged(&self) -> bool {
        dispatch!(self, s => s.is_converged())
    }

    fn start(&self) -> Option<Point> {
        dispatch!(self, s => s.start())
    }

    fn goal(&self) -> Option<Point> {
        dispatch!(self, s => s.goal())
    }

    fn steps(&self) -> usize {
        dispatch!(self, s => s.steps())
    }

    fn status(&self) -> StatusSnapshot {
        dispatch!(self, s => s.status())
    }
}
