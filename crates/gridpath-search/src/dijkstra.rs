use gridpath_core::{GridError, Point};

use crate::engine::Searcher;
use crate::graph::Graph;
use crate::strategy::StrategyKind;
use crate::traits::{RankKey, Ranking};

/// Uniform-cost ranking: close the open node with the smallest tentative
/// cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCost;

impl Ranking for UniformCost {
    const KIND: StrategyKind = StrategyKind::Dijkstra;
    const USES_HEURISTIC: bool = false;

    #[inline]
    fn rank(cost: i32, _estimate: i32) -> RankKey {
        (cost, 0)
    }
}

/// Stepwise Dijkstra search.
///
/// Without a goal the search runs until every reachable cell is closed,
/// leaving a full distance map. With a goal it stops the instant the goal
/// is closed.
pub type Dijkstra<'g> = Searcher<'g, UniformCost>;

impl<'g> Searcher<'g, UniformCost> {
    /// Create an unseeded search over `graph` with no goal.
    pub fn new(graph: &'g Graph) -> Self {
        Self::with_goal_index(graph, None)
    }

    /// Create an unseeded search that halts once `goal` is closed.
    pub fn with_goal(graph: &'g Graph, goal: Point) -> Result<Self, GridError> {
        Self::with_goal_point(graph, goal)
    }
}
