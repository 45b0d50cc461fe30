use gridpath_core::{GridError, Point};

use crate::graph::Graph;
use crate::status::StatusSnapshot;
use crate::strategy::StrategyKind;

/// Ordering key of an open node. Smaller keys close first; remaining ties go
/// to the smaller node index (row-major coordinate order).
pub type RankKey = (i32, i32);

/// How a strategy ranks open nodes for closure.
///
/// This is the only thing that differs between the three searches: they
/// share relaxation, closure bookkeeping and path extraction.
pub trait Ranking {
    const KIND: StrategyKind;
    /// Whether nodes carry a heuristic estimate toward the goal.
    const USES_HEURISTIC: bool;

    /// Rank an open node from its tentative cost and heuristic estimate.
    fn rank(cost: i32, estimate: i32) -> RankKey;
}

/// Stepwise search over a [`Graph`].
///
/// A search is seeded at a start cell and then advanced one closure at a
/// time with [`step`](SearchStrategy::step). Every query is valid at any
/// point in between.
pub trait SearchStrategy {
    fn kind(&self) -> StrategyKind;

    fn graph(&self) -> &Graph;

    /// Reset all per-node state and start a new search at `start`.
    fn seed(&mut self, start: Point) -> Result<(), GridError>;

    /// Close one more node. Returns `false` once nothing more can be done.
    fn step(&mut self) -> bool;

    /// Best known path from the start to `target`, both inclusive.
    ///
    /// A target that has not been visited yields `[target]`.
    fn path(&self, target: Point) -> Result<Vec<Point>, GridError>;

    /// Tentative cost at `p`, [`UNREACHABLE`](crate::UNREACHABLE) if unknown.
    fn cost_at(&self, p: Point) -> i32;

    /// Heuristic estimate at `p`, [`UNREACHABLE`](crate::UNREACHABLE) if not
    /// computed.
    fn estimate_at(&self, p: Point) -> i32;

    fn is_visited(&self, p: Point) -> bool;

    /// Visited nodes in the order they were closed, start first.
    fn closed(&self) -> Vec<Point>;

    /// Whether the search has finished (goal closed or frontier exhausted).
    fn is_converged(&self) -> bool;

    fn start(&self) -> Option<Point>;

    fn goal(&self) -> Option<Point>;

    /// Number of successful closures since the last seed.
    fn steps(&self) -> usize;

    /// Snapshot of every cell's search state, for display.
    fn status(&self) -> StatusSnapshot;

    /// Step at most `budget` times or until the search converges, then
    /// return the path to `target`.
    fn run(&mut self, budget: usize, target: Point) -> Result<Vec<Point>, GridError> {
        self.graph().checked_index(target)?;
        for _ in 0..budget {
            if !self.step() {
                break;
            }
        }
        self.path(target)
    }
}
