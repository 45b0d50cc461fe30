use std::collections::BinaryHeap;
use std::marker::PhantomData;

use gridpath_core::{GridError, Point};

use crate::distance::manhattan;
use crate::graph::Graph;
use crate::status::StatusSnapshot;
use crate::strategy::StrategyKind;
use crate::traits::{RankKey, Ranking, SearchStrategy};

/// Sentinel value meaning "not reached" for costs and estimates.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-node search state
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeState {
    pub(crate) cost: i32,
    pub(crate) estimate: i32,
    pub(crate) parent: usize,
    pub(crate) closed: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            cost: UNREACHABLE,
            estimate: UNREACHABLE,
            parent: NO_PARENT,
            closed: false,
        }
    }
}

/// Reference into the node array, ordered by rank for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) key: RankKey,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key, then the
        // smallest index.
        other.key.cmp(&self.key).then(other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Stepwise best-first search over a borrowed [`Graph`], ranked by `R`.
///
/// The concrete strategies are [`Dijkstra`](crate::Dijkstra),
/// [`Greedy`](crate::Greedy) and [`AStar`](crate::AStar). Restarting a search
/// is either [`seed`](SearchStrategy::seed) again or a new searcher over the
/// same graph; both are cheap.
///
/// The open set is a heap with lazy invalidation: improving a node pushes a
/// fresh entry and stale ones are skipped on pop. Only the node closed last
/// can produce new relaxations (visited costs are frozen), so relaxing it at
/// the start of each step gives the same state as relaxing every visited
/// node.
pub struct Searcher<'g, R: Ranking> {
    graph: &'g Graph,
    nodes: Vec<NodeState>,
    open: BinaryHeap<NodeRef>,
    closed: Vec<usize>,
    start: Option<usize>,
    goal: Option<usize>,
    converged: bool,
    _ranking: PhantomData<R>,
}

impl<'g, R: Ranking> Searcher<'g, R> {
    pub(crate) fn with_goal_index(graph: &'g Graph, goal: Option<usize>) -> Self {
        Self {
            graph,
            nodes: vec![NodeState::default(); graph.len()],
            open: BinaryHeap::new(),
            closed: Vec::new(),
            start: None,
            goal,
            converged: false,
            _ranking: PhantomData,
        }
    }

    pub(crate) fn with_goal_point(graph: &'g Graph, goal: Point) -> Result<Self, GridError> {
        let gi = graph.checked_index(goal)?;
        Ok(Self::with_goal_index(graph, Some(gi)))
    }

    /// Borrow the graph with its full lifetime, e.g. to start a sibling search.
    pub fn graph_ref(&self) -> &'g Graph {
        self.graph
    }

    fn estimate(&self, idx: usize) -> i32 {
        match self.goal {
            Some(gi) if R::USES_HEURISTIC => manhattan(self.graph.point(idx), self.graph.point(gi)),
            _ => UNREACHABLE,
        }
    }

    fn state_at(&self, p: Point) -> Option<&NodeState> {
        self.graph.index(p).map(|i| &self.nodes[i])
    }

    /// Relax every edge of closed node `ci` into open neighbours.
    fn relax_from(&mut self, ci: usize) {
        let graph = self.graph;
        let current_cost = self.nodes[ci].cost;
        for edge in graph.edges_at(ci) {
            let Some(ni) = graph.index(edge.to) else {
                continue;
            };
            if self.nodes[ni].closed {
                continue;
            }
            let tentative = current_cost + edge.weight;
            if tentative >= self.nodes[ni].cost {
                continue;
            }
            let estimate = self.estimate(ni);
            let n = &mut self.nodes[ni];
            n.cost = tentative;
            n.estimate = estimate;
            n.parent = ci;
            self.open.push(NodeRef {
                idx: ni,
                key: R::rank(tentative, estimate),
            });
        }
    }

    /// Pop the best live open node, skipping stale heap entries.
    fn pop_best(&mut self) -> Option<usize> {
        while let Some(top) = self.open.pop() {
            let n = &self.nodes[top.idx];
            if n.closed || R::rank(n.cost, n.estimate) != top.key {
                continue;
            }
            return Some(top.idx);
        }
        None
    }
}

impl<R: Ranking> SearchStrategy for Searcher<'_, R> {
    fn kind(&self) -> StrategyKind {
        R::KIND
    }

    fn graph(&self) -> &Graph {
        self.graph
    }

    fn seed(&mut self, start: Point) -> Result<(), GridError> {
        let si = self.graph.checked_index(start)?;

        self.nodes.fill(NodeState::default());
        self.open.clear();
        self.closed.clear();

        let estimate = self.estimate(si);
        let s = &mut self.nodes[si];
        s.cost = 0;
        s.estimate = estimate;
        s.closed = true;
        self.closed.push(si);
        self.start = Some(si);
        self.converged = self.goal == Some(si);

        log::debug!(
            "{} seeded at {start}, goal {}",
            R::KIND,
            self.goal
                .map_or_else(|| "none".to_string(), |gi| self.graph.point(gi).to_string())
        );
        Ok(())
    }

    fn step(&mut self) -> bool {
        if self.converged {
            return false;
        }
        let Some(&last) = self.closed.last() else {
            // Not seeded.
            return false;
        };

        self.relax_from(last);

        let Some(ci) = self.pop_best() else {
            self.converged = true;
            log::debug!(
                "{} exhausted the frontier after {} closures",
                R::KIND,
                self.steps()
            );
            return false;
        };

        self.nodes[ci].closed = true;
        self.closed.push(ci);
        log::trace!(
            "{} closed {} (cost {}, estimate {})",
            R::KIND,
            self.graph.point(ci),
            self.nodes[ci].cost,
            self.nodes[ci].estimate
        );

        if self.goal == Some(ci) {
            self.converged = true;
            log::debug!(
                "{} closed the goal at cost {} after {} closures",
                R::KIND,
                self.nodes[ci].cost,
                self.steps()
            );
            return false;
        }
        true
    }

    fn path(&self, target: Point) -> Result<Vec<Point>, GridError> {
        let ti = self.graph.checked_index(target)?;
        if !self.nodes[ti].closed {
            return Ok(vec![target]);
        }
        let mut path = Vec::new();
        let mut ci = ti;
        while ci != NO_PARENT {
            path.push(self.graph.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Ok(path)
    }

    fn cost_at(&self, p: Point) -> i32 {
        self.state_at(p).map_or(UNREACHABLE, |n| n.cost)
    }

    fn estimate_at(&self, p: Point) -> i32 {
        self.state_at(p).map_or(UNREACHABLE, |n| n.estimate)
    }

    fn is_visited(&self, p: Point) -> bool {
        self.state_at(p).is_some_and(|n| n.closed)
    }

    fn closed(&self) -> Vec<Point> {
        self.closed.iter().map(|&i| self.graph.point(i)).collect()
    }

    fn is_converged(&self) -> bool {
        self.converged
    }

    fn start(&self) -> Option<Point> {
        self.start.map(|i| self.graph.point(i))
    }

    fn goal(&self) -> Option<Point> {
        self.goal.map(|i| self.graph.point(i))
    }

    fn steps(&self) -> usize {
        self.closed.len().saturating_sub(1)
    }

    fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            bounds: self.graph.bounds(),
            costs: self.nodes.iter().map(|n| n.cost).collect(),
            estimates: self.nodes.iter().map(|n| n.estimate).collect(),
            visited: self.nodes.iter().map(|n| n.closed).collect(),
            closed: self.closed.len(),
        }
    }
}
