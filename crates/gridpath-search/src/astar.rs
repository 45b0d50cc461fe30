use gridpath_core::{GridError, Point};

use crate::engine::Searcher;
use crate::graph::Graph;
use crate::strategy::StrategyKind;
use crate::traits::{RankKey, Ranking};

/// A* ranking: smallest f-score (`cost + estimate`) first; among equal
/// f-scores the node closer to the goal wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFirstOptimal;

impl Ranking for BestFirstOptimal {
    const KIND: StrategyKind = StrategyKind::AStar;
    const USES_HEURISTIC: bool = true;

    #[inline]
    fn rank(cost: i32, estimate: i32) -> RankKey {
        (cost + estimate, estimate)
    }
}

/// Stepwise A* search toward a fixed goal.
///
/// Manhattan distance never overestimates on a 4-connected unit grid, so
/// the reported path is as short as Dijkstra's.
pub type AStar<'g> = Searcher<'g, BestFirstOptimal>;

impl<'g> Searcher<'g, BestFirstOptimal> {
    /// Create an unseeded search aimed at `goal`.
    pub fn new(graph: &'g Graph, goal: Point) -> Result<Self, GridError> {
        Self::with_goal_point(graph, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dijkstra, SearchStrategy};

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn two_by_two_matches_dijkstra_with_fewer_closures() {
        let g = Graph::from_rows(&[[0, 0], [0, 0]]).unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(1, 1));

        let mut a = AStar::new(&g, goal).unwrap();
        a.seed(start).unwrap();
        let a_path = a.run(g.len(), goal).unwrap();

        let mut d = Dijkstra::with_goal(&g, goal).unwrap();
        d.seed(start).unwrap();
        let d_path = d.run(g.len(), goal).unwrap();

        assert_eq!(a.cost_at(goal), 2);
        assert_eq!(d.cost_at(goal), 2);
        assert_eq!(a_path.len(), d_path.len());
        assert!(a.closed().len() <= d.closed().len());
        assert_eq!(a.closed().len(), 3);
        assert_eq!(d.closed().len(), 4);
    }

    #[test]
    fn estimate_tie_break_runs_along_the_edge() {
        let g = Graph::from_rows(&[[0; 4]; 4]).unwrap();
        let goal = Point::new(3, 3);
        let mut a = AStar::new(&g, goal).unwrap();
        a.seed(Point::new(0, 0)).unwrap();
        let path = a.run(g.len(), goal).unwrap();
        let straight = pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2), (3, 3)]);
        assert_eq!(path, straight);
        // Every f-score is 6; the estimate tie-break never leaves the path.
        assert_eq!(a.closed(), straight);
        assert_eq!(a.estimate_at(Point::new(0, 0)), 6);
    }

    #[test]
    fn goal_equal_to_start_converges_immediately() {
        let g = Graph::from_rows(&[[0, 0, 0]]).unwrap();
        let p = Point::new(1, 0);
        let mut a = AStar::new(&g, p).unwrap();
        a.seed(p).unwrap();
        assert!(a.is_converged());
        assert!(!a.step());
        assert_eq!(a.path(p).unwrap(), vec![p]);
        assert_eq!(a.cost_at(p), 0);
    }

    #[test]
    fn routes_around_a_wall() {
        let g = Graph::build(
            &gridpath_core::OccupancyGrid::parse(
                "
.....
.###.
...#.
.#...
",
            )
            .unwrap(),
        )
        .unwrap();
        let (start, goal) = (Point::new(0, 2), Point::new(4, 2));
        let mut a = AStar::new(&g, goal).unwrap();
        a.seed(start).unwrap();
        let path = a.run(g.len(), goal).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len() - 1, 6);
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1]) && g.is_free(w[1])));
    }
}
