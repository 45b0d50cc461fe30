use gridpath_core::{GridError, Point};

use crate::engine::Searcher;
use crate::graph::Graph;
use crate::strategy::StrategyKind;
use crate::traits::{RankKey, Ranking};

/// Pure-heuristic ranking: close the open node nearest to the goal by
/// Manhattan distance, ignoring the cost paid to get there.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBestFirst;

impl Ranking for GreedyBestFirst {
    const KIND: StrategyKind = StrategyKind::Greedy;
    const USES_HEURISTIC: bool = true;

    #[inline]
    fn rank(_cost: i32, estimate: i32) -> RankKey {
        (estimate, 0)
    }
}

/// Stepwise greedy best-first search.
///
/// Usually expands far fewer nodes than [`Dijkstra`](crate::Dijkstra), but
/// the path it reports is not guaranteed to be shortest.
pub type Greedy<'g> = Searcher<'g, GreedyBestFirst>;

impl<'g> Searcher<'g, GreedyBestFirst> {
    /// Create an unseeded search aimed at `goal`.
    pub fn new(graph: &'g Graph, goal: Point) -> Result<Self, GridError> {
        Self::with_goal_point(graph, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dijkstra, SearchStrategy, bfs_distances};

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| p.into()).collect()
    }

    // Heading straight for the goal walks into the dead end at (2, 2);
    // the way down the middle column is shorter.
    const DETOUR: [[i32; 3]; 5] = [
        [0, 0, 0],
        [1, 0, 0],
        [0, 0, 0],
        [0, 0, 1],
        [1, 0, 0],
    ];

    #[test]
    fn greedy_can_return_a_longer_path() {
        let g = Graph::from_rows(&DETOUR).unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(2, 4));

        let mut greedy = Greedy::new(&g, goal).unwrap();
        greedy.seed(start).unwrap();
        let path = greedy.run(g.len(), goal).unwrap();
        assert_eq!(
            path,
            pts(&[
                (0, 0),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2),
                (1, 2),
                (1, 3),
                (1, 4),
                (2, 4),
            ])
        );

        let optimal = bfs_distances(&g, start).unwrap()[g.index(goal).unwrap()];
        assert_eq!(optimal, 6);
        assert_eq!(path.len() - 1, 8);
        assert!(path.len() - 1 > optimal as usize);

        let mut d = Dijkstra::with_goal(&g, goal).unwrap();
        d.seed(start).unwrap();
        assert_eq!(d.run(g.len(), goal).unwrap().len() - 1, 6);
    }

    #[test]
    fn greedy_closes_nodes_nearest_the_goal_first() {
        let g = Graph::from_rows(&DETOUR).unwrap();
        let goal = Point::new(2, 4);
        let mut greedy = Greedy::new(&g, goal).unwrap();
        greedy.seed(Point::new(0, 0)).unwrap();
        while greedy.step() {}
        assert_eq!(greedy.closed().len(), 9);
        assert!(greedy.is_visited(goal));
        assert!(!greedy.is_visited(Point::new(1, 1)));
        assert_eq!(greedy.estimate_at(Point::new(0, 0)), 6);
        assert_eq!(greedy.estimate_at(Point::new(1, 2)), 3);
        // Touched but never closed: (1, 1) still got its estimate.
        assert_eq!(greedy.estimate_at(Point::new(1, 1)), 4);
    }

    #[test]
    fn greedy_requires_an_in_bounds_goal() {
        let g = Graph::from_rows(&[[0, 0]]).unwrap();
        assert_eq!(
            Greedy::new(&g, Point::new(0, 3)).err(),
            Some(GridError::UnknownCell(Point::new(0, 3)))
        );
    }

    #[test]
    fn greedy_straight_line_matches_optimum() {
        let g = Graph::from_rows(&[[0; 5]; 2]).unwrap();
        let goal = Point::new(4, 0);
        let mut greedy = Greedy::new(&g, goal).unwrap();
        greedy.seed(Point::new(0, 0)).unwrap();
        let path = greedy.run(g.len(), goal).unwrap();
        assert_eq!(path.len(), 5);
        // Only the corridor itself was explored.
        assert_eq!(greedy.closed().len(), 5);
    }
}
