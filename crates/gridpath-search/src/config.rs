use gridpath_core::Point;

use crate::error::SearchError;
use crate::graph::Graph;
use crate::strategy::{Search, StrategyKind};
use crate::traits::SearchStrategy;

/// Everything needed to start a search on a built graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    pub strategy: StrategyKind,
    pub start: Point,
    /// Required by greedy and A*; optional for Dijkstra.
    pub goal: Option<Point>,
    /// Maximum number of steps for [`SearchConfig::solve`]. Defaults to the
    /// cell count, which is always enough to converge.
    pub step_budget: Option<usize>,
}

/// Result of [`SearchConfig::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Path to the goal, or `[goal]` if it was never reached. Empty when no
    /// goal was configured.
    pub path: Vec<Point>,
    /// Number of closures performed.
    pub steps: usize,
    /// Whether the search finished within the budget.
    pub converged: bool,
}

impl SearchConfig {
    pub fn new(strategy: StrategyKind, start: Point, goal: Option<Point>) -> Self {
        Self {
            strategy,
            start,
            goal,
            step_budget: None,
        }
    }

    pub fn with_budget(mut self, budget: usize) -> Self {
        self.step_budget = Some(budget);
        self
    }

    pub fn effective_budget(&self, graph: &Graph) -> usize {
        self.step_budget.unwrap_or(graph.len())
    }

    /// Build the configured search over `graph` and seed it.
    pub fn launch<'g>(&self, graph: &'g Graph) -> Result<Search<'g>, SearchError> {
        let mut search = Search::new(self.strategy, graph, self.goal)?;
        search.seed(self.start)?;
        Ok(search)
    }

    /// Launch and step until convergence or the budget runs out.
    pub fn solve(&self, graph: &Graph) -> Result<Outcome, SearchError> {
        let mut search = self.launch(graph)?;
        let budget = self.effective_budget(graph);
        let path = match self.goal {
            Some(goal) => search.run(budget, goal)?,
            None => {
                for _ in 0..budget {
                    if !search.step() {
                        break;
                    }
                }
                Vec::new()
            }
        };
        Ok(Outcome {
            path,
            steps: search.steps(),
            converged: search.is_converged(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_dijkstra_from_origin() {
        let c = SearchConfig::default();
        assert_eq!(c.strategy, StrategyKind::Dijkstra);
        assert_eq!(c.start, Point::ZERO);
        assert_eq!(c.goal, None);
        let g = Graph::from_rows(&[[0; 3]; 2]).unwrap();
        assert_eq!(c.effective_budget(&g), 6);
        assert_eq!(c.with_budget(2).effective_budget(&g), 2);
    }

    #[test]
    fn solve_every_strategy() {
        let g = Graph::from_rows(&[[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
        for kind in StrategyKind::ALL {
            let c = SearchConfig::new(kind, Point::new(0, 0), Some(Point::new(2, 2)));
            let out = c.solve(&g).unwrap();
            assert!(out.converged, "{kind}");
            assert_eq!(out.path.len(), 5, "{kind}");
        }
    }

    #[test]
    fn budget_cuts_the_search_short() {
        let g = Graph::from_rows(&[[0; 6]]).unwrap();
        let goal = Point::new(5, 0);
        let c = SearchConfig::new(StrategyKind::Dijkstra, Point::ZERO, Some(goal)).with_budget(2);
        let out = c.solve(&g).unwrap();
        assert!(!out.converged);
        assert_eq!(out.steps, 2);
        assert_eq!(out.path, vec![goal]);
    }

    #[test]
    fn launch_reports_setup_errors() {
        let g = Graph::from_rows(&[[0, 0]]).unwrap();
        let c = SearchConfig::new(StrategyKind::Greedy, Point::ZERO, None);
        assert_eq!(
            c.launch(&g).err().map(|e| e.to_string()),
            Some("greedy search needs a goal".to_string())
        );
        let c = SearchConfig::new(StrategyKind::Dijkstra, Point::new(4, 4), None);
        assert!(matches!(c.launch(&g), Err(SearchError::Grid(_))));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_from_json_with_defaults() {
        let c: SearchConfig =
            serde_json::from_str(r#"{"strategy":"astar","goal":{"x":3,"y":1}}"#).unwrap();
        assert_eq!(c.strategy, StrategyKind::AStar);
        assert_eq!(c.start, Point::ZERO);
        assert_eq!(c.goal, Some(Point::new(3, 1)));
        assert_eq!(c.step_budget, None);
    }

    #[test]
    fn config_round_trip() {
        let c = SearchConfig::new(StrategyKind::Greedy, Point::new(1, 2), Some(Point::new(4, 0)))
            .with_budget(50);
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
