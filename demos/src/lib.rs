//! Shared pieces of the `pathfind` batch runner: sample and random grids,
//! JSON scenarios, and text rendering of a search in progress.

use gridpath_core::{OccupancyGrid, Point};
use gridpath_search::{
    Graph, SearchConfig, SearchStrategy, StatusSnapshot, StrategyKind, bfs_distance,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The ten-by-ten maze the runner uses when given no grid.
pub const SAMPLE_MAP: &str = "
..#...#...
..#...#...
..#...#...
..#.#.#...
..#.#.#...
..#.#.#...
..#.#.#...
....#.....
....#.....
....#.....
";

pub const SAMPLE_START: Point = Point::new(0, 0);
pub const SAMPLE_GOAL: Point = Point::new(9, 0);

/// A grid plus the search to run on it, as read from JSON.
///
/// ```json
/// { "grid": [[0, 0, 1], [0, 0, 0]],
///   "config": { "strategy": "astar", "start": {"x": 0, "y": 0}, "goal": {"x": 2, "y": 0} } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub grid: OccupancyGrid,
    #[serde(default)]
    pub config: SearchConfig,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn sample() -> Self {
        Self {
            grid: sample_grid(),
            config: SearchConfig::new(StrategyKind::Dijkstra, SAMPLE_START, Some(SAMPLE_GOAL)),
        }
    }
}

/// The grid behind [`SAMPLE_MAP`].
pub fn sample_grid() -> OccupancyGrid {
    match OccupancyGrid::parse(SAMPLE_MAP) {
        Ok(g) => g,
        Err(e) => unreachable!("sample map is well formed: {e}"),
    }
}

/// A `width` x `height` grid where each cell is blocked with probability
/// `density`; `keep_free` cells are always left open.
pub fn random_grid(
    rng: &mut impl Rng,
    width: i32,
    height: i32,
    density: f64,
    keep_free: &[Point],
) -> Result<OccupancyGrid, gridpath_core::GridError> {
    let mut grid = OccupancyGrid::new(width, height)?;
    let density = density.clamp(0.0, 1.0);
    for p in grid.bounds() {
        if !keep_free.contains(&p) && rng.random_bool(density) {
            grid.set(p, 1)?;
        }
    }
    Ok(grid)
}

/// Draw the grid as text: `#` blocked, `S` start, `X` goal, `*` path,
/// `o` visited, `.` free.
pub fn render_map(graph: &Graph, search: &dyn SearchStrategy, path: &[Point]) -> String {
    let mut out = String::with_capacity(graph.len() + graph.height() as usize);
    for y in 0..graph.height() {
        for x in 0..graph.width() {
            let p = Point::new(x, y);
            let ch = if search.start() == Some(p) {
                'S'
            } else if search.goal() == Some(p) {
                'X'
            } else if !graph.is_free(p) {
                '#'
            } else if path.contains(&p) {
                '*'
            } else if search.is_visited(p) {
                'o'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// What one strategy did on one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub strategy: StrategyKind,
    pub path: Vec<Point>,
    pub reached: bool,
    pub closed: usize,
    pub steps: usize,
    pub converged: bool,
    pub optimal: Option<i32>,
    pub map: String,
    pub status: StatusSnapshot,
}

impl Report {
    /// Path length in edges, if the goal was reached.
    pub fn length(&self) -> Option<usize> {
        self.reached.then(|| self.path.len().saturating_sub(1))
    }

    /// How many edges longer than the optimum the path is, if both exist.
    pub fn excess(&self) -> Option<usize> {
        let opt = usize::try_from(self.optimal?).ok()?;
        Some(self.length()?.saturating_sub(opt))
    }

    pub fn summary(&self) -> String {
        let length = match self.length() {
            Some(len) => format!("length {len:>3}"),
            None => "no path   ".to_string(),
        };
        let optimum = match (self.optimal, self.excess()) {
            // Only a non-optimal strategy can come out longer.
            (Some(opt), Some(extra)) if extra > 0 && !self.strategy.is_optimal() => {
                format!("  optimum {opt} (+{extra})")
            }
            (Some(opt), _) => format!("  optimum {opt}"),
            (None, _) => String::new(),
        };
        let budget = if self.converged { "" } else { "  (budget exhausted)" };
        format!(
            "{:<9} {length}  closed {:>4}  steps {:>4}{optimum}{budget}",
            self.strategy.to_string(),
            self.closed,
            self.steps
        )
    }
}

/// Run `config` on `graph` step by step, calling `on_step` after every step
/// that made progress.
pub fn run_strategy(
    graph: &Graph,
    config: &SearchConfig,
    mut on_step: impl FnMut(&dyn SearchStrategy),
) -> Result<Report, gridpath_search::SearchError> {
    let mut search = config.launch(graph)?;
    let budget = config.effective_budget(graph);
    for _ in 0..budget {
        if !search.step() {
            break;
        }
        on_step(&search);
    }

    let path = match config.goal {
        Some(goal) => search.path(goal)?,
        None => Vec::new(),
    };
    let reached = config.goal.is_some_and(|g| search.is_visited(g));
    let optimal = match config.goal {
        Some(goal) => bfs_distance(graph, config.start, goal)?,
        None => None,
    };
    log::info!(
        "{}: {} closures, goal {}",
        config.strategy,
        search.steps(),
        if reached { "reached" } else { "not reached" }
    );

    Ok(Report {
        strategy: config.strategy,
        map: render_map(graph, &search, if reached { &path } else { &[] }),
        path,
        reached,
        closed: search.closed().len(),
        steps: search.steps(),
        converged: search.is_converged(),
        optimal,
        status: search.status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sample_scenario_runs_all_strategies() {
        let scenario = Scenario::sample();
        let graph = Graph::build(&scenario.grid).unwrap();
        let mut lengths = Vec::new();
        for kind in StrategyKind::ALL {
            let config = SearchConfig {
                strategy: kind,
                ..scenario.config
            };
            let report = run_strategy(&graph, &config, |_| {}).unwrap();
            assert!(report.reached, "{kind}");
            assert_eq!(report.optimal, Some(33));
            lengths.push(report.length().unwrap());
        }
        assert_eq!(lengths, vec![33, 37, 33]);
    }

    #[test]
    fn summary_flags_detours_of_non_optimal_strategies() {
        let scenario = Scenario::sample();
        let graph = Graph::build(&scenario.grid).unwrap();
        let run = |kind| {
            let config = SearchConfig {
                strategy: kind,
                ..scenario.config
            };
            run_strategy(&graph, &config, |_| {}).unwrap()
        };

        let greedy = run(StrategyKind::Greedy);
        assert_eq!(greedy.excess(), Some(4));
        assert!(greedy.summary().contains("optimum 33 (+4)"), "{}", greedy.summary());

        let astar = run(StrategyKind::AStar);
        assert_eq!(astar.excess(), Some(0));
        assert!(astar.summary().starts_with("astar     length  33"));
        assert!(astar.summary().ends_with("optimum 33"));
    }

    #[test]
    fn summary_notes_an_exhausted_budget() {
        let graph = Graph::from_rows(&[[0; 5]]).unwrap();
        let config = SearchConfig::new(StrategyKind::Dijkstra, Point::ZERO, Some(Point::new(4, 0)))
            .with_budget(1);
        let report = run_strategy(&graph, &config, |_| {}).unwrap();
        assert!(!report.converged);
        assert_eq!(report.excess(), None);
        assert!(report.summary().ends_with("optimum 4  (budget exhausted)"));
    }

    #[test]
    fn on_step_sees_every_closure() {
        let graph = Graph::from_rows(&[[0, 0, 0, 0]]).unwrap();
        let config = SearchConfig::new(StrategyKind::Dijkstra, Point::ZERO, Some(Point::new(3, 0)));
        let mut seen = Vec::new();
        let report = run_strategy(&graph, &config, |s| seen.push(s.closed().len())).unwrap();
        // The last step closes the goal and reports no further progress.
        assert_eq!(seen, vec![2, 3]);
        assert_eq!(report.steps, 3);
        assert!(report.converged);
    }

    #[test]
    fn map_marks_path_and_visits() {
        let graph = Graph::from_rows(&[[0, 0, 0], [0, 1, 0]]).unwrap();
        let config = SearchConfig::new(StrategyKind::Dijkstra, Point::ZERO, Some(Point::new(2, 1)));
        let report = run_strategy(&graph, &config, |_| {}).unwrap();
        assert_eq!(report.map, "S**\no#X\n");
        assert_eq!(report.length(), Some(3));
    }

    #[test]
    fn unreachable_goal_is_reported() {
        let graph = Graph::from_rows(&[[0, 1, 0]]).unwrap();
        let config = SearchConfig::new(StrategyKind::AStar, Point::ZERO, Some(Point::new(2, 0)));
        let report = run_strategy(&graph, &config, |_| {}).unwrap();
        assert!(!report.reached);
        assert_eq!(report.length(), None);
        assert_eq!(report.optimal, None);
        assert_eq!(report.path, vec![Point::new(2, 0)]);
        assert!(report.summary().contains("no path"));
    }

    #[test]
    fn scenario_from_json() {
        let s = Scenario::from_json(
            r#"{"grid": [[0, 0], [1, 0]],
                "config": {"strategy": "greedy", "goal": {"x": 1, "y": 1}}}"#,
        )
        .unwrap();
        assert_eq!(s.grid.width(), 2);
        assert_eq!(s.config.strategy, StrategyKind::Greedy);
        assert!(Scenario::from_json(r#"{"grid": [[0, 0], [1]]}"#).is_err());
    }

    #[test]
    fn random_grid_keeps_endpoints_open() {
        let mut rng = StdRng::seed_from_u64(3);
        let keep = [Point::new(0, 0), Point::new(7, 5)];
        let grid = random_grid(&mut rng, 8, 6, 1.0, &keep).unwrap();
        assert_eq!(grid.count_free(), 2);
        assert!(keep.iter().all(|&p| grid.is_free(p)));
    }
}
