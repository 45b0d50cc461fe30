//! Stepwise shortest-path search over occupancy grids.
//!
//! A [`Graph`] is built from an [`OccupancyGrid`](gridpath_core::OccupancyGrid)
//! and then searched by one of three interchangeable strategies:
//!
//! - **Dijkstra** uniform-cost search ([`Dijkstra`])
//! - **Greedy** best-first search on the heuristic alone ([`Greedy`])
//! - **A\*** heuristic-guided optimal search ([`AStar`])
//!
//! Searches never block: [`SearchStrategy::step`] closes one node and returns,
//! so a caller can inspect costs, the visited set, or the best path known so
//! far between any two steps. [`SearchStrategy::run`] is the bounded
//! run-to-completion shortcut.
//!
//! ```
//! use gridpath_core::Point;
//! use gridpath_search::{AStar, Graph, SearchStrategy};
//!
//! let graph = Graph::from_rows(&[[0, 0, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
//! let goal = Point::new(0, 2);
//! let mut search = AStar::new(&graph, goal).unwrap();
//! search.seed(Point::new(0, 0)).unwrap();
//! while search.step() {}
//! assert_eq!(search.path(goal).unwrap().len(), 7);
//! ```
//!
//! # Strategy map
//!
//! | Type | Ranking | Goal | Optimal |
//! |---|---|---|---|
//! | [`Dijkstra`] | cost | optional | yes |
//! | [`Greedy`] | estimate | required | no |
//! | [`AStar`] | cost + estimate, then estimate | required | yes |
//!
//! Remaining ties always go to the node earlier in row-major order.

mod astar;
mod bfs;
mod config;
mod dijkstra;
mod distance;
mod engine;
mod error;
mod graph;
mod greedy;
mod status;
mod strategy;
mod traits;

pub use astar::{AStar, BestFirstOptimal};
pub use bfs::{bfs_distance, bfs_distances};
pub use config::{Outcome, SearchConfig};
pub use dijkstra::{Dijkstra, UniformCost};
pub use distance::manhattan;
pub use engine::{Searcher, UNREACHABLE};
pub use error::SearchError;
pub use graph::{Edge, Graph, GraphNode, UNIT_WEIGHT};
pub use greedy::{Greedy, GreedyBestFirst};
pub use status::StatusSnapshot;
pub use strategy::{Search, StrategyKind};
pub use traits::{RankKey, Ranking, SearchStrategy};
