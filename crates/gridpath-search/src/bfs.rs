use std::collections::VecDeque;

use gridpath_core::{GridError, Point};

use crate::engine::UNREACHABLE;
use crate::graph::Graph;

/// Breadth-first distance map from `source` over `graph`.
///
/// Every edge counts as one step regardless of its weight, so on the unit
/// grid this is the true shortest-path length to every cell. The result is
/// indexed like the graph's nodes; unreachable cells hold [`UNREACHABLE`].
pub fn bfs_distances(graph: &Graph, source: Point) -> Result<Vec<i32>, GridError> {
    let si = graph.checked_index(source)?;
    let mut dist = vec![UNREACHABLE; graph.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    dist[si] = 0;
    queue.push_back(si);

    while let Some(ci) = queue.pop_front() {
        let nd = dist[ci] + 1;
        for edge in graph.edges_at(ci) {
            let Some(ni) = graph.index(edge.to) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = nd;
            queue.push_back(ni);
        }
    }
    Ok(dist)
}

/// Shortest step count from `from` to `to`, or `None` if `to` is unreachable.
pub fn bfs_distance(graph: &Graph, from: Point, to: Point) -> Result<Option<i32>, GridError> {
    let ti = graph.checked_index(to)?;
    let d = bfs_distances(graph, from)?[ti];
    Ok((d != UNREACHABLE).then_some(d))
}
