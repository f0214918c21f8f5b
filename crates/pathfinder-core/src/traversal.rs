//! Graph traversal types and algorithms

use crate::adjacency::AdjacencyView;
use crate::error::QueryError;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

/// Reported `max_depth` when the traversal was unbounded
pub const UNBOUNDED_DEPTH: i64 = -1;

/// Result of a bounded breadth-first traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Visited nodes in dequeue order
    pub visited_nodes: Vec<NodeId>,

    /// Starting node
    pub start_node: NodeId,

    /// Depth limit used, `-1` when unbounded
    pub max_depth: i64,
}

impl TraversalResult {
    /// Depth limit as an option, `None` when unbounded
    pub fn depth_limit(&self) -> Option<u32> {
        u32::try_from(self.max_depth).ok()
    }
}

/// Result of a shortest path search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Nodes from source to destination, both included
    pub path: Vec<NodeId>,

    /// Sum of the weights along `path`
    pub distance: f64,

    pub start_node: NodeId,
    pub end_node: NodeId,
}

impl PathResult {
    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Frontier entry for Dijkstra, ordered as a min-heap on (distance, node)
#[derive(Debug, Clone, Copy, PartialEq)]
struct FrontierEntry {
    distance: f64,
    node: NodeId,
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded breadth-first traversal from `start`
///
/// Depth is checked when a node is dequeued, so a node first enqueued over
/// the limit is dropped and its children are never enqueued. A node reached
/// along two routes keeps whichever entry was dequeued first. The caller is
/// responsible for checking that `start` exists.
pub fn bfs(view: &AdjacencyView, start: NodeId, max_depth: Option<u32>) -> TraversalResult {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut visited_nodes = Vec::new();
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();
    let mut edges_traversed = 0usize;

    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if visited.contains(&current) {
            continue;
        }

        if max_depth.is_some_and(|limit| depth > limit) {
            continue;
        }

        visited.insert(current);
        visited_nodes.push(current);

        for &(neighbor, _) in view.neighbors(current) {
            edges_traversed += 1;
            if !visited.contains(&neighbor) {
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    tracing::debug!(
        "BFS from {} visited {} nodes, traversed {} edges",
        start,
        visited_nodes.len(),
        edges_traversed
    );

    TraversalResult {
        visited_nodes,
        start_node: start,
        max_depth: max_depth.map_or(UNBOUNDED_DEPTH, i64::from),
    }
}

/// Dijkstra's algorithm for the minimum-weight path from `src` to `dst`
///
/// Outdated frontier entries are never removed; they are skipped when popped
/// because their node is already finalized. The search stops as soon as
/// `dst` is finalized. The caller is responsible for checking that both
/// endpoints exist.
pub fn dijkstra(view: &AdjacencyView, src: NodeId, dst: NodeId) -> Result<PathResult, QueryError> {
    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    let mut finalized: HashSet<NodeId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    dist.insert(src, 0.0);
    heap.push(FrontierEntry {
        distance: 0.0,
        node: src,
    });

    while let Some(FrontierEntry { distance, node }) = heap.pop() {
        if !finalized.insert(node) {
            continue;
        }

        if node == dst {
            let path = reconstruct_path(dst, &parent);
            tracing::debug!(
                "Dijkstra found path {} -> {} with cost {} after finalizing {} nodes",
                src,
                dst,
                distance,
                finalized.len()
            );
            return Ok(PathResult {
                path,
                distance,
                start_node: src,
                end_node: dst,
            });
        }

        for &(next, weight) in view.neighbors(node) {
            if finalized.contains(&next) {
                continue;
            }

            let new_cost = distance + weight;
            let improved = dist.get(&next).map_or(true, |&known| new_cost < known);
            if improved {
                dist.insert(next, new_cost);
                parent.insert(next, node);
                heap.push(FrontierEntry {
                    distance: new_cost,
                    node: next,
                });
            }
        }
    }

    tracing::debug!(
        "Dijkstra exhausted frontier without reaching {} from {}",
        dst,
        src
    );
    Err(QueryError::NoPathFound { src, dst })
}

/// Follow predecessor links back from `end`, then reverse
fn reconstruct_path(end: NodeId, parent: &HashMap<NodeId, NodeId>) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&prev) = parent.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
