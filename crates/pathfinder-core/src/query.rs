//! Query facade: endpoint validation in front of the traversal engine

use crate::adjacency::AdjacencyView;
use crate::edge::Edge;
use crate::error::QueryError;
use crate::graph::{Graph, NodeLookup};
use crate::limits::{validate_traversal_depth, ValidationError};
use crate::node::NodeId;
use crate::traversal::{self, PathResult, TraversalResult};
use serde::{Deserialize, Serialize};

/// Breadth-first traversal request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfsQuery {
    /// Starting node
    pub start_id: NodeId,

    /// Maximum depth, unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

impl BfsQuery {
    pub fn new(start_id: NodeId) -> Self {
        Self {
            start_id,
            max_depth: None,
        }
    }

    /// Set maximum traversal depth
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.max_depth {
            Some(depth) => validate_traversal_depth(depth),
            None => Ok(()),
        }
    }
}

/// Shortest path request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathQuery {
    pub src_id: NodeId,
    pub dst_id: NodeId,
}

impl PathQuery {
    pub fn new(src_id: NodeId, dst_id: NodeId) -> Self {
        Self { src_id, dst_id }
    }
}

/// Entry point for graph queries
///
/// Every call checks endpoints against `nodes`, builds a fresh adjacency view
/// from `edges`, and runs the algorithm. Nothing is cached between calls.
pub struct QueryEngine;

impl QueryEngine {
    /// Bounded BFS from `start`
    pub fn traverse<N>(
        nodes: &N,
        edges: &[Edge],
        start: NodeId,
        max_depth: Option<u32>,
    ) -> Result<TraversalResult, QueryError>
    where
        N: NodeLookup + ?Sized,
    {
        tracing::debug!("Executing traversal: start={}, max_depth={:?}", start, max_depth);

        Self::ensure_exists(nodes, start)?;

        let view = AdjacencyView::from_edges(edges);
        Ok(traversal::bfs(&view, start, max_depth))
    }

    /// Minimum-weight path from `src` to `dst`
    ///
    /// A missing source is reported before a missing destination.
    pub fn shortest_path<N>(
        nodes: &N,
        edges: &[Edge],
        src: NodeId,
        dst: NodeId,
    ) -> Result<PathResult, QueryError>
    where
        N: NodeLookup + ?Sized,
    {
        tracing::debug!("Executing shortest path: src={}, dst={}", src, dst);

        Self::ensure_exists(nodes, src)?;
        Self::ensure_exists(nodes, dst)?;

        let view = AdjacencyView::from_edges(edges);
        traversal::dijkstra(&view, src, dst)
    }

    /// Run a [`BfsQuery`] against a snapshot
    pub fn execute_bfs(graph: &Graph, query: &BfsQuery) -> Result<TraversalResult, QueryError> {
        Self::traverse(graph, &graph.edges, query.start_id, query.max_depth)
    }

    /// Run a [`PathQuery`] against a snapshot
    pub fn execute_path(graph: &Graph, query: &PathQuery) -> Result<PathResult, QueryError> {
        Self::shortest_path(graph, &graph.edges, query.src_id, query.dst_id)
    }

    fn ensure_exists<N>(nodes: &N, id: NodeId) -> Result<(), QueryError>
    where
        N: NodeLookup + ?Sized,
    {
        if nodes.contains_node(id) {
            Ok(())
        } else {
            tracing::debug!("Rejecting query: node {} does not exist", id);
            Err(QueryError::NodeNotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeId;
    use crate::node::Node;
    use std::collections::HashSet;

    fn create_test_graph() -> Graph {
        // A(1) --5.0--> B(2), C(3) isolated
        Graph::new()
            .with_nodes(vec![
                Node::new(NodeId(1), "A"),
                Node::new(NodeId(2), "B"),
                Node::new(NodeId(3), "C"),
            ])
            .with_edges(vec![Edge::new(EdgeId(1), NodeId(1), NodeId(2), 5.0)])
    }

    #[test]
    fn test_traverse_unknown_start() {
        let graph = create_test_graph();
        let err = QueryEngine::execute_bfs(&graph, &BfsQuery::new(NodeId(99))).unwrap_err();
        assert_eq!(err, QueryError::NodeNotFound(NodeId(99)));
    }

    #[test]
    fn test_traverse_known_start() {
        let graph = create_test_graph();
        let result = QueryEngine::execute_bfs(&graph, &BfsQuery::new(NodeId(1))).unwrap();
        assert_eq!(result.visited_nodes, vec![NodeId(1), NodeId(2)]);
        assert_eq!(result.max_depth, -1);
    }

    #[test]
    fn test_traverse_isolated_node_without_edges() {
        let graph = create_test_graph();
        let query = BfsQuery::new(NodeId(3)).with_depth(4);
        let result = QueryEngine::execute_bfs(&graph, &query).unwrap();
        assert_eq!(result.visited_nodes, vec![NodeId(3)]);
        assert_eq!(result.max_depth, 4);
    }

    #[test]
    fn test_shortest_path_unknown_source_reported_first() {
        let graph = create_test_graph();
        let query = PathQuery::new(NodeId(50), NodeId(60));
        let err = QueryEngine::execute_path(&graph, &query).unwrap_err();
        assert_eq!(err, QueryError::NodeNotFound(NodeId(50)));
    }

    #[test]
    fn test_shortest_path_unknown_destination() {
        let graph = create_test_graph();
        let query = PathQuery::new(NodeId(1), NodeId(60));
        let err = QueryEngine::execute_path(&graph, &query).unwrap_err();
        assert_eq!(err, QueryError::NodeNotFound(NodeId(60)));
    }

    #[test]
    fn test_shortest_path_disconnected() {
        let graph = create_test_graph();
        let query = PathQuery::new(NodeId(1), NodeId(3));
        let err = QueryEngine::execute_path(&graph, &query).unwrap_err();
        assert_eq!(
            err,
            QueryError::NoPathFound {
                src: NodeId(1),
                dst: NodeId(3)
            }
        );
    }

    #[test]
    fn test_shortest_path_with_id_set() {
        let nodes: HashSet<NodeId> = [1, 2].into_iter().map(NodeId).collect();
        let edges = vec![Edge::new(EdgeId(1), NodeId(1), NodeId(2), 2.5)];
        let result = QueryEngine::shortest_path(&nodes, &edges, NodeId(1), NodeId(2)).unwrap();
        assert_eq!(result.path, vec![NodeId(1), NodeId(2)]);
        assert_eq!(result.distance, 2.5);
    }

    #[test]
    fn test_bfs_query_deserializes_optional_depth() {
        let q: BfsQuery = serde_json::from_str(r#"{"start_id": 4}"#).unwrap();
        assert_eq!(q, BfsQuery::new(NodeId(4)));

        let q: BfsQuery = serde_json::from_str(r#"{"start_id": 4, "max_depth": 2}"#).unwrap();
        assert_eq!(q.max_depth, Some(2));
        assert!(q.validate().is_ok());
        assert!(BfsQuery::new(NodeId(1)).with_depth(u32::MAX).validate().is_err());
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let graph = create_test_graph();
        let q = PathQuery::new(NodeId(1), NodeId(2));
        assert_eq!(
            QueryEngine::execute_path(&graph, &q),
            QueryEngine::execute_path(&graph, &q)
        );
    }
}
