//! Graph snapshot and node lookup

use crate::edge::Edge;
use crate::node::{Node, NodeId};
use std::collections::{BTreeSet, HashSet};

/// Immutable copy of the nodes and edges handed to one query
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// Authoritative answer to "does this node exist?"
///
/// Implemented for the snapshot types callers typically hold, so the query
/// facade can validate endpoints without knowing where the node set came from.
pub trait NodeLookup {
    fn contains_node(&self, id: NodeId) -> bool;
}

impl NodeLookup for Graph {
    fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

impl NodeLookup for [Node] {
    fn contains_node(&self, id: NodeId) -> bool {
        self.iter().any(|n| n.id == id)
    }
}

impl NodeLookup for Vec<Node> {
    fn contains_node(&self, id: NodeId) -> bool {
        self.as_slice().contains_node(id)
    }
}

impl NodeLookup for HashSet<NodeId> {
    fn contains_node(&self, id: NodeId) -> bool {
        self.contains(&id)
    }
}

impl NodeLookup for BTreeSet<NodeId> {
    fn contains_node(&self, id: NodeId) -> bool {
        self.contains(&id)
    }
}
