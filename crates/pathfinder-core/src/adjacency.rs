//! Adjacency view built from a flat edge snapshot

use crate::edge::Edge;
use crate::node::NodeId;
use std::collections::HashMap;

/// Per-query mapping from a node to its outgoing `(neighbor, weight)` pairs
///
/// Pairs keep the order in which their edges appeared in the snapshot.
/// Nodes without outgoing edges have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyView {
    out: HashMap<NodeId, Vec<(NodeId, f64)>>,
}

impl AdjacencyView {
    /// Build the view from edges in snapshot order
    ///
    /// Parallel edges are kept as separate pairs; no edge is dropped or merged.
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut out: HashMap<NodeId, Vec<(NodeId, f64)>> = HashMap::new();
        for edge in edges {
            out.entry(edge.src_id)
                .or_default()
                .push((edge.dst_id, edge.weight));
        }
        Self { out }
    }

    /// Outgoing pairs of `node`, or an empty slice when it has none
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, f64)] {
        self.out.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<'a> FromIterator<&'a Edge> for AdjacencyView {
    fn from_iter<T: IntoIterator<Item = &'a Edge>>(iter: T) -> Self {
        Self::from_edges(iter)
    }
}
