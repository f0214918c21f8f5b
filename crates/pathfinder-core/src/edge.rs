//! Edge types

use crate::limits::{validate_weight, ValidationError};
use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub i64);

impl EdgeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EdgeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for EdgeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weighted directed edge between two nodes
///
/// Several edges may connect the same ordered pair; each one is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,

    /// Source node
    pub src_id: NodeId,

    /// Destination node
    pub dst_id: NodeId,

    /// Traversal cost, always > 0
    pub weight: f64,
}

impl Edge {
    pub fn new(id: EdgeId, src_id: NodeId, dst_id: NodeId, weight: f64) -> Self {
        Self {
            id,
            src_id,
            dst_id,
            weight,
        }
    }
}

/// Data for creating a new edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEdge {
    pub src_id: NodeId,
    pub dst_id: NodeId,
    pub weight: f64,
}

impl NewEdge {
    pub fn new(src_id: NodeId, dst_id: NodeId, weight: f64) -> Self {
        Self {
            src_id,
            dst_id,
            weight,
        }
    }

    /// Check the weight before the edge reaches storage
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_weight(self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_creation() {
        let edge = Edge::new(EdgeId(1), NodeId(2), NodeId(3), 4.5);
        assert_eq!(edge.id, EdgeId(1));
        assert_eq!(edge.src_id, NodeId(2));
        assert_eq!(edge.dst_id, NodeId(3));
        assert_eq!(edge.weight, 4.5);
    }

    #[test]
    fn test_new_edge_validation() {
        assert!(NewEdge::new(NodeId(1), NodeId(2), 0.5).validate().is_ok());
        assert!(NewEdge::new(NodeId(1), NodeId(2), 0.0).validate().is_err());
        assert!(NewEdge::new(NodeId(1), NodeId(2), -3.0).validate().is_err());
        assert!(NewEdge::new(NodeId(1), NodeId(2), f64::NAN).validate().is_err());
    }
}
