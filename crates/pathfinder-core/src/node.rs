//! Node (vertex) types

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
///
/// Identifiers are assigned by the storage backend and are totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl NodeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Node name (unique across the graph)
    pub name: String,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Data for creating a new node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNode {
    pub name: String,
}

impl NewNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(NodeId(7), "Madrid");
        assert_eq!(node.id, NodeId(7));
        assert_eq!(node.name, "Madrid");
    }

    #[test]
    fn test_node_id_parse_and_display() {
        let id: NodeId = " 42 ".parse().unwrap();
        assert_eq!(id, NodeId(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_node_id_serializes_as_integer() {
        let node = Node::new(NodeId(3), "Lisbon");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "Lisbon"}));
    }
}
