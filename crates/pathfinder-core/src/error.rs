//! Error types for PathFinder Core

use crate::node::NodeId;
use thiserror::Error;

/// Failures of a graph query
///
/// Both variants are expected outcomes reported to the caller, never panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Node with id {0} not found")]
    NodeNotFound(NodeId),

    #[error("No path found between nodes {src} and {dst}")]
    NoPathFound { src: NodeId, dst: NodeId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_messages() {
        assert_eq!(
            QueryError::NodeNotFound(NodeId(9)).to_string(),
            "Node with id 9 not found"
        );
        assert_eq!(
            QueryError::NoPathFound {
                src: NodeId(1),
                dst: NodeId(3)
            }
            .to_string(),
            "No path found between nodes 1 and 3"
        );
    }
}
