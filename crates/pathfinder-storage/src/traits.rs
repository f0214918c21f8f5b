//! Storage backend trait definitions

use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use pathfinder_core::limits::validate_node_name;
use pathfinder_core::{Edge, EdgeId, Graph, NewEdge, NewNode, Node, NodeId};

/// Trait for storage backend implementations
///
/// Backends own id assignment: node and edge ids are increasing integers, so
/// listing edges by id yields them in insertion order.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Initialize the storage (create tables, etc.)
    async fn initialize(&self) -> StorageResult<()>;

    /// Close the storage connection
    async fn close(&self) -> StorageResult<()>;

    /// Health check
    async fn health_check(&self) -> StorageResult<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Node Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a node, assigning the next id
    ///
    /// Fails with [`StorageError::DuplicateNode`] when the name is taken.
    async fn create_node(&self, node: NewNode) -> StorageResult<Node>;

    /// Get a node by id
    async fn get_node(&self, id: NodeId) -> StorageResult<Option<Node>>;

    /// Get a node by its unique name
    async fn get_node_by_name(&self, name: &str) -> StorageResult<Option<Node>>;

    /// Get all nodes, ordered by id
    async fn get_all_nodes(&self) -> StorageResult<Vec<Node>>;

    /// Delete a node and every edge that starts or ends at it
    async fn delete_node(&self, id: NodeId) -> StorageResult<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Edge Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an edge between two existing nodes, assigning the next id
    async fn create_edge(&self, edge: NewEdge) -> StorageResult<Edge>;

    /// Get an edge by id
    async fn get_edge(&self, id: EdgeId) -> StorageResult<Option<Edge>>;

    /// Get all edges in insertion order
    async fn get_all_edges(&self) -> StorageResult<Vec<Edge>>;

    /// Delete an edge
    async fn delete_edge(&self, id: EdgeId) -> StorageResult<()>;

    /// First edge from `src` to `dst`, if any
    async fn find_edge(&self, src: NodeId, dst: NodeId) -> StorageResult<Option<Edge>> {
        let edges = self.get_all_edges().await?;
        Ok(edges
            .into_iter()
            .find(|e| e.src_id == src && e.dst_id == dst))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bulk Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Load a snapshot of the whole graph
    async fn load_graph(&self) -> StorageResult<Graph> {
        let nodes = self.get_all_nodes().await?;
        let edges = self.get_all_edges().await?;
        Ok(Graph { nodes, edges })
    }
}

/// Checks shared by every backend before a node is written
pub(crate) fn check_new_node(node: &NewNode) -> StorageResult<String> {
    let name = node.name.trim();
    validate_node_name(name)?;
    Ok(name.to_string())
}

/// Checks shared by every backend before an edge is written
///
/// `exists` answers whether a node id is present in the backend.
pub(crate) fn check_new_edge(
    edge: &NewEdge,
    exists: impl Fn(NodeId) -> bool,
) -> StorageResult<()> {
    edge.validate()?;
    if !exists(edge.src_id) {
        return Err(StorageError::SourceNotFound(edge.src_id));
    }
    if !exists(edge.dst_id) {
        return Err(StorageError::DestinationNotFound(edge.dst_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_new_node_trims() {
        assert_eq!(check_new_node(&NewNode::new("  Madrid ")).unwrap(), "Madrid");
        assert!(check_new_node(&NewNode::new("  ")).is_err());
    }

    #[test]
    fn test_check_new_edge() {
        let exists = |id: NodeId| id.0 <= 2;

        assert!(check_new_edge(&NewEdge::new(NodeId(1), NodeId(2), 1.0), exists).is_ok());
        assert!(matches!(
            check_new_edge(&NewEdge::new(NodeId(3), NodeId(2), 1.0), exists),
            Err(StorageError::SourceNotFound(NodeId(3)))
        ));
        assert!(matches!(
            check_new_edge(&NewEdge::new(NodeId(1), NodeId(9), 1.0), exists),
            Err(StorageError::DestinationNotFound(NodeId(9)))
        ));
        assert!(matches!(
            check_new_edge(&NewEdge::new(NodeId(1), NodeId(2), 0.0), exists),
            Err(StorageError::Validation(_))
        ));
    }
}
