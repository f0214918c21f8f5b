//! In-memory storage backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::{check_new_edge, check_new_node, StorageBackend};
use async_trait::async_trait;
use pathfinder_core::{Edge, EdgeId, NewEdge, NewNode, Node, NodeId};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct MemoryState {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    last_node_id: i64,
    last_edge_id: i64,
}

/// In-memory storage backend
///
/// Useful for testing and temporary storage. Ids are never reused after a
/// delete, matching the on-disk backends.
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    // Node operations

    async fn create_node(&self, node: NewNode) -> StorageResult<Node> {
        let name = check_new_node(&node)?;
        let mut state = self.write()?;

        if state.nodes.values().any(|n| n.name == name) {
            return Err(StorageError::DuplicateNode(name));
        }

        state.last_node_id += 1;
        let node = Node::new(NodeId(state.last_node_id), name);
        state.nodes.insert(node.id, node.clone());
        Ok(node)
    }

    async fn get_node(&self, id: NodeId) -> StorageResult<Option<Node>> {
        Ok(self.read()?.nodes.get(&id).cloned())
    }

    async fn get_node_by_name(&self, name: &str) -> StorageResult<Option<Node>> {
        Ok(self
            .read()?
            .nodes
            .values()
            .find(|n| n.name == name)
            .cloned())
    }

    async fn get_all_nodes(&self) -> StorageResult<Vec<Node>> {
        Ok(self.read()?.nodes.values().cloned().collect())
    }

    async fn delete_node(&self, id: NodeId) -> StorageResult<()> {
        let mut state = self.write()?;
        if state.nodes.remove(&id).is_none() {
            return Err(StorageError::NodeNotFound(id));
        }
        state.edges.retain(|_, e| e.src_id != id && e.dst_id != id);
        Ok(())
    }

    // Edge operations

    async fn create_edge(&self, edge: NewEdge) -> StorageResult<Edge> {
        let mut state = self.write()?;
        check_new_edge(&edge, |id| state.nodes.contains_key(&id))?;

        state.last_edge_id += 1;
        let edge = Edge::new(
            EdgeId(state.last_edge_id),
            edge.src_id,
            edge.dst_id,
            edge.weight,
        );
        state.edges.insert(edge.id, edge.clone());
        Ok(edge)
    }

    async fn get_edge(&self, id: EdgeId) -> StorageResult<Option<Edge>> {
        Ok(self.read()?.edges.get(&id).cloned())
    }

    async fn get_all_edges(&self) -> StorageResult<Vec<Edge>> {
        Ok(self.read()?.edges.values().cloned().collect())
    }

    async fn delete_edge(&self, id: EdgeId) -> StorageResult<()> {
        let mut state = self.write()?;
        if state.edges.remove(&id).is_none() {
            return Err(StorageError::EdgeNotFound(id));
        }
        Ok(())
    }
}
