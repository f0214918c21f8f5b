//! ReDB storage backend

use crate::error::{StorageError, StorageResult};
use crate::traits::{check_new_edge, check_new_node, StorageBackend};
use async_trait::async_trait;
use pathfinder_core::{Edge, EdgeId, NewEdge, NewNode, Node, NodeId};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Mutex;

// Table definitions
const NODES: TableDefinition<i64, &[u8]> = TableDefinition::new("nodes");
const EDGES: TableDefinition<i64, &[u8]> = TableDefinition::new("edges");
const COUNTERS: TableDefinition<&str, i64> = TableDefinition::new("counters");

const LAST_NODE_ID: &str = "last_node_id";
const LAST_EDGE_ID: &str = "last_edge_id";

/// ReDB storage backend
///
/// Nodes and edges are stored as JSON keyed by their integer id; the last
/// assigned ids live in a counters table so ids are never reused.
pub struct RedbStorage {
    db: Mutex<Database>,
}

impl RedbStorage {
    /// Open or create a ReDB database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

        // Initialize tables
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| StorageError::Database(e.to_string()))?;
            {
                write_txn.open_table(NODES)?;
                write_txn.open_table(EDGES)?;
                write_txn.open_table(COUNTERS)?;
            }
            write_txn
                .commit()
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        Ok(Self { db: Mutex::new(db) })
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))
    }
}

#[async_trait]
impl StorageBackend for RedbStorage {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        let db = self.lock()?;
        let read_txn = db.begin_read()?;
        read_txn.open_table(NODES)?;
        Ok(true)
    }

    async fn create_node(&self, node: NewNode) -> StorageResult<Node> {
        let name = check_new_node(&node)?;

        let db = self.lock()?;
        let write_txn = db.begin_write()?;
        let node = {
            let mut nodes = write_txn.open_table(NODES)?;
            for entry in nodes.iter()? {
                let (_, value) = entry?;
                let existing: Node = serde_json::from_slice(value.value())?;
                if existing.name == name {
                    return Err(StorageError::DuplicateNode(name));
                }
            }

            let mut counters = write_txn.open_table(COUNTERS)?;
            let id = counters.get(LAST_NODE_ID)?.map(|v| v.value()).unwrap_or(0) + 1;
            counters.insert(LAST_NODE_ID, id)?;
            let node = Node::new(NodeId(id), name);
            let value = serde_json::to_vec(&node)?;
            nodes.insert(id, value.as_slice())?;
            node
        };
        write_txn.commit()?;

        Ok(node)
    }

    async fn get_node(&self, id: NodeId) -> StorageResult<Option<Node>> {
        let db = self.lock()?;
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(NODES)?;

        if let Some(value) = table.get(id.0)? {
            let node: Node = serde_json::from_slice(value.value())?;
            Ok(Some(node))
        } else {
            Ok(None)
        }
    }

    async fn get_node_by_name(&self, name: &str) -> StorageResult<Option<Node>> {
        Ok(self
            .get_all_nodes()
            .await?
            .into_iter()
            .find(|n| n.name == name))
    }

    async fn get_all_nodes(&self) -> StorageResult<Vec<Node>> {
        let db = self.lock()?;
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(NODES)?;

        let mut nodes = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let node: Node = serde_json::from_slice(value.value())?;
            nodes.push(node);
        }

        Ok(nodes)
    }

    async fn delete_node(&self, id: NodeId) -> StorageResult<()> {
        let db = self.lock()?;
        let write_txn = db.begin_write()?;
        {
            let mut nodes = write_txn.open_table(NODES)?;
            if nodes.remove(id.0)?.is_none() {
                return Err(StorageError::NodeNotFound(id));
            }

            let mut edges = write_txn.open_table(EDGES)?;
            let mut incident = Vec::new();
            for entry in edges.iter()? {
                let (key, value) = entry?;
                let edge: Edge = serde_json::from_slice(value.value())?;
                if edge.src_id == id || edge.dst_id == id {
                    incident.push(key.value());
                }
            }
            for key in &incident {
                edges.remove(*key)?;
            }
            tracing::debug!("Removed node {} and {} incident edges", id, incident.len());
        }
        write_txn.commit()?;

        Ok(())
    }

    async fn create_edge(&self, edge: NewEdge) -> StorageResult<Edge> {
        let db = self.lock()?;
        let write_txn = db.begin_write()?;
        let edge = {
            let nodes = write_txn.open_table(NODES)?;
            let src_exists = nodes.get(edge.src_id.0)?.is_some();
            let dst_exists = nodes.get(edge.dst_id.0)?.is_some();
            check_new_edge(&edge, |id| {
                (id == edge.src_id && src_exists) || (id == edge.dst_id && dst_exists)
            })?;

            let mut counters = write_txn.open_table(COUNTERS)?;
            let id = counters.get(LAST_EDGE_ID)?.map(|v| v.value()).unwrap_or(0) + 1;
            counters.insert(LAST_EDGE_ID, id)?;
            let edge = Edge::new(EdgeId(id), edge.src_id, edge.dst_id, edge.weight);

            let mut edges = write_txn.open_table(EDGES)?;
            let value = serde_json::to_vec(&edge)?;
            edges.insert(id, value.as_slice())?;
            edge
        };
        write_txn.commit()?;

        Ok(edge)
    }

    async fn get_edge(&self, id: EdgeId) -> StorageResult<Option<Edge>> {
        let db = self.lock()?;
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(EDGES)?;

        if let Some(value) = table.get(id.0)? {
            let edge: Edge = serde_json::from_slice(value.value())?;
            Ok(Some(edge))
        } else {
            Ok(None)
        }
    }

    async fn get_all_edges(&self) -> StorageResult<Vec<Edge>> {
        let db = self.lock()?;
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(EDGES)?;

        let mut edges = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let edge: Edge = serde_json::from_slice(value.value())?;
            edges.push(edge);
        }

        Ok(edges)
    }

    async fn delete_edge(&self, id: EdgeId) -> StorageResult<()> {
        let db = self.lock()?;
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(EDGES)?;
            if table.remove(id.0)?.is_none() {
                return Err(StorageError::EdgeNotFound(id));
            }
        }
        write_txn.commit()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, RedbStorage) {
        let dir = TempDir::new().unwrap();
        let storage = RedbStorage::open(dir.path().join("graph.redb")).unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn test_redb_node_and_edge_roundtrip() {
        let (_dir, storage) = open_temp();
        assert!(storage.health_check().await.unwrap());

        let a = storage.create_node(NewNode::new("A")).await.unwrap();
        let b = storage.create_node(NewNode::new("B")).await.unwrap();
        let edge = storage.create_edge(NewEdge::new(a.id, b.id, 1.5)).await.unwrap();

        assert_eq!(storage.get_node(b.id).await.unwrap(), Some(b.clone()));
        assert_eq!(storage.get_node_by_name("A").await.unwrap(), Some(a.clone()));
        assert_eq!(storage.get_edge(edge.id).await.unwrap(), Some(edge));

        let graph = storage.load_graph().await.unwrap();
        assert_eq!(graph.nodes, vec![a, b]);
        assert_eq!(graph.edges.len(), 1);
    }

    #[tokio::test]
    async fn test_redb_delete_node_cascades() {
        let (_dir, storage) = open_temp();
        let a = storage.create_node(NewNode::new("A")).await.unwrap();
        let b = storage.create_node(NewNode::new("B")).await.unwrap();
        let c = storage.create_node(NewNode::new("C")).await.unwrap();
        storage.create_edge(NewEdge::new(a.id, b.id, 1.0)).await.unwrap();
        storage.create_edge(NewEdge::new(c.id, a.id, 1.0)).await.unwrap();
        let kept = storage.create_edge(NewEdge::new(b.id, c.id, 1.0)).await.unwrap();

        storage.delete_node(a.id).await.unwrap();

        assert_eq!(storage.get_all_edges().await.unwrap(), vec![kept]);
        let err = storage.delete_node(a.id).await.unwrap_err();
        assert!(matches!(err, StorageError::NodeNotFound(_)));
    }

    #[tokio::test]
    async fn test_redb_rejects_duplicates_and_missing_endpoints() {
        let (_dir, storage) = open_temp();
        let a = storage.create_node(NewNode::new("A")).await.unwrap();

        let err = storage.create_node(NewNode::new("A")).await.unwrap_err();
        assert!(matches!(err, StorageError::DuplicateNode(_)));

        let err = storage
            .create_edge(NewEdge::new(NodeId(99), a.id, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::SourceNotFound(NodeId(99))));
    }

    #[tokio::test]
    async fn test_redb_create_edge_checks_each_endpoint() {
        let (_dir, storage) = open_temp();
        let a = storage.create_node(NewNode::new("A")).await.unwrap();
        let b = storage.create_node(NewNode::new("B")).await.unwrap();

        let err = storage
            .create_edge(NewEdge::new(a.id, NodeId(42), 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DestinationNotFound(NodeId(42))));
        assert!(storage.get_all_edges().await.unwrap().is_empty());

        let edge = storage.create_edge(NewEdge::new(a.id, b.id, 2.0)).await.unwrap();
        assert_eq!(edge.id, EdgeId(1));
        assert_eq!((edge.src_id, edge.dst_id), (a.id, b.id));
    }

    #[tokio::test]
    async fn test_redb_ids_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph.redb");

        let first = {
            let storage = RedbStorage::open(&path).unwrap();
            let a = storage.create_node(NewNode::new("A")).await.unwrap();
            storage.delete_node(a.id).await.unwrap();
            a
        };

        let storage = RedbStorage::open(&path).unwrap();
        let second = storage.create_node(NewNode::new("B")).await.unwrap();
        assert!(second.id > first.id);
    }
}
