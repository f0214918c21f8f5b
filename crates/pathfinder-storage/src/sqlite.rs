//! SQLite storage backend

use crate::error::{StorageError, StorageResult};
use crate::traits::{check_new_edge, check_new_node, StorageBackend};
use async_trait::async_trait;
use pathfinder_core::{Edge, EdgeId, NewEdge, NewNode, Node, NodeId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open or create a SQLite database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path).map_err(|e| StorageError::Database(e.to_string()))?;

        let storage = Self { conn: Mutex::new(conn) };
        storage.init_tables()?;

        Ok(storage)
    }

    /// Create an in-memory SQLite database (for testing)
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Database(e.to_string()))?;

        let storage = Self { conn: Mutex::new(conn) };
        storage.init_tables()?;

        Ok(storage)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| StorageError::Database(e.to_string()))
    }

    fn init_tables(&self) -> StorageResult<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS nodes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS edges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                src_id INTEGER NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
                dst_id INTEGER NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
                weight REAL NOT NULL CHECK (weight > 0)
            );

            CREATE INDEX IF NOT EXISTS idx_edges_src ON edges(src_id);
            CREATE INDEX IF NOT EXISTS idx_edges_dst ON edges(dst_id);
            "#,
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    fn node_from_row(row: &Row<'_>) -> rusqlite::Result<Node> {
        Ok(Node::new(NodeId(row.get(0)?), row.get::<_, String>(1)?))
    }

    fn edge_from_row(row: &Row<'_>) -> rusqlite::Result<Edge> {
        Ok(Edge::new(
            EdgeId(row.get(0)?),
            NodeId(row.get(1)?),
            NodeId(row.get(2)?),
            row.get(3)?,
        ))
    }

    fn node_exists(conn: &Connection, id: NodeId) -> StorageResult<bool> {
        let found: Option<i64> = conn
            .query_row("SELECT id FROM nodes WHERE id = ?1", params![id.0], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl StorageBackend for SqliteStorage {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(true)
    }

    async fn create_node(&self, node: NewNode) -> StorageResult<Node> {
        let name = check_new_node(&node)?;
        let conn = self.lock()?;

        let existing: Option<i64> = conn
            .query_row("SELECT id FROM nodes WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .optional()?;
        if existing.is_some() {
            return Err(StorageError::DuplicateNode(name));
        }

        conn.execute("INSERT INTO nodes (name) VALUES (?1)", params![name])?;
        Ok(Node::new(NodeId(conn.last_insert_rowid()), name))
    }

    async fn get_node(&self, id: NodeId) -> StorageResult<Option<Node>> {
        let conn = self.lock()?;
        let node = conn
            .query_row(
                "SELECT id, name FROM nodes WHERE id = ?1",
                params![id.0],
                Self::node_from_row,
            )
            .optional()?;
        Ok(node)
    }

    async fn get_node_by_name(&self, name: &str) -> StorageResult<Option<Node>> {
        let conn = self.lock()?;
        let node = conn
            .query_row(
                "SELECT id, name FROM nodes WHERE name = ?1",
                params![name],
                Self::node_from_row,
            )
            .optional()?;
        Ok(node)
    }

    async fn get_all_nodes(&self) -> StorageResult<Vec<Node>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM nodes ORDER BY id")?;
        let rows = stmt.query_map([], Self::node_from_row)?;

        let mut nodes = Vec::new();
        for row in rows {
            nodes.push(row?);
        }
        Ok(nodes)
    }

    async fn delete_node(&self, id: NodeId) -> StorageResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let removed_edges = tx.execute(
            "DELETE FROM edges WHERE src_id = ?1 OR dst_id = ?1",
            params![id.0],
        )?;
        let removed = tx.execute("DELETE FROM nodes WHERE id = ?1", params![id.0])?;
        if removed == 0 {
            return Err(StorageError::NodeNotFound(id));
        }
        tx.commit()?;

        tracing::debug!("Removed node {} and {} incident edges", id, removed_edges);
        Ok(())
    }

    async fn create_edge(&self, edge: NewEdge) -> StorageResult<Edge> {
        let conn = self.lock()?;

        let src_exists = Self::node_exists(&conn, edge.src_id)?;
        let dst_exists = Self::node_exists(&conn, edge.dst_id)?;
        check_new_edge(&edge, |id| {
            (id == edge.src_id && src_exists) || (id == edge.dst_id && dst_exists)
        })?;

        conn.execute(
            "INSERT INTO edges (src_id, dst_id, weight) VALUES (?1, ?2, ?3)",
            params![edge.src_id.0, edge.dst_id.0, edge.weight],
        )?;
        Ok(Edge::new(
            EdgeId(conn.last_insert_rowid()),
            edge.src_id,
            edge.dst_id,
            edge.weight,
        ))
    }

    async fn get_edge(&self, id: EdgeId) -> StorageResult<Option<Edge>> {
        let conn = self.lock()?;
        let edge = conn
            .query_row(
                "SELECT id, src_id, dst_id, weight FROM edges WHERE id = ?1",
                params![id.0],
                Self::edge_from_row,
            )
            .optional()?;
        Ok(edge)
    }

    async fn get_all_edges(&self) -> StorageResult<Vec<Edge>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, src_id, dst_id, weight FROM edges ORDER BY id")?;
        let rows = stmt.query_map([], Self::edge_from_row)?;

        let mut edges = Vec::new();
        for row in rows {
            edges.push(row?);
        }
        Ok(edges)
    }

    async fn delete_edge(&self, id: EdgeId) -> StorageResult<()> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM edges WHERE id = ?1", params![id.0])?;
        if removed == 0 {
            return Err(StorageError::EdgeNotFound(id));
        }
        Ok(())
    }

    async fn find_edge(&self, src: NodeId, dst: NodeId) -> StorageResult<Option<Edge>> {
        let conn = self.lock()?;
        let edge = conn
            .query_row(
                "SELECT id, src_id, dst_id, weight FROM edges
                 WHERE src_id = ?1 AND dst_id = ?2 ORDER BY id LIMIT 1",
                params![src.0, dst.0],
                Self::edge_from_row,
            )
            .optional()?;
        Ok(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_node_and_edge_roundtrip() {
        let storage = SqliteStorage::in_memory().unwrap();
        assert!(storage.health_check().await.unwrap());

        let a = storage.create_node(NewNode::new("A")).await.unwrap();
        let b = storage.create_node(NewNode::new("B")).await.unwrap();
        let first = storage.create_edge(NewEdge::new(a.id, b.id, 10.0)).await.unwrap();
        let second = storage.create_edge(NewEdge::new(a.id, b.id, 1.0)).await.unwrap();

        assert_eq!(storage.get_node_by_name("B").await.unwrap(), Some(b.clone()));
        assert_eq!(storage.get_all_edges().await.unwrap(), vec![first.clone(), second]);
        assert_eq!(storage.find_edge(a.id, b.id).await.unwrap(), Some(first));
        assert!(storage.find_edge(b.id, a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_rejects_bad_input() {
        let storage = SqliteStorage::in_memory().unwrap();
        let a = storage.create_node(NewNode::new("A")).await.unwrap();

        assert!(matches!(
            storage.create_node(NewNode::new("A")).await,
            Err(StorageError::DuplicateNode(_))
        ));
        assert!(matches!(
            storage.create_edge(NewEdge::new(a.id, NodeId(7), 1.0)).await,
            Err(StorageError::DestinationNotFound(NodeId(7)))
        ));
        assert!(matches!(
            storage.create_edge(NewEdge::new(a.id, a.id, 0.0)).await,
            Err(StorageError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_sqlite_delete_node_cascades() {
        let storage = SqliteStorage::in_memory().unwrap();
        let a = storage.create_node(NewNode::new("A")).await.unwrap();
        let b = storage.create_node(NewNode::new("B")).await.unwrap();
        storage.create_edge(NewEdge::new(a.id, b.id, 1.0)).await.unwrap();
        storage.create_edge(NewEdge::new(b.id, a.id, 1.0)).await.unwrap();

        storage.delete_node(b.id).await.unwrap();

        assert!(storage.get_all_edges().await.unwrap().is_empty());
        assert_eq!(storage.get_all_nodes().await.unwrap(), vec![a]);
        assert!(matches!(
            storage.delete_node(b.id).await,
            Err(StorageError::NodeNotFound(_))
        ));
        assert!(matches!(
            storage.delete_edge(EdgeId(1)).await,
            Err(StorageError::EdgeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sqlite_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("graph.db");
        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.create_node(NewNode::new("Persisted")).await.unwrap();
        }
        let storage = SqliteStorage::open(&path).unwrap();
        let node = storage.get_node_by_name("Persisted").await.unwrap();
        assert_eq!(node.map(|n| n.id), Some(NodeId(1)));
    }
}
