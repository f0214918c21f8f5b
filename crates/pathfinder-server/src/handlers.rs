//! Route handlers
//!
//! Every handler is generic over the storage backend so the router can be
//! built on a concrete backend or on `dyn StorageBackend`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pathfinder_core::{
    BfsQuery, Edge, EdgeId, NewEdge, NewNode, Node, NodeId, PathQuery, PathResult, QueryEngine,
    TraversalResult,
};
use pathfinder_storage::StorageBackend;

use crate::error::ApiError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Service banner
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "PathFinder API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Liveness check
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

pub async fn create_node<S>(
    State(storage): State<Arc<S>>,
    Json(node): Json<NewNode>,
) -> ApiResult<(StatusCode, Json<Node>)>
where
    S: StorageBackend + ?Sized,
{
    let node = storage.create_node(node).await?;
    tracing::info!("Created node '{}' ({})", node.name, node.id);
    Ok((StatusCode::CREATED, Json(node)))
}

pub async fn list_nodes<S>(State(storage): State<Arc<S>>) -> ApiResult<Json<Vec<Node>>>
where
    S: StorageBackend + ?Sized,
{
    Ok(Json(storage.get_all_nodes().await?))
}

/// Deleting a node also removes every edge touching it
pub async fn delete_node<S>(
    State(storage): State<Arc<S>>,
    Path(id): Path<NodeId>,
) -> ApiResult<StatusCode>
where
    S: StorageBackend + ?Sized,
{
    storage.delete_node(id).await?;
    tracing::info!("Deleted node {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_edge<S>(
    State(storage): State<Arc<S>>,
    Json(edge): Json<NewEdge>,
) -> ApiResult<(StatusCode, Json<Edge>)>
where
    S: StorageBackend + ?Sized,
{
    let edge = storage.create_edge(edge).await?;
    tracing::info!(
        "Created edge {} ({} -> {}, weight {})",
        edge.id,
        edge.src_id,
        edge.dst_id,
        edge.weight
    );
    Ok((StatusCode::CREATED, Json(edge)))
}

pub async fn list_edges<S>(State(storage): State<Arc<S>>) -> ApiResult<Json<Vec<Edge>>>
where
    S: StorageBackend + ?Sized,
{
    Ok(Json(storage.get_all_edges().await?))
}

pub async fn delete_edge<S>(
    State(storage): State<Arc<S>>,
    Path(id): Path<EdgeId>,
) -> ApiResult<StatusCode>
where
    S: StorageBackend + ?Sized,
{
    storage.delete_edge(id).await?;
    tracing::info!("Deleted edge {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Bounded breadth-first traversal over a fresh snapshot
pub async fn bfs<S>(
    State(storage): State<Arc<S>>,
    Query(query): Query<BfsQuery>,
) -> ApiResult<Json<TraversalResult>>
where
    S: StorageBackend + ?Sized,
{
    query.validate()?;
    let graph = storage.load_graph().await?;
    let result = QueryEngine::execute_bfs(&graph, &query)?;
    Ok(Json(result))
}

/// Minimum-weight path over a fresh snapshot
pub async fn shortest_path<S>(
    State(storage): State<Arc<S>>,
    Query(query): Query<PathQuery>,
) -> ApiResult<Json<PathResult>>
where
    S: StorageBackend + ?Sized,
{
    let graph = storage.load_graph().await?;
    let result = QueryEngine::execute_path(&graph, &query)?;
    Ok(Json(result))
}
