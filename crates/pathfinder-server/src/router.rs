//! Router construction and the serve loop

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get};
use axum::Router;
use pathfinder_storage::StorageBackend;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Maximum request body size (1MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Browser origins of the local dev frontends
const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the API router over a storage backend
pub fn create_router<S>(storage: Arc<S>) -> Router
where
    S: StorageBackend + ?Sized + 'static,
{
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/graph/nodes",
            get(handlers::list_nodes::<S>).post(handlers::create_node::<S>),
        )
        .route("/graph/nodes/:id", delete(handlers::delete_node::<S>))
        .route(
            "/graph/edges",
            get(handlers::list_edges::<S>).post(handlers::create_edge::<S>),
        )
        .route("/graph/edges/:id", delete(handlers::delete_edge::<S>))
        .route("/graph/bfs", get(handlers::bfs::<S>))
        .route("/graph/shortest-path", get(handlers::shortest_path::<S>))
        .with_state(storage)
        .layer(cors_layer())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve the API until the process is stopped
pub async fn run_server<S>(storage: Arc<S>, addr: &str) -> anyhow::Result<()>
where
    S: StorageBackend + ?Sized + 'static,
{
    let router = create_router(storage);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("PathFinder API listening on http://{}", listener.local_addr()?);
    tracing::info!("  Health check: http://{}/health", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pathfinder_core::{NewEdge, NewNode};
    use pathfinder_storage::MemoryStorage;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// A -10-> B, A -1-> C, C -1-> B, plus an isolated D
    async fn seeded() -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::new());
        let a = storage.create_node(NewNode::new("A")).await.unwrap();
        let b = storage.create_node(NewNode::new("B")).await.unwrap();
        let c = storage.create_node(NewNode::new("C")).await.unwrap();
        storage.create_node(NewNode::new("D")).await.unwrap();
        storage.create_edge(NewEdge::new(a.id, b.id, 10.0)).await.unwrap();
        storage.create_edge(NewEdge::new(a.id, c.id, 1.0)).await.unwrap();
        storage.create_edge(NewEdge::new(c.id, b.id, 1.0)).await.unwrap();
        storage
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(Arc::new(MemoryStorage::new()));
        let (status, body) = send(router, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn test_shortest_path_prefers_lighter_route() {
        let router = create_router(seeded().await);
        let (status, body) = send(router, get_req("/graph/shortest-path?src_id=1&dst_id=2")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"], json!([1, 3, 2]));
        assert_eq!(body["distance"], json!(2.0));
        assert_eq!(body["start_node"], json!(1));
        assert_eq!(body["end_node"], json!(2));
    }

    #[tokio::test]
    async fn test_shortest_path_errors() {
        let storage = seeded().await;

        let (status, body) = send(
            create_router(storage.clone()),
            get_req("/graph/shortest-path?src_id=1&dst_id=4"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_type"], "NoPathFound");

        let (status, body) = send(
            create_router(storage),
            get_req("/graph/shortest-path?src_id=99&dst_id=98"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_type"], "NodeNotFound");
        assert_eq!(body["error"], "Node with id 99 not found");
    }

    #[tokio::test]
    async fn test_bfs() {
        let storage = seeded().await;

        let (status, body) =
            send(create_router(storage.clone()), get_req("/graph/bfs?start_id=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["visited_nodes"], json!([1, 2, 3]));
        assert_eq!(body["max_depth"], json!(-1));

        let (status, body) = send(
            create_router(storage.clone()),
            get_req("/graph/bfs?start_id=1&max_depth=0"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["visited_nodes"], json!([1]));
        assert_eq!(body["max_depth"], json!(0));

        let (status, _) = send(
            create_router(storage.clone()),
            get_req("/graph/bfs?start_id=1&max_depth=20000"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(create_router(storage), get_req("/graph/bfs?start_id=42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_type"], "NodeNotFound");
    }

    #[tokio::test]
    async fn test_node_and_edge_crud() {
        let storage = Arc::new(MemoryStorage::new());

        let (status, a) = send(
            create_router(storage.clone()),
            json_req(Method::POST, "/graph/nodes", json!({ "name": "A" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(a, json!({ "id": 1, "name": "A" }));

        let (status, body) = send(
            create_router(storage.clone()),
            json_req(Method::POST, "/graph/nodes", json!({ "name": "A" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "BadRequest");

        send(
            create_router(storage.clone()),
            json_req(Method::POST, "/graph/nodes", json!({ "name": "B" })),
        )
        .await;

        let (status, _) = send(
            create_router(storage.clone()),
            json_req(
                Method::POST,
                "/graph/edges",
                json!({ "src_id": 1, "dst_id": 2, "weight": 0.0 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, edge) = send(
            create_router(storage.clone()),
            json_req(
                Method::POST,
                "/graph/edges",
                json!({ "src_id": 1, "dst_id": 2, "weight": 2.5 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(edge["weight"], json!(2.5));

        let (status, _) = send(
            create_router(storage.clone()),
            json_req(Method::DELETE, "/graph/nodes/2", Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, edges) = send(create_router(storage.clone()), get_req("/graph/edges")).await;
        assert_eq!(edges, json!([]));

        let (status, body) = send(
            create_router(storage),
            json_req(Method::DELETE, "/graph/edges/1", Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_type"], "NotFound");
    }
}
