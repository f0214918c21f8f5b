//! PathFinder Server - JSON HTTP API
//!
//! Exposes node/edge management and the BFS and shortest path queries over
//! axum. Query endpoints load a fresh snapshot from storage per request.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::{ApiError, ErrorBody};
pub use router::{create_router, run_server};
