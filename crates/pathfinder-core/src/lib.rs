//! PathFinder Core - Graph query engine
//!
//! This crate provides the node/edge types, the per-query adjacency view,
//! bounded breadth-first traversal and Dijkstra shortest path search. It
//! works on in-memory snapshots and never touches storage.

pub mod adjacency;
pub mod edge;
pub mod error;
pub mod graph;
pub mod limits;
pub mod node;
pub mod query;
pub mod traversal;

pub use adjacency::AdjacencyView;
pub use edge::{Edge, EdgeId, NewEdge};
pub use error::QueryError;
pub use graph::{Graph, NodeLookup};
pub use limits::ValidationError;
pub use node::{NewNode, Node, NodeId};
pub use query::{BfsQuery, PathQuery, QueryEngine};
pub use traversal::{PathResult, TraversalResult, UNBOUNDED_DEPTH};
