//! CLI command implementations

pub mod completions;
pub mod config;
pub mod edge;
pub mod node;
pub mod query;
pub mod seed;
pub mod serve;
