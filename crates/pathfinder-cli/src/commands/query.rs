//! Graph queries: bounded BFS and shortest path

use clap::Args;
use pathfinder_core::{BfsQuery, Graph, NodeId, PathQuery, QueryEngine};

use crate::output::{to_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct BfsArgs {
    /// Start node id or name
    pub start: String,

    /// Stop expanding below this depth (unbounded when omitted)
    #[arg(short, long)]
    pub max_depth: Option<u32>,
}

#[derive(Args)]
pub struct PathArgs {
    /// Source node id or name
    pub src: String,

    /// Destination node id or name
    pub dst: String,
}

fn label(graph: &Graph, id: NodeId) -> String {
    match graph.node(id) {
        Some(node) => node.name.clone(),
        None => id.to_string(),
    }
}

pub async fn run_bfs(args: &BfsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mut query = BfsQuery::new(ctx.query_node_id(&args.start).await?);
    if let Some(depth) = args.max_depth {
        query = query.with_depth(depth);
    }
    query.validate()?;

    let graph = ctx.storage.load_graph().await?;
    let result = QueryEngine::execute_bfs(&graph, &query)?;
    tracing::info!("BFS from {} visited {} nodes", query.start_id, result.visited_nodes.len());

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&result)?),
        OutputFormat::Table => {
            let depth = match result.depth_limit() {
                Some(depth) => depth.to_string(),
                None => "unbounded".to_string(),
            };
            ctx.say(format!(
                "BFS from {} (max depth: {}), {} visited:",
                label(&graph, result.start_node),
                depth,
                result.visited_nodes.len()
            ));
            for id in &result.visited_nodes {
                println!("  {} ({})", label(&graph, *id), id);
            }
        }
    }

    Ok(())
}

pub async fn run_path(args: &PathArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let query = PathQuery::new(
        ctx.query_node_id(&args.src).await?,
        ctx.query_node_id(&args.dst).await?,
    );

    let graph = ctx.storage.load_graph().await?;
    let result = QueryEngine::execute_path(&graph, &query)?;
    tracing::info!(
        "Shortest path {} -> {}: {} hops, distance {}",
        query.src_id,
        query.dst_id,
        result.hops(),
        result.distance
    );

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&result)?),
        OutputFormat::Table => {
            let names: Vec<String> = result.path.iter().map(|id| label(&graph, *id)).collect();
            println!("Path: {}", names.join(" -> "));
            println!("Distance: {}", result.distance);
        }
    }

    Ok(())
}
