//! Seed command: idempotent CSV import

use std::path::PathBuf;

use clap::Args;
use pathfinder_storage::seed::{load_edges_csv, load_nodes_csv};

use crate::output::{to_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct SeedArgs {
    /// CSV file with one node name per row
    #[arg(long)]
    pub nodes: PathBuf,

    /// CSV file with `src_name,dst_name,weight` columns
    #[arg(long)]
    pub edges: PathBuf,
}

pub async fn run(args: &SeedArgs, ctx: &AppContext) -> anyhow::Result<()> {
    for path in [&args.nodes, &args.edges] {
        if !path.exists() {
            anyhow::bail!("Seed file not found: {}", path.display());
        }
    }

    let nodes = load_nodes_csv(ctx.storage.as_ref(), &args.nodes).await?;
    let edges = load_edges_csv(ctx.storage.as_ref(), &args.edges).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            to_json(&serde_json::json!({ "nodes": nodes, "edges": edges }))?
        ),
        OutputFormat::Table => {
            ctx.say(format!(
                "Nodes: {} loaded, {} skipped, {} errors",
                nodes.loaded, nodes.skipped, nodes.errors
            ));
            ctx.say(format!(
                "Edges: {} loaded, {} skipped, {} errors",
                edges.loaded, edges.skipped, edges.errors
            ));
        }
    }

    Ok(())
}
